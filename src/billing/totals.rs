//! Invoice totals
//!
//! The only place an invoice's subtotal, tax amount and total are computed.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::BillingResult;
use crate::models::{LineItem, Money, TaxRate};

/// Derived monetary fields of one invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub tax_amount: Money,
    pub total: Money,
}

/// Aggregate line items and a flat tax rate (in percent) into invoice totals
///
/// An empty item list is a valid draft and yields all zeros. A rate outside
/// [0, 100] fails with `InvalidTaxRate`.
pub fn totals(items: &[LineItem], tax_rate_percent: Decimal) -> BillingResult<InvoiceTotals> {
    let rate = TaxRate::new(tax_rate_percent)?;

    let subtotal = Money::try_sum(items.iter().map(LineItem::amount))?;
    let tax_amount = subtotal.mul_decimal(rate.fraction())?;
    let total = subtotal.checked_add(tax_amount)?;

    debug!(
        items = items.len(),
        %subtotal,
        %tax_amount,
        %total,
        "computed invoice totals"
    );

    Ok(InvoiceTotals {
        subtotal,
        tax_amount,
        total,
    })
}
