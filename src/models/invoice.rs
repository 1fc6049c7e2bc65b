//! Invoice model
//!
//! An invoice owns its ordered line items. Every monetary field on an
//! invoice (line amounts, subtotal, tax, total) is derived: line amounts come
//! from [`crate::billing::line_item::amount`] and the invoice totals from
//! [`crate::billing::totals::totals`]. Neither can be set directly, and both
//! are recomputed when an invoice is loaded, so stored values never drift
//! from their inputs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{ClientId, InvoiceId};
use super::money::Money;
use super::quantity::Quantity;
use super::tax_rate::TaxRate;
use crate::billing::line_item;
use crate::billing::totals::{self, InvoiceTotals};
use crate::error::{BillingError, BillingResult};

/// Status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [Self::Draft, Self::Sent, Self::Paid, Self::Cancelled];

    /// Cancelled invoices no longer count toward what a client was billed
    pub fn is_billable(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Lowercase name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Paid => "Paid",
            Self::Cancelled => "Cancelled",
        };
        f.pad(label)
    }
}

impl FromStr for InvoiceStatus {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "paid" => Ok(Self::Paid),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(BillingError::InvalidStatus(format!(
                "'{}' (expected draft, sent, paid or cancelled)",
                other
            ))),
        }
    }
}

/// One billed line on an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LineItemRecord")]
pub struct LineItem {
    pub description: String,
    quantity: Quantity,
    unit_price: Money,
    amount: Money,
}

/// Stored shape of a line item; the amount is recomputed on load
#[derive(Deserialize)]
struct LineItemRecord {
    description: String,
    quantity: Quantity,
    unit_price: Money,
}

impl TryFrom<LineItemRecord> for LineItem {
    type Error = BillingError;

    fn try_from(record: LineItemRecord) -> Result<Self, Self::Error> {
        Self::new(record.description, record.quantity, record.unit_price)
    }
}

impl LineItem {
    /// Create a line item, computing its amount
    pub fn new(
        description: impl Into<String>,
        quantity: Quantity,
        unit_price: Money,
    ) -> BillingResult<Self> {
        let amount = line_item::amount(quantity.value(), unit_price)?;
        Ok(Self {
            description: description.into(),
            quantity,
            unit_price,
            amount,
        })
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Extended amount: quantity x unit price, in cents
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Change the quantity and recompute the amount
    pub fn set_quantity(&mut self, quantity: Quantity) -> BillingResult<()> {
        self.amount = line_item::amount(quantity.value(), self.unit_price)?;
        self.quantity = quantity;
        Ok(())
    }

    /// Change the unit price and recompute the amount
    pub fn set_unit_price(&mut self, unit_price: Money) -> BillingResult<()> {
        self.amount = line_item::amount(self.quantity.value(), unit_price)?;
        self.unit_price = unit_price;
        Ok(())
    }
}

/// An invoice issued to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InvoiceRecord")]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,

    /// Billed client
    pub client_id: ClientId,

    /// Human-facing number, unique per account by convention
    pub invoice_number: String,

    pub issue_date: NaiveDate,

    pub due_date: NaiveDate,

    pub status: InvoiceStatus,

    tax_rate: TaxRate,

    items: Vec<LineItem>,

    #[serde(flatten)]
    totals: InvoiceTotals,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Stored shape of an invoice; totals are recomputed on load
#[derive(Deserialize)]
struct InvoiceRecord {
    id: InvoiceId,
    client_id: ClientId,
    invoice_number: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    #[serde(default)]
    status: InvoiceStatus,
    #[serde(default)]
    tax_rate: TaxRate,
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default)]
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRecord> for Invoice {
    type Error = BillingError;

    fn try_from(record: InvoiceRecord) -> Result<Self, Self::Error> {
        let totals = totals::totals(&record.items, record.tax_rate.percent())?;
        Ok(Self {
            id: record.id,
            client_id: record.client_id,
            invoice_number: record.invoice_number,
            issue_date: record.issue_date,
            due_date: record.due_date,
            status: record.status,
            tax_rate: record.tax_rate,
            items: record.items,
            totals,
            notes: record.notes,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl Invoice {
    /// Create an empty draft invoice
    pub fn new(
        client_id: ClientId,
        invoice_number: impl Into<String>,
        issue_date: NaiveDate,
        due_date: NaiveDate,
    ) -> BillingResult<Self> {
        let invoice_number = invoice_number.into().trim().to_string();
        if invoice_number.is_empty() {
            return Err(BillingError::Validation(
                "Invoice number cannot be empty".into(),
            ));
        }
        if due_date < issue_date {
            return Err(BillingError::Validation(format!(
                "Due date {} is before issue date {}",
                due_date, issue_date
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id: InvoiceId::new(),
            client_id,
            invoice_number,
            issue_date,
            due_date,
            status: InvoiceStatus::Draft,
            tax_rate: TaxRate::zero(),
            items: Vec::new(),
            totals: InvoiceTotals::default(),
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn totals(&self) -> InvoiceTotals {
        self.totals
    }

    pub fn subtotal(&self) -> Money {
        self.totals.subtotal
    }

    pub fn tax_amount(&self) -> Money {
        self.totals.tax_amount
    }

    pub fn total(&self) -> Money {
        self.totals.total
    }

    /// Replace the whole item set
    ///
    /// The new totals are computed before anything is swapped in, so on error
    /// the invoice keeps its previous items and totals.
    pub fn replace_items(&mut self, items: Vec<LineItem>) -> BillingResult<()> {
        let totals = totals::totals(&items, self.tax_rate.percent())?;
        self.items = items;
        self.totals = totals;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Append one item
    pub fn add_item(&mut self, item: LineItem) -> BillingResult<()> {
        let mut items = self.items.clone();
        items.push(item);
        self.replace_items(items)
    }

    /// Remove the item at `index` (0-based)
    pub fn remove_item(&mut self, index: usize) -> BillingResult<LineItem> {
        if index >= self.items.len() {
            return Err(BillingError::Validation(format!(
                "Invoice {} has no line {}",
                self.invoice_number,
                index + 1
            )));
        }
        let mut items = self.items.clone();
        let removed = items.remove(index);
        self.replace_items(items)?;
        Ok(removed)
    }

    /// Change the tax rate and recompute totals
    pub fn set_tax_rate(&mut self, tax_rate: TaxRate) -> BillingResult<()> {
        let totals = totals::totals(&self.items, tax_rate.percent())?;
        self.tax_rate = tax_rate;
        self.totals = totals;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_status(&mut self, status: InvoiceStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} ({})",
            self.invoice_number,
            self.issue_date.format("%Y-%m-%d"),
            self.totals.total,
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(desc: &str, qty: u32, cents: i64) -> LineItem {
        LineItem::new(desc, Quantity::whole(qty).unwrap(), Money::from_cents(cents)).unwrap()
    }

    fn draft() -> Invoice {
        Invoice::new(ClientId::new(), "INV-001", day(2024, 3, 1), day(2024, 3, 31)).unwrap()
    }

    #[test]
    fn test_line_item_recomputes_on_edit() {
        let mut line = item("Consulting", 2, 1000);
        assert_eq!(line.amount(), Money::from_cents(2000));

        line.set_quantity(Quantity::new(dec!(1.5)).unwrap()).unwrap();
        assert_eq!(line.amount(), Money::from_cents(1500));

        line.set_unit_price(Money::from_cents(3333)).unwrap();
        // 1.5 * 33.33 = 49.995 -> 50.00 (half to even)
        assert_eq!(line.amount(), Money::from_cents(5000));

        assert!(matches!(
            line.set_unit_price(Money::from_cents(-1)),
            Err(BillingError::InvalidPrice(_))
        ));
        assert_eq!(line.unit_price(), Money::from_cents(3333));
    }

    #[test]
    fn test_invoice_totals_follow_items_and_rate() {
        let mut invoice = draft();
        assert_eq!(invoice.total(), Money::zero());

        invoice
            .replace_items(vec![item("A", 2, 1000), item("B", 1, 500)])
            .unwrap();
        invoice.set_tax_rate(TaxRate::new(dec!(10)).unwrap()).unwrap();

        assert_eq!(invoice.subtotal(), Money::from_cents(2500));
        assert_eq!(invoice.tax_amount(), Money::from_cents(250));
        assert_eq!(invoice.total(), Money::from_cents(2750));

        invoice.remove_item(1).unwrap();
        assert_eq!(invoice.subtotal(), Money::from_cents(2000));
        assert_eq!(invoice.total(), Money::from_cents(2200));

        invoice.add_item(item("C", 3, 100)).unwrap();
        assert_eq!(invoice.items().len(), 2);
        assert_eq!(invoice.subtotal(), Money::from_cents(2300));
    }

    #[test]
    fn test_replace_items_discards_old_set() {
        let mut invoice = draft();
        invoice.replace_items(vec![item("Old", 1, 9900)]).unwrap();
        invoice.replace_items(vec![item("New", 1, 100)]).unwrap();

        assert_eq!(invoice.items().len(), 1);
        assert_eq!(invoice.items()[0].description, "New");
        assert_eq!(invoice.subtotal(), Money::from_cents(100));
    }

    #[test]
    fn test_remove_missing_line() {
        let mut invoice = draft();
        assert!(invoice.remove_item(0).is_err());
    }

    #[test]
    fn test_new_invoice_validation() {
        let client = ClientId::new();
        assert!(Invoice::new(client, "  ", day(2024, 1, 1), day(2024, 1, 2)).is_err());
        assert!(Invoice::new(client, "INV-1", day(2024, 1, 2), day(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("canceled".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Cancelled);
        assert!(matches!(
            "void".parse::<InvoiceStatus>(),
            Err(BillingError::InvalidStatus(_))
        ));
    }

    #[test]
    fn test_load_recomputes_stale_totals() {
        let mut invoice = draft();
        invoice.replace_items(vec![item("A", 2, 1000)]).unwrap();

        let mut json: serde_json::Value = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["total"], serde_json::json!(2000));

        // Tamper with the derived fields; they must not survive a reload
        json["total"] = serde_json::json!(1);
        json["subtotal"] = serde_json::json!(1);
        json["items"][0]["amount"] = serde_json::json!(1);

        let loaded: Invoice = serde_json::from_value(json).unwrap();
        assert_eq!(loaded.total(), Money::from_cents(2000));
        assert_eq!(loaded.items()[0].amount(), Money::from_cents(2000));
        assert_eq!(loaded, invoice);
    }

    #[test]
    fn test_load_rejects_invalid_tax_rate() {
        let invoice = draft();
        let mut json = serde_json::to_value(&invoice).unwrap();
        json["tax_rate"] = serde_json::json!("150");
        assert!(serde_json::from_value::<Invoice>(json).is_err());
    }
}
