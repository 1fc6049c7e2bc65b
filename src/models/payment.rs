//! Payment model
//!
//! A payment is an amount owed by a client, tracked through the pending /
//! overdue / paid lifecycle. The status and the paid date move together: see
//! [`crate::billing::classifier`] for the transition rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{ClientId, DocumentId, PaymentId};
use super::money::Money;
use crate::billing::classifier;
use crate::error::{BillingError, BillingResult};

/// Lifecycle status of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Not yet paid, not yet flagged late
    #[default]
    Pending,
    /// Not yet paid and flagged late by the user
    Overdue,
    /// Settled
    Paid,
}

impl PaymentStatus {
    /// All statuses, in distribution-chart order
    pub const ALL: [PaymentStatus; 3] = [Self::Paid, Self::Pending, Self::Overdue];

    /// Pending and overdue payments are both still owed
    pub fn is_outstanding(&self) -> bool {
        matches!(self, Self::Pending | Self::Overdue)
    }

    /// Lowercase name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Overdue => "overdue",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.pad("Pending"),
            Self::Overdue => f.pad("Overdue"),
            Self::Paid => f.pad("Paid"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            "paid" => Ok(Self::Paid),
            other => Err(BillingError::InvalidStatus(format!(
                "'{}' (expected pending, overdue or paid)",
                other
            ))),
        }
    }
}

/// How often a recurring payment repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl FromStr for Frequency {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" | "bi-weekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" | "annually" => Ok(Self::Yearly),
            other => Err(BillingError::Validation(format!(
                "Invalid frequency '{}'. Valid: weekly, biweekly, monthly, quarterly, yearly",
                other
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Weekly => "Weekly",
            Self::Biweekly => "Biweekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        };
        f.pad(label)
    }
}

/// Recurrence metadata
///
/// Stored and displayed only; nothing expands it into future payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recurrence {
    pub is_recurring: bool,
    #[serde(default)]
    pub frequency: Option<Frequency>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Recurrence {
    /// A recurring schedule
    pub fn every(frequency: Frequency, end_date: Option<NaiveDate>) -> Self {
        Self {
            is_recurring: true,
            frequency: Some(frequency),
            end_date,
        }
    }
}

/// A payment owed by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,

    /// Owning client
    pub client_id: ClientId,

    amount: Money,

    #[serde(default)]
    status: PaymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    paid_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,

    /// Attached invoice document, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_document_id: Option<DocumentId>,

    /// When the payment was created
    pub created_at: DateTime<Utc>,

    /// When the payment was last modified
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Create a new pending payment
    pub fn new(client_id: ClientId, amount: Money) -> BillingResult<Self> {
        classifier::validate_amount(amount)?;

        let now = Utc::now();
        Ok(Self {
            id: PaymentId::new(),
            client_id,
            amount,
            status: PaymentStatus::Pending,
            description: None,
            due_date: None,
            paid_date: None,
            recurrence: None,
            invoice_document_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Create a payment already in the given status, as of `on`
    pub fn with_status(
        client_id: ClientId,
        amount: Money,
        status: PaymentStatus,
        on: NaiveDate,
    ) -> BillingResult<Self> {
        let mut payment = Self::new(client_id, amount)?;
        payment.set_status(status, on);
        Ok(payment)
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Date the payment was settled; `Some` iff the status is paid
    pub fn paid_date(&self) -> Option<NaiveDate> {
        self.paid_date
    }

    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }

    pub fn is_outstanding(&self) -> bool {
        self.status.is_outstanding()
    }

    /// Change the amount
    pub fn set_amount(&mut self, amount: Money) -> BillingResult<()> {
        classifier::validate_amount(amount)?;
        self.amount = amount;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Change the status, stamping or clearing the paid date
    ///
    /// `on` is the date of the transition, not the due date.
    pub fn set_status(&mut self, status: PaymentStatus, on: NaiveDate) {
        self.paid_date = classifier::paid_date_after(self.status, self.paid_date, status, on);
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Check that the stored status and paid date agree
    pub fn check_consistency(&self) -> BillingResult<()> {
        classifier::check_paid_date(self.status, self.paid_date)
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.amount,
            self.status,
            self.description.as_deref().unwrap_or("")
        )
    }
}
