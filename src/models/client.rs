//! Client model
//!
//! A client is the party payments and invoices are billed against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ClientId;
use crate::error::{BillingError, BillingResult};

/// Maximum length of a client name
const MAX_NAME_LEN: usize = 200;

/// A billed client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier
    pub id: ClientId,

    /// Display name (required)
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// When the client was created
    pub created_at: DateTime<Utc>,

    /// When the client was last modified
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Create a new client with only a name
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ClientId::new(),
            name: name.into(),
            email: None,
            phone: None,
            company: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the client as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the client
    pub fn validate(&self) -> BillingResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(BillingError::Validation(
                "Client name cannot be empty".into(),
            ));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(BillingError::Validation(format!(
                "Client name too long ({} > {} characters)",
                name.len(),
                MAX_NAME_LEN
            )));
        }
        if let Some(email) = self.email.as_deref() {
            if !email.contains('@') {
                return Err(BillingError::Validation(format!(
                    "Invalid email address: {}",
                    email
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.company {
            Some(company) => write!(f, "{} ({})", self.name, company),
            None => write!(f, "{}", self.name),
        }
    }
}
