//! Document metadata
//!
//! Only the metadata of an uploaded file is tracked here. Owning the bytes,
//! uploads and signed links belongs to whatever file store holds them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ClientId, DocumentId};
use crate::error::{BillingError, BillingResult};

/// Metadata for a stored file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,

    /// Owning client; `None` for stand-alone files such as expense receipts
    #[serde(default)]
    pub client_id: Option<ClientId>,

    /// Original file name
    pub name: String,

    /// Location in the file store
    pub path: String,

    /// Size in bytes
    pub size: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    /// Create document metadata
    pub fn new(name: impl Into<String>, path: impl Into<String>, size: u64) -> BillingResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BillingError::Validation(
                "Document name cannot be empty".into(),
            ));
        }

        Ok(Self {
            id: DocumentId::new(),
            client_id: None,
            name,
            path: path.into(),
            size,
            category: None,
            uploaded_at: Utc::now(),
        })
    }

    /// Attach the document to a client
    pub fn for_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn is_standalone(&self) -> bool {
        self.client_id.is_none()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.size)
    }
}
