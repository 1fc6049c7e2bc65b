//! Point-in-time read of one account's records

use serde::{Deserialize, Serialize};

use crate::models::{Client, ClientId, Document, Expense, Invoice, Payment};

/// Every record of one account, as read in a single pass from storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountSnapshot {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl AccountSnapshot {
    /// The subset of this snapshot that belongs to one client
    ///
    /// Expenses are never client-scoped and stay out of the result.
    pub fn for_client(&self, client_id: ClientId) -> AccountSnapshot {
        AccountSnapshot {
            clients: self
                .clients
                .iter()
                .filter(|c| c.id == client_id)
                .cloned()
                .collect(),
            payments: self
                .payments
                .iter()
                .filter(|p| p.client_id == client_id)
                .cloned()
                .collect(),
            invoices: self
                .invoices
                .iter()
                .filter(|i| i.client_id == client_id)
                .cloned()
                .collect(),
            expenses: Vec::new(),
            documents: self
                .documents
                .iter()
                .filter(|d| d.client_id == Some(client_id))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_for_client_filters_everything() {
        let a = Client::new("A");
        let b = Client::new("B");
        let snapshot = AccountSnapshot {
            clients: vec![a.clone(), b.clone()],
            payments: vec![
                Payment::new(a.id, Money::from_cents(100)).unwrap(),
                Payment::new(b.id, Money::from_cents(200)).unwrap(),
            ],
            documents: vec![
                Document::new("a.pdf", "a.pdf", 1).unwrap().for_client(a.id),
                Document::new("r.pdf", "r.pdf", 1).unwrap(),
            ],
            ..Default::default()
        };

        let scoped = snapshot.for_client(a.id);
        assert_eq!(scoped.clients.len(), 1);
        assert_eq!(scoped.payments.len(), 1);
        assert_eq!(scoped.payments[0].amount(), Money::from_cents(100));
        assert_eq!(scoped.documents.len(), 1);
    }
}
