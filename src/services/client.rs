//! Client service
//!
//! CRUD for clients. Deleting a client removes everything billed to it.

use tracing::info;

use crate::error::{BillingError, BillingResult};
use crate::models::{Client, ClientId};
use crate::storage::{CascadeReport, Storage};

/// Optional client fields, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct ClientDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

/// Service for client management
pub struct ClientService<'a> {
    storage: &'a Storage,
}

impl<'a> ClientService<'a> {
    /// Create a new client service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new client
    pub fn create(&self, name: &str, details: ClientDetails) -> BillingResult<Client> {
        let mut client = Client::new(name.trim());
        client.email = non_blank(details.email);
        client.phone = non_blank(details.phone);
        client.company = non_blank(details.company);
        client.notes = non_blank(details.notes);
        client.validate()?;

        self.storage.clients.upsert(client.clone())?;
        self.storage.clients.save()?;

        info!(client = %client.id, name = %client.name, "created client");
        Ok(client)
    }

    pub fn get(&self, id: ClientId) -> BillingResult<Option<Client>> {
        self.storage.clients.get(id)
    }

    /// Find a client by exact name (ignoring case), then by full or short ID
    pub fn find(&self, identifier: &str) -> BillingResult<Option<Client>> {
        let wanted = identifier.trim().to_lowercase();
        let mut by_name = self
            .storage
            .clients
            .filter(|c| c.name.to_lowercase() == wanted)?;

        match by_name.len() {
            0 => self.storage.clients.find_by_short_id(identifier.trim()),
            1 => Ok(by_name.pop()),
            n => Err(BillingError::Validation(format!(
                "{} clients are named '{}'; use the client ID",
                n, identifier
            ))),
        }
    }

    /// Like [`find`](Self::find), but a miss is an error
    pub fn resolve(&self, identifier: &str) -> BillingResult<Client> {
        self.find(identifier)?
            .ok_or_else(|| BillingError::client_not_found(identifier))
    }

    /// All clients, oldest first
    pub fn list(&self) -> BillingResult<Vec<Client>> {
        self.storage.clients.get_all()
    }

    /// Update a client; `None` leaves a field untouched, an empty string
    /// clears an optional field
    pub fn update(
        &self,
        id: ClientId,
        name: Option<&str>,
        details: ClientDetails,
    ) -> BillingResult<Client> {
        let mut client = self.storage.clients.get_required(id)?;

        if let Some(name) = name {
            client.name = name.trim().to_string();
        }
        if let Some(email) = details.email {
            client.email = non_blank(Some(email));
        }
        if let Some(phone) = details.phone {
            client.phone = non_blank(Some(phone));
        }
        if let Some(company) = details.company {
            client.company = non_blank(Some(company));
        }
        if let Some(notes) = details.notes {
            client.notes = non_blank(Some(notes));
        }

        client.validate()?;
        client.touch();

        self.storage.clients.upsert(client.clone())?;
        self.storage.clients.save()?;

        info!(client = %client.id, "updated client");
        Ok(client)
    }

    /// Delete a client and its payments, invoices and documents
    pub fn delete(&self, id: ClientId) -> BillingResult<CascadeReport> {
        self.storage.delete_client_cascade(id)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BilltrackPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilltrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_client() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);

        let client = service
            .create(
                "  Jane Doe ",
                ClientDetails {
                    email: Some("jane@example.com".into()),
                    company: Some("   ".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(client.name, "Jane Doe");
        assert_eq!(client.email.as_deref(), Some("jane@example.com"));
        assert!(client.company.is_none());
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);

        let err = service.create("  ", ClientDetails::default()).unwrap_err();
        assert!(err.is_validation());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_find_by_name_and_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        let client = service.create("Acme Corp", ClientDetails::default()).unwrap();

        assert_eq!(service.find("acme corp").unwrap().unwrap().id, client.id);
        assert_eq!(
            service.find(&client.id.to_string()).unwrap().unwrap().id,
            client.id
        );
        assert!(service.find("Globex").unwrap().is_none());
        assert!(service.resolve("Globex").unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_clears_optional_field() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        let client = service
            .create(
                "Jane",
                ClientDetails {
                    phone: Some("555-0100".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let updated = service
            .update(
                client.id,
                Some("Jane Smith"),
                ClientDetails {
                    phone: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Jane Smith");
        assert!(updated.phone.is_none());
    }
}
