//! Document service
//!
//! Registers file metadata. The file itself is only inspected for its size.

use std::path::Path;

use tracing::info;

use crate::error::{BillingError, BillingResult};
use crate::models::{ClientId, Document};
use crate::storage::Storage;

/// Service for document metadata
pub struct DocumentService<'a> {
    storage: &'a Storage,
}

impl<'a> DocumentService<'a> {
    /// Create a new document service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a file on disk, optionally owned by a client
    pub fn register(
        &self,
        path: &Path,
        client_id: Option<ClientId>,
        category: Option<String>,
    ) -> BillingResult<Document> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            BillingError::Io(format!("Cannot read {}: {}", path.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(BillingError::Validation(format!(
                "{} is not a file",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut document = Document::new(name, path.display().to_string(), metadata.len())?;
        if let Some(client_id) = client_id {
            if !self.storage.clients.exists(client_id)? {
                return Err(BillingError::client_not_found(client_id.to_string()));
            }
            document = document.for_client(client_id);
        }
        document.category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        self.storage.documents.upsert(document.clone())?;
        self.storage.documents.save()?;

        info!(document = %document.id, name = %document.name, size = document.size, "registered document");
        Ok(document)
    }

    /// All documents, or only those of one client
    pub fn list(&self, client_id: Option<ClientId>) -> BillingResult<Vec<Document>> {
        match client_id {
            Some(client_id) => self
                .storage
                .documents
                .filter(|d| d.client_id == Some(client_id)),
            None => self.storage.documents.get_all(),
        }
    }

    /// Resolve a document by full or short ID
    pub fn resolve(&self, identifier: &str) -> BillingResult<Document> {
        self.storage
            .documents
            .find_by_short_id(identifier)?
            .ok_or_else(|| BillingError::document_not_found(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BilltrackPaths;
    use crate::models::Client;
    use tempfile::TempDir;

    #[test]
    fn test_register_reads_size() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilltrackPaths::with_base_dir(temp_dir.path().join("store"));
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let client = Client::new("Acme");
        storage.clients.upsert(client.clone()).unwrap();

        let file = temp_dir.path().join("contract.pdf");
        std::fs::write(&file, b"12345").unwrap();

        let service = DocumentService::new(&storage);
        let doc = service.register(&file, Some(client.id), None).unwrap();

        assert_eq!(doc.name, "contract.pdf");
        assert_eq!(doc.size, 5);
        assert_eq!(service.list(Some(client.id)).unwrap().len(), 1);
        assert_eq!(service.resolve(&doc.id.to_string()).unwrap().id, doc.id);
    }

    #[test]
    fn test_register_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilltrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let service = DocumentService::new(&storage);

        let err = service
            .register(&temp_dir.path().join("nope.pdf"), None, None)
            .unwrap_err();
        assert!(matches!(err, BillingError::Io(_)));
    }
}
