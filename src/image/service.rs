//! Image upload service.
//!
//! Runs the upload pipeline independent of HTTP:
//! validate name → check size → generate storage name → write blob →
//! insert metadata. The blob write and the metadata insert are not atomic;
//! if the insert fails the blob stays on disk without a record.

use std::sync::Arc;

use super::naming::generate_storage_name;
use super::record::ImageRecord;
use super::repository::ImageRepository;
use super::storage::FileStorage;
use super::validation::is_allowed_filename;
use super::DEFAULT_MAX_UPLOAD_SIZE;
use crate::{ImgdropError, Result};

/// Message returned when the uploaded part carries an empty filename.
pub const NO_SELECTED_FILE: &str = "No selected file";

/// Message returned when the filename extension is not an allowed image type.
pub const FILE_TYPE_NOT_ALLOWED: &str = "File type not allowed";

/// Image service tying the blob store and the metadata store together.
#[derive(Clone)]
pub struct ImageService {
    storage: FileStorage,
    repository: Arc<dyn ImageRepository>,
    public_base: String,
    max_upload_size: u64,
}

impl ImageService {
    /// Create a new ImageService.
    pub fn new(
        storage: FileStorage,
        repository: Arc<dyn ImageRepository>,
        public_base: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            repository,
            public_base: public_base.into().trim_end_matches('/').to_string(),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }

    /// Set the maximum accepted upload size in bytes.
    pub fn with_max_upload_size(mut self, max_bytes: u64) -> Self {
        self.max_upload_size = max_bytes;
        self
    }

    /// Maximum accepted upload size in bytes.
    pub fn max_upload_size(&self) -> u64 {
        self.max_upload_size
    }

    /// Public base URL, without trailing slash.
    pub fn public_base(&self) -> &str {
        &self.public_base
    }

    /// Underlying blob store.
    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    /// Check an upload without side effects.
    pub fn validate_upload(&self, filename: &str, size: u64) -> Result<()> {
        if filename.is_empty() {
            return Err(ImgdropError::Validation(NO_SELECTED_FILE.to_string()));
        }
        if !is_allowed_filename(filename) {
            return Err(ImgdropError::Validation(FILE_TYPE_NOT_ALLOWED.to_string()));
        }
        if size > self.max_upload_size {
            return Err(ImgdropError::TooLarge(self.max_upload_size));
        }
        Ok(())
    }

    /// Store an uploaded image and record its metadata.
    ///
    /// Returns the inserted record. Validation failures leave storage and
    /// metadata untouched.
    pub async fn upload(&self, filename: &str, content: &[u8]) -> Result<ImageRecord> {
        self.validate_upload(filename, content.len() as u64)?;

        let stored_name = generate_storage_name(filename);
        self.storage.save(&stored_name, content).await?;

        let record = ImageRecord::new(stored_name, &self.public_base);
        if let Err(e) = self.repository.insert(&record).await {
            tracing::error!(
                stored_name = %record.filename,
                error = %e,
                "Metadata insert failed; blob left without record"
            );
            return Err(e);
        }

        tracing::info!(
            stored_name = %record.filename,
            original_name = %filename,
            size = content.len(),
            "Image uploaded"
        );

        Ok(record)
    }

    /// Read a stored image by storage name.
    pub async fn fetch(&self, stored_name: &str) -> Result<Vec<u8>> {
        self.storage.load(stored_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::MemoryImageRepository;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct UnreachableRepository;

    #[async_trait]
    impl ImageRepository for UnreachableRepository {
        async fn insert(&self, _record: &ImageRecord) -> Result<()> {
            Err(ImgdropError::StoreUnavailable("connection refused".to_string()))
        }
    }

    async fn setup_service() -> (TempDir, Arc<MemoryImageRepository>, ImageService) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path()).await.unwrap();
        let repo = Arc::new(MemoryImageRepository::new());
        let service = ImageService::new(storage, repo.clone(), "http://127.0.0.1:5000/");
        (temp_dir, repo, service)
    }

    fn stored_file_count(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path()).unwrap().count()
    }

    #[tokio::test]
    async fn test_upload_stores_blob_and_record() {
        let (temp_dir, repo, service) = setup_service().await;

        let record = service.upload("photo.png", b"png bytes").await.unwrap();

        assert!(record.filename.ends_with(".png"));
        assert_eq!(
            record.url,
            format!("http://127.0.0.1:5000/uploads/{}", record.filename)
        );
        assert_eq!(repo.records().await, vec![record.clone()]);
        assert_eq!(
            std::fs::read(temp_dir.path().join(&record.filename)).unwrap(),
            b"png bytes"
        );
    }

    #[tokio::test]
    async fn test_fetch_round_trip() {
        let (_temp_dir, _repo, service) = setup_service().await;

        let record = service.upload("anim.GIF", b"GIF89a").await.unwrap();

        assert!(record.filename.ends_with(".GIF"));
        assert_eq!(service.fetch(&record.filename).await.unwrap(), b"GIF89a");
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_filename() {
        let (temp_dir, repo, service) = setup_service().await;

        let result = service.upload("", b"data").await;

        match result {
            Err(ImgdropError::Validation(msg)) => assert_eq!(msg, NO_SELECTED_FILE),
            other => panic!("Expected Validation error, got {other:?}"),
        }
        assert!(repo.is_empty().await);
        assert_eq!(stored_file_count(&temp_dir), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_disallowed_type() {
        let (temp_dir, repo, service) = setup_service().await;

        let result = service.upload("virus.exe", b"MZ").await;

        match result {
            Err(ImgdropError::Validation(msg)) => assert_eq!(msg, FILE_TYPE_NOT_ALLOWED),
            other => panic!("Expected Validation error, got {other:?}"),
        }
        assert!(repo.is_empty().await);
        assert_eq!(stored_file_count(&temp_dir), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_oversize() {
        let (temp_dir, repo, service) = setup_service().await;
        let service = service.with_max_upload_size(4);

        let result = service.upload("big.jpg", b"12345").await;

        assert!(matches!(result, Err(ImgdropError::TooLarge(4))));
        assert!(repo.is_empty().await);
        assert_eq!(stored_file_count(&temp_dir), 0);
    }

    #[tokio::test]
    async fn test_metadata_failure_leaves_orphaned_blob() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path()).await.unwrap();
        let service = ImageService::new(
            storage,
            Arc::new(UnreachableRepository),
            "http://127.0.0.1:5000",
        );

        let result = service.upload("photo.jpeg", b"jpeg").await;

        assert!(matches!(result, Err(ImgdropError::StoreUnavailable(_))));
        assert_eq!(stored_file_count(&temp_dir), 1);
    }

    #[tokio::test]
    async fn test_fetch_missing() {
        let (_temp_dir, _repo, service) = setup_service().await;

        let result = service.fetch("missing.png").await;

        assert!(matches!(result, Err(ImgdropError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_public_base_trimmed() {
        let (_temp_dir, _repo, service) = setup_service().await;

        assert_eq!(service.public_base(), "http://127.0.0.1:5000");
        assert_eq!(service.max_upload_size(), DEFAULT_MAX_UPLOAD_SIZE);
    }
}
