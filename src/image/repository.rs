//! Metadata store for image records.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::record::ImageRecord;
use crate::Result;

/// Append-only store of [`ImageRecord`]s.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Insert one record.
    ///
    /// Fails with [`crate::ImgdropError::StoreUnavailable`] when the backend
    /// cannot be reached.
    async fn insert(&self, record: &ImageRecord) -> Result<()>;
}

/// In-process repository, used for tests and running without MongoDB.
#[derive(Debug, Default)]
pub struct MemoryImageRepository {
    records: RwLock<Vec<ImageRecord>>,
}

impl MemoryImageRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all inserted records, in insertion order.
    pub async fn records(&self) -> Vec<ImageRecord> {
        self.records.read().await.clone()
    }

    /// Number of inserted records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no record has been inserted.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ImageRepository for MemoryImageRepository {
    async fn insert(&self, record: &ImageRecord) -> Result<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }
}
