//! MongoDB client and image collection.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Client, Collection};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::image::{ImageRecord, ImageRepository};
use crate::{ImgdropError, Result};

/// Server selection and connect timeouts appended to the connection string.
const TIMEOUT_OPTIONS: &str = "serverSelectionTimeoutMS=3000&connectTimeoutMS=3000";

/// Append the timeout options to a MongoDB URI.
fn with_timeouts(uri: &str) -> String {
    if uri.contains('?') {
        format!("{uri}&{TIMEOUT_OPTIONS}")
    } else {
        format!("{uri}?{TIMEOUT_OPTIONS}")
    }
}

/// Connected MongoDB database handle.
///
/// Construct once at startup with [`Database::connect`]; call
/// [`Database::shutdown`] when the server stops.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    /// Connect and verify the server answers a ping.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        info!("Connecting to MongoDB at {}", uri);

        let client = Client::with_uri_str(with_timeouts(uri)).await.map_err(|e| {
            ImgdropError::StoreUnavailable(format!("Failed to connect to MongoDB: {e}"))
        })?;

        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ImgdropError::StoreUnavailable(format!("MongoDB ping failed: {e}")))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Connect using the `[database]` section of the configuration.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::connect(&config.uri, &config.name).await
    }

    /// Repository over the named image collection.
    pub fn images(&self, collection: &str) -> MongoImageRepository {
        MongoImageRepository {
            inner: self.client.database(&self.db_name).collection(collection),
        }
    }

    /// Get the database name.
    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    /// Close the client's connection pools.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("MongoDB client shut down");
    }
}

/// Image metadata stored in a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoImageRepository {
    inner: Collection<ImageRecord>,
}

impl MongoImageRepository {
    /// Name of the backing collection.
    pub fn collection_name(&self) -> &str {
        self.inner.name()
    }
}

#[async_trait]
impl ImageRepository for MongoImageRepository {
    async fn insert(&self, record: &ImageRecord) -> Result<()> {
        self.inner
            .insert_one(record)
            .await
            .map_err(|e| ImgdropError::StoreUnavailable(format!("Insert failed: {e}")))?;
        Ok(())
    }
}
