//! Image metadata record.

use serde::{Deserialize, Serialize};

/// Metadata for one stored image.
///
/// Stored as `{filename, url}` in the metadata collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Generated storage name of the blob.
    pub filename: String,
    /// Public URL at which the blob can be fetched.
    pub url: String,
}

impl ImageRecord {
    /// Create a record for `stored_name`, composing its URL from `public_base`.
    pub fn new(stored_name: impl Into<String>, public_base: &str) -> Self {
        let filename = stored_name.into();
        let url = public_url_for(public_base, &filename);
        Self { filename, url }
    }
}

/// Public URL of a stored blob: `<base>/uploads/<stored_name>`.
pub fn public_url_for(public_base: &str, stored_name: &str) -> String {
    format!(
        "{}/uploads/{}",
        public_base.trim_end_matches('/'),
        stored_name
    )
}
