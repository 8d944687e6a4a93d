//! Static HTML pages.

use std::path::Path;

/// Built-in index page, used when no template file is present.
pub const DEFAULT_INDEX_HTML: &str = include_str!("index.html");

/// Load the index page from `path`, falling back to [`DEFAULT_INDEX_HTML`].
pub async fn load_index_page(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(html) => {
            tracing::info!("Index page loaded from {}", path.display());
            html
        }
        Err(e) => {
            tracing::debug!(
                "Index template {} not readable ({}); using built-in page",
                path.display(),
                e
            );
            DEFAULT_INDEX_HTML.to_string()
        }
    }
}
