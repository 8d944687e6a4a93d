//! HTTP handlers.

pub mod upload;

pub use upload::*;

use crate::image::ImageService;
use crate::web::pages::DEFAULT_INDEX_HTML;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upload pipeline and blob access.
    pub images: ImageService,
    /// HTML served at `/`.
    pub index_html: String,
}

impl AppState {
    /// Create a new application state with the built-in index page.
    pub fn new(images: ImageService) -> Self {
        Self {
            images,
            index_html: DEFAULT_INDEX_HTML.to_string(),
        }
    }

    /// Replace the index page.
    pub fn with_index_html(mut self, html: impl Into<String>) -> Self {
        self.index_html = html.into();
        self
    }
}
