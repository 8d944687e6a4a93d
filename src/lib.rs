//! imgdrop - image upload and retrieval service.
//!
//! Accepts image uploads over HTTP, stores the bytes on local disk under a
//! UUID-based name and records `{filename, url}` metadata in MongoDB.

pub mod config;
pub mod db;
pub mod error;
pub mod image;
pub mod logging;
pub mod web;

pub use config::Config;
pub use db::{Database, MongoImageRepository};
pub use error::{ImgdropError, Result};
pub use image::{
    generate_storage_name, is_allowed_filename, FileStorage, ImageRecord, ImageRepository,
    ImageService, MemoryImageRepository,
};
pub use web::handlers::AppState;
pub use web::WebServer;
