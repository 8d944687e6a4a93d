//! Image upload module for imgdrop.
//!
//! This module provides:
//! - Filename extension allow-listing
//! - UUID-based storage names
//! - Flat-directory blob storage
//! - The metadata repository abstraction
//! - The upload service combining them

mod naming;
mod record;
mod repository;
mod service;
mod storage;
mod validation;

pub use naming::{generate_storage_name, is_safe_storage_name, storage_extension};
pub use record::{public_url_for, ImageRecord};
pub use repository::{ImageRepository, MemoryImageRepository};
pub use service::{ImageService, FILE_TYPE_NOT_ALLOWED, NO_SELECTED_FILE};
pub use storage::FileStorage;
pub use validation::is_allowed_filename;

/// Image extensions accepted for upload (lowercase, without the dot).
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Default maximum upload size (5MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 5 * 1024 * 1024;
