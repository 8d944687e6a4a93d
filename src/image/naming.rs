//! Storage name generation.
//!
//! Stored blobs are named `<uuid v4><original extension>`, for example
//! `3f2b9a4e-6c1d-4f0a-9b7e-2d5c8a1e0f34.png`. Generated names never contain
//! a path separator.

use uuid::Uuid;

/// Extension of `filename` including the leading dot, case preserved.
///
/// Returns an empty string when there is no `.` or when the suffix contains
/// a path separator.
pub fn storage_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => {
            let ext = &filename[idx..];
            if ext.contains(['/', '\\', '\0']) {
                ""
            } else {
                ext
            }
        }
        None => "",
    }
}

/// Generate a new storage name for an uploaded file.
pub fn generate_storage_name(original_name: &str) -> String {
    let uuid = Uuid::new_v4();
    format!("{}{}", uuid, storage_extension(original_name))
}

/// Whether `name` is a single, plain path component safe to join onto the
/// upload directory.
pub fn is_safe_storage_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains(['/', '\\', '\0'])
}
