//! Upload filename checks.

use super::ALLOWED_EXTENSIONS;

/// Whether `filename` carries an allowed image extension.
///
/// The extension is the text after the last `.`, compared case-insensitively
/// against [`ALLOWED_EXTENSIONS`]. A filename without any `.` is rejected.
pub fn is_allowed_filename(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}
