//! Attachment Module
//!
//! Lifecycle of the image files attached to posts.
//!
//! # Module Structure
//!
//! ```text
//! attachments/
//! ├── mod.rs   - AttachmentStore trait, upload type, path helpers
//! └── disk.rs  - Filesystem implementation under the upload root
//! ```
//!
//! # Ordering
//!
//! Callers must only `release` or `replace` a path after the store write that
//! removed its last reference has committed. Releasing is fire-and-forget:
//! failures are logged by the implementation and never reach the caller.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Filesystem implementation
pub mod disk;

pub use disk::DiskAttachmentStore;

/// Directory (relative to the upload root) that holds post images
pub const IMAGES_DIR: &str = "images";

/// Content types accepted for post images
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpg", "image/jpeg"];

/// An uploaded image, already read from the request
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn is_accepted_type(&self) -> bool {
        is_accepted_image_type(&self.content_type)
    }
}

/// Errors raised while saving an attachment
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("attachment path rejected: {0}")]
    InvalidPath(String),

    #[error("attachment I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage for post images
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Persist an upload and return its `/`-separated relative path
    async fn save(&self, upload: UploadedImage) -> Result<String, AttachmentError>;

    /// Delete a file that is no longer referenced, in the background
    fn release(&self, path: &str);

    /// Release `old_path` if a committed update moved the post to `new_path`
    fn replace(&self, old_path: &str, new_path: &str) {
        if old_path != new_path {
            self.release(old_path);
        }
    }
}

pub fn is_accepted_image_type(content_type: &str) -> bool {
    let content_type = content_type.trim().to_ascii_lowercase();
    ACCEPTED_IMAGE_TYPES.contains(&content_type.as_str())
}

/// Convert any platform separators to the `/` used in published paths
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Reduce an uploaded file name to a safe single path component
pub fn sanitize_file_name(name: &str) -> String {
    let normalized = normalize_path(name);
    let base = normalized.rsplit('/').next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Check that a stored reference stays inside the upload root
pub fn is_safe_relative_path(path: &str) -> bool {
    let normalized = normalize_path(path);
    !normalized.is_empty()
        && !normalized.starts_with('/')
        && !normalized.contains(':')
        && normalized.split('/').all(|part| part != ".." && !part.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_normalize_replaces_every_backslash() {
        assert_eq!(normalize_path(r"images\2024\a.png"), "images/2024/a.png");
        assert_eq!(normalize_path("images/a.png"), "images/a.png");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("cat photo.png"), "cat-photo.png");
        assert_eq!(sanitize_file_name(r"..\..\etc\passwd"), "passwd");
        assert_eq!(sanitize_file_name("../../.env"), "env");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[test]
    fn test_safe_relative_paths() {
        assert!(is_safe_relative_path("images/a.png"));
        assert!(is_safe_relative_path(r"images\a.png"));
        assert!(!is_safe_relative_path("../secret.png"));
        assert!(!is_safe_relative_path("images/../../x"));
        assert!(!is_safe_relative_path("/etc/passwd"));
        assert!(!is_safe_relative_path(r"C:\images\a.png"));
        assert!(!is_safe_relative_path(""));
    }

    #[test]
    fn test_accepted_types() {
        assert!(is_accepted_image_type("image/png"));
        assert!(is_accepted_image_type("IMAGE/JPEG"));
        assert!(!is_accepted_image_type("image/gif"));
        assert!(!is_accepted_image_type("text/plain"));
    }

    #[derive(Default)]
    struct Recorder {
        released: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AttachmentStore for Recorder {
        async fn save(&self, upload: UploadedImage) -> Result<String, AttachmentError> {
            Ok(format!("{}/{}", IMAGES_DIR, upload.file_name))
        }

        fn release(&self, path: &str) {
            self.released.lock().unwrap().push(path.to_string());
        }
    }

    #[test]
    fn test_replace_skips_unchanged_path() {
        let recorder = Recorder::default();
        recorder.replace("images/a.png", "images/a.png");
        assert!(recorder.released.lock().unwrap().is_empty());

        recorder.replace("images/a.png", "images/b.png");
        assert_eq!(*recorder.released.lock().unwrap(), vec!["images/a.png".to_string()]);
    }
}
