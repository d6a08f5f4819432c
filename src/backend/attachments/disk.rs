/**
 * Disk Attachment Store
 *
 * Writes uploads to `<root>/images/<uuid>-<name>` and hands back the
 * relative path `images/<uuid>-<name>`, which is also what `/images` serves.
 * Releases are spawned onto the tokio runtime so request handling never
 * waits on, or fails because of, a file deletion.
 */
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::backend::attachments::{
    is_safe_relative_path, normalize_path, sanitize_file_name, AttachmentError, AttachmentStore,
    UploadedImage, IMAGES_DIR,
};

/// Attachment store rooted at a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct DiskAttachmentStore {
    root: PathBuf,
}

impl DiskAttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding post images
    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    /// Resolve a stored relative path against the root
    pub fn resolve(&self, path: &str) -> Result<PathBuf, AttachmentError> {
        if !is_safe_relative_path(path) {
            return Err(AttachmentError::InvalidPath(path.to_string()));
        }
        let mut resolved = self.root.clone();
        for part in normalize_path(path).split('/') {
            resolved.push(part);
        }
        Ok(resolved)
    }

    /// Delete a stored file and wait for the result
    pub async fn remove(&self, path: &str) -> Result<(), AttachmentError> {
        let resolved = self.resolve(path)?;
        fs::remove_file(&resolved).await?;
        tracing::debug!("[Attachments] Deleted {}", resolved.display());
        Ok(())
    }
}

#[async_trait]
impl AttachmentStore for DiskAttachmentStore {
    async fn save(&self, upload: UploadedImage) -> Result<String, AttachmentError> {
        if !upload.is_accepted_type() {
            return Err(AttachmentError::UnsupportedType(upload.content_type));
        }

        let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(&upload.file_name));
        let dir = self.images_dir();
        fs::create_dir_all(&dir).await?;
        fs::write(dir.join(&file_name), &upload.bytes).await?;

        let relative = normalize_path(&format!("{}/{}", IMAGES_DIR, file_name));
        tracing::info!("[Attachments] Saved {} ({} bytes)", relative, upload.bytes.len());
        Ok(relative)
    }

    fn release(&self, path: &str) {
        let store = self.clone();
        let path = path.to_string();
        tokio::spawn(async move {
            if let Err(e) = store.remove(&path).await {
                tracing::warn!("[Attachments] Failed to delete {}: {}", path, e);
            }
        });
    }
}
