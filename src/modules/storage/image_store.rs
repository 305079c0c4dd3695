use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

/// Prefix inside the media root where ad images are stored.
const IMAGES_PREFIX: &str = "images";

/// Filesystem-backed store for ad images.
///
/// Stored references are relative paths like `images/<uuid>.<ext>`; public
/// URLs are built from the configured media base URL.
pub struct ImageStore {
    media_root: PathBuf,
    public_base_url: String,
}

impl ImageStore {
    pub async fn new(config: StorageConfig) -> Result<Self, AppError> {
        let media_root = PathBuf::from(&config.media_root);

        tokio::fs::create_dir_all(media_root.join(IMAGES_PREFIX))
            .await
            .map_err(|e| {
                AppError::Internal(format!(
                    "Failed to create media directory {}: {}",
                    config.media_root, e
                ))
            })?;

        Ok(Self {
            media_root,
            public_base_url: config.media_base_url,
        })
    }

    /// Directory the `/media` route serves from.
    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    /// Persist uploaded bytes and return the stored relative reference.
    ///
    /// The original filename only contributes its extension; the stored name
    /// is a fresh UUID so replacements never collide.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<String, AppError> {
        let key = format!("{}/{}", IMAGES_PREFIX, stored_name(original_name));
        let path = self.media_root.join(&key);

        tokio::fs::write(&path, data).await.map_err(|e| {
            tracing::error!("Failed to write {}: {}", path.display(), e);
            AppError::Internal("Failed to store uploaded image".to_string())
        })?;

        info!("Stored image {} ({} bytes)", key, data.len());
        Ok(key)
    }

    /// Remove a previously stored image. Missing files are ignored; the
    /// reference may outlive the file if the media root was cleaned.
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        let path = self.media_root.join(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Image {} already absent", key);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to delete {}: {}", path.display(), e);
                Err(AppError::Internal(
                    "Failed to delete stored image".to_string(),
                ))
            }
        }
    }

    /// Public URL for a stored reference.
    pub fn url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

fn stored_name(original_name: &str) -> String {
    let id = Uuid::new_v4();
    match Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) if !ext.is_empty() => format!("{}.{}", id, ext.to_lowercase()),
        _ => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_name_keeps_extension_lowercased() {
        let name = stored_name("Photo.JPG");
        assert!(name.ends_with(".jpg"));
        assert_eq!(name.len(), 36 + 4); // uuid + ".jpg"
    }

    #[test]
    fn stored_name_without_extension_is_bare_uuid() {
        let name = stored_name("photo");
        assert_eq!(name.len(), 36);
    }

    #[tokio::test]
    async fn save_url_and_delete_round_trip() {
        let dir = std::env::temp_dir().join(format!("adboard-test-{}", Uuid::new_v4()));
        let store = ImageStore::new(StorageConfig {
            media_root: dir.to_string_lossy().into_owned(),
            media_base_url: "http://localhost:3000/media".to_string(),
        })
        .await
        .unwrap();

        let key = store.save("cat.png", b"not-really-a-png").await.unwrap();
        assert!(key.starts_with("images/"));
        assert!(key.ends_with(".png"));
        assert_eq!(
            store.url(&key),
            format!("http://localhost:3000/media/{}", key)
        );

        let on_disk = store.media_root().join(&key);
        assert!(on_disk.exists());

        store.delete(&key).await.unwrap();
        assert!(!on_disk.exists());
        // Deleting again is not an error
        store.delete(&key).await.unwrap();

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
