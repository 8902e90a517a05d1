//! Local upload directory for todo photos

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use crate::error::TodoFeatureError;
use crate::input::PhotoUpload;

/// Subdirectory of the upload root that holds photos
pub const PHOTO_DIR: &str = "photos";

/// Stores photos as `<root>/photos/<uuid>.<ext>` and hands out the path
/// relative to `root`
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an upload to disk and return its stored relative path
    pub async fn save(&self, upload: &PhotoUpload) -> Result<String, TodoFeatureError> {
        let file_name = match extension_of(upload) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let stored = format!("{PHOTO_DIR}/{file_name}");

        let full_path = self.full_path(&stored);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&full_path, &upload.bytes).await?;

        Ok(stored)
    }

    /// Remove a stored photo. Failures are logged, never returned.
    pub async fn remove(&self, stored: &str) {
        let full_path = self.full_path(stored);
        match fs::remove_file(&full_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %full_path.display(), error = %e, "Failed to remove photo"),
        }
    }

    /// Resolve a stored path under `root`, dropping traversal components
    fn full_path(&self, stored: &str) -> PathBuf {
        let relative: PathBuf = stored
            .split('/')
            .filter(|c| !c.is_empty() && *c != "." && *c != "..")
            .collect();
        self.root.join(relative)
    }
}

/// Extensions a stored photo may carry; anything else is stored without one
const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "avif", "heic", "heif", "tif", "tiff",
];

/// Extension for a stored photo: the client file name's, else the declared
/// content subtype, and only if it is a known raster image extension
fn extension_of(upload: &PhotoUpload) -> Option<String> {
    let from_name = upload
        .file_name
        .as_deref()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext);
    let from_type = upload
        .content_type
        .as_deref()
        .and_then(|ct| ct.split(';').next())
        .and_then(|ct| ct.trim().strip_prefix("image/"));

    [from_name, from_type]
        .into_iter()
        .flatten()
        .map(str::to_ascii_lowercase)
        .find(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
