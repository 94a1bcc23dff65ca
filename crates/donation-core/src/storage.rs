//! Upload directory storage for donation images

use std::path::{Path, PathBuf};

use crate::error::{DonationError, DonationResult};
use crate::models::UploadedImage;

/// Default upload directory, relative to the working directory
pub const DEFAULT_UPLOAD_DIR: &str = "static/uploads";

/// Fixed directory where submitted images are persisted.
///
/// Images are stored under the client-supplied filename. A later upload with
/// the same name replaces the earlier file; concurrent writers are not
/// coordinated.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory images are written to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if it does not exist. Safe to call repeatedly.
    pub fn ensure(&self) -> DonationResult<()> {
        std::fs::create_dir_all(&self.root)
            .map_err(|e| DonationError::storage(self.root.clone(), e))?;
        tracing::debug!(dir = %self.root.display(), "Upload directory ready");
        Ok(())
    }

    /// Resolve the on-disk path for a client-supplied filename.
    ///
    /// The name is used verbatim but must be a single plain path component.
    pub fn path_for(&self, filename: &str) -> DonationResult<PathBuf> {
        validate_filename(filename)?;
        Ok(self.root.join(filename))
    }

    /// Write the image into the directory, replacing any existing file with
    /// the same name. Returns the path written.
    pub async fn save(&self, image: &UploadedImage) -> DonationResult<PathBuf> {
        let path = self.path_for(&image.filename)?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DonationError::storage(self.root.clone(), e))?;
        tokio::fs::write(&path, &image.data)
            .await
            .map_err(|e| DonationError::storage(path.clone(), e))?;

        tracing::debug!(path = %path.display(), size = image.data.len(), "Image stored");
        Ok(path)
    }
}

impl Default for UploadDir {
    fn default() -> Self {
        Self::new(DEFAULT_UPLOAD_DIR)
    }
}

fn validate_filename(filename: &str) -> DonationResult<()> {
    let invalid = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(&['/', '\\', '\0'][..]);

    if invalid {
        return Err(DonationError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}
