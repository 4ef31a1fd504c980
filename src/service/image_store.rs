use crate::config::CUSTOMER_IMAGE_DIR;
use crate::error::DeskError;
use crate::types::forms::UploadedFile;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes customer images below the public directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the upload under its original file name (overwriting any existing
    /// file) and return the public path to store as `image_url`.
    pub async fn save(&self, file: &UploadedFile) -> Result<String, DeskError> {
        let name = file_name_of(&file.file_name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unusable upload file name: {:?}", file.file_name),
            )
        })?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.dir.join(name);
        tokio::fs::write(&target, &file.bytes).await?;

        info!(
            path = %target.display(),
            content_type = file.content_type.as_deref().unwrap_or("unknown"),
            bytes = file.bytes.len(),
            "customer image stored"
        );
        Ok(format!("/{CUSTOMER_IMAGE_DIR}/{name}"))
    }
}

/// Last path component of a client supplied name, if it is a plain file name.
fn file_name_of(raw: &str) -> Option<&str> {
    let normalized = raw.rsplit(['/', '\\']).next()?;
    match normalized {
        "" | "." | ".." => None,
        name => Some(name),
    }
}
