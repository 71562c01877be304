//! Asset uploader - stores admin-uploaded images under the public root.
//!
//! Uploaded files are never deleted: removing a reference from the content
//! document leaves the file in place.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::UploadError;

/// Largest accepted upload (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// URL prefix under which uploads are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Debug, Clone)]
pub struct AssetUploader {
    root: PathBuf,
}

impl AssetUploader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate and persist an image, returning its public path.
    ///
    /// # Process
    ///
    /// 1. Reject payloads over 5 MiB
    /// 2. Reject MIME types outside `image/*`
    /// 3. Name the file `<uuid v4><original extension>`
    /// 4. Create the upload directory if needed and write the bytes
    ///
    /// # Returns
    ///
    /// A relative URL such as `/uploads/2f1c...e9.png`.
    pub async fn store(
        &self,
        bytes: &[u8],
        file_name: &str,
        mime_type: &str,
    ) -> Result<String, UploadError> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge);
        }
        if !is_image(mime_type) {
            return Err(UploadError::InvalidType);
        }

        let unique_name = format!("{}{}", Uuid::new_v4(), extension_of(file_name));

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&unique_name), bytes).await?;

        let public_path = format!("{PUBLIC_PREFIX}/{unique_name}");
        tracing::info!(path = %public_path, size = bytes.len(), "file uploaded");
        Ok(public_path)
    }
}

fn is_image(mime_type: &str) -> bool {
    mime_type
        .trim()
        .to_ascii_lowercase()
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
}

/// Original extension including the dot, reduced to a safe form.
///
/// Anything that is not a short alphanumeric extension is dropped so a
/// crafted name cannot influence the stored path.
fn extension_of(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    match base.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= 10
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => String::new(),
    }
}
