//! Image evidence attached to an argument submission.

use std::path::Path;

use crate::error::ApiError;

/// Binary image evidence sent as the `image` multipart field.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read an image from disk, inferring the content type from the
    /// file extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Attachment {
                file_name: file_name.clone(),
                reason: e.to_string(),
            })?;
        let content_type = content_type_for(path);
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub(crate) fn into_part(self) -> Result<reqwest::multipart::Part, ApiError> {
        let file_name = self.file_name;
        reqwest::multipart::Part::bytes(self.bytes)
            .file_name(file_name.clone())
            .mime_str(&self.content_type)
            .map_err(|e| ApiError::Attachment {
                file_name,
                reason: e.to_string(),
            })
    }
}

fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
