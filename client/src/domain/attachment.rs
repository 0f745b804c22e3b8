//! Binary files attached to create requests by the upload widgets.

use std::fmt;

use thiserror::Error;

/// Largest image accepted by the product upload widget.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Reasons an upload is refused before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentValidationError {
    /// The file name was blank.
    #[error("file name must not be empty")]
    EmptyFileName,
    /// The file had no content.
    #[error("file must not be empty")]
    EmptyFile,
    /// The content type is not an image type.
    #[error("expected an image file, got {content_type}")]
    NotAnImage {
        /// Declared content type.
        content_type: String,
    },
    /// The file exceeds the size limit.
    #[error("file is {size} bytes; the limit is {max} bytes")]
    TooLarge {
        /// Actual size.
        size: usize,
        /// Allowed size.
        max: usize,
    },
}

/// A file to upload alongside a create payload.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl Attachment {
    /// Wrap a file without validating it.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Wrap an image file, enforcing the upload widget's rules.
    ///
    /// # Examples
    /// ```
    /// use client::domain::{Attachment, AttachmentValidationError};
    ///
    /// let png = Attachment::image("hall.png", "image/png", vec![0x89, 0x50]).expect("valid image");
    /// assert_eq!(png.len(), 2);
    ///
    /// let pdf = Attachment::image("terms.pdf", "application/pdf", vec![1]);
    /// assert!(matches!(pdf, Err(AttachmentValidationError::NotAnImage { .. })));
    /// ```
    pub fn image(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<Self, AttachmentValidationError> {
        let attachment = Self::new(file_name, content_type, bytes);
        attachment.validate_image()?;
        Ok(attachment)
    }

    /// Check the image rules against this attachment.
    pub fn validate_image(&self) -> Result<(), AttachmentValidationError> {
        if self.file_name.trim().is_empty() {
            return Err(AttachmentValidationError::EmptyFileName);
        }
        if !self.is_image() {
            return Err(AttachmentValidationError::NotAnImage {
                content_type: self.content_type.clone(),
            });
        }
        if self.bytes.is_empty() {
            return Err(AttachmentValidationError::EmptyFile);
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(AttachmentValidationError::TooLarge {
                size: self.bytes.len(),
                max: MAX_IMAGE_BYTES,
            });
        }
        Ok(())
    }

    /// Whether the declared content type is an image type.
    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }

    /// Original file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Declared MIME type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// File content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::blank_name(" ", "image/png", 10, AttachmentValidationError::EmptyFileName)]
    #[case::empty("a.png", "image/png", 0, AttachmentValidationError::EmptyFile)]
    #[case::too_large(
        "a.png",
        "image/png",
        MAX_IMAGE_BYTES + 1,
        AttachmentValidationError::TooLarge { size: MAX_IMAGE_BYTES + 1, max: MAX_IMAGE_BYTES }
    )]
    #[case::not_image(
        "a.txt",
        "text/plain",
        10,
        AttachmentValidationError::NotAnImage { content_type: "text/plain".to_owned() }
    )]
    fn rejects_invalid_images(
        #[case] name: &str,
        #[case] content_type: &str,
        #[case] size: usize,
        #[case] expected: AttachmentValidationError,
    ) {
        let result = Attachment::image(name, content_type, vec![0_u8; size]);
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn content_type_check_ignores_case() {
        let attachment = Attachment::new("a.JPG", "IMAGE/JPEG", vec![1, 2, 3]);
        assert!(attachment.validate_image().is_ok());
    }

    #[test]
    fn debug_output_omits_bytes() {
        let attachment = Attachment::new("a.png", "image/png", vec![7; 4]);
        let rendered = format!("{attachment:?}");
        assert!(rendered.contains("len: 4"));
        assert!(!rendered.contains("[7"));
    }
}
