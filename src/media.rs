//! Image formats, uploaded-image data, and data URL handling.

use crate::error::{GardenError, Result};

/// Image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
}

impl ImageFormat {
    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// An image the user supplied as the starting point for an edit.
///
/// Held until consumed by a prompt derivation call, replaced by a new
/// upload, or cleared by a reset or fresh generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Base64-encoded image payload (no data URL prefix).
    pub base64: String,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Full `data:<mime>;base64,<payload>` string, ready for display.
    pub data_url: String,
}

impl UploadedImage {
    /// Builds an uploaded image from raw bytes, detecting the format from
    /// magic bytes. Fails with [`GardenError::FileFormat`] when the content
    /// is not a recognized image type.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        use base64::Engine;

        let format = ImageFormat::from_magic_bytes(data).ok_or(GardenError::FileFormat)?;
        let base64 = base64::engine::general_purpose::STANDARD.encode(data);
        let mime_type = format.mime_type().to_string();
        let data_url = format!("data:{};base64,{}", mime_type, base64);
        Ok(Self {
            base64,
            mime_type,
            data_url,
        })
    }

    /// Parses a `data:<mime>;base64,<payload>` string.
    ///
    /// The MIME type is extracted from the `:`/`;` delimited header; a
    /// header missing either delimiter fails with
    /// [`GardenError::FileFormat`].
    pub fn from_data_url(data_url: &str) -> Result<Self> {
        let (header, base64) = data_url.split_once(',').ok_or(GardenError::FileFormat)?;

        let colon = header.find(':').ok_or(GardenError::FileFormat)?;
        let semi = header[colon + 1..]
            .find(';')
            .ok_or(GardenError::FileFormat)?;
        let mime_type = &header[colon + 1..colon + 1 + semi];
        if mime_type.is_empty() {
            return Err(GardenError::FileFormat);
        }

        Ok(Self {
            base64: base64.to_string(),
            mime_type: mime_type.to_string(),
            data_url: data_url.to_string(),
        })
    }
}

/// Formats base64 JPEG bytes as a displayable data URL.
pub(crate) fn jpeg_data_url(base64: &str) -> String {
    format!("data:image/jpeg;base64,{}", base64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"plain text here"), None);
        assert_eq!(ImageFormat::from_magic_bytes(&[0xFF]), None);
    }

    #[test]
    fn test_from_bytes_builds_data_url() {
        let img = UploadedImage::from_bytes(&PNG_MAGIC).unwrap();
        assert_eq!(img.mime_type, "image/png");
        assert!(img.data_url.starts_with("data:image/png;base64,"));
        assert!(img.data_url.ends_with(&img.base64));
    }

    #[test]
    fn test_from_bytes_unknown_content() {
        let err = UploadedImage::from_bytes(b"not an image at all").unwrap_err();
        assert!(matches!(err, GardenError::FileFormat));
    }

    #[test]
    fn test_from_data_url() {
        let img = UploadedImage::from_data_url("data:image/png;base64,ABC123").unwrap();
        assert_eq!(img.mime_type, "image/png");
        assert_eq!(img.base64, "ABC123");
        assert_eq!(img.data_url, "data:image/png;base64,ABC123");
    }

    #[test]
    fn test_from_data_url_missing_mime_delimiter() {
        // No `;` in the header, so the MIME section cannot be extracted.
        let err = UploadedImage::from_data_url("data:image/png,ABC123").unwrap_err();
        assert!(matches!(err, GardenError::FileFormat));
    }

    #[test]
    fn test_from_data_url_missing_comma() {
        let err = UploadedImage::from_data_url("data:image/png;base64").unwrap_err();
        assert!(matches!(err, GardenError::FileFormat));
    }

    #[test]
    fn test_from_data_url_empty_mime() {
        let err = UploadedImage::from_data_url("data:;base64,ABC").unwrap_err();
        assert!(matches!(err, GardenError::FileFormat));
    }

    #[test]
    fn test_jpeg_data_url() {
        assert_eq!(jpeg_data_url("Zm9v"), "data:image/jpeg;base64,Zm9v");
    }
}
