//! Image upload intake.
//!
//! Uploads are sniffed by magic number, decoded, and converted to 8-bit
//! grayscale. Only the status string travels onward: the converted image is
//! discarded, and the assistant is prompted with the status text rather
//! than the pixels. Non-image payloads are rejected before the decoder is
//! ever invoked.

use crate::error::FireboxError;

/// Status returned when an uploaded image decodes and converts cleanly.
pub const IMAGE_OK_STATUS: &str = "Image processed successfully.";

/// Status returned when an uploaded image fails to decode.
pub const IMAGE_FAILED_STATUS: &str = "Failed to process image.";

/// Warning surfaced when the uploaded payload is not a supported image.
pub const UNSUPPORTED_FILE_WARNING: &str = "Unsupported file type. Please upload an image.";

/// The supported MIME type of an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMime {
    /// PNG image
    Png,
    /// JPEG image (jpg/jpeg)
    Jpeg,
}

impl ImageMime {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Jpeg => "image/jpeg",
        }
    }
}

/// Detects the MIME type of an image from its binary data.
///
/// # Returns
///
/// * `Some(ImageMime)` - The detected MIME type if recognized
/// * `None` - If the payload is not a supported image format
pub fn detect_image_mime(data: &[u8]) -> Option<ImageMime> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageMime::Jpeg)
    } else if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        Some(ImageMime::Png)
    } else {
        None
    }
}

/// Decodes an uploaded image and converts it to 8-bit grayscale.
///
/// The converted image is discarded; decode success is the only gate.
pub fn decode_grayscale(data: &[u8]) -> Result<(), FireboxError> {
    let image = image::load_from_memory(data)?;
    let _gray = image.to_luma8();
    Ok(())
}

/// Runs the grayscale conversion and reports a literal status string.
///
/// Decode faults are logged and mapped to [`IMAGE_FAILED_STATUS`]; they are
/// never propagated.
pub fn process_image(data: &[u8]) -> String {
    match decode_grayscale(data) {
        Ok(()) => IMAGE_OK_STATUS.to_string(),
        Err(e) => {
            log::error!("Image processing error: {}", e);
            IMAGE_FAILED_STATUS.to_string()
        }
    }
}

/// Handles one uploaded file.
///
/// # Arguments
///
/// * `file_name` - Name of the uploaded file, used for logging only
/// * `data` - Raw bytes of the upload
///
/// # Returns
///
/// * `Some(status)` - Processing status text for a recognized image
/// * `None` - The payload is not a supported image; a warning is logged and
///   the decoder is not invoked
pub fn handle_upload(file_name: &str, data: &[u8]) -> Option<String> {
    match detect_image_mime(data) {
        Some(mime) => {
            log::info!("Processing upload '{}' as {}", file_name, mime.mime_type());
            Some(process_image(data))
        }
        None => {
            log::warn!("Rejected upload '{}': {}", file_name, UNSUPPORTED_FILE_WARNING);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let img = RgbImage::from_pixel(2, 2, Rgb([200, 40, 40]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn sniffs_png_and_jpeg_magic_numbers() {
        assert_eq!(detect_image_mime(&tiny_png()), Some(ImageMime::Png));
        assert_eq!(
            detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageMime::Jpeg)
        );
        assert_eq!(detect_image_mime(b"plain text"), None);
        assert_eq!(detect_image_mime(&[]), None);
    }

    #[test]
    fn valid_png_yields_success_status() {
        assert_eq!(process_image(&tiny_png()), IMAGE_OK_STATUS);
    }

    #[test]
    fn truncated_image_yields_failure_status() {
        // PNG magic with no image data behind it
        let data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(process_image(&data), IMAGE_FAILED_STATUS);
    }

    #[test]
    fn upload_of_image_returns_status() {
        assert_eq!(
            handle_upload("photo.png", &tiny_png()),
            Some(IMAGE_OK_STATUS.to_string())
        );
    }

    #[test]
    fn upload_of_non_image_is_rejected_without_decoding() {
        assert_eq!(handle_upload("notes.txt", b"hello"), None);
    }
}
