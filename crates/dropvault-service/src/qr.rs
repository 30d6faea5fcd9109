//! QR code rendering.

use std::io::Cursor;

use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;

/// Renders the given data into a PNG-encoded QR image, at least 256 px
/// square, medium error correction.
pub fn encode_png(data: &str) -> AppResult<Vec<u8>> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)
        .map_err(|e| AppError::internal(format!("Failed to build QR code: {e}")))?;

    let img = code.render::<Luma<u8>>().min_dimensions(256, 256).build();

    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| AppError::internal(format!("Failed to encode QR image: {e}")))?;

    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn output_is_png() {
        let png = encode_png("https://example.com/presigned?sig=abc").unwrap();
        assert!(png.len() > PNG_MAGIC.len());
        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[test]
    fn long_urls_still_encode() {
        let url = format!("https://example.com/{}?sig={}", "k".repeat(200), "s".repeat(100));
        assert!(encode_png(&url).is_ok());
    }
}
