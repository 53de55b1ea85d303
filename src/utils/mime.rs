//! MIME type detection for embedded images.
//!
//! Data URIs need a media type; it is guessed from the file extension
//! (case-insensitive), with `application/octet-stream` as the fallback.

use std::path::Path;

/// Image MIME type constants.
pub mod types {
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";
    pub const BMP: &str = "image/bmp";

    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Guess the MIME type of an image from its path.
pub fn image_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => types::PNG,
        Some("jpg" | "jpeg") => types::JPEG,
        Some("gif") => types::GIF,
        Some("webp") => types::WEBP,
        Some("avif") => types::AVIF,
        Some("svg") => types::SVG,
        Some("ico") => types::ICO,
        Some("bmp") => types::BMP,
        _ => types::OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_from_path() {
        assert_eq!(image_from_path(Path::new("travel-moe.png")), types::PNG);
        assert_eq!(image_from_path(Path::new("photo.JPG")), types::JPEG);
        assert_eq!(image_from_path(Path::new("logo.svg")), types::SVG);
        assert_eq!(image_from_path(Path::new("favicon.ico")), types::ICO);
    }

    #[test]
    fn test_unknown_falls_back_to_octet_stream() {
        assert_eq!(image_from_path(Path::new("logo.xyz")), types::OCTET_STREAM);
        assert_eq!(image_from_path(Path::new("logo")), types::OCTET_STREAM);
    }
}
