//! Source type sniffing.
//!
//! Browsers and clients routinely misreport MIME types, so conversion
//! dispatch never trusts them: the signature bytes of the file decide, with
//! the filename extension as fallback for container-less formats.

use super::format::SourceKind;
use std::path::Path;

/// Infer the source kind from content, falling back to the filename
/// extension when no known signature matches.
pub fn sniff_source_kind(data: &[u8], filename: &str) -> SourceKind {
    if let Some(kind) = sniff_signature(data) {
        return kind;
    }

    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => SourceKind::Jpeg,
        "png" => SourceKind::Png,
        "gif" => SourceKind::Gif,
        "bmp" => SourceKind::Bmp,
        "tif" | "tiff" => SourceKind::Tiff,
        "webp" => SourceKind::WebP,
        "pdf" => SourceKind::Pdf,
        _ => SourceKind::Unknown,
    }
}

/// Match the well-known magic numbers. Returns None when the prefix is not
/// recognized (truncated files included).
fn sniff_signature(data: &[u8]) -> Option<SourceKind> {
    if data.len() < 12 {
        return None;
    }

    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some(SourceKind::Png);
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(SourceKind::Jpeg);
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some(SourceKind::Gif);
    }
    if data.starts_with(b"BM") {
        return Some(SourceKind::Bmp);
    }
    // TIFF: little-endian "II*\0" or big-endian "MM\0*"
    if data.starts_with(b"II\x2a\x00") || data.starts_with(b"MM\x00\x2a") {
        return Some(SourceKind::Tiff);
    }
    if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some(SourceKind::WebP);
    }
    if data.starts_with(b"%PDF-") {
        return Some(SourceKind::Pdf);
    }

    None
}
