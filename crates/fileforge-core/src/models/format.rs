//! Closed format and mode model.
//!
//! Formats are closed enums with total mapping tables, so adding a format
//! forces a compile-time-visible decision for every operation mode rather
//! than an easily-missed string comparison.

use anyhow::{anyhow, Result};

/// Operation mode of a batch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// Per-file format conversion (raster re-encode or image→PDF)
    Convert,
    /// Merge all inputs into a single PDF
    Combine,
    /// Extract PDF text into a word-processing document
    PdfToWord,
    /// Rasterize PDF pages into images
    PdfToImages,
}

impl ConversionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversionMode::Convert => "convert",
            ConversionMode::Combine => "combine",
            ConversionMode::PdfToWord => "pdf-to-word",
            ConversionMode::PdfToImages => "pdf-to-images",
        }
    }

    /// Output formats accepted for this mode. The validator rejects anything
    /// outside this list before any file is touched.
    pub fn allowed_formats(self) -> &'static [OutputFormat] {
        use OutputFormat::*;
        match self {
            ConversionMode::Convert => &[Jpeg, Png, Gif, Bmp, Tiff, WebP, Pdf],
            ConversionMode::Combine => &[Pdf],
            ConversionMode::PdfToWord => &[Docx],
            ConversionMode::PdfToImages => &[Png, Jpeg, Bmp, Tiff, Gif],
        }
    }

    /// Default output format when the request omits the field, if any.
    pub fn default_format(self) -> Option<OutputFormat> {
        match self {
            ConversionMode::Convert => None,
            ConversionMode::Combine => Some(OutputFormat::Pdf),
            ConversionMode::PdfToWord => Some(OutputFormat::Docx),
            ConversionMode::PdfToImages => Some(OutputFormat::Png),
        }
    }

    /// Whether this mode only operates on PDF inputs (pre-filter applies).
    pub fn pdf_only(self) -> bool {
        matches!(self, ConversionMode::PdfToWord | ConversionMode::PdfToImages)
    }
}

/// Output format for converted files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    WebP,
    Pdf,
    Docx,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "gif" => Ok(OutputFormat::Gif),
            "bmp" => Ok(OutputFormat::Bmp),
            "tiff" | "tif" => Ok(OutputFormat::Tiff),
            "webp" => Ok(OutputFormat::WebP),
            "pdf" => Ok(OutputFormat::Pdf),
            "docx" => Ok(OutputFormat::Docx),
            _ => Err(anyhow!("Invalid format: {}", s)),
        }
    }

    pub fn to_mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Gif => "image/gif",
            OutputFormat::Bmp => "image/bmp",
            OutputFormat::Tiff => "image/tiff",
            OutputFormat::WebP => "image/webp",
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Gif => "gif",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Tiff => "tiff",
            OutputFormat::WebP => "webp",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }

    /// Whether this target is a raster image the image codec can encode.
    pub fn is_raster(self) -> bool {
        !matches!(self, OutputFormat::Pdf | OutputFormat::Docx)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Source kind inferred from file content (signature bytes first, extension
/// as fallback). Declared MIME types are client-controlled and ignored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    WebP,
    Pdf,
    Unknown,
}

impl SourceKind {
    /// Whether this is a member of the raster-image family the image codec
    /// can decode.
    pub fn is_raster(self) -> bool {
        matches!(
            self,
            SourceKind::Jpeg
                | SourceKind::Png
                | SourceKind::Gif
                | SourceKind::Bmp
                | SourceKind::Tiff
                | SourceKind::WebP
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Jpeg => "jpeg",
            SourceKind::Png => "png",
            SourceKind::Gif => "gif",
            SourceKind::Bmp => "bmp",
            SourceKind::Tiff => "tiff",
            SourceKind::WebP => "webp",
            SourceKind::Pdf => "pdf",
            SourceKind::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("jpg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("JPEG").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("tif").unwrap(), OutputFormat::Tiff);
        assert_eq!(OutputFormat::parse("docx").unwrap(), OutputFormat::Docx);
        assert!(OutputFormat::parse("exe").is_err());
    }

    #[test]
    fn test_mode_allow_lists() {
        assert!(ConversionMode::Convert
            .allowed_formats()
            .contains(&OutputFormat::Pdf));
        assert_eq!(ConversionMode::Combine.allowed_formats(), &[OutputFormat::Pdf]);
        assert!(!ConversionMode::PdfToImages
            .allowed_formats()
            .contains(&OutputFormat::Pdf));
    }

    #[test]
    fn test_mode_defaults() {
        assert_eq!(ConversionMode::Convert.default_format(), None);
        assert_eq!(
            ConversionMode::PdfToImages.default_format(),
            Some(OutputFormat::Png)
        );
        assert_eq!(
            ConversionMode::PdfToWord.default_format(),
            Some(OutputFormat::Docx)
        );
    }

    #[test]
    fn test_pdf_only_modes() {
        assert!(!ConversionMode::Convert.pdf_only());
        assert!(!ConversionMode::Combine.pdf_only());
        assert!(ConversionMode::PdfToWord.pdf_only());
        assert!(ConversionMode::PdfToImages.pdf_only());
    }

    #[test]
    fn test_source_kind_raster_family() {
        assert!(SourceKind::Png.is_raster());
        assert!(SourceKind::WebP.is_raster());
        assert!(!SourceKind::Pdf.is_raster());
        assert!(!SourceKind::Unknown.is_raster());
    }
}
