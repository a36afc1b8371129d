//! Single-page PDF construction from a raster image.
//!
//! The image is embedded as a DCT-encoded (JPEG) XObject, which keeps the
//! output small and avoids re-encoding pixels into raw streams.

use anyhow::{Context, Result};
use image::DynamicImage;
use lopdf::{dictionary, Document, Object, Stream};

use crate::image::transformer::ImageTransformer;

/// A4 portrait in PDF points.
const A4_WIDTH_PT: f32 = 595.0;
const A4_HEIGHT_PT: f32 = 842.0;

/// Page sizing strategy for an image page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFit {
    /// Page dimensions equal the image dimensions (one point per pixel).
    Natural,
    /// Scale down to fit inside an A4 envelope; never scale up. The page is
    /// sized to the scaled image, so there are no margins.
    A4Envelope,
}

/// Build a one-page PDF containing the given image.
pub fn image_to_pdf(image: &DynamicImage, fit: PageFit) -> Result<Vec<u8>> {
    let (jpeg, width, height) = ImageTransformer::encode_jpeg_rgb(image)
        .context("Failed to prepare image for PDF embedding")?;

    let (page_width, page_height) = page_dimensions(width, height, fit);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    );
    let image_id = doc.add_object(image_stream);

    // Scale the unit image square to the page and draw it
    let content = format!(
        "q\n{page_width} 0 0 {page_height} 0 0 cm\n/Im0 Do\nQ\n"
    );
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let resources = dictionary! {
        "XObject" => dictionary! { "Im0" => image_id },
    };

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            Object::Real(page_width),
            Object::Real(page_height),
        ],
        "Resources" => resources,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .context("Failed to serialize PDF")?;
    Ok(buffer)
}

/// Compute the page size in points for the given pixel dimensions.
fn page_dimensions(width: u32, height: u32, fit: PageFit) -> (f32, f32) {
    let (w, h) = (width as f32, height as f32);
    match fit {
        PageFit::Natural => (w, h),
        PageFit::A4Envelope => {
            let scale = (A4_WIDTH_PT / w).min(A4_HEIGHT_PT / h).min(1.0);
            (w * scale, h * scale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255])))
    }

    #[test]
    fn test_image_to_pdf_produces_valid_document() {
        let data = image_to_pdf(&test_image(40, 30), PageFit::Natural).unwrap();
        assert!(data.starts_with(b"%PDF-"));

        let doc = Document::load_mem(&data).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_natural_fit_matches_pixel_dimensions() {
        assert_eq!(page_dimensions(40, 30, PageFit::Natural), (40.0, 30.0));
    }

    #[test]
    fn test_a4_envelope_never_scales_up() {
        // Small image keeps its size
        assert_eq!(page_dimensions(100, 50, PageFit::A4Envelope), (100.0, 50.0));
    }

    #[test]
    fn test_a4_envelope_scales_down_preserving_aspect() {
        let (w, h) = page_dimensions(1190, 842, PageFit::A4Envelope);
        assert!(w <= A4_WIDTH_PT + 0.5);
        assert!(h <= A4_HEIGHT_PT + 0.5);
        let original_ratio = 1190.0 / 842.0;
        assert!((w / h - original_ratio).abs() < 0.01);
    }

    #[test]
    fn test_tall_image_bounded_by_height() {
        let (w, h) = page_dimensions(500, 5000, PageFit::A4Envelope);
        assert!(h <= A4_HEIGHT_PT + 0.5);
        assert!(w < A4_WIDTH_PT);
    }
}
