//! Raster decode/encode.
//!
//! Decoding sniffs the real container instead of trusting the declared
//! extension. Encoding flattens alpha for targets that cannot carry it.

use anyhow::{Context, Result};
use fileforge_core::OutputFormat;
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;

/// Map an output format to the image crate's encoder format.
///
/// Returns `None` for non-raster targets (pdf, docx), which are handled by
/// dedicated builders.
pub fn image_format_for(format: OutputFormat) -> Option<ImageFormat> {
    match format {
        OutputFormat::Jpeg => Some(ImageFormat::Jpeg),
        OutputFormat::Png => Some(ImageFormat::Png),
        OutputFormat::Gif => Some(ImageFormat::Gif),
        OutputFormat::Bmp => Some(ImageFormat::Bmp),
        OutputFormat::Tiff => Some(ImageFormat::Tiff),
        OutputFormat::WebP => Some(ImageFormat::WebP),
        OutputFormat::Pdf | OutputFormat::Docx => None,
    }
}

/// Image decode/encode operations
pub struct ImageTransformer;

impl ImageTransformer {
    /// Decode an image from raw bytes, sniffing the container format.
    pub fn decode(data: &[u8]) -> Result<DynamicImage> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .context("Failed to probe image format")?;
        reader.decode().context("Failed to decode image")
    }

    /// Encode an image to the requested raster format.
    ///
    /// JPEG and BMP cannot carry an alpha channel; the image is composited
    /// onto a white background first so transparent regions do not come out
    /// black.
    pub fn encode(image: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>> {
        let target = image_format_for(format)
            .with_context(|| format!("{format} is not a raster image format"))?;

        let mut buffer = Vec::new();
        match target {
            ImageFormat::Jpeg | ImageFormat::Bmp => {
                let flattened = Self::flatten_alpha(image);
                flattened
                    .write_to(&mut Cursor::new(&mut buffer), target)
                    .with_context(|| format!("Failed to encode image as {format}"))?;
            }
            _ => {
                image
                    .write_to(&mut Cursor::new(&mut buffer), target)
                    .with_context(|| format!("Failed to encode image as {format}"))?;
            }
        }
        Ok(buffer)
    }

    /// Encode to RGB JPEG regardless of source channels.
    ///
    /// Used by the PDF page builder, which embeds DCT-encoded streams.
    pub fn encode_jpeg_rgb(image: &DynamicImage) -> Result<(Vec<u8>, u32, u32)> {
        let flattened = Self::flatten_alpha(image);
        let mut buffer = Vec::new();
        flattened
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
            .context("Failed to encode image as JPEG")?;
        Ok((buffer, flattened.width(), flattened.height()))
    }

    /// Composite the image onto a white background and drop the alpha
    /// channel.
    fn flatten_alpha(image: &DynamicImage) -> DynamicImage {
        if !image.color().has_alpha() {
            return DynamicImage::ImageRgb8(image.to_rgb8());
        }

        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut flattened = RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
        image::imageops::overlay(&mut flattened, &rgba, 0, 0);
        DynamicImage::ImageRgba8(flattened).to_rgb8().into()
    }
}
