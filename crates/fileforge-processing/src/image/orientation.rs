//! Image orientation operations (EXIF-driven rotation and flipping)

use image::{imageops, DynamicImage};
use std::io::Cursor;

/// Image orientation operations (rotation and flipping)
pub struct ImageOrientation;

impl ImageOrientation {
    /// Apply EXIF orientation correction to an image
    pub fn apply_exif_orientation(mut img: DynamicImage, data: &[u8]) -> DynamicImage {
        let orientation = Self::read_exif_orientation(data);
        let (rotate, flip_h, flip_v) = Self::get_orientation_transforms(orientation);

        tracing::debug!(
            orientation = orientation,
            rotate = ?rotate,
            flip_horizontal = flip_h,
            flip_vertical = flip_v,
            "Applying EXIF orientation"
        );

        // Apply rotation first
        if let Some(angle) = rotate {
            img = Self::rotate_by_angle(img, angle);
        }

        // Then apply flips
        if flip_h {
            img = Self::apply_flip_horizontal(img);
        }
        if flip_v {
            img = Self::apply_flip_vertical(img);
        }

        img
    }

    /// Read the EXIF orientation tag from raw image bytes.
    ///
    /// Returns the orientation value (1-8), or 1 (normal) when the image
    /// carries no EXIF segment or the tag is absent/malformed.
    pub fn read_exif_orientation(data: &[u8]) -> u8 {
        let mut cursor = Cursor::new(data);
        let reader = match exif::Reader::new().read_from_container(&mut cursor) {
            Ok(reader) => reader,
            Err(_) => return 1,
        };

        reader
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(|v| v as u8)
            .filter(|v| (1..=8).contains(v))
            .unwrap_or(1)
    }

    /// Get rotation and flip operations needed for a given EXIF orientation
    /// Returns (rotate_angle, flip_horizontal, flip_vertical)
    pub fn get_orientation_transforms(orientation: u8) -> (Option<u16>, bool, bool) {
        match orientation {
            1 => (None, false, false),      // Normal
            2 => (None, true, false),       // Mirror horizontal
            3 => (Some(180), false, false), // Rotate 180
            4 => (None, false, true),       // Mirror vertical
            5 => (Some(270), true, false),  // Mirror horizontal + Rotate 270 CW
            6 => (Some(90), false, false),  // Rotate 90 CW
            7 => (Some(90), true, false),   // Mirror horizontal + Rotate 90 CW
            8 => (Some(270), false, false), // Rotate 270 CW
            _ => (None, false, false),      // Invalid, treat as normal
        }
    }

    /// Rotate image by specified angle (90, 180, or 270 degrees clockwise)
    pub fn rotate_by_angle(img: DynamicImage, angle: u16) -> DynamicImage {
        match angle {
            90 => DynamicImage::ImageRgba8(imageops::rotate90(&img.to_rgba8())),
            180 => DynamicImage::ImageRgba8(imageops::rotate180(&img.to_rgba8())),
            270 => DynamicImage::ImageRgba8(imageops::rotate270(&img.to_rgba8())),
            _ => img, // Should never happen due to validation
        }
    }

    /// Apply horizontal flip (mirror)
    pub fn apply_flip_horizontal(img: DynamicImage) -> DynamicImage {
        DynamicImage::ImageRgba8(imageops::flip_horizontal(&img.to_rgba8()))
    }

    /// Apply vertical flip
    pub fn apply_flip_vertical(img: DynamicImage) -> DynamicImage {
        DynamicImage::ImageRgba8(imageops::flip_vertical(&img.to_rgba8()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

    #[test]
    fn test_get_orientation_transforms_all_values() {
        let (rotate, flip_h, flip_v) = ImageOrientation::get_orientation_transforms(1);
        assert_eq!(rotate, None);
        assert!(!flip_h);
        assert!(!flip_v);

        let (rotate, flip_h, flip_v) = ImageOrientation::get_orientation_transforms(3);
        assert_eq!(rotate, Some(180));
        assert!(!flip_h);
        assert!(!flip_v);

        let (rotate, flip_h, flip_v) = ImageOrientation::get_orientation_transforms(6);
        assert_eq!(rotate, Some(90));
        assert!(!flip_h);
        assert!(!flip_v);

        let (rotate, flip_h, flip_v) = ImageOrientation::get_orientation_transforms(8);
        assert_eq!(rotate, Some(270));
        assert!(!flip_h);
        assert!(!flip_v);

        // Invalid orientation
        let (rotate, flip_h, flip_v) = ImageOrientation::get_orientation_transforms(99);
        assert_eq!(rotate, None);
        assert!(!flip_h);
        assert!(!flip_v);
    }

    #[test]
    fn test_rotation_dimension_changes() {
        // Non-square image to test dimension changes
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 2, Rgba([0, 0, 255, 255])));

        let rotated = ImageOrientation::rotate_by_angle(img.clone(), 90);
        assert_eq!(rotated.dimensions(), (2, 4)); // Width and height swapped

        let rotated = ImageOrientation::rotate_by_angle(img.clone(), 180);
        assert_eq!(rotated.dimensions(), (4, 2));

        let rotated = ImageOrientation::rotate_by_angle(img.clone(), 270);
        assert_eq!(rotated.dimensions(), (2, 4));

        // Invalid angle returns the original
        let rotated = ImageOrientation::rotate_by_angle(img.clone(), 45);
        assert_eq!(rotated.dimensions(), img.dimensions());
    }

    #[test]
    fn test_flip_operations() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 3, Rgba([0, 255, 0, 255])));

        let flipped = ImageOrientation::apply_flip_horizontal(img.clone());
        assert_eq!(flipped.dimensions(), (2, 3));

        let flipped = ImageOrientation::apply_flip_vertical(img.clone());
        assert_eq!(flipped.dimensions(), (2, 3));
    }

    #[test]
    fn test_read_exif_orientation_no_exif() {
        // PNG without EXIF returns 1 (normal)
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        assert_eq!(ImageOrientation::read_exif_orientation(&buffer), 1);
    }

    #[test]
    fn test_read_exif_orientation_garbage() {
        assert_eq!(ImageOrientation::read_exif_orientation(b"not an image"), 1);
    }

    #[test]
    fn test_apply_exif_orientation_without_exif_is_identity() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(5, 3, Rgba([1, 2, 3, 255])));
        let oriented = ImageOrientation::apply_exif_orientation(img.clone(), b"");
        assert_eq!(oriented.dimensions(), img.dimensions());
    }
}
