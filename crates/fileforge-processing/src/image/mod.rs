//! Image processing: orientation normalization and format transcoding.

pub mod orientation;
pub mod transformer;

pub use orientation::ImageOrientation;
pub use transformer::ImageTransformer;
