//! PDF operations: building pages from images, merging documents,
//! extracting text, and rasterizing pages.

pub mod merge;
pub mod page_builder;
pub mod raster;
pub mod text;

pub use merge::merge_documents;
pub use page_builder::{image_to_pdf, PageFit};
pub use raster::{rasterize_pdf, RasterBackend, RasterPage};
pub use text::{extract_paragraphs, TextExtraction};
