//! PDF page rasterization via the system pdfium library.
//!
//! pdfium is a native dependency that may be absent from the host. Binding
//! happens per call inside the blocking task (the bindings are not `Send`),
//! and an unbindable library surfaces as `Ok(None)` so callers can degrade
//! instead of failing the whole item.

use anyhow::{Context, Result};
use image::DynamicImage;
use pdfium_render::prelude::*;

/// Availability probe for the rasterization backend.
pub struct RasterBackend;

impl RasterBackend {
    /// Whether a system pdfium library can be bound. Used for startup
    /// logging; the answer is advisory, not cached.
    pub fn available() -> bool {
        Pdfium::bind_to_system_library().is_ok()
    }
}

/// One rasterized PDF page.
pub struct RasterPage {
    /// Zero-based page index.
    pub index: usize,
    pub image: DynamicImage,
}

/// Rasterize every page of a PDF.
///
/// Pages are rendered so that the longest side does not exceed
/// `max_dimension` pixels. Returns `Ok(None)` when no pdfium library can be
/// bound on this host.
pub async fn rasterize_pdf(data: Vec<u8>, max_dimension: u32) -> Result<Option<Vec<RasterPage>>> {
    tokio::task::spawn_blocking(move || rasterize_blocking(&data, max_dimension))
        .await
        .context("Rasterization task panicked")?
}

fn rasterize_blocking(data: &[u8], max_dimension: u32) -> Result<Option<Vec<RasterPage>>> {
    let bindings = match Pdfium::bind_to_system_library() {
        Ok(bindings) => bindings,
        Err(e) => {
            tracing::warn!(error = %e, "pdfium unavailable, rasterization disabled");
            return Ok(None);
        }
    };
    let pdfium = Pdfium::new(bindings);

    let document = pdfium
        .load_pdf_from_byte_slice(data, None)
        .context("Failed to open PDF for rasterization")?;

    let render_config = PdfRenderConfig::new()
        .set_target_width(max_dimension as i32)
        .set_maximum_height(max_dimension as i32);

    let mut pages = Vec::new();
    for (index, page) in document.pages().iter().enumerate() {
        let bitmap = page
            .render_with_config(&render_config)
            .with_context(|| format!("Failed to render page {}", index + 1))?;
        pages.push(RasterPage {
            index,
            image: bitmap.as_image(),
        });
    }

    Ok(Some(pages))
}
