//! Word document generation.

use anyhow::{Context, Result};
use docx_rs::{Docx, Paragraph, Run};
use std::io::Cursor;

/// Build a .docx document from extracted paragraphs, one document paragraph
/// per input paragraph.
pub fn paragraphs_to_docx(paragraphs: &[String]) -> Result<Vec<u8>> {
    let mut docx = Docx::new();
    for paragraph in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(paragraph)));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .context("Failed to serialize docx")?;
    Ok(buffer.into_inner())
}
