//! PDF text extraction.
//!
//! Extraction is layout-light: the extractor's raw text is split into
//! paragraphs on blank-line boundaries. Scanned PDFs typically come out
//! empty, which the caller reports as "no extractable text".

use anyhow::{Context, Result};

/// Result of extracting text from a PDF.
#[derive(Debug)]
pub struct TextExtraction {
    pub paragraphs: Vec<String>,
}

impl TextExtraction {
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// Extract paragraphs of text from PDF bytes.
///
/// Returns an empty extraction (not an error) when the document parses but
/// contains no text, e.g. scanned pages.
pub fn extract_paragraphs(data: &[u8]) -> Result<TextExtraction> {
    let raw = pdf_extract::extract_text_from_mem(data)
        .context("Failed to extract text from PDF")?;
    Ok(TextExtraction {
        paragraphs: split_paragraphs(&raw),
    })
}

/// Split raw extracted text into paragraphs on blank-line boundaries.
///
/// Consecutive non-blank lines are joined with single spaces; whitespace-only
/// paragraphs are dropped.
fn split_paragraphs(raw: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(trimmed);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_blank_lines() {
        let raw = "First line\nstill first.\n\nSecond paragraph.\n";
        assert_eq!(
            split_paragraphs(raw),
            vec!["First line still first.", "Second paragraph."]
        );
    }

    #[test]
    fn test_whitespace_only_paragraphs_dropped() {
        let raw = "One\n\n   \n\t\n\nTwo";
        assert_eq!(split_paragraphs(raw), vec!["One", "Two"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("\n\n\n").is_empty());
    }

    #[test]
    fn test_lines_trimmed_before_joining() {
        let raw = "  padded  \n  lines  ";
        assert_eq!(split_paragraphs(raw), vec!["padded lines"]);
    }
}
