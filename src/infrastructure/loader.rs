//! Document loading
//!
//! Parses a source file into page-tagged text units. PDF input goes through
//! an ordered list of parser strategies: a primary text extractor first,
//! then a more permissive fallback that salvages whatever pages it can.
//! Plain-text input is treated as a single page numbered 0.

use std::path::Path;

use tracing::{debug, warn};

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::PageUnit;
use crate::domain::ports::DocumentParser;

/// Primary PDF parser backed by `pdf-extract`.
///
/// Extracts text page by page; fails outright on malformed documents, in
/// which case the loader moves on to [`PdfFallbackParser`].
pub struct PdfTextParser;

impl DocumentParser for PdfTextParser {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn parse(&self, path: &Path) -> PipelineResult<Vec<PageUnit>> {
        let pages = pdf_extract::extract_text_by_pages(path)
            .map_err(|err| PipelineError::Load(format!("pdf-extract failed: {err}")))?;

        let units: Vec<PageUnit> = pages
            .iter()
            .enumerate()
            .map(|(i, text)| PageUnit::new(Some(i as u32 + 1), text))
            .filter(|unit| !unit.text.is_empty())
            .collect();

        if units.is_empty() {
            return Err(PipelineError::Load(
                "pdf-extract produced no text".to_string(),
            ));
        }

        Ok(units)
    }
}

/// Permissive fallback PDF parser backed by `lopdf`.
///
/// Extracts each page independently and skips pages whose content streams
/// cannot be decoded, so a partially damaged document still yields its
/// readable pages.
pub struct PdfFallbackParser;

impl DocumentParser for PdfFallbackParser {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn parse(&self, path: &Path) -> PipelineResult<Vec<PageUnit>> {
        let doc = lopdf::Document::load(path)
            .map_err(|err| PipelineError::Load(format!("lopdf failed to open: {err}")))?;

        let mut units = Vec::new();
        for (&page_number, _) in &doc.get_pages() {
            match doc.extract_text(&[page_number]) {
                Ok(text) => {
                    let unit = PageUnit::new(Some(page_number), &text);
                    if !unit.text.is_empty() {
                        units.push(unit);
                    }
                }
                Err(err) => {
                    warn!(page = page_number, error = %err, "skipping unreadable page");
                }
            }
        }

        if units.is_empty() {
            return Err(PipelineError::Load(
                "lopdf extracted no readable pages".to_string(),
            ));
        }

        Ok(units)
    }
}

/// Plain-text parser: the whole file becomes a single page numbered 0.
pub struct PlainTextParser;

impl DocumentParser for PlainTextParser {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    fn parse(&self, path: &Path) -> PipelineResult<Vec<PageUnit>> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| PipelineError::Load(format!("failed to read file: {err}")))?;

        Ok(vec![PageUnit::new(Some(0), &text)])
    }
}

/// Parser strategies for the given file, in the order they should be tried.
fn parsers_for(path: &Path) -> Vec<Box<dyn DocumentParser>> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        vec![Box::new(PdfTextParser), Box::new(PdfFallbackParser)]
    } else {
        vec![Box::new(PlainTextParser)]
    }
}

/// Load the document at `path` into an ordered sequence of cleaned page
/// units.
///
/// Tries each applicable parser strategy in sequence and returns the first
/// successful result. Fails with [`PipelineError::Load`] when the path does
/// not exist or no parser succeeds.
pub fn load_document(path: &Path) -> PipelineResult<Vec<PageUnit>> {
    if !path.exists() {
        return Err(PipelineError::Load(format!(
            "document not found: {}",
            path.display()
        )));
    }

    let mut last_error = None;
    for parser in parsers_for(path) {
        match parser.parse(path) {
            Ok(units) => {
                debug!(
                    parser = parser.name(),
                    pages = units.len(),
                    "document parsed"
                );
                return Ok(units);
            }
            Err(err) => {
                warn!(parser = parser.name(), error = %err, "parser failed, trying next");
                last_error = Some(err);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        PipelineError::Load(format!("no parser available for {}", path.display()))
    }))
}
