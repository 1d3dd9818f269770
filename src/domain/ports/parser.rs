//! Document parser port.
//!
//! The loader tries an ordered list of parser strategies in sequence; the
//! first one to succeed wins. This expresses the primary-parser /
//! fallback-parser behavior as data rather than control flow.

use std::path::Path;

use crate::domain::errors::PipelineResult;
use crate::domain::models::PageUnit;

/// A single parsing strategy for turning a file into page-tagged text.
pub trait DocumentParser: Send + Sync {
    /// Parser name, used in diagnostics when a strategy fails.
    fn name(&self) -> &'static str;

    /// Parse the file at `path` into an ordered sequence of cleaned page
    /// units.
    fn parse(&self, path: &Path) -> PipelineResult<Vec<PageUnit>>;
}
