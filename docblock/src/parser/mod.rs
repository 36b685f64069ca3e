pub mod error;
mod structural;

pub use error::{ErrorKind, ParseError};
pub use structural::Extractor;

use crate::block::DocBlock;

/// Parser entry point.
#[derive(Debug, Clone)]
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Lazily extract documentation blocks in file order.
    ///
    /// Each call starts a fresh scan, so repeated calls yield identical
    /// sequences.
    pub fn blocks(&self) -> Extractor<'_> {
        Extractor::new(&self.source, self.file_id)
    }

    /// Extract every documentation block, stopping at the first error.
    pub fn parse(&self) -> Result<Vec<DocBlock>, ParseError> {
        self.blocks().collect()
    }
}

/// Extract documentation blocks from `source` without a file id.
pub fn extract(source: &str) -> Result<Vec<DocBlock>, ParseError> {
    Extractor::new(source, 0).collect()
}
