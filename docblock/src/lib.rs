//! Extraction of structured documentation comments from C source.
//!
//! A documentation block is a `/**` comment whose first line is a Markdown
//! style heading:
//!
//! ```text
//! /**### add
//!  ** Adds two integers and returns the result.
//!  **/
//! ```
//!
//! [`parser::Parser`] yields [`DocBlock`]s lazily, [`block::anchor`] links
//! each block to the code that follows it, and [`Document`] interleaves the
//! blocks with that code.

pub mod block;
pub mod document;
pub mod parser;
pub mod syntax;

pub use block::DocBlock;
pub use block::anchor::Anchor;
pub use document::{Document, Segment};
pub use parser::{ErrorKind, Extractor, ParseError, Parser, extract};
