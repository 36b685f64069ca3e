use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::NoColor;
use thiserror::Error;

/// What went wrong while extracting documentation blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// An envelope was opened but never closed before end of input.
    #[error("comment block opened on line {line} is never closed")]
    MalformedBlock { line: usize },

    /// Heading markers with no title text after them.
    #[error("heading on line {line} has no title")]
    EmptyHeading { line: usize },
}

impl ErrorKind {
    /// 1-based line the error is reported at.
    pub fn line(&self) -> usize {
        match self {
            ErrorKind::MalformedBlock { line } | ErrorKind::EmptyHeading { line } => *line,
        }
    }
}

/// Parse errors with source location information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub span: Range<usize>,
    pub file_id: usize,
    pub notes: Vec<String>,
}

impl ParseError {
    pub fn new(kind: ErrorKind, span: Range<usize>, file_id: usize) -> Self {
        ParseError {
            kind,
            span,
            file_id,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn line(&self) -> usize {
        self.kind.line()
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::error()
            .with_message(self.kind.to_string())
            .with_labels(vec![Label::primary(self.file_id, self.span.clone())])
            .with_notes(self.notes.clone())
    }

    /// Render this error against its source as plain text.
    pub fn render(&self, name: &str, source: &str) -> String {
        let file = SimpleFile::new(name, source);
        let diagnostic = Diagnostic::error()
            .with_message(self.kind.to_string())
            .with_labels(vec![Label::primary((), self.span.clone())])
            .with_notes(self.notes.clone());

        let mut writer = NoColor::new(Vec::new());
        let config = term::Config::default();
        if term::emit_to_write_style(&mut writer, &config, &file, &diagnostic).is_err() {
            return format!("error: {}", self);
        }
        String::from_utf8_lossy(&writer.into_inner()).into_owned()
    }
}
