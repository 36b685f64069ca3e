use std::path::Path;

use crate::config::BookConfig;
use crate::error::BookError;
use crate::html::HtmlBackend;
use crate::markdown::MarkdownBackend;
use crate::tex::TexBackend;
use crate::text::TextBackend;

/// An output format the book is rendered into.
///
/// [`Book`](crate::Book) calls `begin`, then one method per document segment
/// in file order for every file, then `end`. `finish` hands back the
/// rendered output and leaves the backend empty.
pub trait Backend {
    fn begin(&mut self, config: &BookConfig);

    fn heading(&mut self, level: u8, title: &str, file: &str, line: usize);

    fn comment(&mut self, body: &[String], file: &str, start_line: usize, end_line: usize);

    fn code(&mut self, code: &str, file: &str, start_line: usize, end_line: usize);

    fn end(&mut self);

    fn finish(&mut self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Tex,
    Markdown,
    Html,
}

impl OutputFormat {
    /// Pick the format from an output file's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "txt" => Ok(OutputFormat::Text),
            "tex" => Ok(OutputFormat::Tex),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "html" | "htm" => Ok(OutputFormat::Html),
            _ => Err(BookError::UnknownFormat(path.display().to_string())),
        }
    }

    pub fn backend(self) -> Box<dyn Backend> {
        match self {
            OutputFormat::Text => Box::new(TextBackend::new()),
            OutputFormat::Tex => Box::new(TexBackend::new()),
            OutputFormat::Markdown => Box::new(MarkdownBackend::new()),
            OutputFormat::Html => Box::new(HtmlBackend::new()),
        }
    }
}

/// Expand tabs the way code listings are printed.
pub(crate) fn expand_tabs(code: &str) -> String {
    code.replace('\t', "   ")
}

/// Collapse runs of whitespace in a heading to single spaces.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_from_extension() {
        assert_eq!(OutputFormat::from_path("out.txt").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_path("doc/out.TEX").unwrap(), OutputFormat::Tex);
        assert_eq!(OutputFormat::from_path("README.md").unwrap(), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_path("index.htm").unwrap(), OutputFormat::Html);
        assert!(matches!(
            OutputFormat::from_path("out.pdf"),
            Err(BookError::UnknownFormat(_))
        ));
        assert!(OutputFormat::from_path("no_extension").is_err());
    }
}
