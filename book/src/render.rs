use std::io::Write;
use std::path::{Path, PathBuf};

use docblock::{Document, Segment};
use tracing::{debug, warn};

use crate::backend::{Backend, OutputFormat};
use crate::config::BookConfig;
use crate::error::BookError;

/// A file that could not be rendered, and why.
#[derive(Debug)]
pub struct Skipped {
    pub name: String,
    pub error: BookError,
}

/// Outcome of rendering a set of files.
#[derive(Debug, Default)]
pub struct RenderReport {
    /// Names of the files that made it into the output, in order.
    pub rendered: Vec<String>,
    pub skipped: Vec<Skipped>,
}

impl RenderReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Renders the documentation and code of several source files into a
/// single document.
///
/// Each file is extracted independently. A file that cannot be read or
/// whose documentation is malformed is left out of the output and listed in
/// the returned [`RenderReport`]; the remaining files are still rendered.
#[derive(Debug, Clone, Default)]
pub struct Book {
    config: BookConfig,
}

impl Book {
    pub fn new(config: BookConfig) -> Self {
        Book { config }
    }

    /// Render in-memory sources given as `(name, text)` pairs.
    pub fn render_sources<'a>(
        &self,
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
        backend: &mut dyn Backend,
    ) -> RenderReport {
        let mut report = RenderReport::default();
        backend.begin(&self.config);

        for (file_id, (name, text)) in sources.into_iter().enumerate() {
            match Document::parse(text, file_id) {
                Ok(document) => {
                    render_document(name, &document, backend);
                    debug!(file = name, segments = document.segments.len(), "rendered file");
                    report.rendered.push(name.to_string());
                }
                Err(source) => {
                    warn!(file = name, line = source.line(), error = %source, "skipping file");
                    report.skipped.push(Skipped {
                        name: name.to_string(),
                        error: BookError::Parse {
                            name: name.to_string(),
                            source,
                        },
                    });
                }
            }
        }

        backend.end();
        report
    }

    /// Read and render files from disk, in the order given.
    pub fn render_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        backend: &mut dyn Backend,
    ) -> RenderReport {
        let mut loaded: Vec<(String, String)> = Vec::new();
        let mut unreadable = Vec::new();

        for path in paths {
            let path = path.as_ref();
            let name = path.display().to_string();
            match std::fs::read_to_string(path) {
                Ok(text) => loaded.push((name, text)),
                Err(source) => {
                    warn!(file = %name, error = %source, "skipping unreadable file");
                    unreadable.push(Skipped {
                        name,
                        error: BookError::Io {
                            path: PathBuf::from(path),
                            source,
                        },
                    });
                }
            }
        }

        let mut report = self.render_sources(
            loaded.iter().map(|(name, text)| (name.as_str(), text.as_str())),
            backend,
        );
        unreadable.append(&mut report.skipped);
        report.skipped = unreadable;
        report
    }

    /// Render files with the backend for `format` and write the result.
    pub fn write_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        format: OutputFormat,
        out: &mut impl Write,
    ) -> Result<RenderReport, BookError> {
        let mut backend = format.backend();
        let report = self.render_files(paths, backend.as_mut());
        out.write_all(backend.finish().as_bytes())?;
        out.flush()?;
        Ok(report)
    }
}

fn render_document(name: &str, document: &Document, backend: &mut dyn Backend) {
    for segment in &document.segments {
        match segment {
            Segment::Doc(block) => {
                backend.heading(block.level, &block.title, name, block.start_line);
                if !block.is_empty_body() {
                    backend.comment(&block.body, name, block.start_line, block.end_line);
                }
            }
            Segment::Code {
                text,
                start_line,
                end_line,
            } => backend.code(text, name, *start_line, *end_line),
        }
    }
}
