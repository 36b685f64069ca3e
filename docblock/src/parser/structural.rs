use tracing::trace;

use crate::block::DocBlock;
use crate::parser::error::{ErrorKind, ParseError};
use crate::syntax::{self, HeadingMatch};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Lazy, line-driven scan of one source text for documentation blocks.
///
/// Yields blocks in file order. The first error is yielded once and then the
/// iterator is exhausted.
///
/// An opener only counts at the start of a line. Plain `/* ... */` comments
/// opened anywhere on a line are tracked, so blocks inside commented-out
/// regions are not extracted. String and character literals are not
/// recognised: a `/*` inside a literal opens a comment.
pub struct Extractor<'a> {
    source: &'a str,
    file_id: usize,
    lines: Lines<'a>,
    state: ScanState,
    done: bool,
}

impl<'a> Extractor<'a> {
    pub fn new(source: &'a str, file_id: usize) -> Self {
        Extractor {
            source,
            file_id,
            lines: Lines::new(source),
            state: ScanState::Outside,
            done: false,
        }
    }
}

impl Iterator for Extractor<'_> {
    type Item = Result<DocBlock, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while let Some(line) = self.lines.next() {
            match self.step(line) {
                Ok(Some(block)) => return Some(Ok(block)),
                Ok(None) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }

        self.done = true;
        self.finish().map(Err)
    }
}

impl std::iter::FusedIterator for Extractor<'_> {}

// ---------------------------------------------------------------------------
// Scan state
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum ScanState {
    Outside,
    /// Envelope opened, no content seen yet.
    InBlock { start: Opened },
    /// Heading line matched; collecting body lines.
    InBody(BlockBuilder),
    /// Ordinary comment; skipped until its closer.
    InComment { start: Opened },
}

#[derive(Debug, Clone, Copy)]
struct Opened {
    line: usize,
    offset: usize,
}

#[derive(Debug)]
struct BlockBuilder {
    level: u8,
    title: String,
    body: Vec<String>,
    start: Opened,
}

impl BlockBuilder {
    /// `close_end` is the byte offset just past the closing `*/`.
    fn into_block(self, end: &Line<'_>, close_end: usize) -> DocBlock {
        DocBlock {
            level: self.level,
            title: self.title,
            body: self.body,
            anchor: None,
            span: self.start.offset..close_end,
            start_line: self.start.line,
            end_line: end.number,
        }
    }
}

/// One content line, stripped of its envelope decoration.
struct Content<'a> {
    text: &'a str,
    /// Byte offset in source just past `*/`, when the line closes the envelope.
    close_end: Option<usize>,
}

impl Content<'_> {
    fn closes(&self) -> bool {
        self.close_end.is_some()
    }
}

impl Extractor<'_> {
    fn step(&mut self, line: Line<'_>) -> Result<Option<DocBlock>, ParseError> {
        let state = std::mem::replace(&mut self.state, ScanState::Outside);

        match state {
            ScanState::Outside => {
                let Some(rest) = syntax::strip_open(line.text) else {
                    if syntax::opens_plain_comment(line.text) {
                        self.state = ScanState::InComment {
                            start: Opened {
                                line: line.number,
                                offset: line.offset,
                            },
                        };
                    }
                    return Ok(None);
                };
                let start = Opened {
                    line: line.number,
                    offset: line.offset,
                };
                // `/**/` is an empty comment.
                if rest.starts_with('/') {
                    return Ok(None);
                }
                let rest_offset = line.end_offset() - rest.len();
                self.first_content(start, content_of(rest, rest_offset), &line)
            }

            ScanState::InBlock { start } => {
                self.first_content(start, content_of(line.text, line.offset), &line)
            }

            ScanState::InBody(mut builder) => {
                let content = content_of(line.text, line.offset);
                if !(content.closes() && content.text.is_empty()) {
                    builder.body.push(content.text.to_string());
                }
                if let Some(close_end) = content.close_end {
                    let block = builder.into_block(&line, close_end);
                    trace!(
                        title = %block.title,
                        level = block.level,
                        line = block.start_line,
                        "extracted documentation block"
                    );
                    Ok(Some(block))
                } else {
                    self.state = ScanState::InBody(builder);
                    Ok(None)
                }
            }

            ScanState::InComment { start } => {
                if syntax::split_close(line.text).is_none() {
                    self.state = ScanState::InComment { start };
                } else {
                    trace!(line = start.line, "skipped ordinary comment");
                }
                Ok(None)
            }
        }
    }

    /// Classify a block by its first non-blank content line.
    fn first_content(
        &mut self,
        start: Opened,
        content: Content<'_>,
        line: &Line<'_>,
    ) -> Result<Option<DocBlock>, ParseError> {
        if content.text.is_empty() {
            if !content.closes() {
                self.state = ScanState::InBlock { start };
            }
            return Ok(None);
        }

        match syntax::parse_heading(content.text) {
            HeadingMatch::Heading { level, title } => {
                let builder = BlockBuilder {
                    level,
                    title,
                    body: Vec::new(),
                    start,
                };
                if let Some(close_end) = content.close_end {
                    return Ok(Some(builder.into_block(line, close_end)));
                }
                self.state = ScanState::InBody(builder);
                Ok(None)
            }
            HeadingMatch::Empty => Err(ParseError::new(
                ErrorKind::EmptyHeading { line: line.number },
                line.offset..line.end_offset(),
                self.file_id,
            )
            .with_note("a heading needs text after its `#` markers, e.g. `/**## Title`")),
            HeadingMatch::NotHeading => {
                if !content.closes() {
                    self.state = ScanState::InComment { start };
                }
                Ok(None)
            }
        }
    }

    fn finish(&mut self) -> Option<ParseError> {
        let start = match std::mem::replace(&mut self.state, ScanState::Outside) {
            ScanState::Outside => return None,
            ScanState::InBlock { start } | ScanState::InComment { start } => start,
            ScanState::InBody(builder) => builder.start,
        };
        Some(
            ParseError::new(
                ErrorKind::MalformedBlock { line: start.line },
                start.offset..self.source.len(),
                self.file_id,
            )
            .with_note(format!("add `{}` to close the block", syntax::CLOSE)),
        )
    }
}

/// `offset` is the byte offset of `text` in the source.
fn content_of(text: &str, offset: usize) -> Content<'_> {
    match syntax::split_close(text) {
        Some(before) => Content {
            text: syntax::strip_closing(before),
            close_end: Some(offset + before.len() + syntax::CLOSE.len()),
        },
        None => Content {
            text: syntax::strip_continuation(text),
            close_end: None,
        },
    }
}

// ---------------------------------------------------------------------------
// Line cursor
// ---------------------------------------------------------------------------

struct Line<'a> {
    /// Line text without its terminator.
    text: &'a str,
    /// 1-based line number.
    number: usize,
    /// Byte offset of the first character.
    offset: usize,
}

impl Line<'_> {
    fn end_offset(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Iterates lines with their numbers and byte offsets.
struct Lines<'a> {
    source: &'a str,
    offset: usize,
    number: usize,
}

impl<'a> Lines<'a> {
    fn new(source: &'a str) -> Self {
        Lines {
            source,
            offset: 0,
            number: 0,
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        if self.offset >= self.source.len() {
            return None;
        }

        let rest = &self.source[self.offset..];
        let (raw, consumed) = match rest.find('\n') {
            Some(pos) => (&rest[..pos], pos + 1),
            None => (rest, rest.len()),
        };
        let text = raw.strip_suffix('\r').unwrap_or(raw);

        let line = Line {
            text,
            number: self.number + 1,
            offset: self.offset,
        };
        self.offset += consumed;
        self.number += 1;
        Some(line)
    }
}
