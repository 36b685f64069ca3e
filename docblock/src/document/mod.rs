use crate::block::{DocBlock, anchor};
use crate::parser::{Extractor, ParseError};

/// A source file split into documentation blocks and the code between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub segments: Vec<Segment>,
}

/// A single piece of a literate document, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Doc(DocBlock),
    /// Source lines outside documentation blocks, with surrounding blank
    /// lines removed. Ordinary comments are part of the code.
    Code {
        text: String,
        start_line: usize,
        end_line: usize,
    },
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Extract blocks, resolve their anchors and interleave the code between
    /// them.
    pub fn parse(source: &str, file_id: usize) -> Result<Self, ParseError> {
        let mut blocks = Extractor::new(source, file_id).collect::<Result<Vec<_>, _>>()?;
        anchor::resolve_all(source, &mut blocks);

        let lines: Vec<&str> = source.lines().collect();
        let mut segments = Vec::new();
        let mut next_line = 1;

        for block in blocks {
            push_code(&mut segments, &lines, next_line, block.start_line - 1);
            next_line = block.end_line + 1;

            let tail = anchor::closing_line_tail(source, &block).trim();
            let tail = (!tail.is_empty()).then(|| Segment::Code {
                text: tail.to_string(),
                start_line: block.end_line,
                end_line: block.end_line,
            });
            segments.push(Segment::Doc(block));
            segments.extend(tail);
        }
        push_code(&mut segments, &lines, next_line, lines.len());

        Ok(Document { segments })
    }

    pub fn blocks(&self) -> impl Iterator<Item = &DocBlock> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Doc(block) => Some(block),
            Segment::Code { .. } => None,
        })
    }
}

/// Push the non-blank code between 1-based lines `first..=last`, if any.
fn push_code(segments: &mut Vec<Segment>, lines: &[&str], first: usize, last: usize) {
    if first > last {
        return;
    }
    let range = &lines[first - 1..last];

    let Some(lead) = range.iter().position(|l| !l.trim().is_empty()) else {
        return;
    };
    let trail = range
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(lead);

    let text = range[lead..=trail]
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    segments.push(Segment::Code {
        text,
        start_line: first + lead,
        end_line: first + trail,
    });
}
