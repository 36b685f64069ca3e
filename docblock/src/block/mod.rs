pub mod anchor;

use std::ops::Range;

use crate::block::anchor::Anchor;

/// A documentation block extracted from a `/**# ... */` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    /// Number of leading `#` markers on the heading line, at least 1.
    pub level: u8,
    /// Heading text, whitespace-normalized. Never empty.
    pub title: String,
    /// Lines following the heading with the `**` decoration stripped.
    /// Blank lines are kept as empty strings.
    pub body: Vec<String>,
    /// The code this block documents. Left unset by the extractor;
    /// see [`anchor::resolve_all`].
    pub anchor: Option<Anchor>,
    /// Byte span of the whole envelope in source, for error reporting.
    pub span: Range<usize>,
    /// 1-based line of the envelope opener.
    pub start_line: usize,
    /// 1-based line of the envelope closer.
    pub end_line: usize,
}

impl DocBlock {
    /// Body lines joined with newlines.
    pub fn body_text(&self) -> String {
        self.body.join("\n")
    }

    pub fn is_empty_body(&self) -> bool {
        self.body.iter().all(|line| line.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(body: &[&str]) -> DocBlock {
        DocBlock {
            level: 2,
            title: "Title".to_string(),
            body: body.iter().map(|line| line.to_string()).collect(),
            anchor: None,
            span: 0..0,
            start_line: 1,
            end_line: 1 + body.len(),
        }
    }

    #[test]
    fn body_text_joins_lines() {
        assert_eq!(block(&["one", "", "two"]).body_text(), "one\n\ntwo");
        assert_eq!(block(&["only"]).body_text(), "only");
        assert_eq!(block(&[]).body_text(), "");
    }

    #[test]
    fn blank_bodies_are_empty() {
        assert!(block(&[]).is_empty_body());
        assert!(block(&["", ""]).is_empty_body());
        assert!(!block(&["", "text"]).is_empty_body());
    }
}
