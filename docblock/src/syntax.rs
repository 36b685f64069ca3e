//! Comment syntax recognised by the extractor.
//!
//! Documentation lives in C block comments opened with `/**` and continued
//! with a `**` prefix on each following line:
//!
//! ```text
//! /**## Title
//!  ** body text
//!  **/
//! ```

/// Opens an envelope when it is the first non-whitespace text on a line.
pub const OPEN: &str = "/**";

/// Closes an envelope anywhere on a line.
pub const CLOSE: &str = "*/";

/// Per-line decoration inside an envelope.
pub const CONTINUATION: &str = "**";

pub const HEADING_MARKER: char = '#';

/// Result of matching one content line against the heading grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingMatch {
    /// The line does not start with `#` followed by whitespace.
    NotHeading,
    /// Heading markers with nothing after them.
    Empty,
    Heading { level: u8, title: String },
}

/// Returns the text after the envelope opener if `line` opens one.
pub fn strip_open(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix(OPEN)
}

/// Splits a line at the envelope closer, returning the text before it.
pub fn split_close(line: &str) -> Option<&str> {
    line.find(CLOSE).map(|pos| &line[..pos])
}

/// Whether `line` leaves a plain `/*` comment open at its end.
///
/// Comments closed on the same line and anything after `//` are ignored.
pub fn opens_plain_comment(line: &str) -> bool {
    let mut rest = line;
    loop {
        let Some(open) = rest.find("/*") else {
            return false;
        };
        if rest.find("//").is_some_and(|slash| slash < open) {
            return false;
        }
        match rest[open + 2..].find(CLOSE) {
            Some(close) => rest = &rest[open + 2 + close + CLOSE.len()..],
            None => return true,
        }
    }
}

/// Strip leading whitespace and one continuation prefix, then trim.
pub fn strip_continuation(line: &str) -> &str {
    let line = line.trim_start();
    line.strip_prefix(CONTINUATION).unwrap_or(line).trim()
}

/// Clean the text that precedes `*/` on a closing line.
///
/// Closers are usually written as ` **/`, so trailing `*` belong to the
/// delimiter rather than the content.
pub fn strip_closing(before_close: &str) -> &str {
    strip_continuation(before_close)
        .trim_end_matches('*')
        .trim_end()
}

/// Match a stripped content line against the heading grammar:
/// one or more `#`, whitespace, then title text.
pub fn parse_heading(content: &str) -> HeadingMatch {
    let content = content.trim();
    let rest = content.trim_start_matches(HEADING_MARKER);
    let markers = content.len() - rest.len();
    if markers == 0 {
        return HeadingMatch::NotHeading;
    }

    if rest.trim().is_empty() {
        return HeadingMatch::Empty;
    }
    if !rest.starts_with(char::is_whitespace) {
        return HeadingMatch::NotHeading;
    }

    HeadingMatch::Heading {
        level: u8::try_from(markers).unwrap_or(u8::MAX),
        title: normalize_title(rest),
    }
}

/// Strip leading/trailing whitespace and collapse interior whitespace.
pub fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join(" ")
}
