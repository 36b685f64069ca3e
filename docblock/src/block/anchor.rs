//! Association of a documentation block with the code it documents.
//!
//! Anchors are resolved by textual proximity: the first non-blank code after
//! the block's closer (on the closing line itself, or on a later line) is the
//! documented code, unless it starts another comment.

use crate::block::DocBlock;

/// The code line a block is understood to document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// 1-based source line.
    pub line: usize,
    /// The code line, trimmed.
    pub text: String,
    /// The symbol declared on that line, when one can be recognised.
    pub symbol: Option<String>,
}

/// Resolve the anchor for a single block against the source it came from.
pub fn resolve(source: &str, block: &DocBlock) -> Option<Anchor> {
    let tail = (block.end_line, closing_line_tail(source, block));
    let (line, text) = std::iter::once(tail)
        .chain(source.lines().enumerate().skip(block.end_line).map(|(i, l)| (i + 1, l)))
        .find(|(_, text)| !text.trim().is_empty())?;

    let text = text.trim();
    if text.starts_with("/*") || text.starts_with("//") {
        return None;
    }

    Some(Anchor {
        line,
        text: text.to_string(),
        symbol: symbol_of(text),
    })
}

/// Text following the block's `*/` on its closing line.
pub fn closing_line_tail<'a>(source: &'a str, block: &DocBlock) -> &'a str {
    source
        .get(block.span.end..)
        .and_then(|rest| rest.lines().next())
        .unwrap_or("")
}

/// Fill in `anchor` on every block.
pub fn resolve_all(source: &str, blocks: &mut [DocBlock]) {
    for block in blocks.iter_mut() {
        block.anchor = resolve(source, block);
    }
}

/// Best-effort name of the symbol declared on a line of C code.
pub fn symbol_of(line: &str) -> Option<String> {
    let line = line.trim();

    if let Some(directive) = line.strip_prefix('#') {
        let mut words = directive.split_whitespace();
        return match words.next() {
            Some("define") => words
                .next()
                .map(|name| name.split('(').next().unwrap_or(name))
                .filter(|name| is_identifier(name))
                .map(str::to_string),
            _ => None,
        };
    }

    // Functions and function-like macros: the identifier right before `(`.
    if let Some(paren) = line.find('(') {
        if let Some(name) = last_identifier(&line[..paren]) {
            if !is_keyword(name) {
                return Some(name.to_string());
            }
        }
    }

    // Declarations: the last identifier before `=`, `;`, `{` or `[`.
    let end = line.find(['=', ';', '{', '[']).unwrap_or(line.len());
    last_identifier(&line[..end])
        .filter(|name| !is_keyword(name))
        .map(str::to_string)
}

fn last_identifier(text: &str) -> Option<&str> {
    text.trim_end()
        .rsplit(|c: char| !(c.is_alphanumeric() || c == '_'))
        .next()
        .filter(|word| is_identifier(word))
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "if" | "while" | "for" | "switch" | "return" | "sizeof" | "struct" | "union" | "enum"
            | "typedef"
    )
}
