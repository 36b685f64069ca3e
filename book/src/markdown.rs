use crate::backend::{Backend, collapse_whitespace};
use crate::config::BookConfig;

/// CommonMark output. Comment bodies are passed through unchanged, so
/// Markdown written inside documentation blocks renders as such.
#[derive(Debug, Default)]
pub struct MarkdownBackend {
    buffer: String,
}

impl MarkdownBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Backslash-escape characters that would start inline markup, so titles and
/// names render literally.
fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in collapse_whitespace(text).chars() {
        if matches!(
            c,
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '!' | '#' | '|' | '~' | '&'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// A backtick fence longer than any backtick run inside `code`.
fn fence_for(code: &str) -> String {
    let longest = code
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

impl Backend for MarkdownBackend {
    fn begin(&mut self, config: &BookConfig) {
        if !config.title.is_empty() {
            self.buffer
                .push_str(&format!("# {}\n\n", escape_inline(&config.title)));
        }
        if let Some(author) = config.author.as_deref().filter(|a| !a.is_empty()) {
            self.buffer.push_str(&format!("*{}*\n\n", escape_inline(author)));
        }
    }

    fn heading(&mut self, level: u8, title: &str, _file: &str, _line: usize) {
        let level = usize::from(level.clamp(1, 6));
        self.buffer.push_str(&format!(
            "{} {}\n\n",
            "#".repeat(level),
            escape_inline(title)
        ));
    }

    fn comment(&mut self, body: &[String], _file: &str, _start_line: usize, _end_line: usize) {
        let text = body.join("\n");
        let text = text.trim_matches('\n');
        if text.is_empty() {
            return;
        }
        self.buffer.push_str(text);
        self.buffer.push_str("\n\n");
    }

    fn code(&mut self, code: &str, _file: &str, _start_line: usize, _end_line: usize) {
        let code = code.trim_end_matches('\n');
        let fence = fence_for(code);
        self.buffer
            .push_str(&format!("{fence}c\n{code}\n{fence}\n\n"));
    }

    fn end(&mut self) {}

    fn finish(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}
