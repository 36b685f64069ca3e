use std::path::Path;

use crate::backend::{Backend, collapse_whitespace, expand_tabs};
use crate::config::BookConfig;

const RULE: &str = "=========================================================";

/// Plain text output: `++` headings, comment text as-is, and code listings
/// framed with the file they come from.
#[derive(Debug, Default)]
pub struct TextBackend {
    buffer: String,
}

impl TextBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for TextBackend {
    fn begin(&mut self, _config: &BookConfig) {}

    fn heading(&mut self, _level: u8, title: &str, _file: &str, _line: usize) {
        self.buffer
            .push_str(&format!("++ {}\n", collapse_whitespace(title)));
    }

    fn comment(&mut self, body: &[String], _file: &str, _start_line: usize, _end_line: usize) {
        for line in body {
            self.buffer.push_str(line);
            self.buffer.push('\n');
        }
    }

    fn code(&mut self, code: &str, file: &str, start_line: usize, _end_line: usize) {
        let code = expand_tabs(code.trim_end_matches([' ', '\t', '\n']));
        let base = Path::new(file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file);
        self.buffer.push_str(&format!(
            "\n== {} ({}:{}) ================\n{}\n",
            base, file, start_line, code
        ));
        self.buffer.push_str(RULE);
        self.buffer.push_str("\n\n");
    }

    fn end(&mut self) {}

    fn finish(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_comment_and_code() {
        let mut backend = TextBackend::new();
        backend.begin(&BookConfig::default());
        backend.heading(2, "  Adding   numbers ", "src/add.c", 1);
        backend.comment(&["Adds two integers.".to_string()], "src/add.c", 1, 3);
        backend.code("int add(int a, int b) {\n\treturn a + b;\n}\n", "src/add.c", 4, 6);
        backend.end();

        let out = backend.finish();
        assert_eq!(
            out,
            format!(
                "++ Adding numbers\nAdds two integers.\n\n== add.c (src/add.c:4) ================\nint add(int a, int b) {{\n   return a + b;\n}}\n{RULE}\n\n"
            )
        );
        assert!(backend.finish().is_empty());
    }
}
