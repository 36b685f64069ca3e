use pulldown_cmark::{Options, Parser as CmarkParser, html};
use pulldown_cmark_escape::escape_html;

use crate::backend::Backend;
use crate::config::BookConfig;
use crate::markdown::MarkdownBackend;

/// HTML page built by rendering the Markdown backend's output with
/// pulldown-cmark.
#[derive(Debug, Default)]
pub struct HtmlBackend {
    markdown: MarkdownBackend,
    title: String,
    author: Option<String>,
}

impl HtmlBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_html(&mut out, text).expect("writing to a String cannot fail");
    out
}

impl Backend for HtmlBackend {
    fn begin(&mut self, config: &BookConfig) {
        self.title = config.title.clone();
        self.author = config.author.clone();
        self.markdown.begin(config);
    }

    fn heading(&mut self, level: u8, title: &str, file: &str, line: usize) {
        self.markdown.heading(level, title, file, line);
    }

    fn comment(&mut self, body: &[String], file: &str, start_line: usize, end_line: usize) {
        self.markdown.comment(body, file, start_line, end_line);
    }

    fn code(&mut self, code: &str, file: &str, start_line: usize, end_line: usize) {
        self.markdown.code(code, file, start_line, end_line);
    }

    fn end(&mut self) {
        self.markdown.end();
    }

    fn finish(&mut self) -> String {
        let source = self.markdown.finish();
        let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
        let mut body = String::new();
        html::push_html(&mut body, CmarkParser::new_ext(&source, options));

        let mut page = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        page.push_str(&format!("<title>{}</title>\n", escaped(&self.title)));
        if let Some(author) = self.author.take() {
            page.push_str(&format!(
                "<meta name=\"author\" content=\"{}\">\n",
                escaped(&author)
            ));
        }
        page.push_str("</head>\n<body>\n");
        page.push_str(&body);
        page.push_str("</body>\n</html>\n");
        self.title.clear();
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_markdown_into_a_page() {
        let mut backend = HtmlBackend::new();
        backend.begin(&BookConfig {
            title: "Add <ints>".to_string(),
            ..BookConfig::default()
        });
        backend.heading(2, "Functions", "a.c", 1);
        backend.comment(&["Uses **bold** text.".to_string()], "a.c", 1, 2);
        backend.code("int x = 1 < 2;", "a.c", 3, 3);
        backend.end();
        let page = backend.finish();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Add &lt;ints&gt;</title>"));
        assert!(page.contains("<h2>Functions</h2>"));
        assert!(page.contains("<strong>bold</strong>"));
        assert!(page.contains("<pre><code class=\"language-c\">int x = 1 &lt; 2;\n</code></pre>"));
        assert!(page.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn page_metadata_is_escaped() {
        let mut backend = HtmlBackend::new();
        backend.begin(&BookConfig {
            title: "A & B".to_string(),
            author: Some("\"Q\" <q@example.com>".to_string()),
            ..BookConfig::default()
        });
        backend.end();
        let page = backend.finish();

        assert!(page.contains("<title>A &amp; B</title>"));
        assert!(page.contains("content=\"&quot;Q&quot; &lt;q@example.com&gt;\""));
    }

    #[test]
    fn markdown_in_title_and_author_stays_literal() {
        let mut backend = HtmlBackend::new();
        backend.begin(&BookConfig {
            title: "x < y".to_string(),
            author: Some("*x*".to_string()),
            ..BookConfig::default()
        });
        backend.heading(2, "a_b_c [link]", "a.c", 1);
        backend.end();
        let page = backend.finish();

        assert!(page.contains("<h1>x &lt; y</h1>"));
        assert!(!page.contains("<em>x</em>"));
        assert!(page.contains("<h2>a_b_c [link]</h2>"));
    }
}
