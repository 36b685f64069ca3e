use std::sync::LazyLock;

use regex::Regex;

use crate::backend::{Backend, collapse_whitespace, expand_tabs};
use crate::config::{BookConfig, Style};

static SPECIAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([#%&~$_^{}])").expect("valid regex"));
/// `` `code' `` spans in comments.
static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`']*)'").expect("valid regex"));
static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("valid regex"));

const BACKSLASH_PLACEHOLDER: &str = ":\\backslash:";

const VERBATIM_BEGIN: &str = "\\begin{Verbatim}[fontsize=\\small,frame=leftline,framerule=0.9mm,\
rulecolor=\\color{gray},framesep=5.1mm,xleftmargin=5mm,fontfamily=cmtt]";

/// Escape LaTeX special characters with a backslash.
///
/// A doubled backslash becomes `$\backslash$`; a single backslash is kept.
pub fn escape(text: &str) -> String {
    let text = text.replace("\\\\", BACKSLASH_PLACEHOLDER);
    let escaped = SPECIAL_CHARS.replace_all(&text, r"\${1}");
    escaped.replace(BACKSLASH_PLACEHOLDER, "$\\backslash$")
}

/// LaTeX output with one sectioning command per heading level and code in
/// `Verbatim` environments.
#[derive(Debug, Default)]
pub struct TexBackend {
    buffer: String,
    style: Style,
}

impl TexBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sectioning command for a heading level; levels past the deepest
    /// command reuse it.
    pub fn sectioning_command(&self, level: u8) -> &'static str {
        let commands = self.style.sectioning_commands();
        let index = usize::from(level.saturating_sub(1)).min(commands.len() - 1);
        commands[index]
    }
}

impl Backend for TexBackend {
    fn begin(&mut self, config: &BookConfig) {
        self.style = config.style;

        let author = match &config.author {
            Some(author) if !author.is_empty() => format!("\\author{{{}}}\n", escape(author)),
            _ => String::new(),
        };
        let toc = if config.include_toc {
            "\\tableofcontents\n"
        } else {
            ""
        };

        self.buffer.push_str(&format!(
            "\\documentclass[notitlepage,a4paper]{{{}}}\n\
             \\usepackage{{fancyvrb,color,palatino}}\n\
             \\definecolor{{gray}}{{gray}}{{0.6}}\n\
             \\title{{{}}}\n\
             {}\
             \\begin{{document}}\n\
             \\maketitle\n\
             {}",
            config.style.as_str(),
            escape(&config.title),
            author,
            toc
        ));
    }

    fn heading(&mut self, level: u8, title: &str, _file: &str, _line: usize) {
        let command = self.sectioning_command(level);
        self.buffer.push_str(&format!(
            "\\{}{{{}}}\n",
            command,
            escape(&collapse_whitespace(title))
        ));
    }

    fn comment(&mut self, body: &[String], _file: &str, _start_line: usize, _end_line: usize) {
        let mut text = body.join("\n");
        text.push('\n');
        let escaped = escape(&text);
        let escaped = CODE_SPAN.replace_all(&escaped, r"{\tt ${1}}");
        let escaped = QUOTED.replace_all(&escaped, "``${1}''");
        self.buffer.push_str(&escaped);
    }

    fn code(&mut self, code: &str, _file: &str, _start_line: usize, _end_line: usize) {
        let code = code
            .trim_end_matches('\n')
            .replace("\\end{Verbatim}", "\\\\_end{Verbatim}");
        let code = expand_tabs(&code);
        self.buffer.push('\n');
        self.buffer.push_str(VERBATIM_BEGIN);
        self.buffer.push('\n');
        self.buffer.push_str(&code);
        self.buffer.push_str("\n\\end{Verbatim}\n");
    }

    fn end(&mut self) {
        self.buffer.push_str("\\end{document}\n");
    }

    fn finish(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}
