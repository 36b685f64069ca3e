use serde::Deserialize;

use crate::error::BookError;

/// Document class used by the LaTeX backend; also decides which sectioning
/// commands headings map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Article,
    Book,
}

impl Style {
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Article => "article",
            Style::Book => "book",
        }
    }

    /// Sectioning commands from the outermost heading level inwards.
    pub fn sectioning_commands(self) -> &'static [&'static str] {
        match self {
            Style::Article => &["section", "subsection", "subsubsection"],
            Style::Book => &["chapter", "section", "subsection", "subsubsection"],
        }
    }
}

/// Settings for rendering a set of source files into one document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookConfig {
    pub title: String,
    pub author: Option<String>,
    pub style: Style,
    /// Emit a table of contents (LaTeX only).
    pub include_toc: bool,
}

impl Default for BookConfig {
    fn default() -> Self {
        BookConfig {
            title: String::new(),
            author: None,
            style: Style::Article,
            include_toc: true,
        }
    }
}

impl BookConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, BookError> {
        Ok(toml::from_str(s)?)
    }
}
