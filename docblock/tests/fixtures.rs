//! Runs every `tests/fixtures/*.test.c` file.
//!
//! A fixture starts with a TOML frontmatter between `---` lines describing
//! the blocks (and optionally the error) extraction must produce for the C
//! source that follows it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use docblock::{DocBlock, ErrorKind, Parser};

#[derive(Debug, Deserialize)]
struct ExpectedBlock {
    level: u8,
    title: String,
    #[serde(default)]
    body: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FixtureConfig {
    #[serde(default)]
    description: Option<String>,

    /// Blocks yielded before extraction ends (or fails).
    #[serde(default)]
    expect_blocks: Vec<ExpectedBlock>,

    /// Name of the expected `ErrorKind` variant.
    #[serde(default)]
    expect_error: Option<String>,

    /// 1-based line, relative to the source after the frontmatter.
    #[serde(default)]
    expect_line: Option<usize>,
}

/// Split a fixture into its TOML config and C source.
fn parse_fixture(content: &str) -> Result<(FixtureConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}');

    let after_open = content
        .strip_prefix("---")
        .ok_or("missing opening --- frontmatter delimiter")?;
    let after_open = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;

    let toml_str = after_open[..close_pos].trim_end_matches('\r');
    let rest = &after_open[close_pos + 4..];
    let source = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    let config: FixtureConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, source))
}

fn error_name(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::MalformedBlock { .. } => "MalformedBlock",
        ErrorKind::EmptyHeading { .. } => "EmptyHeading",
    }
}

fn check_blocks(actual: &[DocBlock], expected: &[ExpectedBlock]) -> Option<String> {
    if actual.len() != expected.len() {
        let titles: Vec<&str> = actual.iter().map(|b| b.title.as_str()).collect();
        return Some(format!(
            "expected {} block(s), got {}: {:?}",
            expected.len(),
            actual.len(),
            titles
        ));
    }

    for (i, (actual, expected)) in actual.iter().zip(expected).enumerate() {
        if actual.level != expected.level || actual.title != expected.title {
            return Some(format!(
                "block[{}]: expected level {} \"{}\", got level {} \"{}\"",
                i, expected.level, expected.title, actual.level, actual.title
            ));
        }
        if actual.body != expected.body {
            return Some(format!(
                "block[{}]: body mismatch\n  expected: {:?}\n  actual:   {:?}",
                i, expected.body, actual.body
            ));
        }
    }

    None
}

fn run_fixture(path: &Path) -> Result<(), String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read file: {}", e))?;
    let (config, source) = parse_fixture(&content).map_err(|e| format!("frontmatter error: {}", e))?;

    let parser = Parser::new(source.to_string(), 0);
    let mut blocks = Vec::new();
    let mut error = None;
    for item in parser.blocks() {
        match item {
            Ok(block) => blocks.push(block),
            Err(err) => error = Some(err),
        }
    }

    if let Some(reason) = check_blocks(&blocks, &config.expect_blocks) {
        return Err(reason);
    }

    match (&config.expect_error, error) {
        (None, None) => Ok(()),
        (None, Some(err)) => Err(format!("unexpected error: {}", err)),
        (Some(expected), None) => Err(format!(
            "expected {} error, but extraction succeeded",
            expected
        )),
        (Some(expected), Some(err)) => {
            if error_name(&err.kind) != expected {
                return Err(format!("expected {} error, got: {}", expected, err));
            }
            match config.expect_line {
                Some(line) if line != err.line() => Err(format!(
                    "expected error on line {}, got line {}",
                    line,
                    err.line()
                )),
                _ => Ok(()),
            }
        }
    }
}

fn discover(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("fixtures directory exists")
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".test.c"))
        })
        .collect();
    files.sort();
    files
}

#[test]
fn fixtures() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let files = discover(&dir);
    assert!(!files.is_empty(), "no fixtures found in {}", dir.display());

    let mut failures = Vec::new();
    for file in &files {
        if let Err(reason) = run_fixture(file) {
            failures.push(format!("--- {} ---\n{}", file.display(), reason));
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} fixture(s) failed:\n\n{}",
        failures.len(),
        files.len(),
        failures.join("\n\n")
    );
}

#[test]
fn fixture_descriptions_are_present() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    for file in discover(&dir) {
        let content = std::fs::read_to_string(&file).unwrap();
        let (config, _) = parse_fixture(&content).unwrap();
        assert!(
            config.description.is_some_and(|d| !d.is_empty()),
            "{} has no description",
            file.display()
        );
    }
}
