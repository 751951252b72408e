//! INI layout file reading.
//!
//! The layout format is the classic sectioned `key = value` text:
//!
//! ```ini
//! [Page]
//! template = default
//!
//! [Tab:home]
//! title = Home
//!
//! [List:links]
//! tab = home
//!
//! [GitHub]
//! url = https://github.com
//! list = links
//! ```
//!
//! Keys are case-insensitive (stored lowercased); section names are kept
//! verbatim. Values of the special `[DEFAULT]` section act as fallbacks for
//! every other section.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::{CoreError, Result},
    model::Attributes,
};

/// Name of the fallback section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// One named section of the layout file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    attributes: Attributes,
}

impl IniSection {
    /// Section name as written between the brackets.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries of the section, with `[DEFAULT]` fallbacks appended.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Get a value by (lowercase) key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    /// Check if the section has a key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains(key)
    }
}

/// A parsed layout file: sections in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    defaults: Attributes,
    sections: Vec<IniSection>,
}

impl IniDocument {
    /// Read and parse a layout file.
    ///
    /// Fails with a "not found" configuration error before any parsing when
    /// `path` is not a file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parse layout text. `path` is only used in error messages.
    pub fn parse(content: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let mut parser = Parser {
            path: path.into(),
            defaults: Attributes::new(),
            sections: Vec::new(),
            current: None,
            open_value: None,
        };

        for (index, line) in content.lines().enumerate() {
            parser.line(index + 1, line)?;
        }

        Ok(parser.finish())
    }

    /// Sections in file order, excluding `[DEFAULT]`.
    pub fn sections(&self) -> impl Iterator<Item = &IniSection> {
        self.sections.iter()
    }

    /// Find a section by exact name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Values of the `[DEFAULT]` section.
    #[must_use]
    pub fn defaults(&self) -> &Attributes {
        &self.defaults
    }

    /// Number of sections, excluding `[DEFAULT]`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Where key/value lines currently go.
enum Target {
    Defaults,
    Section(usize),
}

struct Parser {
    path: PathBuf,
    defaults: Attributes,
    sections: Vec<IniSection>,
    current: Option<Target>,
    open_value: Option<OpenValue>,
}

/// The key whose value may still continue on deeper-indented lines.
struct OpenValue {
    key: String,
    indent: usize,
    blank_lines: usize,
}

impl Parser {
    fn line(&mut self, number: usize, raw: &str) -> Result<()> {
        let trimmed = raw.trim();
        let indent = raw.len() - raw.trim_start().len();

        // Blank lines belong to a multi-line value only if a continuation follows.
        if trimmed.is_empty() {
            if let Some(open) = self.open_value.as_mut() {
                open.blank_lines += 1;
            }
            return Ok(());
        }

        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            return Ok(());
        }

        // Line indented deeper than its key: multi-line value.
        if let Some(open) = self.open_value.take_if(|open| indent > open.indent) {
            let separator = "\n".repeat(open.blank_lines + 1);
            let target = self.target_mut(number)?;
            let value = format!(
                "{}{separator}{trimmed}",
                target.get(&open.key).unwrap_or_default()
            );
            target.insert(open.key.clone(), value);
            self.open_value = Some(OpenValue {
                blank_lines: 0,
                ..open
            });
            return Ok(());
        }
        self.open_value = None;

        if let Some(rest) = trimmed.strip_prefix('[')
            && let Some(close) = rest.rfind(']')
        {
            return self.open_section(number, &rest[..close]);
        }

        let Some(split) = trimmed.find(['=', ':']) else {
            return Err(self.error(number, format!("expected `key = value`, got `{trimmed}`")));
        };

        let key = trimmed[..split].trim().to_lowercase();
        let value = trimmed[split + 1..].trim();
        if key.is_empty() {
            return Err(self.error(number, "empty key"));
        }

        let section_name = self.current_name();
        let target = self.target_mut(number)?;
        if target.contains(&key) {
            return Err(self.error(
                number,
                format!("duplicate key `{key}` in [{}]", section_name.unwrap_or_default()),
            ));
        }
        target.insert(key.clone(), value);
        self.open_value = Some(OpenValue {
            key,
            indent,
            blank_lines: 0,
        });
        Ok(())
    }

    fn open_section(&mut self, number: usize, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(self.error(number, "empty section name"));
        }

        if name == DEFAULT_SECTION {
            self.current = Some(Target::Defaults);
            return Ok(());
        }

        if self.sections.iter().any(|s| s.name == name) {
            return Err(self.error(number, format!("section [{name}] already exists")));
        }

        debug!(section = name, line = number, "section");
        self.sections.push(IniSection {
            name: name.to_string(),
            attributes: Attributes::new(),
        });
        self.current = Some(Target::Section(self.sections.len() - 1));
        Ok(())
    }

    fn target_mut(&mut self, number: usize) -> Result<&mut Attributes> {
        match self.current {
            Some(Target::Defaults) => Ok(&mut self.defaults),
            Some(Target::Section(index)) => Ok(&mut self.sections[index].attributes),
            None => Err(self.error(number, "missing section header")),
        }
    }

    fn current_name(&self) -> Option<String> {
        match self.current {
            Some(Target::Defaults) => Some(DEFAULT_SECTION.to_string()),
            Some(Target::Section(index)) => Some(self.sections[index].name.clone()),
            None => None,
        }
    }

    fn error(&self, number: usize, message: impl Into<String>) -> CoreError {
        CoreError::ini(&self.path, number, message)
    }

    fn finish(self) -> IniDocument {
        let Parser {
            defaults,
            mut sections,
            ..
        } = self;

        for section in &mut sections {
            for (key, value) in defaults.iter() {
                if !section.attributes.contains(key) {
                    section.attributes.insert(key, value);
                }
            }
        }

        IniDocument { defaults, sections }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> IniDocument {
        IniDocument::parse(content, "test.ini").expect("parse")
    }

    #[test]
    fn test_sections_in_file_order() {
        let doc = parse(
            r#"
[Page]
template = default

[Tab:home]
title = Home

[List:links]
tab = home
"#,
        );

        let names: Vec<&str> = doc.sections().map(IniSection::name).collect();
        assert_eq!(names, ["Page", "Tab:home", "List:links"]);
        assert_eq!(doc.section("Page").and_then(|s| s.get("template")), Some("default"));
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_keys_lowercased_values_trimmed() {
        let doc = parse("[GitHub]\nURL =   https://github.com  \nText Color: white\n");
        let section = doc.section("GitHub").expect("section");
        assert_eq!(section.get("url"), Some("https://github.com"));
        assert_eq!(section.get("text color"), Some("white"));
    }

    #[test]
    fn test_value_split_at_first_delimiter() {
        let doc = parse("[Search]\nurl = https://example.com/?q=rust\n");
        assert_eq!(
            doc.section("Search").and_then(|s| s.get("url")),
            Some("https://example.com/?q=rust")
        );
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let doc = parse("# leading\n; also a comment\n[Page]\n  # indented comment\ntitle = Start\n");
        let page = doc.section("Page").expect("page");
        assert_eq!(page.attributes().len(), 1);
        assert_eq!(page.get("title"), Some("Start"));
    }

    #[test]
    fn test_continuation_lines() {
        let doc = parse("[Page]\nfooter = first line\n  second line\ntitle = Start\n");
        let page = doc.section("Page").expect("page");
        assert_eq!(page.get("footer"), Some("first line\nsecond line"));
        assert_eq!(page.get("title"), Some("Start"));
    }

    #[test]
    fn test_indented_keys_at_same_depth_are_separate() {
        let doc = parse("[GitHub]\n  url = https://github.com\n  list = links\n");
        let button = doc.section("GitHub").expect("section");
        assert_eq!(button.get("url"), Some("https://github.com"));
        assert_eq!(button.get("list"), Some("links"));
    }

    #[test]
    fn test_continuation_must_be_deeper_than_key() {
        let doc = parse("[Notes]\n  body = first\n    second\n  title = Notes\n");
        let notes = doc.section("Notes").expect("section");
        assert_eq!(notes.get("body"), Some("first\nsecond"));
        assert_eq!(notes.get("title"), Some("Notes"));
    }

    #[test]
    fn test_blank_lines_inside_multiline_value() {
        let doc = parse("[Notes]\nbody = a\n\n  b\n");
        assert_eq!(doc.section("Notes").and_then(|s| s.get("body")), Some("a\n\nb"));
    }

    #[test]
    fn test_trailing_blank_lines_not_kept() {
        let doc = parse("[Notes]\nbody = a\n\n\ntitle = Notes\n");
        let notes = doc.section("Notes").expect("section");
        assert_eq!(notes.get("body"), Some("a"));
        assert_eq!(notes.get("title"), Some("Notes"));
    }

    #[test]
    fn test_comment_only_document_is_empty() {
        let doc = parse("# nothing yet\n\n; still nothing\n");
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_empty_value() {
        let doc = parse("[Page]\nsubtitle =\n");
        assert_eq!(doc.section("Page").and_then(|s| s.get("subtitle")), Some(""));
    }

    #[test]
    fn test_default_section_fallbacks() {
        let doc = parse("[DEFAULT]\ncolor = gray\n\n[A]\nurl = a\ncolor = red\n\n[B]\nurl = b\n");

        let names: Vec<&str> = doc.sections().map(IniSection::name).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(doc.section("A").and_then(|s| s.get("color")), Some("red"));
        assert_eq!(doc.section("B").and_then(|s| s.get("color")), Some("gray"));

        let keys: Vec<&str> = doc
            .section("B")
            .expect("section")
            .attributes()
            .iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, ["url", "color"]);
        assert_eq!(doc.defaults().get("color"), Some("gray"));
    }

    #[test]
    fn test_missing_section_header() {
        let err = IniDocument::parse("title = Start\n", "test.ini").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 1"));
        assert!(msg.contains("missing section header"));
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let err = IniDocument::parse("[Tab:home]\n[Tab:home]\n", "test.ini").unwrap_err();
        assert!(err.to_string().contains("[Tab:home] already exists"));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = IniDocument::parse("[A]\nurl = a\nURL = b\n", "test.ini").unwrap_err();
        assert!(err.to_string().contains("duplicate key `url` in [A]"));
    }

    #[test]
    fn test_line_without_delimiter_rejected() {
        let err = IniDocument::parse("[A]\njust some words\n", "test.ini").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = IniDocument::load(Path::new("/nonexistent/homepage.ini")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("homepage.ini");
        std::fs::write(&path, "[Tab:home]\ntitle = Home\n").expect("write");

        let doc = IniDocument::load(&path).expect("load");
        assert_eq!(doc.section("Tab:home").and_then(|s| s.get("title")), Some("Home"));
    }
}
