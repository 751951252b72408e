//! Section classification.
//!
//! Sorts the sections of a layout file into the roles the model builder
//! understands. Classification looks at names and keys only; references
//! between sections are checked later by [`crate::resolve`].

use homepage_core::{IniDocument, IniSection};
use tracing::debug;

/// Section holding page metadata such as `template`.
pub const PAGE_SECTION: &str = "Page";
/// Section holding page-level style defaults.
pub const PAGE_STYLE_SECTION: &str = "Page Style";
/// Section holding button-level style defaults.
pub const BUTTON_STYLE_SECTION: &str = "Button Style";
/// Name prefix of tab sections.
pub const TAB_PREFIX: &str = "Tab:";
/// Name prefix of list sections.
pub const LIST_PREFIX: &str = "List:";
/// Key that turns any section into a button.
pub const URL_KEY: &str = "url";
/// Key naming the tab a list belongs to.
pub const TAB_KEY: &str = "tab";
/// Key naming the list a button belongs to.
pub const LIST_KEY: &str = "list";

/// The role of a single section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionRole<'a> {
    /// `[Page]`.
    Page,
    /// `[Page Style]`.
    PageStyle,
    /// `[Button Style]`.
    ButtonStyle,
    /// `[Tab:<id>]`.
    Tab { id: &'a str },
    /// `[List:<id>]`.
    List { id: &'a str },
    /// Any other section with a `url` key.
    Button,
    /// Everything else.
    Ignored,
}

/// Classify one section. Fixed names win over prefixes, prefixes over `url`.
#[must_use]
pub fn classify(section: &IniSection) -> SectionRole<'_> {
    let name = section.name();
    match name {
        PAGE_SECTION => SectionRole::Page,
        PAGE_STYLE_SECTION => SectionRole::PageStyle,
        BUTTON_STYLE_SECTION => SectionRole::ButtonStyle,
        _ => {
            if let Some(id) = name.strip_prefix(TAB_PREFIX) {
                SectionRole::Tab { id: id.trim() }
            } else if let Some(id) = name.strip_prefix(LIST_PREFIX) {
                SectionRole::List { id: id.trim() }
            } else if section.contains(URL_KEY) {
                SectionRole::Button
            } else {
                SectionRole::Ignored
            }
        }
    }
}

/// Sections of a document grouped by role, each group in file order.
#[derive(Debug, Default)]
pub struct ClassifiedSections<'a> {
    /// `[Page]`, if present.
    pub page: Option<&'a IniSection>,
    /// `[Page Style]`, if present.
    pub page_style: Option<&'a IniSection>,
    /// `[Button Style]`, if present.
    pub button_style: Option<&'a IniSection>,
    /// Tab sections with their ids.
    pub tabs: Vec<(&'a str, &'a IniSection)>,
    /// List sections with their ids.
    pub lists: Vec<(&'a str, &'a IniSection)>,
    /// Button sections.
    pub buttons: Vec<&'a IniSection>,
    /// Sections with no recognised role.
    pub ignored: Vec<&'a IniSection>,
}

impl<'a> ClassifiedSections<'a> {
    /// Classify every section of `document`.
    #[must_use]
    pub fn from_document(document: &'a IniDocument) -> Self {
        let mut classified = Self::default();

        for section in document.sections() {
            let role = classify(section);
            debug!(section = section.name(), ?role, "classified section");

            match role {
                SectionRole::Page => classified.page = Some(section),
                SectionRole::PageStyle => classified.page_style = Some(section),
                SectionRole::ButtonStyle => classified.button_style = Some(section),
                SectionRole::Tab { id } => classified.tabs.push((id, section)),
                SectionRole::List { id } => classified.lists.push((id, section)),
                SectionRole::Button => classified.buttons.push(section),
                SectionRole::Ignored => classified.ignored.push(section),
            }
        }

        classified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> IniDocument {
        IniDocument::parse(content, "test.ini").expect("parse")
    }

    fn role_of(content: &str, name: &str) -> String {
        let document = doc(content);
        let section = document.section(name).expect("section");
        format!("{:?}", classify(section))
    }

    #[test]
    fn test_fixed_sections() {
        let content = "[Page]\n[Page Style]\n[Button Style]\n";
        assert_eq!(role_of(content, "Page"), "Page");
        assert_eq!(role_of(content, "Page Style"), "PageStyle");
        assert_eq!(role_of(content, "Button Style"), "ButtonStyle");
    }

    #[test]
    fn test_prefixed_sections() {
        let document = doc("[Tab:home]\n[List: links ]\ntab = home\n");
        assert_eq!(
            classify(document.section("Tab:home").expect("tab")),
            SectionRole::Tab { id: "home" }
        );
        assert_eq!(
            classify(document.section("List: links ").expect("list")),
            SectionRole::List { id: "links" }
        );
    }

    #[test]
    fn test_any_section_with_url_is_button() {
        let document = doc("[GitHub]\nurl = https://github.com\nlist = code\n[Notes]\ntext = hi\n");
        assert_eq!(
            classify(document.section("GitHub").expect("button")),
            SectionRole::Button
        );
        assert_eq!(
            classify(document.section("Notes").expect("notes")),
            SectionRole::Ignored
        );
    }

    #[test]
    fn test_prefix_wins_over_url() {
        let document = doc("[List:links]\ntab = home\nurl = https://example.com\n");
        assert_eq!(
            classify(document.section("List:links").expect("list")),
            SectionRole::List { id: "links" }
        );
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let document = doc("[tab:home]\n");
        assert_eq!(
            classify(document.section("tab:home").expect("section")),
            SectionRole::Ignored
        );
    }

    #[test]
    fn test_grouping_keeps_file_order() {
        let document = doc(
            "[B1]\nurl = b1\nlist = l\n[Tab:t2]\n[List:l]\ntab = t1\n[Tab:t1]\n[B2]\nurl = b2\nlist = l\n[Button Style]\ncolor = blue\n[Misc]\n",
        );
        let classified = ClassifiedSections::from_document(&document);

        let tabs: Vec<&str> = classified.tabs.iter().map(|(id, _)| *id).collect();
        assert_eq!(tabs, ["t2", "t1"]);
        let lists: Vec<&str> = classified.lists.iter().map(|(id, _)| *id).collect();
        assert_eq!(lists, ["l"]);
        let buttons: Vec<&str> = classified.buttons.iter().map(|s| s.name()).collect();
        assert_eq!(buttons, ["B1", "B2"]);
        assert!(classified.button_style.is_some());
        assert!(classified.page.is_none());
        assert_eq!(classified.ignored.len(), 1);
    }
}
