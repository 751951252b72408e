//! Page model: tabs, lists and buttons.
//!
//! Every entity keeps its configuration as an ordered [`Attributes`] map so
//! arbitrary extra keys survive untouched until render time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};

use crate::error::{CoreError, Result};

/// Ordered key/value attributes of a config section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    /// Create an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for the key.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Get a value, failing with a missing-key error that names `section`.
    pub fn require(&self, section: &str, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| CoreError::missing_key(section, key))
    }

    /// Check if a key exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Overwrite entries with those from `other`; `other` wins on collision.
    pub fn merge_from(&mut self, other: &Attributes) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Button keys turned into CSS, as `(config key, css property)`.
///
/// `hover color` maps to an empty property name; browsers drop the
/// declaration, but templates rely on the exact string.
pub const BUTTON_CSS_PROPERTIES: [(&str, &str); 3] = [
    ("color", "background-color"),
    ("text color", "color"),
    ("hover color", ""),
];

/// Build the inline CSS for a button from a key lookup.
///
/// `section` is only used to name the button in a missing-key error.
pub fn button_css<'a>(
    section: &str,
    lookup: impl Fn(&str) -> Option<&'a str>,
) -> Result<String> {
    let mut declarations = Vec::with_capacity(BUTTON_CSS_PROPERTIES.len());
    for (key, property) in BUTTON_CSS_PROPERTIES {
        let value = lookup(key).ok_or_else(|| CoreError::missing_key(section, key))?;
        declarations.push(format!("{property}:{value}"));
    }
    Ok(declarations.join(";") + ";")
}

/// A clickable link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageButton {
    /// Name of the section the button was read from.
    pub section: String,

    /// Sequential number assigned during the build pass.
    pub element_id: usize,

    /// Id of the owning list.
    #[serde(rename = "list")]
    pub list_id: String,

    /// Button-style defaults overridden by the button's own keys.
    #[serde(rename = "data")]
    pub attributes: Attributes,
}

impl PageButton {
    /// Create a button from already merged attributes.
    #[must_use]
    pub fn new(
        section: impl Into<String>,
        element_id: usize,
        list_id: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        Self {
            section: section.into(),
            element_id,
            list_id: list_id.into(),
            attributes,
        }
    }

    /// The link target.
    pub fn url(&self) -> Result<&str> {
        self.attributes.require(&self.section, "url")
    }

    /// Inline CSS for the button, e.g. `background-color:blue;color:white;:red;`.
    pub fn css_style(&self) -> Result<String> {
        button_css(&self.section, |key| self.attributes.get(key))
    }
}

/// A column of buttons inside a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageList {
    /// Identifier taken from the `List:` section name.
    pub id: String,

    /// Sequential number assigned during the build pass.
    pub element_id: usize,

    /// Id of the owning tab.
    #[serde(rename = "tab")]
    pub tab_id: String,

    /// Section key/values plus `id`.
    #[serde(rename = "data")]
    pub attributes: Attributes,

    /// Buttons in file order.
    pub buttons: Vec<PageButton>,
}

impl PageList {
    /// Create an empty list.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        element_id: usize,
        tab_id: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        Self {
            id: id.into(),
            element_id,
            tab_id: tab_id.into(),
            attributes,
            buttons: Vec::new(),
        }
    }

    /// Append a button.
    pub fn add_button(&mut self, button: PageButton) {
        self.buttons.push(button);
    }
}

/// A navigation tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTab {
    /// Identifier taken from the `Tab:` section name.
    pub id: String,

    /// Sequential number assigned during the build pass.
    pub element_id: usize,

    /// Section key/values plus `id`.
    pub attributes: Attributes,

    /// Lists in file order.
    pub lists: Vec<PageList>,
}

impl PageTab {
    /// Create an empty tab.
    #[must_use]
    pub fn new(id: impl Into<String>, element_id: usize, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            element_id,
            attributes,
            lists: Vec::new(),
        }
    }

    /// Append a list.
    pub fn add_list(&mut self, list: PageList) {
        self.lists.push(list);
    }

    /// Display width of the tab.
    #[must_use]
    pub fn width(&self) -> String {
        tab_width(self.lists.len())
    }

    /// Every button on the tab regardless of list, in order.
    pub fn buttons(&self) -> impl Iterator<Item = &PageButton> {
        self.lists.iter().flat_map(|list| list.buttons.iter())
    }
}

/// Width for a tab holding `list_count` lists.
///
/// One to three lists take a quarter each; zero or more than three span the
/// whole row.
#[must_use]
pub fn tab_width(list_count: usize) -> String {
    match list_count {
        1..=3 => format!("{}%", 25 * list_count),
        _ => "100%".to_string(),
    }
}

// Tabs carry derived fields (`width`, flattened `buttons`) so templates can
// use them without calling back into Rust.
impl Serialize for PageTab {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let buttons: Vec<&PageButton> = self.buttons().collect();
        let mut state = serializer.serialize_struct("PageTab", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("element_id", &self.element_id)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("data", &self.attributes)?;
        state.serialize_field("lists", &self.lists)?;
        state.serialize_field("buttons", &buttons)?;
        state.end()
    }
}

/// Everything a template gets to see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageContext {
    /// The `[Page]` section.
    pub page: Attributes,

    /// The `[Page Style]` section, passed through unmodified.
    pub page_style: Attributes,

    /// The `[Button Style]` section, already merged into every button.
    pub button_style: Attributes,

    /// Tabs in file order.
    pub tabs: Vec<PageTab>,
}

impl PageContext {
    /// Total number of lists across all tabs.
    #[must_use]
    pub fn list_count(&self) -> usize {
        self.tabs.iter().map(|tab| tab.lists.len()).sum()
    }

    /// Total number of buttons across all tabs.
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.tabs.iter().map(|tab| tab.buttons().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn button(section: &str, attrs: Attributes) -> PageButton {
        PageButton::new(section, 1, "links", attrs)
    }

    #[test]
    fn test_tab_width_rule() {
        assert_eq!(tab_width(0), "100%");
        assert_eq!(tab_width(1), "25%");
        assert_eq!(tab_width(2), "50%");
        assert_eq!(tab_width(3), "75%");
        assert_eq!(tab_width(4), "100%");
        assert_eq!(tab_width(12), "100%");
    }

    #[test]
    fn test_tab_width_follows_lists() {
        let mut tab = PageTab::new("home", 1, Attributes::new().with("id", "home"));
        assert_eq!(tab.width(), "100%");

        tab.add_list(PageList::new("a", 2, "home", Attributes::new()));
        assert_eq!(tab.width(), "25%");

        tab.add_list(PageList::new("b", 3, "home", Attributes::new()));
        assert_eq!(tab.width(), "50%");
    }

    #[test]
    fn test_tab_buttons_flatten_in_order() {
        let mut first = PageList::new("a", 2, "home", Attributes::new());
        first.add_button(button("One", Attributes::new().with("url", "https://one")));
        let mut second = PageList::new("b", 3, "home", Attributes::new());
        second.add_button(button("Two", Attributes::new().with("url", "https://two")));
        second.add_button(button("Three", Attributes::new().with("url", "https://three")));

        let mut tab = PageTab::new("home", 1, Attributes::new());
        tab.add_list(first);
        tab.add_list(second);

        let sections: Vec<&str> = tab.buttons().map(|b| b.section.as_str()).collect();
        assert_eq!(sections, ["One", "Two", "Three"]);
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let attrs = Attributes::new()
            .with("url", "https://example.com")
            .with("list", "links")
            .with("color", "blue");
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["url", "list", "color"]);
    }

    #[test]
    fn test_merge_from_overrides_in_place() {
        let mut attrs = Attributes::new().with("color", "blue").with("text color", "white");
        attrs.merge_from(&Attributes::new().with("color", "red").with("url", "https://x"));

        assert_eq!(attrs.get("color"), Some("red"));
        assert_eq!(attrs.get("text color"), Some("white"));
        assert_eq!(attrs.get("url"), Some("https://x"));
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["color", "text color", "url"]);
    }

    #[test]
    fn test_require_names_section_and_key() {
        let attrs = Attributes::new();
        let err = attrs.require("GitHub", "list").unwrap_err();
        assert_eq!(err.to_string(), "Missing key `list` in [GitHub]");
    }

    #[test]
    fn test_button_css_style() {
        let b = button(
            "GitHub",
            Attributes::new()
                .with("url", "https://github.com")
                .with("color", "blue")
                .with("text color", "white")
                .with("hover color", "navy"),
        );
        assert_eq!(
            b.css_style().expect("style"),
            "background-color:blue;color:white;:navy;"
        );
        assert_eq!(b.url().expect("url"), "https://github.com");
    }

    #[test]
    fn test_button_css_missing_key() {
        let b = button("GitHub", Attributes::new().with("color", "blue"));
        let err = b.css_style().unwrap_err();
        assert!(err.to_string().contains("text color"));
        assert!(err.to_string().contains("GitHub"));
    }

    #[test]
    fn test_context_counts() {
        let mut list = PageList::new("links", 2, "home", Attributes::new());
        list.add_button(button("A", Attributes::new()));
        list.add_button(button("B", Attributes::new()));
        let mut tab = PageTab::new("home", 1, Attributes::new());
        tab.add_list(list);

        let context = PageContext {
            tabs: vec![tab, PageTab::new("empty", 4, Attributes::new())],
            ..PageContext::default()
        };
        assert_eq!(context.list_count(), 1);
        assert_eq!(context.button_count(), 2);
    }

    proptest! {
        #[test]
        fn prop_width_is_quarter_steps_or_full(count in 0usize..64) {
            let width = tab_width(count);
            if (1..=3).contains(&count) {
                prop_assert_eq!(width, format!("{}%", 25 * count));
            } else {
                prop_assert_eq!(width, "100%");
            }
        }

        #[test]
        fn prop_merge_own_keys_win(
            defaults in proptest::collection::btree_map("[a-z]{1,6}", "[a-z]{0,6}", 0..8),
            own in proptest::collection::btree_map("[a-z]{1,6}", "[a-z]{0,6}", 0..8),
        ) {
            let mut merged: Attributes = defaults.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            let own_attrs: Attributes = own.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            merged.merge_from(&own_attrs);

            for (key, value) in &own {
                prop_assert_eq!(merged.get(key), Some(value.as_str()));
            }
            for (key, value) in &defaults {
                if !own.contains_key(key) {
                    prop_assert_eq!(merged.get(key), Some(value.as_str()));
                }
            }
            let expected_len = defaults.keys().chain(own.keys()).collect::<std::collections::BTreeSet<_>>().len();
            prop_assert_eq!(merged.len(), expected_len);
        }
    }
}
