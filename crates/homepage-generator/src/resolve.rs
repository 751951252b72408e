//! Model building.
//!
//! Turns classified sections into the tab → list → button tree, checking
//! every cross-reference and layering button-style defaults under each
//! button.

use homepage_core::{
    Attributes, CoreError, IniDocument, IniSection, PageButton, PageContext, PageList, PageTab,
    Result,
};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::classify::{ClassifiedSections, LIST_KEY, TAB_KEY};

/// Parse a document into a [`PageContext`].
pub fn resolve(document: &IniDocument) -> Result<PageContext> {
    let sections = ClassifiedSections::from_document(document);
    ModelBuilder::new().build(&sections)
}

/// Builds one page model. Element ids count from 1 within a single build.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    last_element_id: usize,
}

impl ModelBuilder {
    /// Create a builder with a fresh element counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_element_id(&mut self) -> usize {
        self.last_element_id += 1;
        self.last_element_id
    }

    /// Build the model: tabs first, then lists, then buttons.
    pub fn build(mut self, sections: &ClassifiedSections<'_>) -> Result<PageContext> {
        let page = attributes_of(sections.page);
        let page_style = attributes_of(sections.page_style);
        let button_style = attributes_of(sections.button_style);

        let mut tabs = self.build_tabs(sections);
        let lists = self.attach_lists(sections, &mut tabs)?;
        self.attach_buttons(sections, &button_style, &lists, &mut tabs)?;

        for ignored in &sections.ignored {
            debug!(section = ignored.name(), "section has no role, skipping");
        }

        let context = PageContext {
            page,
            page_style,
            button_style,
            tabs: tabs.into_values().collect(),
        };

        info!(
            tabs = context.tabs.len(),
            lists = context.list_count(),
            buttons = context.button_count(),
            "resolved page model"
        );

        Ok(context)
    }

    fn build_tabs(&mut self, sections: &ClassifiedSections<'_>) -> IndexMap<String, PageTab> {
        let mut tabs = IndexMap::new();

        for &(id, section) in &sections.tabs {
            if tabs.contains_key(id) {
                warn!(tab = id, section = section.name(), "duplicate tab id, keeping the first");
                continue;
            }

            let attributes = with_id(section, id);
            tabs.insert(
                id.to_string(),
                PageTab::new(id, self.next_element_id(), attributes),
            );
        }

        tabs
    }

    /// Returns list id → (tab position, list position).
    fn attach_lists(
        &mut self,
        sections: &ClassifiedSections<'_>,
        tabs: &mut IndexMap<String, PageTab>,
    ) -> Result<IndexMap<String, (usize, usize)>> {
        let mut lists = IndexMap::new();

        for &(id, section) in &sections.lists {
            let tab_id = section.attributes().require(section.name(), TAB_KEY)?;

            let Some((tab_position, _, tab)) = tabs.get_full_mut(tab_id) else {
                return Err(CoreError::UnknownTab {
                    list: id.to_string(),
                    tab: tab_id.to_string(),
                });
            };

            if lists.contains_key(id) {
                warn!(list = id, section = section.name(), "duplicate list id, keeping the first");
                continue;
            }

            let attributes = with_id(section, id);
            tab.add_list(PageList::new(id, self.next_element_id(), tab_id, attributes));
            lists.insert(id.to_string(), (tab_position, tab.lists.len() - 1));
        }

        Ok(lists)
    }

    fn attach_buttons(
        &mut self,
        sections: &ClassifiedSections<'_>,
        button_style: &Attributes,
        lists: &IndexMap<String, (usize, usize)>,
        tabs: &mut IndexMap<String, PageTab>,
    ) -> Result<()> {
        for section in &sections.buttons {
            let list_id = section.attributes().require(section.name(), LIST_KEY)?;

            let Some(&(tab_position, list_position)) = lists.get(list_id) else {
                return Err(CoreError::UnknownList {
                    button: section.name().to_string(),
                    list: list_id.to_string(),
                });
            };

            let mut attributes = button_style.clone();
            attributes.merge_from(section.attributes());

            let button = PageButton::new(
                section.name(),
                self.next_element_id(),
                list_id,
                attributes,
            );
            tabs[tab_position].lists[list_position].add_button(button);
        }

        Ok(())
    }
}

fn attributes_of(section: Option<&IniSection>) -> Attributes {
    section.map(|s| s.attributes().clone()).unwrap_or_default()
}

fn with_id(section: &IniSection, id: &str) -> Attributes {
    let mut attributes = section.attributes().clone();
    attributes.insert("id", id);
    attributes
}
