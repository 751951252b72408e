//! HTML template rendering.
//!
//! Templates are Jinja-style files loaded from a directory by name. Every
//! template is rendered with HTML auto-escaping regardless of its file
//! extension, since all text reaching it comes from the layout file.

use std::path::PathBuf;

use homepage_core::{
    Attributes, PageContext, Settings,
    model::{BUTTON_CSS_PROPERTIES, button_css},
};
use minijinja::{AutoEscape, Environment, ErrorKind, Value};
use thiserror::Error;
use tracing::debug;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file does not exist.
    #[error("template not found: {name} (looked in {})", dir.display())]
    NotFound { name: String, dir: PathBuf },

    /// Syntax error or failure while rendering.
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Renders a [`PageContext`] through a named template.
#[derive(Debug)]
pub struct TemplateRenderer {
    env: Environment<'static>,
    dir: PathBuf,
    extension: String,
}

impl TemplateRenderer {
    /// Create a renderer loading `<name>.<extension>` files from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let dir = dir.into();
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(&dir));
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        register_filters(&mut env);

        Self {
            env,
            dir,
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    /// Create a renderer from generator settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.templates_dir, &settings.template_extension)
    }

    fn file_name(&self, name: &str) -> String {
        format!("{name}.{}", self.extension)
    }

    /// Register an in-memory template under `name`.
    ///
    /// In-memory templates shadow files of the same name.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<()> {
        let file_name = self.file_name(name);
        self.env.add_template_owned(file_name, source.to_string())?;
        Ok(())
    }

    /// Check whether a template called `name` can be loaded.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.env.get_template(&self.file_name(name)).is_ok()
    }

    /// Render the template called `name` with `context`.
    pub fn render(&self, name: &str, context: &PageContext) -> Result<String> {
        let file_name = self.file_name(name);
        debug!(template = %file_name, dir = %self.dir.display(), "loading template");

        let template = self.env.get_template(&file_name).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                TemplateError::NotFound {
                    name: file_name.clone(),
                    dir: self.dir.clone(),
                }
            } else {
                TemplateError::Render(e)
            }
        })?;

        Ok(template.render(context)?)
    }
}

/// Registers the page filters with a MiniJinja environment.
///
/// - `button_style`: inline CSS for a button value, failing on missing keys.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter(
        "button_style",
        |button: Value| -> std::result::Result<String, minijinja::Error> {
            let section = button
                .get_attr("section")
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            let data = button.get_attr("data")?;

            let mut attributes = Attributes::new();
            for (key, _) in BUTTON_CSS_PROPERTIES {
                let value = data.get_item(&Value::from(key))?;
                if !value.is_undefined() && !value.is_none() {
                    attributes.insert(key, value.to_string());
                }
            }

            button_css(&section, |key| attributes.get(key))
                .map_err(|e| minijinja::Error::new(ErrorKind::UndefinedError, e.to_string()))
        },
    );
}

/// Template written by `homepage init`.
pub const DEFAULT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ page.title | default("Home") }}</title>
    <style>
        body {
            margin: 0;
            font-family: {{ page_style.font | default("sans-serif") }};
            background: {{ page_style.background | default("#f8fafc") }};
            color: {{ page_style["text color"] | default("#1e293b") }};
        }
        nav { display: flex; gap: 1rem; padding: 1rem; }
        nav a { color: inherit; text-decoration: none; font-weight: 600; }
        .tab { display: flex; flex-wrap: wrap; margin: 0 auto; padding: 1rem; }
        .list { flex: 1; min-width: 12rem; padding: 0 0.5rem; }
        .list h2 { font-size: 1rem; }
        .button { display: block; margin: 0.4rem 0; padding: 0.6rem 1rem; border-radius: 0.4rem; text-decoration: none; }
    </style>
</head>
<body>
    <nav>
    {% for tab in tabs %}
        <a href="#tab-{{ tab.element_id }}">{{ tab.data.title | default(tab.id) }}</a>
    {% endfor %}
    </nav>
    {% for tab in tabs %}
    <section class="tab" id="tab-{{ tab.element_id }}" style="width: {{ tab.width }}">
        {% for list in tab.lists %}
        <div class="list" id="list-{{ list.element_id }}">
            <h2>{{ list.data.title | default(list.id) }}</h2>
            {% for button in list.buttons %}
            <a class="button" id="button-{{ button.element_id }}" href="{{ button.data.url }}" style="{{ button | button_style }}">{{ button.data.name | default(button.section) }}</a>
            {% endfor %}
        </div>
        {% endfor %}
    </section>
    {% endfor %}
</body>
</html>
"##;
