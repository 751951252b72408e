//! Build orchestration.
//!
//! Coordinates one generator run: read the layout, resolve the model,
//! render it and write the page.

use std::{fs, time::Instant};

use homepage_core::{CoreError, IniDocument, PageContext, Settings};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    resolve::resolve,
    template::{TemplateError, TemplateRenderer},
};

/// `[Page]` key selecting the template.
pub const TEMPLATE_KEY: &str = "template";

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Layout reading or resolution error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Template loading or rendering error.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// IO error while writing the page.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of tabs on the page.
    pub tabs: usize,

    /// Number of lists across all tabs.
    pub lists: usize,

    /// Number of buttons across all lists.
    pub buttons: usize,

    /// Template the page was rendered with.
    pub template: String,

    /// Size of the written page in bytes.
    pub bytes: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Page builder that orchestrates a run.
#[derive(Debug)]
pub struct Builder {
    settings: Settings,
    template: Option<String>,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            template: None,
        }
    }

    /// Force a template, ignoring the layout's `[Page] template` key.
    #[must_use]
    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    /// Read and resolve the layout file.
    pub fn load(&self) -> Result<PageContext> {
        let document = IniDocument::load(&self.settings.config_path)?;
        debug!(
            path = %self.settings.config_path.display(),
            sections = document.len(),
            "read layout file"
        );
        Ok(resolve(&document)?)
    }

    /// Template name for `context`: override, then `[Page] template`, then
    /// the settings default.
    #[must_use]
    pub fn template_name(&self, context: &PageContext) -> String {
        self.template
            .as_deref()
            .or_else(|| context.page.get(TEMPLATE_KEY))
            .unwrap_or(&self.settings.default_template)
            .to_string()
    }

    /// Render `context` to HTML.
    pub fn render(&self, context: &PageContext) -> Result<String> {
        let renderer = TemplateRenderer::from_settings(&self.settings);
        let template = self.template_name(context);
        Ok(renderer.render(&template, context)?)
    }

    /// Execute the full run. Nothing is written unless rendering succeeds.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();

        info!(
            config = %self.settings.config_path.display(),
            templates = %self.settings.templates_dir.display(),
            output = %self.settings.output.display(),
            "starting build"
        );

        let context = self.load()?;
        let template = self.template_name(&context);
        let html = self.render(&context)?;
        self.write_output(&html)?;

        let stats = BuildStats {
            tabs: context.tabs.len(),
            lists: context.list_count(),
            buttons: context.button_count(),
            template,
            bytes: html.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            tabs = stats.tabs,
            lists = stats.lists,
            buttons = stats.buttons,
            template = %stats.template,
            bytes = stats.bytes,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Overwrite the output file, creating parent directories.
    fn write_output(&self, html: &str) -> Result<()> {
        let output = &self.settings.output;
        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, html)?;
        debug!(path = %output.display(), "wrote page");
        Ok(())
    }
}
