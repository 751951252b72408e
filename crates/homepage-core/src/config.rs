//! Generator settings management.
//!
//! These settings describe *where* things live (layout file, templates,
//! output). The page layout itself is read by [`crate::ini`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Settings for a single generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the INI layout file.
    #[serde(default = "default_config_path")]
    pub config_path: PathBuf,

    /// Directory that holds the page templates.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// File the rendered page is written to.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Template used when the layout's `[Page]` section names none.
    #[serde(default = "default_template")]
    pub default_template: String,

    /// Extension appended to template names, without the dot.
    #[serde(default = "default_template_extension")]
    pub template_extension: String,
}

// Default value functions
fn default_config_path() -> PathBuf {
    PathBuf::from("homepage.ini")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_output() -> PathBuf {
    PathBuf::from("generated.html")
}

fn default_template() -> String {
    "default".to_string()
}

fn default_template_extension() -> String {
    "jinja2".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
            templates_dir: default_templates_dir(),
            output: default_output(),
            default_template: default_template(),
            template_extension: default_template_extension(),
        }
    }
}

impl Settings {
    /// Load settings from an optional TOML file layered under `HOMEPAGE__*`
    /// environment variables.
    ///
    /// A missing file is not an error: every field has a default.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::load_layered(
            path,
            config::Environment::with_prefix("HOMEPAGE").separator("__"),
        )
    }

    fn load_layered(path: &Path, env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(env)
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings.
    fn validate(&self) -> Result<()> {
        if self.default_template.trim().is_empty() {
            return Err(CoreError::config("default_template cannot be empty"));
        }

        if self.template_extension.trim().is_empty() {
            return Err(CoreError::config("template_extension cannot be empty"));
        }

        if self.template_extension.starts_with('.') {
            tracing::warn!("template_extension should not start with a dot");
        }

        Ok(())
    }

    /// File name of the template called `name`, e.g. `default.jinja2`.
    #[must_use]
    pub fn template_file_name(&self, name: &str) -> String {
        let ext = self.template_extension.trim_start_matches('.');
        format!("{name}.{ext}")
    }

    /// Full path of the template called `name`.
    #[must_use]
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.templates_dir.join(self.template_file_name(name))
    }
}
