//! Command implementations.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use homepage_core::Settings;

pub mod build;
pub mod check;
pub mod init;

/// Load generator settings from `settings_path` (optional file) and the
/// environment, then apply a layout path given on the command line.
pub fn load_settings(settings_path: &Path, config: Option<PathBuf>) -> Result<Settings> {
    let mut settings = Settings::load_with_env(settings_path).wrap_err_with(|| {
        format!("Failed to load settings from {}", settings_path.display())
    })?;

    if let Some(config) = config {
        tracing::info!(?config, "Overriding layout path from CLI");
        settings.config_path = config;
    }

    tracing::debug!(?settings, "Loaded settings");
    Ok(settings)
}
