//! Init command - scaffold a sample layout and template

use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr, bail};
use homepage_core::Settings;
use homepage_generator::template::DEFAULT_TEMPLATE;

/// Layout written by `homepage init`.
pub const SAMPLE_LAYOUT: &str = r#"# Start page layout.
#
# [Tab:<id>]   a navigation tab
# [List:<id>]  a column of buttons; `tab` names its tab
# any section with a `url` is a button; `list` names its list

[Page]
title = Start

[Page Style]
background = #f8fafc
font = sans-serif

[Button Style]
color = #3b82f6
text color = #ffffff
hover color = #2563eb

[Tab:home]
title = Home

[List:dev]
tab = home
title = Development

[List:reading]
tab = home
title = Reading

[GitHub]
url = https://github.com
list = dev

[Docs.rs]
url = https://docs.rs
list = dev
color = #f97316

[Hacker News]
url = https://news.ycombinator.com
list = reading
"#;

/// Run the init command.
///
/// Writes the sample layout and the default template to the paths in
/// `settings`, refusing to overwrite existing files unless `force` is set.
pub fn run(settings: &Settings, force: bool) -> Result<()> {
    let template_path = settings.template_path(&settings.default_template);
    tracing::info!(config = ?settings.config_path, template = ?template_path, force, "Scaffolding");

    write_file(&settings.config_path, SAMPLE_LAYOUT, force)?;
    write_file(&template_path, DEFAULT_TEMPLATE, force)?;

    Ok(())
}

fn write_file(path: &Path, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
    }

    fs::write(path, content).wrap_err_with(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(?path, "Created file");
    println!("Created: {}", path.display());
    Ok(())
}
