//! Build command - renders the page

use std::{path::PathBuf, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use homepage_core::Settings;
use homepage_generator::Builder;

/// Run the build command.
///
/// Reads the layout, renders it and overwrites the output file.
pub fn run(
    mut settings: Settings,
    output: Option<PathBuf>,
    templates: Option<PathBuf>,
    template: Option<String>,
) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?output, ?templates, ?template, "Starting build");

    if let Some(output) = output {
        settings.output = output;
    }

    if let Some(templates) = templates {
        settings.templates_dir = templates;
    }

    let output = settings.output.clone();
    let mut builder = Builder::new(settings);
    if let Some(template) = template {
        tracing::info!(%template, "Overriding template from CLI");
        builder = builder.with_template(template);
    }

    let stats = builder.build().wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Page generated successfully!");
    println!();
    println!("  Tabs:     {}", stats.tabs);
    println!("  Lists:    {}", stats.lists);
    println!("  Buttons:  {}", stats.buttons);
    println!("  Template: {}", stats.template);
    println!();
    println!("  Duration: {:.2}s", duration.as_secs_f64());
    println!("  Output:   {}", output.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}
