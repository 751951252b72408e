//! Check command - validate the layout without writing anything

use color_eyre::eyre::{Result, bail};
use homepage_core::{IniDocument, PageContext, Settings};
use homepage_generator::{Builder, ClassifiedSections, ModelBuilder, TemplateRenderer};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Resolves the layout and reports what a build would produce.
pub fn run(settings: Settings, template: Option<String>, strict: bool) -> Result<()> {
    tracing::info!(config = ?settings.config_path, strict, "Checking layout");

    let mut result = ValidationResult::default();

    println!("Checking layout {}...", settings.config_path.display());
    let document = match IniDocument::load(&settings.config_path) {
        Ok(document) => {
            if document.is_empty() {
                result.add_warning("Layout has no sections");
            }
            println!("  ✓ {} sections read", document.len());
            Some(document)
        }
        Err(e) => {
            result.add_error(e.to_string());
            println!("  ✗ {e}");
            None
        }
    };

    let context = document.as_ref().and_then(|document| {
        let sections = ClassifiedSections::from_document(document);
        for ignored in &sections.ignored {
            result.add_warning(format!("Section [{}] has no role and is ignored", ignored.name()));
        }

        match ModelBuilder::new().build(&sections) {
            Ok(context) => {
                println!(
                    "  ✓ {} tabs, {} lists, {} buttons",
                    context.tabs.len(),
                    context.list_count(),
                    context.button_count()
                );
                Some(context)
            }
            Err(e) => {
                result.add_error(e.to_string());
                println!("  ✗ {e}");
                None
            }
        }
    });

    if let Some(ref context) = context {
        check_model(context, &mut result);

        println!("\nChecking template...");
        let mut builder = Builder::new(settings.clone());
        if let Some(template) = template {
            builder = builder.with_template(template);
        }
        let name = builder.template_name(context);
        let renderer = TemplateRenderer::from_settings(&settings);
        if renderer.has_template(&name) {
            println!("  ✓ {} found", settings.template_path(&name).display());
        } else {
            result.add_error(format!(
                "Template {} not found or invalid",
                settings.template_path(&name).display()
            ));
            println!("  ✗ {} not found or invalid", settings.template_path(&name).display());
        }
    }

    // Print summary
    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Flag tabs and lists that would render empty.
fn check_model(context: &PageContext, result: &mut ValidationResult) {
    for tab in &context.tabs {
        if tab.lists.is_empty() {
            result.add_warning(format!("Tab {} has no lists", tab.id));
        }
        for list in &tab.lists {
            if list.buttons.is_empty() {
                result.add_warning(format!("List {} has no buttons", list.id));
            }
        }
    }
}
