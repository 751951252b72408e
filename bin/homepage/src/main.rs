//! Homepage CLI
//!
//! Renders a start page from an INI layout file.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for the homepage generator.
#[derive(Parser)]
#[command(
    name = "homepage",
    version,
    about = "Generate a static start page from an INI layout"
)]
struct Cli {
    /// Path to the layout file [default: homepage.ini]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the generator settings file (optional)
    #[arg(short, long, global = true, default_value = "homepage.toml")]
    settings: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Command to run; `build` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Render the page
    Build {
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Template directory
        #[arg(short, long)]
        templates: Option<PathBuf>,
        /// Template name, overriding the layout's `[Page] template`
        #[arg(long)]
        template: Option<String>,
    },
    /// Validate the layout and template without writing output
    Check {
        /// Template name, overriding the layout's `[Page] template`
        #[arg(long)]
        template: Option<String>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Create a sample layout and template
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    homepage::init_tracing(cli.verbose);

    let settings = homepage::cmd::load_settings(&cli.settings, cli.config)?;

    match cli.command.unwrap_or(Commands::Build {
        output: None,
        templates: None,
        template: None,
    }) {
        Commands::Build {
            output,
            templates,
            template,
        } => {
            homepage::cmd::build::run(settings, output, templates, template)?;
        }
        Commands::Check { template, strict } => {
            homepage::cmd::check::run(settings, template, strict)?;
        }
        Commands::Init { force } => {
            homepage::cmd::init::run(&settings, force)?;
        }
    }

    Ok(())
}
