//! Command-line interface implementation for plonebake.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for plonebake.
#[derive(Parser, Debug)]
#[command(author, version, about = "plonebake: scaffolding for Plone add-on packages", long_about = None)]
pub struct Args {
    /// Path to the template directory
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Directory to generate the package into. Its name is the package name,
    /// e.g. collective.myaddon or plone.app.myaddon
    #[arg(value_name = "TARGET_DIR")]
    pub target_dir: PathBuf,

    /// YAML or JSON file with preloaded answers
    #[arg(short, long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Do not ask questions, use defaults and preloaded answers
    #[arg(short, long)]
    pub non_interactive: bool,

    /// Generate into an existing target directory
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Overwrite existing files in the target directory without asking.
    #[arg(long)]
    pub skip_overwrite_check: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
