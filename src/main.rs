//! plonebake's application entry point.
//! Parses arguments, sets up logging and drives a generation run.

use chrono::Datelike;
use plonebake::{
    answers::Git2Config,
    cli::{get_args, Args},
    config::load_answers,
    context::Configurator,
    error::{default_error_handler, Result},
    generate,
    hooks::HookRunner,
    processor::ensure_output_dir,
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
    GenerateOptions,
};

fn main() {
    let args = get_args();

    env_logger::Builder::new()
        .filter_level(if args.verbose { log::LevelFilter::Trace } else { log::LevelFilter::Warn })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let engine = MiniJinjaRenderer::new();
    let prompt = DialoguerPrompter::new();
    let lookup = Git2Config::new();

    let target_dir = ensure_output_dir(&args.target_dir, args.force)?;
    let variables = match &args.answers {
        Some(path) => load_answers(path)?,
        None => Default::default(),
    };
    let mut configurator = Configurator::with_variables(&target_dir, variables);

    let hooks = HookRunner::new(&lookup, chrono::Local::now().year());
    let options =
        GenerateOptions { non_interactive: args.non_interactive, skip_overwrite_check: args.skip_overwrite_check };

    println!("Using template from '{}'", args.template.display());
    generate(&args.template, &mut configurator, hooks, &engine, &prompt, &options)?;

    println!("Package generation completed successfully in {}.", target_dir.display());
    Ok(())
}
