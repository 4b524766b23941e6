use std::env;
use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::App;

mod cli;

fn main() -> ExitCode {
    let app = match App::try_parse_from(normalized_args()) {
        Ok(app) => app,
        Err(err) => {
            // help/version go to stdout and exit 0; anything else is a
            // usage error on stderr with exit 1.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing();

    if let Err(err) = run(&app) {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(app: &App) -> Result<()> {
    let cwd = env::current_dir().context("could not determine working directory")?;

    let plan = runzip_archive::ExtractPlan::new(&app.archive, app.destination.as_deref())
        .context("could not resolve destination")?;
    plan.create_staging_root()
        .context("could not create destination")?;

    eprintln!(
        "extracting to temporary path '{}/'...",
        display_relative(&plan.staging_root, &cwd)
    );

    let top_level = runzip_archive::extract(&app.archive, &plan.staging_root)
        .context("could not unarchive")?;

    let final_path = runzip_archive::finalize(
        &plan.staging_root,
        &plan.final_dest,
        &top_level,
        plan.use_inner_name,
    )
    .context("could not rename directory")?;

    eprintln!("extracted to '{}'", display_relative(&final_path, &cwd));
    Ok(())
}

/// Accept the bare words `help` and `version` alongside the usual flags.
fn normalized_args() -> Vec<OsString> {
    let mut args: Vec<OsString> = env::args_os().collect();
    if let Some(first) = args.get_mut(1) {
        if first == "help" {
            *first = OsString::from("--help");
        } else if first == "version" {
            *first = OsString::from("--version");
        }
    }
    args
}

fn display_relative<'a>(path: &'a Path, cwd: &Path) -> std::path::Display<'a> {
    path.strip_prefix(cwd).unwrap_or(path).display()
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("RUNZIP_LOG"))
        .with_writer(std::io::stderr)
        .init();
}
