use std::{
    fs::File,
    io::{self, BufReader, IsTerminal},
    path::PathBuf,
};

use activity_core::ActivityHub;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod shell;

use config::{load_settings, OutputMode};
use shell::Shell;

#[derive(Parser, Debug)]
#[command(about = "Terminal front end for the extracurricular activity hub")]
struct Args {
    /// TOML settings file; defaults to ./hub.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Read commands from a file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,
    #[arg(long)]
    json: bool,
    /// Start with an empty activity list.
    #[arg(long)]
    no_seed: bool,
    /// Log filter directive, e.g. `activity_core=debug`.
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if args.json {
        settings.output = OutputMode::Json;
    }
    if args.no_seed {
        settings.seed_demo_data = false;
    }
    if let Some(filter) = args.log {
        settings.log_filter = filter;
    }

    let filter = EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let hub = if settings.seed_demo_data {
        ActivityHub::with_demo_data().context("failed to seed demo activities")?
    } else {
        ActivityHub::default()
    };
    info!(
        activities = hub.activities().len(),
        output = ?settings.output,
        "activity hub ready"
    );

    let mut shell = Shell::new(hub, settings.output);
    let mut stdout = io::stdout().lock();
    match args.script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open script '{}'", path.display()))?;
            shell.run(BufReader::new(file), &mut stdout, None)?;
        }
        None => {
            let stdin = io::stdin();
            let prompt = stdin
                .is_terminal()
                .then_some(settings.prompt.as_str());
            shell.run(stdin.lock(), &mut stdout, prompt)?;
        }
    }
    info!(
        registrations = shell.hub().store().total_registrations(),
        "activity hub closed"
    );

    Ok(())
}
