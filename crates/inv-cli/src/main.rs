//! `inva` - terminal client for the Inventra asset inventory API.

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod browse;
mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("inva error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    // Schema dumps need neither configuration nor a session.
    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let config =
        inv_config::InvConfig::load_with_dotenv().context("failed to load configuration")?;
    let ctx = context::AppContext::init(config);

    commands::dispatch::dispatch(&cli.command, &ctx, &flags).await
}

/// Install the global tracing subscriber. `INVENTRA_LOG` takes precedence
/// over the `--quiet`/`--verbose` flags.
fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_env("INVENTRA_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing: {error}"))?;

    Ok(())
}
