use clap::Parser;
use keyhints::cli::commands::{cmd_focus, cmd_labels, cmd_replay, cmd_search};
use keyhints::cli::config::{Cli, Commands, build_hint_config, load_config, resolve_trace_path};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    // Resolve settings: CLI > config file > defaults
    let config = load_config(cli.config.as_deref());
    let hints = build_hint_config(&config, cli.style);
    let trace = resolve_trace_path(&config, cli.trace.as_deref());

    match cli.command {
        Commands::Labels { page, category } => {
            cmd_labels(&page, category, &hints, trace)?;
        }
        Commands::Replay {
            page,
            category,
            keys,
        } => {
            cmd_replay(&page, category, &keys, &hints, trace)?;
        }
        Commands::Search { page, query } => {
            cmd_search(&page, &query, &hints, trace)?;
        }
        Commands::Focus { page, times } => {
            cmd_focus(&page, times, &hints, trace)?;
        }
    }

    Ok(())
}
