// crates/trustnet-cli/src/main.rs
//
// CLI entrypoint for Trustnet.
//
// Provides subcommands for initializing a vote store, casting votes,
// inspecting raw vote counts, computing trust scores, managing categories,
// and generating random test networks.

mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use commands::categories::CategoriesCmd;
use commands::generate::GenerateArgs;
use commands::score::ScoreArgs;
use commands::vote::{VoteArgs, VotesArgs};
use commands::Context;
use config::TrustnetConfig;
use output::OutputFormat;
use tracing_subscriber::EnvFilter;

/// Trustnet CLI: personalized trust scores over a vote graph.
#[derive(Parser, Debug)]
#[command(
    name = "trustnet",
    version = "0.1.0",
    about = "Trustnet CLI: cast votes and compute personalized trust scores"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.trustnet/config.toml")]
    config: String,

    /// Override the data directory from the configuration file.
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the vote store and seed the default categories.
    Init,

    /// Cast (or retract, with a negative amount) votes for a participant.
    Vote(VoteArgs),

    /// Show how many times one participant voted for another.
    Votes(VotesArgs),

    /// Compute how much a viewer should trust a target.
    Score(ScoreArgs),

    /// Category management: list, add.
    #[command(subcommand)]
    Categories(CategoriesCmd),

    /// Write a random vote network, for load testing.
    Generate(GenerateArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let loaded = TrustnetConfig::load(&cli.config);
    let level = match &loaded {
        Ok(cfg) => cfg.log_level.clone(),
        Err(_) => TrustnetConfig::default().log_level,
    };

    // Initialize tracing subscriber for structured logging. RUST_LOG wins
    // over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match loaded {
        Ok(cfg) => {
            tracing::debug!("Loaded configuration from {}", cli.config);
            cfg
        }
        Err(e) => {
            tracing::warn!(
                "Could not load config from {}: {}. Using defaults.",
                cli.config,
                e
            );
            TrustnetConfig::default()
        }
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }

    let ctx = Context::new(config, OutputFormat::from_json_flag(cli.json));

    match &cli.command {
        Commands::Init => commands::init::run(&ctx)?,
        Commands::Vote(args) => commands::vote::run_vote(&ctx, args)?,
        Commands::Votes(args) => commands::vote::run_votes(&ctx, args)?,
        Commands::Score(args) => commands::score::run(&ctx, args)?,
        Commands::Categories(cmd) => commands::categories::run(&ctx, cmd)?,
        Commands::Generate(args) => commands::generate::run(&ctx, args)?,
    }

    Ok(())
}
