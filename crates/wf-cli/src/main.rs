//! Command-line frontend for the Wayfarer solo adventure engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use wf_engine::EngineConfig;

#[derive(Parser)]
#[command(
    name = "wf",
    about = "Wayfarer: play solo tabletop adventures from JSON campaigns",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

// Session settings shared by `play` and `replay`.
#[derive(Args)]
struct SessionArgs {
    /// Seed for the random sequence
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Journal entries to retain
    #[arg(long, default_value = "256")]
    log_history: usize,

    /// Arrival redirects one choice may follow
    #[arg(long, default_value = "32")]
    max_redirects: u32,

    /// Round cap for automatic combat
    #[arg(long, default_value = "50")]
    max_combat_rounds: u32,
}

impl SessionArgs {
    fn config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_seed(self.seed)
            .with_log_history(self.log_history)
            .with_max_redirects(self.max_redirects)
            .with_max_combat_rounds(self.max_combat_rounds)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play a campaign interactively
    Play {
        /// Campaign JSON file
        campaign: PathBuf,

        /// Character JSON file
        character: PathBuf,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Validate a campaign (and optionally a character)
    Check {
        /// Campaign JSON file
        campaign: PathBuf,

        /// Character JSON file to validate as well
        #[arg(short, long)]
        character: Option<PathBuf>,
    },

    /// Replay a fixed sequence of choices and print every view as JSON
    Replay {
        /// Campaign JSON file
        campaign: PathBuf,

        /// Character JSON file
        character: PathBuf,

        /// Choice ids to take, in order
        #[arg(short = 'c', long = "choose")]
        choices: Vec<String>,

        #[command(flatten)]
        session: SessionArgs,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            campaign,
            character,
            session,
        } => commands::play::run(&campaign, &character, session.config()),
        Commands::Check {
            campaign,
            character,
        } => commands::check::run(&campaign, character.as_deref()),
        Commands::Replay {
            campaign,
            character,
            choices,
            session,
        } => commands::replay::run(&campaign, &character, &choices, session.config()),
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}
