use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod session;

use render::Format;

#[derive(Parser)]
#[command(name = "boostly", version, about = "Tasks, points and a focus timer")]
struct Cli {
    /// Print events as JSON lines instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Points, level and weekly productivity
    Stats,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Wipe all app data back to a fresh start
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Print the saved state as JSON
    Export,
    /// Replace the saved state with a JSON snapshot
    Import {
        /// Snapshot file produced by `export`
        file: PathBuf,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("BOOSTLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let format = if cli.json { Format::Json } else { Format::Text };
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action, format),
        Commands::Timer { action } => commands::timer::run(action, format),
        Commands::Stats => commands::stats::run(format),
        Commands::Config { action } => commands::config::run(action),
        Commands::Reset { yes } => commands::data::reset(yes, format),
        Commands::Export => commands::data::export(),
        Commands::Import { file } => commands::data::import(&file, format),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
