use anyhow::Result;
use clap::{Parser, Subcommand};
use cursorpage_core::{init_logging, CursorPageConfig};
use std::path::PathBuf;
use tracing::{debug, error};

mod commands;

use commands::*;

#[derive(Parser)]
#[command(name = "cursorpage")]
#[command(about = "Keyset pagination filter tool")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CURSORPAGE_CONFIG", default_value = "cursorpage.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the filter that resumes after a cursor
    Query(QueryArgs),
    /// Plan the filter, sort and limit for a page request
    Plan(PlanArgs),
    /// Encode cursor values into a token
    Encode {
        /// Cursor values as JSON (bare words are strings)
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Decode a token into cursor values
    Decode {
        /// Cursor token
        token: String,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CursorPageConfig::load(&cli.config)?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if cli.json_logs {
        config.logging.json_format = true;
    }
    init_logging(&config.logging)?;

    debug!("Loaded configuration from {}", cli.config.display());

    let result = match cli.command {
        Commands::Query(args) => execute_query_command(args),
        Commands::Plan(args) => execute_plan_command(&config, args),
        Commands::Encode { values } => execute_encode_command(&values),
        Commands::Decode { token } => execute_decode_command(&token),
        Commands::Config { action } => execute_config_command(&cli.config, &config, action),
    };

    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }
    result
}
