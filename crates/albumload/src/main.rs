//! albumload CLI - resize a directory of photos and load them into an album database.
//!
//! Each image in the source directory is scaled to fit the configured bounds,
//! brightened, re-encoded as JPEG and stored as a metadata row plus a content
//! row, with the directory name as the album.
//!
//! # Usage
//!
//! ```bash
//! # Load a directory into the configured database
//! albumload load ./photos/vacation
//!
//! # Replace everything with this directory's photos, at a custom size
//! albumload load ./photos/vacation --clear --max-width 1024 --max-height 768
//!
//! # View configuration
//! albumload config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// albumload - resize a directory of photos and load them into an album database.
#[derive(Parser, Debug)]
#[command(name = "albumload")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, env = "ALBUMLOAD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resize the images in a directory and insert them into the database
    Load(cli::load::LoadArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    // Commands load the config again and treat errors as fatal.
    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Check your config file with `albumload config path`."
            );
            albumload_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("albumload v{}", albumload_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Load(args) => cli::load::execute(args, cli.config).await,
        Commands::Config(args) => cli::config::execute(args, cli.config).await,
    }
}
