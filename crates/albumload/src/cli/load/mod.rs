//! The `albumload load` command.

mod batch;
mod setup;

use albumload_core::{FileDiscovery, LoadOptions, Loader};
use clap::Args;
use std::path::PathBuf;

use batch::run_batch;
use setup::{resolve_config, setup_loader};

/// Arguments for the `load` command.
#[derive(Args, Debug, Default)]
pub struct LoadArgs {
    /// Directory of images to load (defaults to `source.dir` from the config)
    pub source: Option<PathBuf>,

    /// Delete all existing photo and image rows before loading
    #[arg(long)]
    pub clear: bool,

    /// Maximum output width in pixels
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Maximum output height in pixels
    #[arg(long)]
    pub max_height: Option<u32>,

    /// SQLite database file to load into
    #[arg(short, long, env = "ALBUMLOAD_DATABASE")]
    pub database: Option<PathBuf>,

    /// Album name to store (defaults to the source directory name)
    #[arg(short, long)]
    pub album: Option<String>,

    /// Number of parallel workers (0 = all available cores)
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Brightening amount applied after resizing (0 disables)
    #[arg(long, allow_hyphen_values = true)]
    pub brighten: Option<i32>,

    /// List the files that would be loaded without touching the database
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Everything a run needs, assembled by setup_loader().
pub(crate) struct LoadContext {
    pub loader: Loader,
    pub options: LoadOptions,
}

/// Execute the load command.
pub async fn execute(args: LoadArgs, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    if args.dry_run {
        // Dry runs never open the database
        let (config, options) = resolve_config(&args, config_path.as_deref())?;
        let files = FileDiscovery::new(config.source).discover(&options.source_dir)?;
        if files.is_empty() {
            tracing::warn!("No supported image files found in {:?}", options.source_dir);
        }
        for file in &files {
            println!("{}", file.path.display());
        }
        tracing::info!(
            "{} image(s), {} bytes",
            files.len(),
            FileDiscovery::total_size(&files)
        );
        return Ok(());
    }

    let ctx = setup_loader(&args, config_path.as_deref())?;
    let json = args.json;
    // The loader blocks on rayon and SQLite; keep it off the async runtime
    let report = tokio::task::spawn_blocking(move || run_batch(ctx)).await??;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
