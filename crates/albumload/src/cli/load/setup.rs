//! Loader setup: config overrides, source resolution, database open.

use albumload_core::config::expand_path;
use albumload_core::{Config, LoadOptions, Loader, Store};
use anyhow::Context;
use std::path::Path;

use super::{LoadArgs, LoadContext};

/// Load config, apply command-line overrides, and open the destination store.
pub fn setup_loader(args: &LoadArgs, config_path: Option<&Path>) -> anyhow::Result<LoadContext> {
    let (config, options) = resolve_config(args, config_path)?;

    let db_path = config.database_path();
    let store = Store::open(&config)
        .with_context(|| format!("Failed to open database at {:?}", db_path))?;
    tracing::debug!("Database: {:?}", db_path);

    Ok(LoadContext {
        loader: Loader::new(&config, store),
        options,
    })
}

/// Merge the config file with command-line overrides and resolve the source directory.
pub fn resolve_config(
    args: &LoadArgs,
    config_path: Option<&Path>,
) -> anyhow::Result<(Config, LoadOptions)> {
    let mut config = crate::cli::load_config(config_path)?;
    apply_overrides(&mut config, args);
    config.validate()?;

    let source_dir = match &args.source {
        Some(dir) => expand_path(dir),
        None => config.source_dir().with_context(|| {
            "No source directory given.\n\n  \
             Hint: Pass one (`albumload load ./photos/vacation`) or set `source.dir` in the config."
        })?,
    };
    if !source_dir.is_dir() {
        anyhow::bail!(
            "Source directory does not exist: {:?}\n\n  Hint: Check the path and try again.",
            source_dir
        );
    }

    let options = LoadOptions::from_config(&config, source_dir);
    Ok((config, options))
}

/// Command-line values win over the config file.
fn apply_overrides(config: &mut Config, args: &LoadArgs) {
    if let Some(width) = args.max_width {
        config.resize.max_width = width;
    }
    if let Some(height) = args.max_height {
        config.resize.max_height = height;
    }
    if let Some(brighten) = args.brighten {
        config.resize.brighten = brighten;
    }
    if let Some(parallel) = args.parallel {
        config.processing.parallel_workers = parallel;
    }
    if let Some(album) = &args.album {
        config.source.album = Some(album.clone());
    }
    if let Some(database) = &args.database {
        config.database.path = database.clone();
    }
    if args.clear {
        config.load.clear_before_load = true;
    }
}
