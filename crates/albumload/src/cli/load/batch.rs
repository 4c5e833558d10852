//! Batch run: progress bar while the loader works, summary table afterwards.

use albumload_core::{ItemOutcome, LoadReport};
use indicatif::{ProgressBar, ProgressStyle};

use super::LoadContext;

/// Run the load with a progress bar and print the summary to stderr.
pub fn run_batch(ctx: LoadContext) -> anyhow::Result<LoadReport> {
    let LoadContext { loader, options } = ctx;

    let progress = create_progress_bar();

    let report = loader.run_with_progress(
        &options,
        |total| {
            if total == 0 {
                tracing::warn!("No supported image files found in {:?}", options.source_dir);
            }
            progress.set_length(total as u64);
        },
        |outcome| {
            progress.inc(1);
            if let ItemOutcome::Loaded { name, .. } = outcome {
                progress.set_message(name.clone());
            }
        },
    )?;

    progress.finish_and_clear();
    print_summary(&report);

    Ok(report)
}

/// Create a progress bar for batch loading; its length is set once the files are listed.
fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after a load.
fn print_summary(report: &LoadReport) {
    let mb_written = report.bytes_written as f64 / 1_000_000.0;

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Album:        {:>8}", report.album);
    if report.cleared {
        eprintln!("    Cleared:      {:>8}", "yes");
    }
    eprintln!("    Loaded:       {:>8}", report.loaded);
    if report.skipped > 0 {
        eprintln!("    Skipped:      {:>8}", report.skipped);
    }
    if report.failed > 0 {
        eprintln!("    Failed:       {:>8}", report.failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Found:        {:>8}", report.discovered);
    eprintln!("    Written:      {:>7.1} MB", mb_written);
    eprintln!("    Duration:     {:>7.1}s", report.total_seconds);
    eprintln!("    Rate:         {:>7.1} img/sec", report.rate());
    eprintln!("  ====================================");
}
