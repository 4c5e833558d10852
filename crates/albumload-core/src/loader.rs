//! Batch orchestration: clear, enumerate, then transcode and write every
//! image in parallel.
//!
//! A run moves through `clear (optional) -> enumerate -> process`. The first
//! two steps are sequential and fatal on error. The source directory is
//! checked before anything is deleted, so an unreadable source leaves the
//! tables intact. Processing fans out over a
//! rayon pool; each item runs decode, resize, encode and write to completion
//! on one worker, and its result comes back as an [`ItemOutcome`] rather than
//! an error, so one bad file never stops the rest.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{Config, LimitsConfig, ResizeConfig};
use crate::error::{LoaderError, Result};
use crate::pipeline::{DiscoveredFile, FileDiscovery, Transcoder};
use crate::storage::Store;
use crate::types::{ImageItem, ItemOutcome, LoadReport};

/// Per-run parameters.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Directory holding the source images
    pub source_dir: PathBuf,
    /// Empty both tables before loading
    pub clear_before_load: bool,
    /// Maximum output width
    pub max_width: u32,
    /// Maximum output height
    pub max_height: u32,
    /// Album name override; defaults to the source directory name
    pub album: Option<String>,
}

impl LoadOptions {
    /// Options for `source_dir` with the default bounds and no clearing.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        let resize = ResizeConfig::default();
        Self {
            source_dir: source_dir.into(),
            clear_before_load: false,
            max_width: resize.max_width,
            max_height: resize.max_height,
            album: None,
        }
    }

    /// Options for `source_dir` taken from the loaded configuration.
    pub fn from_config(config: &Config, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            clear_before_load: config.load.clear_before_load,
            max_width: config.resize.max_width,
            max_height: config.resize.max_height,
            album: config.source.album.clone(),
        }
    }
}

/// Drives a load run against a [`Store`].
pub struct Loader {
    discovery: FileDiscovery,
    limits: LimitsConfig,
    brighten: i32,
    workers: usize,
    store: Store,
}

impl Loader {
    /// Create a loader from configuration and an open store.
    pub fn new(config: &Config, store: Store) -> Self {
        Self {
            discovery: FileDiscovery::new(config.source.clone()),
            limits: config.limits.clone(),
            brighten: config.resize.brighten,
            workers: config.processing.effective_workers(),
            store,
        }
    }

    /// The destination store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run a load.
    pub fn run(&self, options: &LoadOptions) -> Result<LoadReport> {
        self.run_with_progress(options, |_| {}, |_| {})
    }

    /// Run a load with progress hooks.
    ///
    /// `on_start` receives the number of files found before any work begins;
    /// `on_item` is called from the worker thread as each item finishes.
    pub fn run_with_progress<S, F>(
        &self,
        options: &LoadOptions,
        on_start: S,
        on_item: F,
    ) -> Result<LoadReport>
    where
        S: FnOnce(usize),
        F: Fn(&ItemOutcome) + Sync,
    {
        let start = Instant::now();
        let album = self.resolve_album(options)?;
        FileDiscovery::check_source(&options.source_dir)?;

        if options.clear_before_load {
            let (photos, images) = self.store.clear_all()?;
            tracing::info!("Cleared {} photo rows and {} image rows", photos, images);
        }

        let files = self.discovery.discover(&options.source_dir)?;
        on_start(files.len());
        tracing::info!(
            "Loading {} image(s) from {:?} into album {:?} with {} worker(s)",
            files.len(),
            options.source_dir,
            album,
            self.workers
        );
        if (self.store.max_connections() as usize) < self.workers {
            tracing::debug!(
                "Pool has {} connections for {} workers; writers will queue",
                self.store.max_connections(),
                self.workers
            );
        }

        let transcoder = Transcoder::new(
            ResizeConfig {
                max_width: options.max_width,
                max_height: options.max_height,
                brighten: self.brighten,
            },
            self.limits.clone(),
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("albumload-worker-{i}"))
            .build()?;

        let outcomes: Vec<ItemOutcome> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let outcome = self.process_file(&transcoder, &album, file);
                    on_item(&outcome);
                    outcome
                })
                .collect()
        });

        let mut report = LoadReport::new(album, files.len(), options.clear_before_load);
        for outcome in &outcomes {
            report.record(outcome);
        }
        report.finish(start.elapsed());

        tracing::info!(
            "Loaded {} of {} image(s) ({} skipped, {} failed) in {:.1}s",
            report.loaded,
            report.discovered,
            report.skipped,
            report.failed,
            report.total_seconds
        );
        Ok(report)
    }

    /// Transcode and store one file. Never fails; problems become the outcome.
    pub fn process_file(
        &self,
        transcoder: &Transcoder,
        album: &str,
        file: &DiscoveredFile,
    ) -> ItemOutcome {
        let start = Instant::now();
        tracing::debug!("Processing: {:?}", file.path);

        let transcoded = match transcoder.transcode_file(&file.path) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("Skipped: {}", e);
                return ItemOutcome::Skipped {
                    path: file.path.clone(),
                    reason: e.to_string(),
                };
            }
        };

        let bytes = transcoded.content.len();
        let item = ImageItem {
            album: album.to_string(),
            name: file.name.clone(),
            content: transcoded.content,
        };

        match self.store.insert_photo(&item) {
            Ok(()) => {
                tracing::debug!(
                    "Stored {:?} ({}x{}, {} bytes) in {:?}",
                    item.name,
                    transcoded.width,
                    transcoded.height,
                    bytes,
                    start.elapsed()
                );
                ItemOutcome::Loaded {
                    name: item.name,
                    bytes,
                }
            }
            Err(e) => {
                tracing::error!("Failed to store {:?}: {}", item.name, e);
                ItemOutcome::Failed {
                    name: item.name,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Album name: the explicit override, else the source directory's own name.
    fn resolve_album(&self, options: &LoadOptions) -> Result<String> {
        if let Some(album) = &options.album {
            return Ok(album.clone());
        }
        album_name(&options.source_dir)
    }
}

/// Derive the album name from a directory path, resolving `.` and `..` first.
pub fn album_name(dir: &Path) -> Result<String> {
    let canonical = std::fs::canonicalize(dir).map_err(|e| LoaderError::SourceUnavailable {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;
    canonical
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| LoaderError::SourceUnavailable {
            path: dir.to_path_buf(),
            message: "cannot derive an album name from this path".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn write_jpeg(path: &Path, width: u32, height: u32) {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::new_rgb8(width, height)
            .write_to(&mut buffer, ImageFormat::Jpeg)
            .unwrap();
        std::fs::write(path, buffer.into_inner()).unwrap();
    }

    fn loader(dir: &Path) -> Loader {
        let store = Store::open_path(&dir.join("albums.db"), &DatabaseConfig::default()).unwrap();
        Loader::new(&Config::default(), store)
    }

    #[test]
    fn test_load_options_defaults() {
        let options = LoadOptions::new("/photos/vacation");
        assert!(!options.clear_before_load);
        assert_eq!((options.max_width, options.max_height), (800, 700));
        assert!(options.album.is_none());
    }

    #[test]
    fn test_album_name_from_directory() {
        let root = tempfile::tempdir().unwrap();
        let album = root.path().join("vacation");
        std::fs::create_dir(&album).unwrap();

        assert_eq!(album_name(&album).unwrap(), "vacation");
        assert_eq!(album_name(&album.join(".")).unwrap(), "vacation");
    }

    #[test]
    fn test_missing_source_aborts_before_clearing() {
        let root = tempfile::tempdir().unwrap();
        let loader = loader(root.path());
        loader
            .store()
            .insert_photo(&ImageItem {
                album: "old".to_string(),
                name: "keep.jpg".to_string(),
                content: vec![1],
            })
            .unwrap();

        let mut options = LoadOptions::new(root.path().join("missing"));
        options.clear_before_load = true;

        let err = loader.run(&options).unwrap_err();
        assert!(matches!(err, LoaderError::SourceUnavailable { .. }));
        assert_eq!(loader.store().count_photos().unwrap(), 1);
    }

    #[test]
    fn test_file_as_source_aborts_before_clearing() {
        let root = tempfile::tempdir().unwrap();
        let loader = loader(root.path());
        loader
            .store()
            .insert_photo(&ImageItem {
                album: "old".to_string(),
                name: "keep.jpg".to_string(),
                content: vec![1],
            })
            .unwrap();
        let file = root.path().join("single.jpg");
        write_jpeg(&file, 10, 10);

        let mut options = LoadOptions::new(&file);
        options.clear_before_load = true;

        let err = loader.run(&options).unwrap_err();
        assert!(matches!(err, LoaderError::SourceUnavailable { .. }));
        assert_eq!(loader.store().count_photos().unwrap(), 1);
        assert_eq!(loader.store().count_images().unwrap(), 1);
    }

    #[test]
    fn test_write_failures_are_counted_and_leave_no_half_pairs() {
        let root = tempfile::tempdir().unwrap();
        let album = root.path().join("broken");
        std::fs::create_dir(&album).unwrap();
        write_jpeg(&album.join("a.jpg"), 20, 20);
        write_jpeg(&album.join("b.jpg"), 30, 20);

        let loader = loader(root.path());
        let side = rusqlite::Connection::open(root.path().join("albums.db")).unwrap();
        side.execute_batch("DROP TABLE t_photo_image").unwrap();
        drop(side);

        let report = loader.run(&LoadOptions::new(&album)).unwrap();
        assert_eq!(report.discovered, 2);
        assert_eq!(report.loaded, 0);
        assert_eq!(report.failed, 2);
        assert!(!report.is_clean());
        assert_eq!(loader.store().count_photos().unwrap(), 0);
    }

    #[test]
    fn test_corrupt_file_is_skipped_and_others_load() {
        let root = tempfile::tempdir().unwrap();
        let album = root.path().join("trip");
        std::fs::create_dir(&album).unwrap();
        write_jpeg(&album.join("a.jpg"), 64, 48);
        write_jpeg(&album.join("c.jpg"), 48, 64);
        std::fs::write(album.join("b.jpg"), b"not really a jpeg").unwrap();

        let loader = loader(root.path());
        let report = loader.run(&LoadOptions::new(&album)).unwrap();

        assert_eq!(report.album, "trip");
        assert_eq!(report.discovered, 3);
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 0);

        let names: Vec<String> = loader
            .store()
            .list_photos(Some("trip"))
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a.jpg", "c.jpg"]);
        assert_eq!(loader.store().count_images().unwrap(), 2);
    }

    #[test]
    fn test_progress_called_once_per_item() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let root = tempfile::tempdir().unwrap();
        let album = root.path().join("batch");
        std::fs::create_dir(&album).unwrap();
        for i in 0..5 {
            write_jpeg(&album.join(format!("{i}.jpg")), 20, 20);
        }

        let seen = AtomicUsize::new(0);
        let report = loader(root.path())
            .run_with_progress(
                &LoadOptions::new(&album),
                |total| assert_eq!(total, 5),
                |_| {
                    seen.fetch_add(1, Ordering::Relaxed);
                },
            )
            .unwrap();

        assert_eq!(seen.load(Ordering::Relaxed), 5);
        assert_eq!(report.loaded, 5);
    }

    #[test]
    fn test_album_override() {
        let root = tempfile::tempdir().unwrap();
        let album = root.path().join("dir");
        std::fs::create_dir(&album).unwrap();
        write_jpeg(&album.join("a.jpg"), 10, 10);

        let loader = loader(root.path());
        let mut options = LoadOptions::new(&album);
        options.album = Some("TEST1".to_string());
        let report = loader.run(&options).unwrap();

        assert_eq!(report.album, "TEST1");
        assert_eq!(loader.store().list_photos(Some("TEST1")).unwrap().len(), 1);
    }
}
