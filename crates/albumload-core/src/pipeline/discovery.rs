//! Source enumeration: finding image files directly inside an album directory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::SourceConfig;
use crate::error::{LoaderError, Result};

/// Discovers image files in a source directory.
pub struct FileDiscovery {
    config: SourceConfig,
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File name as stored in the database
    pub name: String,
    /// File size in bytes
    pub size: u64,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// List the supported image files directly inside `dir`.
    ///
    /// Subdirectories are not descended into. Symlinks to files are followed;
    /// symlinks to directories and dangling links are skipped. An empty
    /// directory, or one with no matching files, yields an empty list. Fails with
    /// [`LoaderError::SourceUnavailable`] when `dir` is missing, is not a
    /// directory, or cannot be read.
    pub fn discover(&self, dir: &Path) -> Result<Vec<DiscoveredFile>> {
        Self::check_source(dir)?;

        let mut files = Vec::new();
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // Depth 0 means the directory itself could not be listed
                Err(e) if e.depth() == 0 => return Err(unavailable(dir, e.to_string())),
                Err(e) => {
                    tracing::warn!("Skipping entry in {:?}: {}", dir, e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.is_supported(entry.path()) {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                tracing::warn!("Skipping non UTF-8 file name: {:?}", entry.path());
                continue;
            };
            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => {
                    tracing::warn!("Skipping {:?}: {}", entry.path(), e);
                    continue;
                }
            };
            files.push(DiscoveredFile {
                path: entry.path().to_path_buf(),
                name: name.to_string(),
                size,
            });
        }

        // Sort by path so logs read the same run to run
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    /// Fail with [`LoaderError::SourceUnavailable`] unless `dir` is a
    /// directory whose entries can be listed.
    pub fn check_source(dir: &Path) -> Result<()> {
        let meta = std::fs::metadata(dir).map_err(|e| unavailable(dir, e.to_string()))?;
        if !meta.is_dir() {
            return Err(unavailable(dir, "not a directory".to_string()));
        }
        std::fs::read_dir(dir).map_err(|e| unavailable(dir, e.to_string()))?;
        Ok(())
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .extensions
                    .iter()
                    .any(|supported| supported.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}

fn unavailable(dir: &Path, message: String) -> LoaderError {
    LoaderError::SourceUnavailable {
        path: dir.to_path_buf(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discovery() -> FileDiscovery {
        FileDiscovery::new(SourceConfig::default())
    }

    #[test]
    fn test_is_supported() {
        let discovery = discovery();

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(discovery.is_supported(Path::new("test.png")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("jpg")));
        assert!(!discovery.is_supported(Path::new("notes.jpg.bak")));
    }

    #[test]
    fn test_only_non_images_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"hello").unwrap();
        std::fs::write(dir.path().join("data.csv"), b"a,b").unwrap();

        let files = discovery().discover(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_empty_directory_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discovery().discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_does_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        let nested = dir.path().join("nested.jpg");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("b.jpg"), b"x").unwrap();

        let files = discovery().discover(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "a.jpg");
        assert_eq!(files[0].size, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_included() {
        let root = tempfile::tempdir().unwrap();
        let album = root.path().join("album");
        std::fs::create_dir(&album).unwrap();
        std::fs::write(root.path().join("real.jpg"), b"xyz").unwrap();
        std::os::unix::fs::symlink("../real.jpg", album.join("link.jpg")).unwrap();
        std::os::unix::fs::symlink(root.path(), album.join("dir.jpg")).unwrap();
        std::os::unix::fs::symlink("../gone.jpg", album.join("dangling.jpg")).unwrap();

        let files = discovery().discover(&album).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "link.jpg");
        assert_eq!(files[0].path, album.join("link.jpg"));
        assert_eq!(files[0].size, 3);
    }

    #[test]
    fn test_missing_directory_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = discovery().discover(&missing).unwrap_err();
        assert!(matches!(err, LoaderError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_file_path_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.jpg");
        std::fs::write(&file, b"x").unwrap();

        let err = discovery().discover(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_total_size() {
        let files = vec![
            DiscoveredFile {
                path: PathBuf::from("a.jpg"),
                name: "a.jpg".to_string(),
                size: 100,
            },
            DiscoveredFile {
                path: PathBuf::from("b.jpg"),
                name: "b.jpg".to_string(),
                size: 200,
            },
        ];

        assert_eq!(FileDiscovery::total_size(&files), 300);
    }
}
