// Lockbox: Backing sources
//
// Where a store's mapping lives between sessions. The store only ever reads
// the whole text on load and writes the whole text on logout.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::StoreError;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the resource holding a store's `key:value` text.
pub trait BackingSource: fmt::Debug + Send + Sync {
    /// Read the full text. Returns `None` when the source does not exist yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the full text.
    fn write(&self, contents: &str) -> Result<(), StoreError>;

    /// Human-readable identifier used in log events.
    fn describe(&self) -> String;
}

// ─── File Implementation ─────────────────────────────────────────────────────

/// A backing source stored as a UTF-8 text file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BackingSource for FileSource {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ─── In-Memory Implementation ────────────────────────────────────────────────

/// A backing source held in memory. Clones share the same buffer, so a test
/// can keep a handle and inspect what the store flushed.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemorySource {
    /// An empty source, as if the backing file did not exist yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }

    /// Current text, or `None` if nothing was ever written.
    pub fn contents(&self) -> Option<String> {
        self.lock().clone()
    }

    pub fn set_contents(&self, contents: impl Into<String>) {
        *self.lock() = Some(contents.into());
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.contents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BackingSource for MemorySource {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        self.set_contents(contents);
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("absent.db"));
        assert!(source.read().unwrap().is_none());
    }

    #[test]
    fn test_file_source_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let source = FileSource::new(&path);

        source.write("a:1\n").unwrap();
        assert_eq!(source.read().unwrap().as_deref(), Some("a:1\n"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a:1\n");
        assert_eq!(source.path(), path.as_path());
    }

    #[test]
    fn test_file_source_write_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("store.db"));

        source.write("a:1\nb:2\n").unwrap();
        source.write("c:3\n").unwrap();
        assert_eq!(source.read().unwrap().as_deref(), Some("c:3\n"));
    }

    #[test]
    fn test_file_source_reading_a_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path());
        assert!(matches!(source.read(), Err(StoreError::Io(_))));
    }

    #[test]
    fn test_memory_source_clones_share_buffer() {
        let source = MemorySource::new();
        let handle = source.clone();
        assert!(handle.contents().is_none());

        source.write("k:v\n").unwrap();
        assert_eq!(handle.contents().as_deref(), Some("k:v\n"));
    }

    #[test]
    fn test_memory_source_with_contents() {
        let source = MemorySource::with_contents("a:1\n");
        assert_eq!(source.read().unwrap().as_deref(), Some("a:1\n"));
        assert_eq!(source.describe(), "<memory>");
    }
}
