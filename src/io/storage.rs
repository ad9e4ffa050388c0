use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Error type for note storage operations. "Not found" is never one of these:
/// callers ask `exists` or `read_optional` instead.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("could not create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
}

/// File primitives the note lifecycle runs on.
pub trait Storage {
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> Result<String, StorageError>;

    /// Read a file, mapping "not found" to `None`.
    fn read_optional(&self, path: &Path) -> Result<Option<String>, StorageError> {
        if !self.exists(path) {
            return Ok(None);
        }
        self.read(path).map(Some)
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), StorageError>;

    /// Create `path` and any missing parents.
    fn ensure_dir(&self, path: &Path) -> Result<(), StorageError>;

    /// Move (not copy) `from` to `to`.
    fn move_file(&self, from: &Path, to: &Path) -> Result<(), StorageError>;
}

/// Storage backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path).map_err(|e| StorageError::Read {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn read_optional(&self, path: &Path) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        atomic_write(path, content.as_bytes()).map_err(|e| StorageError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn ensure_dir(&self, path: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(path).map_err(|e| StorageError::CreateDir {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        fs::rename(from, to).map_err(|e| StorageError::Move {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source: e,
        })
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
