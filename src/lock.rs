//! File locking and atomic writes for the data file
//!
//! - Exclusive advisory locks (fs2/flock) with a bounded wait
//! - Atomic write pattern (temp file in the same directory + rename)
//!
//! Writes to the data file are serialized through `<path>.lock`, so a write
//! that started later can never be clobbered by an earlier one finishing late.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Default lock timeout in milliseconds
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

/// Default retry interval when waiting for a lock
const LOCK_RETRY_INTERVAL_MS: u64 = 25;

fn is_lock_contended(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::WouldBlock {
        return true;
    }

    // On Windows, fs2/libc can surface lock/sharing violations as "Other".
    #[cfg(windows)]
    {
        matches!(err.raw_os_error(), Some(32) | Some(33))
    }
    #[cfg(not(windows))]
    {
        false
    }
}

fn open_lock_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    Ok(file)
}

/// A file lock guard that releases the lock when dropped
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Acquire an exclusive lock on a file with timeout
    ///
    /// The lock file is created if missing. Fails with `LockFailed` when the
    /// lock is still held elsewhere after `timeout_ms`.
    pub fn acquire(path: impl AsRef<Path>, timeout_ms: u64) -> Result<Self> {
        let path = path.as_ref();
        let file = open_lock_file(path)?;

        let start = Instant::now();
        let timeout = Duration::from_millis(timeout_ms);
        let retry_interval = Duration::from_millis(LOCK_RETRY_INTERVAL_MS);

        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    return Ok(FileLock {
                        file,
                        path: path.to_path_buf(),
                    });
                }
                Err(e) if is_lock_contended(&e) => {
                    if start.elapsed() >= timeout {
                        return Err(Error::LockFailed(path.to_path_buf()));
                    }
                    std::thread::sleep(retry_interval);
                }
                Err(e) => {
                    return Err(Error::Io(e));
                }
            }
        }
    }

    /// Get the path to the locked file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Companion file next to `path`, e.g. `projects.json.lock`
pub fn lock_path_for(path: &Path, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}.{suffix}", path.display()))
}

/// Atomically write data to a file
///
/// Writes into a temp file in the target's directory and renames it over the
/// target, so readers see either the old or the new content. Does NOT lock.
pub fn write_atomic(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut temp = NamedTempFile::new_in(&dir)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| Error::Io(err.error))?;

    Ok(())
}

/// Write data atomically while holding `<path>.lock`
pub fn write_atomic_locked(path: impl AsRef<Path>, data: &[u8], timeout_ms: u64) -> Result<()> {
    let path = path.as_ref();
    let _lock = FileLock::acquire(lock_path_for(path, "lock"), timeout_ms)?;
    write_atomic(path, data)
}

/// Read a file while holding `<path>.lock`
pub fn read_locked(path: impl AsRef<Path>, timeout_ms: u64) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let _lock = FileLock::acquire(lock_path_for(path, "lock"), timeout_ms)?;
    Ok(fs::read(path)?)
}
