//! Output sinks.
//!
//! A [`Sink`] is the append-only byte destination at the bottom of the
//! writer pipeline. It is owned by exactly one writer and only touched from
//! inside that writer's critical section.

use gzlog_core::{LogConfig, LogError, LogResult};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only byte destination.
///
/// `close` releases the underlying resource. It is called exactly once, as
/// the last step of shutting the writer down, after the compressed stream
/// trailer has been written. The writer never writes to or flushes a sink
/// once `close` has been called on it, even if the trailer could not be
/// written.
pub trait Sink: Write + Send {
    /// Release the sink. Writes after a successful close must fail.
    fn close(&mut self) -> io::Result<()>;

    /// Filesystem location backing this sink, if any.
    ///
    /// Used by the verification read-back; sinks without a path cannot be
    /// read back through the writer.
    fn location(&self) -> Option<&Path> {
        None
    }
}

/// File opened for append.
///
/// Existing content is preserved, so reopening a path after a restart adds
/// a new gzip member behind the old ones.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    /// Open or create `path` for appending.
    ///
    /// On Unix a newly created file gets `config.file_mode`. Missing parent
    /// directories are created only when `config.create_parent_dirs` is set.
    pub fn open(path: impl AsRef<Path>, config: &LogConfig) -> LogResult<Self> {
        let path = path.as_ref().to_path_buf();

        if config.create_parent_dirs {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| LogError::open(path.clone(), e))?;
                }
            }
        }

        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(config.file_mode);
        }

        let file = options
            .open(&path)
            .map_err(|e| LogError::open(path.clone(), e))?;

        debug!(path = %path.display(), "Opened log sink");
        Ok(FileSink {
            path,
            file: Some(file),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_mut(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "log sink is closed"))
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file_mut()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file_mut()?.flush()
    }
}

impl Sink for FileSink {
    fn close(&mut self) -> io::Result<()> {
        // No fsync: durability across a crash is not promised.
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
