//! FileSink - appends lines to a destination file

use std::path::{Path, PathBuf};

use bytes::Buf;
use contracts::{ContractError, Line, LineSink};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};

/// Write buffer size
const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Sink that writes newline-terminated lines to a file
///
/// Owns its file handle exclusively. `close` flushes and syncs the file so
/// the data is durable once the worker exits. Each line is handed to the
/// writer as one record (content plus terminator); only an I/O error in the
/// middle of that record can leave a partial line behind.
pub struct FileSink {
    name: String,
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    /// Create (or truncate) the destination file for write-only access
    ///
    /// # Errors
    /// Returns `ContractError::ResourceUnavailable` if the file cannot be created
    pub async fn create(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, ContractError> {
        let path = path.as_ref();
        let file = File::create(path)
            .await
            .map_err(|e| ContractError::resource_unavailable(path, e))?;

        Ok(Self {
            name: name.into(),
            path: path.to_path_buf(),
            writer: BufWriter::with_capacity(WRITE_BUFFER_SIZE, file),
        })
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, e: std::io::Error) -> ContractError {
        ContractError::write_failure(&self.name, format!("{}: {e}", self.path.display()))
    }
}

impl LineSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    /// Content and terminator go to the writer as one record
    async fn write(&mut self, line: &Line) -> Result<(), ContractError> {
        let mut record = line.content.clone().chain(&b"\n"[..]);
        if let Err(e) = self.writer.write_all_buf(&mut record).await {
            return Err(self.write_error(e));
        }
        Ok(())
    }

    #[instrument(name = "file_sink_flush", skip(self), fields(sink = %self.name))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        if let Err(e) = self.writer.flush().await {
            return Err(self.write_error(e));
        }
        Ok(())
    }

    #[instrument(name = "file_sink_close", skip(self), fields(sink = %self.name))]
    async fn close(&mut self) -> Result<(), ContractError> {
        if let Err(e) = self.writer.flush().await {
            return Err(self.write_error(e));
        }
        if let Err(e) = self.writer.get_ref().sync_all().await {
            return Err(self.write_error(e));
        }
        debug!(path = %self.path.display(), "FileSink closed");
        Ok(())
    }
}
