//! ReaderLineSource - newline-delimited lines from any async buffered reader

use std::path::Path;

use bytes::Bytes;
use contracts::{ContractError, Line, LineSource};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, error, instrument};

/// Read buffer size for file-backed sources
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Line source backed by a file
pub type FileLineSource = ReaderLineSource<BufReader<File>>;

/// Line source over an `AsyncBufRead`
///
/// Lines are split on `\n`; a `\r` directly before it is stripped too.
/// A final line without terminator is still produced. After end of input or
/// a read failure the source is exhausted and yields `Ok(None)`.
pub struct ReaderLineSource<R> {
    name: String,
    reader: R,
    lines_read: u64,
    exhausted: bool,
}

impl<R> ReaderLineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    /// Wrap an existing reader
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
            lines_read: 0,
            exhausted: false,
        }
    }

    /// Number of lines produced so far
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

impl FileLineSource {
    /// Open a file for read-only streaming access
    ///
    /// # Errors
    /// Returns `ContractError::ResourceUnavailable` if the file does not
    /// exist or cannot be read
    #[instrument(name = "line_source_open", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ContractError> {
        let path = path.as_ref();
        let file = File::open(path)
            .await
            .map_err(|e| ContractError::resource_unavailable(path, e))?;

        debug!("Input opened");
        Ok(Self::new(
            path.display().to_string(),
            BufReader::with_capacity(READ_BUFFER_SIZE, file),
        ))
    }
}

impl<R> LineSource for ReaderLineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_line(&mut self) -> Result<Option<Line>, ContractError> {
        if self.exhausted {
            return Ok(None);
        }

        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                self.exhausted = true;
                debug!(source = %self.name, lines = self.lines_read, "End of input");
                Ok(None)
            }
            Ok(_) => {
                strip_terminator(&mut buf);
                self.lines_read += 1;
                Ok(Some(Line::new(self.lines_read, Bytes::from(buf))))
            }
            Err(e) => {
                self.exhausted = true;
                error!(
                    source = %self.name,
                    after_line = self.lines_read,
                    error = %e,
                    "Read failed"
                );
                Err(ContractError::read_failure(self.lines_read, e))
            }
        }
    }
}

fn strip_terminator(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
}
