//! Mock line source
//!
//! Used for pipeline tests without touching the filesystem.

use std::collections::VecDeque;
use std::time::Duration;

use bytes::Bytes;
use contracts::{ContractError, Line, LineSource};
use tracing::trace;

/// Mock line source
///
/// Yields a fixed list of lines, optionally pausing between lines and
/// optionally failing with a `ReadFailure` after a given number of lines.
pub struct MockLineSource {
    name: String,
    pending: VecDeque<Bytes>,
    fail_after: Option<u64>,
    delay: Option<Duration>,
    lines_read: u64,
    exhausted: bool,
}

impl MockLineSource {
    /// Create a mock source from line contents
    pub fn from_lines<I, T>(lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        Self {
            name: "mock".to_string(),
            pending: lines.into_iter().map(Into::into).collect(),
            fail_after: None,
            delay: None,
            lines_read: 0,
            exhausted: false,
        }
    }

    /// Set the source name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Fail with a read error once `count` lines have been produced
    pub fn fail_after(mut self, count: u64) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Sleep before producing each line
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of lines produced so far
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

impl LineSource for MockLineSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_line(&mut self) -> Result<Option<Line>, ContractError> {
        if self.exhausted {
            return Ok(None);
        }

        if self.fail_after == Some(self.lines_read) {
            self.exhausted = true;
            return Err(ContractError::read_failure(
                self.lines_read,
                std::io::Error::other("simulated read failure"),
            ));
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.pending.pop_front() {
            Some(content) => {
                self.lines_read += 1;
                trace!(source = %self.name, line = self.lines_read, "mock line produced");
                Ok(Some(Line::new(self.lines_read, content)))
            }
            None => {
                self.exhausted = true;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_yields_in_order() {
        let mut source = MockLineSource::from_lines(["a", "b"]);
        assert_eq!(source.next_line().await.unwrap().unwrap().as_bytes(), b"a");
        let second = source.next_line().await.unwrap().unwrap();
        assert_eq!(second.as_bytes(), b"b");
        assert_eq!(second.number, 2);
        assert!(source.next_line().await.unwrap().is_none());
        assert!(source.next_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_fail_after() {
        let mut source = MockLineSource::from_lines(["a", "b", "c"]).fail_after(1);
        assert!(source.next_line().await.unwrap().is_some());

        let err = source.next_line().await.unwrap_err();
        assert!(matches!(
            err,
            ContractError::ReadFailure { line_number: 1, .. }
        ));
        assert!(source.next_line().await.unwrap().is_none());
        assert_eq!(source.lines_read(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_named_with_delay() {
        let mut source = MockLineSource::from_lines(["x"])
            .named("slow")
            .with_delay(Duration::from_millis(50));
        assert_eq!(source.name(), "slow");

        let started = tokio::time::Instant::now();
        assert!(source.next_line().await.unwrap().is_some());
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_mock_fail_immediately() {
        let mut source = MockLineSource::from_lines(Vec::<Bytes>::new()).fail_after(0);
        assert!(source.next_line().await.is_err());
    }
}
