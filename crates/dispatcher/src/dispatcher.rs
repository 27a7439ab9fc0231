//! Dispatcher - classify lines and fan them out to one sink per category

use std::path::Path;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use contracts::{Category, Classifier, ContractError, LineSink, LineSource, SplitConfig};
use observability::{record_line_dispatched, record_line_read, record_read_failure};

use crate::barrier::CompletionBarrier;
use crate::error::DispatcherError;
use crate::handle::SinkHandle;
use crate::metrics::MetricsSnapshot;
use crate::sinks::FileSink;

/// Lines between progress log events
const PROGRESS_INTERVAL: u64 = 10_000;

/// Final state of one sink after the run
#[derive(Debug, Clone)]
pub struct SinkReport {
    pub category: Category,
    pub name: String,
    pub metrics: MetricsSnapshot,
}

/// Outcome of a completed split
#[derive(Debug, Clone)]
pub struct SplitReport {
    /// Lines pulled from the source
    pub lines_read: u64,
    /// Per-sink results, indexed by `Category::index()`
    pub sinks: [SinkReport; Category::COUNT],
    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl SplitReport {
    /// Report for one category
    pub fn sink(&self, category: Category) -> &SinkReport {
        &self.sinks[category.index()]
    }

    /// Write failures across all sinks
    pub fn total_failures(&self) -> u64 {
        self.sinks.iter().map(|s| s.metrics.failure_count).sum()
    }

    /// Lines per second
    pub fn lines_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.lines_read as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// The Dispatcher: one reader loop feeding one worker per category
pub struct Dispatcher {
    classifier: Classifier,
    strict_writes: bool,
    handles: [SinkHandle; Category::COUNT],
    barrier: CompletionBarrier,
}

impl Dispatcher {
    /// Spawn one worker per category over the given sinks
    ///
    /// Must be called within a Tokio runtime.
    pub fn with_sinks<P, S>(config: &SplitConfig, primary: P, secondary: S) -> Self
    where
        P: LineSink + 'static,
        S: LineSink + 'static,
    {
        let (barrier, [primary_guard, secondary_guard]) =
            CompletionBarrier::new::<{ Category::COUNT }>();
        let capacity = config.queue_capacity;

        let handles = [
            SinkHandle::spawn(Category::Primary, primary, capacity, primary_guard),
            SinkHandle::spawn(Category::Secondary, secondary, capacity, secondary_guard),
        ];

        Self {
            classifier: config.classifier(),
            strict_writes: config.strict_writes,
            handles,
            barrier,
        }
    }

    /// Get metrics for all sinks
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.handles
            .iter()
            .map(|h| (h.name().to_string(), h.metrics().snapshot()))
            .collect()
    }

    /// Completion barrier shared with the workers
    pub fn barrier(&self) -> &CompletionBarrier {
        &self.barrier
    }

    /// Run the dispatcher main loop
    ///
    /// Pulls lines until the source ends or fails. On every exit path both
    /// channels are closed and the call waits for both workers to drain
    /// before returning, so a read failure still leaves both outputs in a
    /// consistent partial state.
    ///
    /// # Errors
    /// - `WorkerPanicked` if a worker died (takes precedence over other errors)
    /// - `Contract(ReadFailure)` if the source failed mid-stream
    /// - `ChannelClosed` if a worker stopped receiving without panicking
    /// - `Contract(WriteFailure)` if `strict_writes` is set and any write failed
    #[instrument(name = "dispatcher_run", skip_all, fields(source = %source.name()))]
    pub async fn run<L: LineSource>(self, mut source: L) -> Result<SplitReport, DispatcherError> {
        let started = Instant::now();
        let Self {
            classifier,
            strict_writes,
            mut handles,
            barrier,
        } = self;

        info!(
            marker = %String::from_utf8_lossy(classifier.marker()),
            mode = ?classifier.mode(),
            "Dispatcher started"
        );

        let mut lines_read: u64 = 0;
        let outcome = Self::dispatch_all(&classifier, &handles, &mut source, &mut lines_read).await;

        for handle in &mut handles {
            handle.close();
        }
        barrier.wait().await;

        info!(lines = lines_read, "Dispatcher input closed, sinks drained");

        // A panicked worker surfaces as ChannelClosed in `outcome`; report the cause
        let (sinks, joined) = Self::join_handles(handles).await;
        joined?;
        outcome?;

        let report = SplitReport {
            lines_read,
            sinks,
            duration: started.elapsed(),
        };

        if strict_writes {
            if let Some(failed) = report.sinks.iter().find(|s| s.metrics.failure_count > 0) {
                return Err(ContractError::write_failure(
                    &failed.name,
                    format!("{} write(s) failed", failed.metrics.failure_count),
                )
                .into());
            }
        }

        info!(
            lines = report.lines_read,
            primary = report.sink(Category::Primary).metrics.write_count,
            secondary = report.sink(Category::Secondary).metrics.write_count,
            failures = report.total_failures(),
            "Dispatcher shutdown complete"
        );
        Ok(report)
    }

    /// Spawn the dispatcher as a background task
    pub fn spawn<L>(self, source: L) -> JoinHandle<Result<SplitReport, DispatcherError>>
    where
        L: LineSource + 'static,
    {
        tokio::spawn(async move { self.run(source).await })
    }

    async fn dispatch_all<L: LineSource>(
        classifier: &Classifier,
        handles: &[SinkHandle; Category::COUNT],
        source: &mut L,
        lines_read: &mut u64,
    ) -> Result<(), DispatcherError> {
        loop {
            let line = match source.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(()),
                Err(e) => {
                    record_read_failure();
                    warn!(after_line = *lines_read, error = %e, "Source failed, closing channels");
                    return Err(e.into());
                }
            };

            *lines_read += 1;
            record_line_read();

            let category = classifier.classify(&line);
            handles[category.index()].send(line).await?;
            record_line_dispatched(category);

            if lines_read.is_multiple_of(PROGRESS_INTERVAL) {
                debug!(lines = *lines_read, "Dispatcher progress");
            }
        }
    }

    /// Join every worker, collecting final metrics even if one panicked
    async fn join_handles(
        handles: [SinkHandle; Category::COUNT],
    ) -> ([SinkReport; Category::COUNT], Result<(), DispatcherError>) {
        let reports = handles.each_ref().map(|h| SinkReport {
            category: h.category(),
            name: h.name().to_string(),
            metrics: h.metrics().snapshot(),
        });

        let mut joined = Ok(());
        for handle in handles {
            if let Err(e) = handle.join().await {
                if joined.is_ok() {
                    joined = Err(e);
                }
            }
        }
        (reports, joined)
    }
}

/// Create a dispatcher writing next to `input`
///
/// Both outputs are created (truncated) before any worker is spawned, so a
/// creation failure surfaces before the pipeline starts.
#[instrument(name = "dispatcher_create", skip_all, fields(input = %input.display()))]
pub async fn create_dispatcher(
    config: &SplitConfig,
    input: &Path,
) -> Result<Dispatcher, DispatcherError> {
    let [primary_path, secondary_path] = config.output_paths(input);

    let primary = FileSink::create(Category::Primary.as_str(), &primary_path).await?;
    let secondary = FileSink::create(Category::Secondary.as_str(), &secondary_path).await?;

    debug!(
        primary = %primary_path.display(),
        secondary = %secondary_path.display(),
        "Outputs created"
    );
    Ok(Dispatcher::with_sinks(config, primary, secondary))
}
