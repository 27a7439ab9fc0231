//! SinkHandle - owns one category channel and its worker task

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument};

use contracts::{Category, Line, LineSink};
use observability::record_write_failure;

use crate::barrier::CompletionGuard;
use crate::error::DispatcherError;
use crate::metrics::SinkMetrics;

/// Handle to a running sink worker
pub struct SinkHandle {
    /// Routed category
    category: Category,
    /// Sink name
    name: String,
    /// Channel to send lines to worker; `None` once closed
    tx: Option<mpsc::Sender<Line>>,
    /// Shared metrics
    metrics: Arc<SinkMetrics>,
    /// Worker task handle
    worker_handle: JoinHandle<()>,
}

impl SinkHandle {
    /// Create a new SinkHandle and spawn the worker task
    ///
    /// The worker owns `sink` and `guard`; the guard is released when the
    /// worker exits, whatever the exit path.
    pub fn spawn<S: LineSink + 'static>(
        category: Category,
        sink: S,
        queue_capacity: usize,
        guard: CompletionGuard,
    ) -> Self {
        let name = sink.name().to_string();
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        let metrics = Arc::new(SinkMetrics::new());

        let worker_metrics = Arc::clone(&metrics);
        let worker_name = name.clone();

        let worker_handle = tokio::spawn(async move {
            let _guard = guard;
            sink_worker(category, sink, rx, worker_metrics, worker_name).await;
        });

        Self {
            category,
            name,
            tx: Some(tx),
            metrics,
            worker_handle,
        }
    }

    /// Routed category
    pub fn category(&self) -> Category {
        self.category
    }

    /// Get sink name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get current metrics
    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    /// Send a line to the worker, waiting while the queue is full
    ///
    /// # Errors
    /// `ChannelClosed` if the handle was closed or the worker is gone
    pub async fn send(&self, line: Line) -> Result<(), DispatcherError> {
        let closed = DispatcherError::ChannelClosed {
            category: self.category,
        };
        let tx = self.tx.as_ref().ok_or(closed)?;

        tx.send(line).await.map_err(|_| {
            error!(sink = %self.name, category = %self.category, "Sink worker closed unexpectedly");
            DispatcherError::ChannelClosed {
                category: self.category,
            }
        })?;
        self.metrics.set_queue_len(tx.max_capacity() - tx.capacity());
        Ok(())
    }

    /// Close the channel; the worker drains what is queued and exits
    pub fn close(&mut self) {
        if self.tx.take().is_some() {
            debug!(sink = %self.name, category = %self.category, "Channel closed");
        }
    }

    /// Close the channel and wait for the worker task to finish
    ///
    /// # Errors
    /// `WorkerPanicked` if the worker task panicked
    #[instrument(name = "sink_handle_join", skip(self), fields(sink = %self.name))]
    pub async fn join(mut self) -> Result<(), DispatcherError> {
        self.close();
        match self.worker_handle.await {
            Ok(()) => {
                debug!(sink = %self.name, "SinkHandle shutdown complete");
                Ok(())
            }
            Err(e) => {
                error!(sink = %self.name, error = ?e, "Worker task panicked");
                Err(DispatcherError::WorkerPanicked {
                    category: self.category,
                })
            }
        }
    }
}

/// Worker task that drains the channel into the sink
///
/// Write failures are counted and logged; draining continues so the
/// dispatcher is never left blocked on a full channel.
#[instrument(
    name = "sink_worker_loop",
    skip(sink, rx, metrics),
    fields(sink = %name, category = %category)
)]
async fn sink_worker<S: LineSink>(
    category: Category,
    mut sink: S,
    mut rx: mpsc::Receiver<Line>,
    metrics: Arc<SinkMetrics>,
    name: String,
) {
    debug!("Sink worker started");

    while let Some(line) = rx.recv().await {
        metrics.set_queue_len(rx.len());

        match sink.write(&line).await {
            Ok(()) => {
                metrics.record_write(line.len() as u64 + 1);
            }
            Err(e) => {
                metrics.inc_failure_count();
                record_write_failure(category);
                error!(line = line.number, error = %e, "Write failed");
                // Continue draining - never leave the dispatcher blocked
            }
        }
    }

    // Cleanup
    if let Err(e) = sink.flush().await {
        metrics.inc_failure_count();
        record_write_failure(category);
        error!(error = %e, "Flush failed on shutdown");
    }
    if let Err(e) = sink.close().await {
        metrics.inc_failure_count();
        record_write_failure(category);
        error!(error = %e, "Close failed on shutdown");
    }

    debug!(
        lines = metrics.write_count(),
        failures = metrics.failure_count(),
        "Sink worker stopped"
    );
}
