//! Span export on a dedicated thread.
//!
//! The simple span processor blocks whichever thread ends a span until the
//! exporter returns. The gRPC exporter only makes progress on a Tokio
//! runtime, so it must not run on the runtime whose worker is blocked.
//! `ExportWorker` owns the OTLP exporter on its own thread and current-thread
//! runtime, and hands batches to it over a channel.

use opentelemetry::trace::TraceError;
use opentelemetry_otlp::{SpanExporter as OtlpExporter, WithExportConfig};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::Resource;
use std::future::Future;
use std::pin::Pin;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

use crate::config::TelemetryConfig;
use crate::observability::TelemetryError;

const THREAD_NAME: &str = "otlp-export";

enum Job {
    Export(Vec<SpanData>, oneshot::Sender<ExportResult>),
    SetResource(Resource),
}

/// `SpanExporter` that forwards every batch to the export thread and waits
/// for its result.
#[derive(Debug)]
pub struct ExportWorker {
    jobs: Option<mpsc::Sender<Job>>,
    thread: Option<JoinHandle<()>>,
}

impl ExportWorker {
    /// Start the export thread and build the OTLP exporter on it.
    ///
    /// # Returns
    /// A running worker, or the error met while building the exporter
    pub fn spawn(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let endpoint = config.endpoint.clone();
        let timeout = Duration::from_secs(config.export_timeout_secs);
        let (jobs, queue) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();

        let thread = std::thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || run_worker(endpoint, timeout, queue, ready_tx))
            .map_err(|e| TelemetryError::Worker(e.to_string()))?;

        let ready = ready_rx.recv().unwrap_or_else(|_| {
            Err(TelemetryError::Worker(
                "export thread exited during startup".to_string(),
            ))
        });
        match ready {
            Ok(()) => Ok(Self {
                jobs: Some(jobs),
                thread: Some(thread),
            }),
            Err(e) => {
                let _ = thread.join();
                Err(e)
            }
        }
    }

    /// Whether the export thread is still accepting batches.
    pub fn is_running(&self) -> bool {
        self.jobs.is_some()
    }

    fn stop(&mut self) {
        // Closing the queue ends the worker loop after the jobs already sent.
        self.jobs.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("Span export thread panicked");
            }
        }
    }
}

impl SpanExporter for ExportWorker {
    fn export(
        &mut self,
        batch: Vec<SpanData>,
    ) -> Pin<Box<dyn Future<Output = ExportResult> + Send + 'static>> {
        let (reply, result) = oneshot::channel();
        let queued = self
            .jobs
            .as_ref()
            .is_some_and(|jobs| jobs.send(Job::Export(batch, reply)).is_ok());

        Box::pin(async move {
            if !queued {
                return Err(TraceError::from("span export thread is stopped"));
            }
            result
                .await
                .unwrap_or_else(|_| Err(TraceError::from("span export thread dropped the batch")))
        })
    }

    fn shutdown(&mut self) {
        self.stop();
    }

    fn set_resource(&mut self, resource: &Resource) {
        if let Some(jobs) = &self.jobs {
            let _ = jobs.send(Job::SetResource(resource.clone()));
        }
    }
}

impl Drop for ExportWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker(
    endpoint: String,
    timeout: Duration,
    queue: mpsc::Receiver<Job>,
    ready: mpsc::Sender<Result<(), TelemetryError>>,
) {
    // Spans opened by the exporter's own client would be queued behind the
    // batch being exported; this thread reports to no subscriber.
    let _silenced = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());

    let (runtime, mut exporter) = match build_exporter(&endpoint, timeout) {
        Ok(built) => built,
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    while let Ok(job) = queue.recv() {
        match job {
            Job::Export(batch, reply) => {
                let _ = reply.send(runtime.block_on(exporter.export(batch)));
            }
            Job::SetResource(resource) => exporter.set_resource(&resource),
        }
    }
    exporter.shutdown();
}

fn build_exporter(
    endpoint: &str,
    timeout: Duration,
) -> Result<(Runtime, OtlpExporter), TelemetryError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| TelemetryError::Worker(e.to_string()))?;

    // The tonic channel spawns its connection task on the runtime it is built in.
    let exporter = runtime
        .block_on(async {
            OtlpExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint)
                .with_timeout(timeout)
                .build()
        })
        .map_err(|e| TelemetryError::Exporter {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

    Ok((runtime, exporter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> TelemetryConfig {
        TelemetryConfig {
            endpoint: endpoint.to_string(),
            export_timeout_secs: 1,
            ..TelemetryConfig::default()
        }
    }

    #[tokio::test]
    async fn test_stopped_worker_rejects_batches() {
        let mut worker = ExportWorker::spawn(&config("http://127.0.0.1:4399")).unwrap();
        assert!(worker.is_running());

        worker.shutdown();
        assert!(!worker.is_running());
        assert!(worker.export(Vec::new()).await.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_unreachable_collector_does_not_hang_export() {
        let mut worker = ExportWorker::spawn(&config("http://127.0.0.1:1")).unwrap();

        let export = worker.export(Vec::new());
        assert!(tokio::time::timeout(Duration::from_secs(5), export)
            .await
            .is_ok());

        tokio::task::spawn_blocking(move || worker.shutdown())
            .await
            .unwrap();
    }
}
