//! In-process workflow worker
//!
//! Requests flow through a bounded mpsc queue; each carries a oneshot
//! sender for its result. On shutdown the queue is closed and anything
//! already buffered still runs.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::activities::{ActivityError, IntakeInput, echo_activity, process_intake_activity};
use crate::core::WorkerConfig;
use crate::core::constants::WORKFLOW_QUEUE_CAPACITY;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error(transparent)]
    Activity(#[from] ActivityError),

    #[error("Activity {activity} timed out after {timeout_secs}s")]
    TimedOut {
        activity: &'static str,
        timeout_secs: u64,
    },

    #[error("Workflow worker is not running")]
    WorkerUnavailable,
}

enum WorkflowRequest {
    Echo {
        message: String,
        reply: oneshot::Sender<Result<String, WorkflowError>>,
    },
    Intake {
        input: IntakeInput,
        reply: oneshot::Sender<Result<Vec<String>, WorkflowError>>,
    },
}

impl WorkflowRequest {
    fn workflow_name(&self) -> &'static str {
        match self {
            Self::Echo { .. } => "EchoWorkflow",
            Self::Intake { .. } => "IntakeWorkflow",
        }
    }
}

/// Handle for submitting workflows to a running worker
#[derive(Clone)]
pub struct WorkflowClient {
    tx: mpsc::Sender<WorkflowRequest>,
}

impl WorkflowClient {
    /// Run `EchoWorkflow` and wait for its result
    pub async fn echo(&self, message: impl Into<String>) -> Result<String, WorkflowError> {
        let (reply, rx) = oneshot::channel();
        self.submit(WorkflowRequest::Echo {
            message: message.into(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| WorkflowError::WorkerUnavailable)?
    }

    /// Run `IntakeWorkflow` and wait for its result
    pub async fn intake(&self, input: IntakeInput) -> Result<Vec<String>, WorkflowError> {
        let (reply, rx) = oneshot::channel();
        self.submit(WorkflowRequest::Intake { input, reply }).await?;
        rx.await.map_err(|_| WorkflowError::WorkerUnavailable)?
    }

    async fn submit(&self, request: WorkflowRequest) -> Result<(), WorkflowError> {
        self.tx
            .send(request)
            .await
            .map_err(|_| WorkflowError::WorkerUnavailable)
    }
}

pub struct WorkflowWorker {
    config: WorkerConfig,
    rx: mpsc::Receiver<WorkflowRequest>,
}

impl WorkflowWorker {
    /// Create a worker and the client that feeds it
    pub fn new(config: WorkerConfig) -> (Self, WorkflowClient) {
        let (tx, rx) = mpsc::channel(WORKFLOW_QUEUE_CAPACITY);
        (Self { config, rx }, WorkflowClient { tx })
    }

    pub fn start(mut self, mut shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::debug!(
                task_queue = %self.config.task_queue,
                namespace = %self.config.namespace,
                "Workflow worker started"
            );

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::debug!("Workflow worker received shutdown, draining...");
                            break;
                        }
                    }
                    request = self.rx.recv() => {
                        match request {
                            Some(request) => self.run(request).await,
                            None => break,
                        }
                    }
                }
            }

            // Drain requests queued before shutdown
            self.rx.close();
            while let Some(request) = self.rx.recv().await {
                self.run(request).await;
            }
            tracing::debug!("Workflow worker shutdown complete");
        })
    }

    async fn run(&self, request: WorkflowRequest) {
        let workflow = request.workflow_name();
        tracing::debug!(workflow, task_queue = %self.config.task_queue, "Running workflow");
        let timeout = Duration::from_secs(self.config.activity_timeout_secs);

        // A dropped receiver means the caller gave up waiting
        match request {
            WorkflowRequest::Echo { message, reply } => {
                let result = run_activity("echo_activity", timeout, echo_activity(message)).await;
                let _ = reply.send(result);
            }
            WorkflowRequest::Intake { input, reply } => {
                let result = run_activity(
                    "process_intake_activity",
                    timeout,
                    process_intake_activity(input),
                )
                .await;
                if let Err(e) = &result {
                    tracing::warn!(workflow, error = %e, "Workflow failed");
                }
                let _ = reply.send(result);
            }
        }
    }
}

/// Run one activity under a schedule-to-close timeout
async fn run_activity<T>(
    activity: &'static str,
    timeout: Duration,
    fut: impl Future<Output = Result<T, ActivityError>>,
) -> Result<T, WorkflowError> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(WorkflowError::from),
        Err(_) => Err(WorkflowError::TimedOut {
            activity,
            timeout_secs: timeout.as_secs(),
        }),
    }
}
