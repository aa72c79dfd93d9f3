//! Background tasks and the completion queue.
//!
//! A task runs on the tokio runtime, never on the UI thread. When it finishes
//! it pushes a `Completion` onto a channel; the UI loop drains that channel
//! between key events and applies each completion on its own. Workers never
//! touch panel or page state.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::select_all;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::{self, ClientError, ResourceClient};
use crate::model::{PanelKind, ResourceList};

/// Most completions applied per UI iteration, so a burst cannot starve input.
const DRAIN_LIMIT: usize = 64;

/// Cooperative cancellation. Cancelling a token also cancels every child
/// derived from it; cancelling a child leaves the parent alone.
#[derive(Clone, Debug)]
pub struct CancelToken {
    // Own flag last, ancestors before it.
    flags: Vec<Arc<watch::Sender<bool>>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { flags: vec![Arc::new(tx)] }
    }

    pub fn child(&self) -> Self {
        let (tx, _) = watch::channel(false);
        let mut flags = self.flags.clone();
        flags.push(Arc::new(tx));
        Self { flags }
    }

    pub fn cancel(&self) {
        if let Some(own) = self.flags.last() {
            own.send_replace(true);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.flags.iter().any(|flag| *flag.borrow())
    }

    /// Resolves once this token or one of its ancestors is cancelled.
    pub async fn cancelled(&self) {
        let waits = self.flags.iter().map(|flag| {
            let mut rx = flag.subscribe();
            Box::pin(async move {
                let _ = rx.wait_for(|cancelled| *cancelled).await;
            })
        });
        select_all(waits).await;
    }

    /// Drive `fut` unless the token fires first.
    pub async fn run_until_cancelled<F: Future>(&self, fut: F) -> Result<F::Output, ClientError> {
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(ClientError::Cancelled),
            out = fut => Ok(out),
        }
    }
}

/// Inspect output destined for the detail page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detail {
    pub title: String,
    pub text: String,
    pub return_to: PanelKind,
}

/// What a finished task hands back to the UI loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskOutput {
    Done,
    Refreshed(ResourceList),
    Detail(Detail),
}

pub type TaskFuture = Pin<Box<dyn Future<Output = Result<TaskOutput, ClientError>> + Send>>;
type TaskAction = Box<dyn FnOnce(Arc<dyn ResourceClient>, CancelToken) -> TaskFuture + Send>;

/// A named unit of background work.
pub struct Task {
    pub description: String,
    /// Panel to re-query after the action succeeds.
    pub refresh: Option<PanelKind>,
    action: TaskAction,
}

impl Task {
    pub fn new<F, Fut>(description: impl Into<String>, action: F) -> Self
    where
        F: FnOnce(Arc<dyn ResourceClient>, CancelToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<TaskOutput, ClientError>> + Send + 'static,
    {
        Self {
            description: description.into(),
            refresh: None,
            action: Box::new(move |client: Arc<dyn ResourceClient>, token: CancelToken| -> TaskFuture {
                Box::pin(action(client, token))
            }),
        }
    }

    /// Re-query `kind` once the action succeeds.
    pub fn refreshing(mut self, kind: PanelKind) -> Self {
        self.refresh = Some(kind);
        self
    }

    /// A task that only re-queries one panel.
    pub fn refresh_panel(kind: PanelKind) -> Self {
        Self::new(format!("refresh {}", kind), move |client, token| async move {
            let list = token.run_until_cancelled(client::list(client.as_ref(), kind)).await??;
            Ok::<_, ClientError>(TaskOutput::Refreshed(list))
        })
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// A finished task, queued for the UI loop.
#[derive(Debug)]
pub struct Completion {
    pub description: String,
    pub result: Result<TaskOutput, ClientError>,
}

/// Receiving end of the completion channel. Owned by the UI loop.
///
/// A task counts as in flight until its completion has been taken off this
/// queue, so `in_flight() == 0` means nothing is left to apply.
pub struct CompletionQueue {
    rx: mpsc::Receiver<Completion>,
    in_flight: Arc<AtomicUsize>,
}

impl CompletionQueue {
    /// Everything queued right now, up to the drain limit. Never blocks.
    pub fn drain(&self) -> Vec<Completion> {
        let mut out = Vec::new();
        while out.len() < DRAIN_LIMIT {
            match self.rx.try_recv() {
                Ok(completion) => out.push(self.received(completion)),
                Err(_) => break,
            }
        }
        out
    }

    /// Block up to `timeout` for the next completion. Meant for tests and
    /// shutdown, never for the UI loop.
    pub fn wait(&self, timeout: Duration) -> Option<Completion> {
        self.rx.recv_timeout(timeout).ok().map(|c| self.received(c))
    }

    fn received(&self, completion: Completion) -> Completion {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        completion
    }
}

/// Releases the in-flight slot if a task never gets its completion queued
/// (panic, or the UI loop is gone).
struct InFlightGuard {
    count: Arc<AtomicUsize>,
    armed: bool,
}

impl InFlightGuard {
    /// The queue now owns the decrement.
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.armed {
            self.count.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// Spawns tasks on the runtime and routes their results to the completion queue.
#[derive(Clone)]
pub struct TaskRunner {
    handle: Handle,
    client: Arc<dyn ResourceClient>,
    tx: mpsc::Sender<Completion>,
    cancel: CancelToken,
    in_flight: Arc<AtomicUsize>,
}

impl TaskRunner {
    pub fn new(handle: Handle, client: Arc<dyn ResourceClient>) -> (Self, CompletionQueue) {
        let (tx, rx) = mpsc::channel();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let runner = Self {
            handle,
            client,
            tx,
            cancel: CancelToken::new(),
            in_flight: Arc::clone(&in_flight),
        };
        (runner, CompletionQueue { rx, in_flight })
    }

    /// Tasks started whose completion has not been received yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Start `task` and return at once. Its completion arrives on the queue
    /// exactly once, success or failure.
    pub fn run(&self, task: Task) {
        let Task { description, refresh, action } = task;
        let client = Arc::clone(&self.client);
        let token = self.cancel.child();
        let tx = self.tx.clone();

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let guard = InFlightGuard { count: Arc::clone(&self.in_flight), armed: true };
        info!(task = %description, "task started");

        self.handle.spawn(async move {
            let run = async move {
                match action(Arc::clone(&client), token.clone()).await {
                    Ok(TaskOutput::Done) => match refresh {
                        Some(kind) => token
                            .run_until_cancelled(client::list(client.as_ref(), kind))
                            .await
                            .and_then(|r| r)
                            .map(TaskOutput::Refreshed),
                        None => Ok(TaskOutput::Done),
                    },
                    other => other,
                }
            };
            let result = AssertUnwindSafe(run)
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(ClientError::Other(format!("task panicked: {}", panic_message(&*panic)))));

            match &result {
                Ok(_) => debug!(task = %description, "task finished"),
                Err(e) => warn!(task = %description, error = %e, "task failed"),
            }
            match tx.send(Completion { description, result }) {
                Ok(()) => guard.disarm(),
                Err(_) => warn!("completion dropped: UI loop has gone away"),
            }
        });
    }

    /// Signal every running task to stop. Cooperative only.
    pub fn cancel_all(&self) {
        self.cancel.cancel();
    }
}
