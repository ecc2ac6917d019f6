// Cancellable async resource slot.
//
// An `AsyncResource<T>` is one named data dependency (years, teams, board...)
// with an Idle/Loading/Success/Error state machine. Every trigger bumps a
// monotonically increasing token; an operation may only commit its result if
// its token is still the slot's current one. Superseded operations still run
// to completion, but their results are dropped.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::ApiError;

// ---------------------------------------------------------------------------
// ResourceState
// ---------------------------------------------------------------------------

/// Discriminant of a [`ResourceState`], for callers that only care about the
/// phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Observable state of a resource slot.
///
/// Data exists only in `Success` and a message only in `Error`, so the two
/// can never be out of step with the status.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> ResourceState<T> {
    pub fn status(&self) -> ResourceStatus {
        match self {
            ResourceState::Idle => ResourceStatus::Idle,
            ResourceState::Loading => ResourceStatus::Loading,
            ResourceState::Success(_) => ResourceStatus::Success,
            ResourceState::Error(_) => ResourceStatus::Error,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ResourceState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ResourceState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceState::Loading)
    }
}

// ---------------------------------------------------------------------------
// AsyncResource
// ---------------------------------------------------------------------------

struct Inner<T> {
    name: &'static str,
    /// User-facing message recorded on any failure of this slot.
    failure_message: String,
    state: watch::Sender<ResourceState<T>>,
    /// Token of the most recent trigger. Only read or bumped while holding
    /// the `state` lock (inside `send_modify` / `send_if_modified`).
    token: AtomicU64,
}

/// A single cancellable resource slot. Cloning shares the slot.
pub struct AsyncResource<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for AsyncResource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for AsyncResource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncResource")
            .field("name", &self.inner.name)
            .field("token", &self.inner.token.load(Ordering::SeqCst))
            .finish()
    }
}

impl<T> AsyncResource<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an idle slot. `failure_message` is what the user sees when any
    /// operation on this slot fails, whatever the underlying cause.
    pub fn new(name: &'static str, failure_message: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ResourceState::Idle);
        Self {
            inner: Arc::new(Inner {
                name,
                failure_message: failure_message.into(),
                state,
                token: AtomicU64::new(0),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ResourceState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn status(&self) -> ResourceStatus {
        self.inner.state.borrow().status()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    /// Observe every state transition of this slot.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.inner.state.subscribe()
    }

    /// Token of the most recent trigger (or cancellation).
    pub fn current_token(&self) -> u64 {
        self.inner.token.load(Ordering::SeqCst)
    }

    /// Supersede whatever is in flight, enter `Loading`, and run `operation`
    /// on the tokio runtime. Returns the token issued for this trigger.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger<F>(&self, operation: F) -> u64
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        self.trigger_then(operation, |_| {})
    }

    /// Like [`trigger`](Self::trigger), but runs `on_commit` with the value
    /// once a success has actually been committed. A superseded result never
    /// reaches `on_commit`.
    pub fn trigger_then<F, C>(&self, operation: F, on_commit: C) -> u64
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
        C: FnOnce(&T) + Send + 'static,
    {
        let mut token = 0;
        self.inner.state.send_modify(|state| {
            token = self.inner.token.fetch_add(1, Ordering::SeqCst) + 1;
            *state = ResourceState::Loading;
        });
        debug!(resource = self.inner.name, token, "trigger");

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = operation.await;
            if let Some(value) = inner.commit(token, result) {
                on_commit(&value);
            }
        });

        token
    }

    /// Invalidate the in-flight operation without starting a new one. The
    /// visible state is left as-is.
    pub fn cancel(&self) {
        self.inner.state.send_if_modified(|_| {
            self.inner.token.fetch_add(1, Ordering::SeqCst);
            false
        });
        debug!(resource = self.inner.name, "cancelled");
    }

    /// Invalidate the in-flight operation and return to `Idle`.
    pub fn reset(&self) {
        self.inner.state.send_modify(|state| {
            self.inner.token.fetch_add(1, Ordering::SeqCst);
            *state = ResourceState::Idle;
        });
        debug!(resource = self.inner.name, "reset");
    }
}

impl<T: Clone> Inner<T> {
    /// Apply a settled result if `token` is still current. Returns the value
    /// when a success was committed.
    fn commit(&self, token: u64, result: Result<T, ApiError>) -> Option<T> {
        let mut committed = None;
        let applied = self.state.send_if_modified(|state| {
            let current = self.token.load(Ordering::SeqCst);
            if current != token {
                return false;
            }
            *state = match result {
                Ok(value) => {
                    committed = Some(value.clone());
                    ResourceState::Success(value)
                }
                Err(ref err) => {
                    warn!(resource = self.name, token, error = %err, "operation failed");
                    ResourceState::Error(self.failure_message.clone())
                }
            };
            true
        });

        if applied {
            debug!(resource = self.name, token, "committed");
        } else {
            debug!(
                resource = self.name,
                token,
                current = self.token.load(Ordering::SeqCst),
                "discarding stale result"
            );
        }
        committed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
