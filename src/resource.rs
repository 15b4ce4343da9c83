//! Loading / success / error lifecycle shared by every view.
//!
//! A view owns one `AsyncResource` per thing it fetches. Triggering it marks
//! the resource as loading, clears the previous error, awaits exactly one
//! adapter call and then either stores the new data or the view's fixed
//! failure message. The adapter error itself only goes to the log.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::api::ApiError;

/// Snapshot of a resource. `data` survives a failed re-fetch, so data and
/// error can both be present; `phase` decides what gets rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

impl<T> ViewState<T> {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.data.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }
}

pub struct AsyncResource<T> {
    label: &'static str,
    failure_message: &'static str,
    state: Mutex<ViewState<T>>,
}

impl<T: Clone> AsyncResource<T> {
    pub fn new(label: &'static str, failure_message: &'static str) -> Self {
        Self {
            label,
            failure_message,
            state: Mutex::new(ViewState::default()),
        }
    }

    /// Start idle but already loading, for views that fetch as soon as they mount.
    pub fn loading(label: &'static str, failure_message: &'static str) -> Self {
        let resource = Self::new(label, failure_message);
        resource.lock().is_loading = true;
        resource
    }

    fn lock(&self) -> MutexGuard<'_, ViewState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one request through the lifecycle and return its data on success.
    ///
    /// Triggers are not serialized: two overlapping calls each apply their
    /// own outcome when they resolve, so the last one to finish wins. Once
    /// `cancel` fires the outcome is dropped without touching the state.
    pub async fn run<F>(&self, cancel: &CancellationToken, request: F) -> Option<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        {
            let mut state = self.lock();
            state.is_loading = true;
            state.error = None;
        }

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(resource = self.label, "response dropped after teardown");
                return None;
            }
            outcome = request => outcome,
        };

        let mut state = self.lock();
        state.is_loading = false;
        match outcome {
            Ok(data) => {
                state.data = Some(data.clone());
                Some(data)
            }
            Err(err) => {
                tracing::warn!(resource = self.label, error = %err, "{}", self.failure_message);
                state.error = Some(self.failure_message.to_string());
                None
            }
        }
    }

    /// Local precondition failure: show `message` without any network call.
    pub fn reject(&self, message: impl Into<String>) {
        let mut state = self.lock();
        state.is_loading = false;
        state.error = Some(message.into());
    }

    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    pub fn snapshot(&self) -> ViewState<T> {
        self.lock().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.lock().data.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const FAILED: &str = "Error al cargar";

    fn failure() -> ApiError {
        ApiError::Api {
            status: 500,
            message: "boom".into(),
        }
    }

    #[tokio::test]
    async fn test_success_stores_data() {
        let res = AsyncResource::new("test", FAILED);
        assert_eq!(res.phase(), Phase::Idle);

        let out = res
            .run(&CancellationToken::new(), async { Ok(vec![1, 2]) })
            .await;

        assert_eq!(out, Some(vec![1, 2]));
        assert_eq!(
            res.snapshot(),
            ViewState {
                data: Some(vec![1, 2]),
                is_loading: false,
                error: None,
            }
        );
        assert_eq!(res.phase(), Phase::Success);
    }

    #[tokio::test]
    async fn test_failure_keeps_stale_data_and_sets_fixed_message() {
        let res = AsyncResource::new("test", FAILED);
        let cancel = CancellationToken::new();
        res.run(&cancel, async { Ok("first".to_string()) }).await;

        let out = res.run(&cancel, async { Err(failure()) }).await;

        assert_eq!(out, None);
        assert_eq!(res.last_error().as_deref(), Some(FAILED));
        assert_eq!(res.data().as_deref(), Some("first"));
        assert_eq!(res.phase(), Phase::Error);
    }

    #[tokio::test]
    async fn test_new_trigger_clears_previous_error() {
        let res: AsyncResource<u32> = AsyncResource::new("test", FAILED);
        let cancel = CancellationToken::new();
        res.run(&cancel, async { Err(failure()) }).await;
        assert!(res.last_error().is_some());

        res.run(&cancel, async { Ok(7) }).await;
        assert_eq!(res.last_error(), None);
        assert_eq!(res.data(), Some(7));
    }

    #[tokio::test]
    async fn test_loading_while_in_flight() {
        let res: AsyncResource<u32> = AsyncResource::new("test", FAILED);
        let cancel = CancellationToken::new();
        let (tx, rx) = tokio::sync::oneshot::channel::<u32>();

        let probe = async {
            tokio::task::yield_now().await;
            let seen = res.snapshot();
            tx.send(3).unwrap();
            seen
        };
        let request = res.run(&cancel, async { Ok(rx.await.unwrap()) });
        let (seen, out) = tokio::join!(probe, request);

        assert!(seen.is_loading);
        assert_eq!(seen.phase(), Phase::Loading);
        assert_eq!(out, Some(3));
        assert!(!res.is_loading());
    }

    #[tokio::test]
    async fn test_overlapping_triggers_last_write_wins() {
        let res = AsyncResource::new("test", FAILED);
        let cancel = CancellationToken::new();

        let slow = res.run(&cancel, async {
            tokio::time::sleep(Duration::from_millis(40)).await;
            Ok("slow")
        });
        let fast = res.run(&cancel, async { Ok("fast") });
        tokio::join!(slow, fast);

        assert_eq!(res.data(), Some("slow"));
    }

    #[tokio::test]
    async fn test_cancelled_response_is_dropped() {
        let res = AsyncResource::new("test", FAILED);
        let cancel = CancellationToken::new();
        res.run(&cancel, async { Ok("before") }).await;

        let canceller = async {
            tokio::task::yield_now().await;
            cancel.cancel();
        };
        let request = res.run(&cancel, async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok("after")
        });
        let (_, out) = tokio::join!(canceller, request);

        assert_eq!(out, None);
        assert_eq!(res.data(), Some("before"));
    }

    #[tokio::test]
    async fn test_reject_skips_the_request() {
        let res: AsyncResource<String> = AsyncResource::loading("test", FAILED);
        assert!(res.is_loading());

        res.reject("Debes seleccionar dos documentos diferentes");

        assert!(!res.is_loading());
        assert_eq!(
            res.last_error().as_deref(),
            Some("Debes seleccionar dos documentos diferentes")
        );
        res.clear_error();
        assert_eq!(res.phase(), Phase::Idle);
    }
}
