//! Route modules. Each exposes `router()` returning a `Router<AppState>`.

pub mod content;
pub mod export;
pub mod health;
pub mod media;
pub mod projects;

use crate::error::AppError;

/// Run file-system work on tokio's blocking pool so large exports and
/// uploads do not stall the async workers.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("blocking task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "current_thread")]
    async fn blocking_work_leaves_the_runtime_free() {
        // The work waits on a signal sent by an async task on the same
        // single-threaded runtime, so it only finishes off that thread.
        let (tx, rx) = std::sync::mpsc::channel::<u8>();
        let work = run_blocking(move || rx.recv().map_err(|e| AppError::Internal(e.to_string())));
        let signal = async move {
            tokio::task::yield_now().await;
            tx.send(7).unwrap();
        };
        let (result, ()) = tokio::join!(work, signal);
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn panicking_work_is_internal_error() {
        let err = run_blocking::<(), _>(|| panic!("boom")).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn work_errors_pass_through() {
        let err = run_blocking::<(), _>(|| Err(AppError::BadRequest("nope".to_string())))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "nope"));
    }
}
