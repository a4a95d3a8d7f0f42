//! Shared utilities for use cases.
//!
//! Cancellation checking and cancellable collaborator calls.

use crate::use_cases::answer_query::AnswerQueryError;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(AnswerQueryError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: Option<&CancellationToken>) -> Result<(), AnswerQueryError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(AnswerQueryError::Cancelled);
    }
    Ok(())
}

/// Race a collaborator call against cancellation.
///
/// On cancellation the in-flight future is dropped, which abandons the
/// underlying request.
pub(crate) async fn cancellable<T, F>(
    token: Option<&CancellationToken>,
    future: F,
) -> Result<T, AnswerQueryError>
where
    F: Future<Output = Result<T, AnswerQueryError>>,
{
    match token {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(AnswerQueryError::Cancelled),
                result = future => result,
            }
        }
        None => future.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_check_cancelled() {
        assert!(check_cancelled(None).is_ok());

        let token = CancellationToken::new();
        assert!(check_cancelled(Some(&token)).is_ok());
        token.cancel();
        assert!(matches!(
            check_cancelled(Some(&token)),
            Err(AnswerQueryError::Cancelled)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellable_abandons_pending_future() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let result: Result<(), _> = cancellable(Some(&token), async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(AnswerQueryError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancellable_passes_result_through() {
        let result = cancellable(None, async { Ok::<_, AnswerQueryError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
