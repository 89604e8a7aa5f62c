use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

pub(crate) async fn run_with_timeout<T, E, F, M>(
    timeout: Duration,
    timeout_operation: &'static str,
    future: F,
    map_error: M,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, E>>,
    M: FnOnce(E) -> AppError,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(map_error(error)),
        Err(_) => Err(AppError::timeout(timeout_operation, timeout.as_secs())),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::run_with_timeout;
    use crate::error::AppError;

    #[tokio::test]
    async fn run_with_timeout_returns_inner_success_value() {
        let result = run_with_timeout(
            Duration::from_secs(1),
            "fetch",
            async { Ok::<_, &'static str>(42) },
            |_| AppError::message("mapped"),
        )
        .await
        .expect("success result should pass through");

        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn run_with_timeout_maps_operation_error() {
        let result = run_with_timeout(
            Duration::from_secs(1),
            "fetch",
            async { Err::<(), _>("boom") },
            AppError::from,
        )
        .await;

        assert_eq!(result, Err(AppError::message("boom")));
    }

    #[tokio::test(start_paused = true)]
    async fn run_with_timeout_returns_timeout_error() {
        let result = run_with_timeout(
            Duration::from_secs(2),
            "dispatch",
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, AppError>(())
            },
            |error| error,
        )
        .await;

        assert_eq!(
            result,
            Err(AppError::Timeout {
                operation: "dispatch",
                seconds: 2,
            })
        );
    }
}
