use std::future::Future;

use futures_util::stream::{FuturesUnordered, StreamExt};

/// Poll all `futures` concurrently and return the first `Ok`.
///
/// The remaining futures are dropped as soon as a winner is found, which
/// cancels them at whatever await point they had reached. If every future
/// fails, the errors are returned in completion order. An empty input fails
/// with no errors.
pub async fn first_success<I, F, T, E>(futures: I) -> Result<T, Vec<E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let mut pending: FuturesUnordered<F> = futures.into_iter().collect();
    let mut errors = Vec::with_capacity(pending.len());

    while let Some(result) = pending.next().await {
        match result {
            Ok(value) => return Ok(value),
            Err(e) => errors.push(e),
        }
    }

    Err(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use futures_util::FutureExt;
    use futures_util::future::BoxFuture;
    use tokio::time::sleep;

    fn after(ms: u64, result: Result<&'static str, &'static str>) -> BoxFuture<'static, Result<&'static str, &'static str>> {
        async move {
            sleep(Duration::from_millis(ms)).await;
            result
        }
        .boxed()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fastest_success_wins() {
        let result = first_success([after(30, Ok("slow")), after(10, Ok("fast")), after(5, Err("broken"))]).await;
        assert_eq!(result, Ok("fast"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_in_completion_order() {
        let result = first_success([after(30, Err("c")), after(10, Err("a")), after(20, Err("b"))]).await;
        assert_eq!(result, Err(vec!["a", "b", "c"]));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let result = first_success(Vec::<BoxFuture<'static, Result<(), ()>>>::new()).await;
        assert_eq!(result, Err(vec![]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_losers_stop_at_their_await_point() {
        let progressed = Arc::new(AtomicUsize::new(0));
        let loser = {
            let progressed = Arc::clone(&progressed);
            async move {
                sleep(Duration::from_millis(50)).await;
                progressed.fetch_add(1, Ordering::SeqCst);
                Err::<&str, &str>("late")
            }
            .boxed()
        };

        let result = first_success([loser, after(10, Ok("winner"))]).await;
        assert_eq!(result, Ok("winner"));

        sleep(Duration::from_millis(200)).await;
        assert_eq!(progressed.load(Ordering::SeqCst), 0);
    }
}
