//! Bounded batched fan-out for per-record workflows.

use std::future::Future;

use tokio::task::JoinSet;

/// Runs `task` over `items` in batches of `batch_size`.
///
/// Each batch is spawned concurrently and joined to completion before the
/// next batch starts; batches are never pipelined. Results arrive in
/// completion order — there is no ordering guarantee across the workers of
/// one batch, matching the fact that their remote writes are unordered
/// relative to each other.
///
/// A worker that panics is logged and dropped from the results; sibling
/// workers and later batches are unaffected.
pub async fn run_in_batches<T, R, F, Fut>(items: Vec<T>, batch_size: usize, task: F) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
{
    let batch_size = batch_size.max(1);
    let mut results = Vec::with_capacity(items.len());
    let mut items = items.into_iter().peekable();

    while items.peek().is_some() {
        let mut batch = JoinSet::new();
        for item in items.by_ref().take(batch_size) {
            batch.spawn(task(item));
        }
        while let Some(joined) = batch.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(error) => tracing::warn!(%error, "worker task aborted"),
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_all_items_are_processed() {
        let results = run_in_batches((0..10).collect(), 3, |n: i32| async move { n * 2 }).await;
        let mut results = results;
        results.sort_unstable();
        assert_eq!(results, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
    }

    #[tokio::test]
    async fn test_batches_are_joined_before_the_next_starts() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let results = run_in_batches(
            (0..12).collect::<Vec<i32>>(),
            4,
            |_n| {
                let in_flight = Arc::clone(&in_flight);
                let peak = Arc::clone(&peak);
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::task::yield_now().await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                }
            },
        )
        .await;

        assert_eq!(results.len(), 12);
        assert!(peak.load(Ordering::SeqCst) <= 4);
    }

    #[tokio::test]
    async fn test_zero_batch_size_is_clamped() {
        let results = run_in_batches(vec![1, 2, 3], 0, |n: i32| async move { n }).await;
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_panicked_worker_is_skipped() {
        let results = run_in_batches(vec![1, 2, 3], 3, |n: i32| async move {
            assert!(n != 2, "boom");
            n
        })
        .await;
        let mut results = results;
        results.sort_unstable();
        assert_eq!(results, vec![1, 3]);
    }
}
