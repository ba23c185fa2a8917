//! Bounded concurrent fan-out for per-repository requests.
//!
//! Each job is tagged with its index so results can be attached back to the
//! item they were issued for, regardless of completion order.

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use crate::error::Result;

/// Run `fetch` for every input, at most `max_concurrent` at a time.
///
/// Returns one `(index, result)` pair per input in arrival order. Failures are
/// returned alongside successes; one failing job never cancels the others.
pub async fn fetch_indexed<I, T, F, Fut>(
    inputs: Vec<I>,
    fetch: F,
    max_concurrent: usize,
) -> Vec<(usize, Result<T>)>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if inputs.is_empty() {
        return Vec::new();
    }

    let max_concurrent = max_concurrent.max(1);
    debug!(
        "Fetching {} items with max {} concurrent",
        inputs.len(),
        max_concurrent
    );

    let make_future = |index: usize, input: I| {
        let fut = fetch(input);
        async move { (index, fut.await) }
    };

    let mut results = Vec::with_capacity(inputs.len());
    let mut pending = inputs.into_iter().enumerate();
    let mut in_flight = FuturesUnordered::new();

    // Seed initial batch up to max_concurrent
    for (index, input) in pending.by_ref().take(max_concurrent) {
        in_flight.push(make_future(index, input));
    }

    // Keep the window full until every job has reported
    while let Some((index, result)) = in_flight.next().await {
        results.push((index, result));

        if let Some((next_index, next_input)) = pending.next() {
            in_flight.push(make_future(next_index, next_input));
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_fetch_indexed_empty() {
        let results: Vec<(usize, Result<String>)> =
            fetch_indexed(Vec::<u32>::new(), |_n| async { Ok(String::new()) }, 4).await;

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_results_tagged_with_input_index() {
        let mut results = fetch_indexed(
            vec![30u64, 10, 20],
            |delay| async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
                Ok(delay * 2)
            },
            3,
        )
        .await;

        results.sort_by_key(|(i, _)| *i);
        let values: Vec<u64> = results.into_iter().map(|(_, r)| r.unwrap()).collect();
        assert_eq!(values, vec![60, 20, 40]);
    }

    #[tokio::test]
    async fn test_respects_concurrency_limit() {
        let concurrent = Arc::new(AtomicUsize::new(0));
        let max_observed = Arc::new(AtomicUsize::new(0));

        let results = fetch_indexed(
            vec![1, 2, 3, 4, 5],
            |n: usize| {
                let concurrent = concurrent.clone();
                let max_observed = max_observed.clone();
                async move {
                    let current = concurrent.fetch_add(1, Ordering::SeqCst) + 1;
                    max_observed.fetch_max(current, Ordering::SeqCst);
                    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
                    concurrent.fetch_sub(1, Ordering::SeqCst);
                    Ok(n)
                }
            },
            2,
        )
        .await;

        assert_eq!(results.len(), 5);
        assert!(max_observed.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let results = fetch_indexed(
            vec![1, 2, 3],
            |n: u32| async move {
                if n == 2 {
                    Err(ApiError::Status(500).into())
                } else {
                    Ok(n)
                }
            },
            10,
        )
        .await;

        assert_eq!(results.len(), 3);
        let failed: Vec<usize> = results
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(i, _)| *i)
            .collect();
        assert_eq!(failed, vec![1]);
    }
}
