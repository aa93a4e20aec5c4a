//! Order-preserving async map with a fixed number of in-flight transforms.
use futures::future::try_join_all;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

/// Applies `transform` to every item, running at most `limit` transforms
/// at a time, and returns the results in input order.
///
/// `limit` workers drain a shared queue of items; a worker claims the
/// next item only after its previous transform finished. The first error
/// to complete is returned and every other worker is dropped, so nothing
/// new starts after a failure.
pub async fn map_bounded<T, R, E, F, Fut>(
    items: impl IntoIterator<Item = T>,
    limit: NonZeroUsize,
    transform: F,
) -> Result<Vec<R>, E>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let items: Vec<T> = items.into_iter().collect();
    let len = items.len();
    if len == 0 {
        return Ok(Vec::new());
    }
    let queue = Mutex::new(items.into_iter().enumerate());
    let transform = &transform;
    let queue = &queue;
    let workers = (0..limit.get().min(len)).map(|_| async move {
        let mut done = Vec::new();
        loop {
            let next = queue.lock().unwrap_or_else(PoisonError::into_inner).next();
            let Some((index, item)) = next else {
                break;
            };
            done.push((index, transform(item).await?));
        }
        Ok::<_, E>(done)
    });
    let mut results: Vec<(usize, R)> = try_join_all(workers)
        .await?
        .into_iter()
        .flatten()
        .collect();
    results.sort_unstable_by_key(|(index, _)| *index);
    Ok(results.into_iter().map(|(_, result)| result).collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    fn limit(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_preserves_input_order() {
        // Later items finish first.
        let items = vec![40u64, 30, 20, 10, 0];
        for k in 1..=6 {
            let results = map_bounded(items.clone(), limit(k), |delay| async move {
                sleep(Duration::from_millis(delay)).await;
                Ok::<_, ()>(delay * 2)
            })
            .await
            .unwrap();
            assert_eq!(results, vec![80, 60, 40, 20, 0]);
        }
    }

    #[tokio::test]
    async fn test_empty_input_never_calls_transform() {
        let calls = AtomicUsize::new(0);
        let results: Vec<u32> = map_bounded(Vec::<u32>::new(), limit(3), |n| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, ()>(n) }
        })
        .await
        .unwrap();
        assert!(results.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_never_exceeds_limit() {
        let in_flight = AtomicUsize::new(0);
        let max_in_flight = AtomicUsize::new(0);
        let results = map_bounded(0..20u64, limit(3), |n| {
            let in_flight = &in_flight;
            let max_in_flight = &max_in_flight;
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_in_flight.fetch_max(now, Ordering::SeqCst);
                sleep(Duration::from_millis(2 + n % 4)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok::<_, ()>(n)
            }
        })
        .await
        .unwrap();
        assert_eq!(results, (0..20).collect::<Vec<_>>());
        assert_eq!(max_in_flight.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_limit_above_len_runs_everything_at_once() {
        let in_flight = AtomicUsize::new(0);
        let max_in_flight = AtomicUsize::new(0);
        map_bounded(0..4u64, limit(30), |n| {
            let in_flight = &in_flight;
            let max_in_flight = &max_in_flight;
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_in_flight.fetch_max(now, Ordering::SeqCst);
                sleep(Duration::from_millis(10)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok::<_, ()>(n)
            }
        })
        .await
        .unwrap();
        assert_eq!(max_in_flight.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_failure_stops_new_transforms() {
        let calls = AtomicUsize::new(0);
        let result = map_bounded(vec![1, 2, 3, 4], limit(1), |n| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                match n {
                    2 => Err(format!("item {n} failed")),
                    _ => Ok(n),
                }
            }
        })
        .await;
        assert_eq!(result, Err("item 2 failed".to_owned()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_first_completed_failure_wins() {
        let result = map_bounded(
            vec![(50u64, "slow"), (5, "fast")],
            limit(2),
            |(delay, name)| async move {
                sleep(Duration::from_millis(delay)).await;
                Err::<(), _>(name)
            },
        )
        .await;
        assert_eq!(result, Err("fast"));
    }
}
