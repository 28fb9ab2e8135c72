use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Run `op` over every item on worker tasks, at most `cap` at a time, and wait for all of them.
///
/// A failing item contributes nothing and never stops its siblings; a `cap` of 0 is
/// treated as 1. The order of the returned results follows completion order, not
/// input order.
pub async fn run_bounded<T, R, E, F, Fut>(
    stage: &'static str,
    items: Vec<T>,
    cap: usize,
    op: F,
) -> Vec<R>
where
    T: Display + Send + 'static,
    R: Send + 'static,
    E: Display + Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<R>, E>> + Send + 'static,
{
    let cap = cap.max(1);
    let total = items.len();
    let semaphore = Arc::new(Semaphore::new(cap));
    let buffer: Arc<Mutex<Vec<R>>> = Arc::new(Mutex::new(Vec::new()));
    let op = Arc::new(op);

    let mut tasks = JoinSet::new();
    for item in items {
        let semaphore = semaphore.clone();
        let buffer = buffer.clone();
        let op = op.clone();
        tasks.spawn(async move {
            // The semaphore is never closed, so acquire only fails if that changes.
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            let label = item.to_string();
            match op(item).await {
                Ok(results) => {
                    debug!(stage, item = %label, count = results.len(), "work item finished");
                    buffer.lock().await.extend(results);
                }
                Err(e) => {
                    warn!(stage, item = %label, error = %e, "work item failed, skipping");
                }
            }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!(stage, error = %e, "worker task aborted");
        }
    }

    let results = std::mem::take(&mut *buffer.lock().await);
    debug!(stage, items = total, cap, results = results.len(), "stage complete");
    results
}
