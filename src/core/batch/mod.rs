//! Bounded-parallel batch processing over a chat capability
//!
//! Partitions a task sequence into `batch_size` chunks, runs up to
//! `max_concurrency` tasks per chunk concurrently, retries retryable
//! failures with linear backoff, and reports progress as tasks complete.

mod async_batch;

pub use async_batch::{
    AsyncBatchConfig, AsyncBatchExecutor, AsyncBatchItemResult, AsyncBatchProgress,
    AsyncBatchSummary, batch_execute,
};
