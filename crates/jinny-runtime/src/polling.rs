use std::time::Duration;

use anyhow::Result;

use crate::task_processor::TaskProcessor;

/// Runs a cycle, sleeps `interval`, and repeats until a cycle fails.
pub async fn run_polling_loop(processor: &TaskProcessor, interval: Duration) -> Result<()> {
    tracing::info!(interval_secs = interval.as_secs(), "polling for assigned issues");
    loop {
        processor.process_tasks().await?;
        tracing::debug!(interval_secs = interval.as_secs(), "cycle complete; sleeping");
        tokio::time::sleep(interval).await;
    }
}
