#[cfg(test)]
#[path = "wait_test.rs"]
mod tests;

use std::future::Future;
use std::time::Duration;

use tokio::time;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitOutcome {
    Ready,
    TimedOut,
    Cancelled,
}

/// Checks `condition` every `interval` until it holds, `timeout` passes, or
/// `cancel` fires. The first check runs immediately.
pub async fn wait_until<F, Fut>(
    mut condition: F,
    interval: Duration,
    timeout: Duration,
    cancel: &CancellationToken,
) -> WaitOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = time::sleep(timeout);
    tokio::pin!(deadline);

    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return WaitOutcome::Cancelled;
            }
            _ = &mut deadline => {
                return WaitOutcome::TimedOut;
            }
            _ = ticker.tick() => {
                if condition().await {
                    return WaitOutcome::Ready;
                }
            }
        }
    }
}
