use std::future::Future;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// One-shot timer that runs `action` after a quiet period unless cancelled
/// first. Dropping the timer cancels it.
///
/// Cancellation only stops an action that has not started; once the quiet
/// period has elapsed the action runs to completion.
#[derive(Debug)]
pub struct DebounceTimer {
    token: CancellationToken,
}

impl DebounceTimer {
    pub fn schedule<F>(delay: Duration, action: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(delay) => action.await,
            }
        });
        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Monotonic sequence numbers for one view session. The first number handed
/// out is 1; 0 means "nothing yet".
#[derive(Debug, Default)]
pub struct SequenceCounter {
    last: AtomicU64,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.last.store(0, Ordering::SeqCst);
    }
}
