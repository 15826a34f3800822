//! Periodic expired-token eviction on a dedicated thread
//!
//! Eviction only. A panicking pass is caught and logged, and the next tick
//! runs as usual.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error};

use super::manager::TokenLifecycleManager;
use crate::error::{CredError, Result};

/// Stops the sweeper thread on [`TokenSweeper::stop`] or drop
pub struct TokenSweeper {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TokenSweeper {
    /// Run `manager.cleanup_expired()` every `interval`
    pub fn spawn(manager: Arc<TokenLifecycleManager>, interval: Duration) -> Result<Self> {
        Self::spawn_with(interval, move || manager.cleanup_expired())
    }

    /// Same loop around an arbitrary sweep function
    pub fn spawn_with<F>(interval: Duration, sweep: F) -> Result<Self>
    where
        F: Fn() -> usize + Send + 'static,
    {
        if interval.is_zero() {
            return Err(CredError::InvalidArgument("sweep interval must be non-zero"));
        }
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("token-sweeper".into())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        match panic::catch_unwind(AssertUnwindSafe(&sweep)) {
                            Ok(evicted) => debug!(evicted, "token sweep complete"),
                            Err(_) => error!("token sweep panicked, continuing"),
                        }
                    }
                    // stop requested or handle dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TokenSweeper {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_sweeper_survives_panicking_pass() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let sweeper = TokenSweeper::spawn_with(Duration::from_millis(10), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                panic!("first pass blows up");
            }
            0
        })
        .unwrap();

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while calls.load(Ordering::SeqCst) < 3 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        sweeper.stop();

        assert!(calls.load(Ordering::SeqCst) >= 3);
    }

    #[test]
    fn test_drop_joins_thread() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let sweeper = TokenSweeper::spawn_with(Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            0
        })
        .unwrap();

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while calls.load(Ordering::SeqCst) == 0 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        drop(sweeper);

        // the thread is joined, so its clone of the counter is gone too
        assert_eq!(Arc::strong_count(&calls), 1);
        let after_drop = calls.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(calls.load(Ordering::SeqCst), after_drop);
        assert!(after_drop >= 1);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(TokenSweeper::spawn_with(Duration::ZERO, || 0).is_err());
    }
}
