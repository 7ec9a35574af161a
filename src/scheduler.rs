use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Repeating-tick driver for the animation loop.
///
/// Spawns a worker thread that runs `tick` immediately and then once per
/// `interval`. The inter-tick wait listens on a channel, so [`cancel`]
/// (and `Drop`) wakes the worker at once: a pending tick observes the stop
/// signal and no-ops instead of firing after teardown.
///
/// [`cancel`]: AnimationScheduler::cancel
pub struct AnimationScheduler {
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl AnimationScheduler {
    /// Start the loop. `tick` returns `false` to stop from inside.
    pub fn spawn(interval: Duration, mut tick: impl FnMut() -> bool + Send + 'static) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if !tick() {
                    break;
                }
                match stop_rx.recv_timeout(interval) {
                    Err(mpsc::RecvTimeoutError::Timeout) => continue,
                    // Stop signal, or the scheduler handle was dropped.
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Stop the loop and join the worker. Idempotent; returns once no
    /// further ticks can fire.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "../tests/unit/scheduler.rs"]
mod tests;
