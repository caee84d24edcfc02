use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Cancellable single-shot timer.
///
/// At most one timer is armed at a time: `schedule` disarms the previous one
/// before arming a new one, so only the most recently scheduled value can
/// ever come out of [`Debouncer::fired`]. A firing that raced with a
/// `schedule`/`cancel` (already sent, not yet received) is discarded by
/// generation.
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: UnboundedSender<(u64, T)>,
    rx: UnboundedReceiver<(u64, T)>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            generation: 0,
            pending: None,
            tx,
            rx,
        }
    }

    /// (Re)starts the timer; `value` is delivered after a full quiet `delay`.
    pub fn schedule(&mut self, value: T) {
        self.cancel();

        let generation = self.generation;
        let tx = self.tx.clone();
        // Deadline is fixed now, not when the task first gets polled
        let sleep = tokio::time::sleep(self.delay);
        self.pending = Some(tokio::spawn(async move {
            sleep.await;
            let _ = tx.send((generation, value));
        }));
    }

    /// Disarms the pending timer. Returns whether one was armed.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        match self.pending.take() {
            Some(handle) => {
                let was_armed = !handle.is_finished();
                handle.abort();
                was_armed
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves when the armed timer fires. Never resolves while disarmed.
    pub async fn fired(&mut self) -> T {
        loop {
            match self.rx.recv().await {
                Some((generation, value)) if generation == self.generation => {
                    self.pending = None;
                    return value;
                }
                Some(_) => continue,
                // Unreachable while `self.tx` is alive
                None => std::future::pending::<()>().await,
            }
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
