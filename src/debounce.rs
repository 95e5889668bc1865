//! Trailing-edge debouncer for search inputs.
//!
//! Values sent through a [`Debouncer`] are held until no new value has
//! arrived for the configured window; then only the latest one is handed to
//! the handler. Closing the debouncer flushes a pending value.

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Sending half of a debounced stream.
#[derive(Clone)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debounce task. `handler` runs once per quiet period with the latest value.
    pub fn spawn<F, Fut>(window: Duration, mut handler: F) -> (Self, JoinHandle<()>)
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let handle = tokio::spawn(async move {
            while let Some(first) = rx.recv().await {
                let mut latest = first;
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => latest = value,
                            None => {
                                handler(latest).await;
                                return;
                            }
                        },
                        _ = tokio::time::sleep(window) => {
                            handler(latest).await;
                            break;
                        }
                    }
                }
            }
        });

        (Self { tx }, handle)
    }

    /// Queue a value. Returns false when the debounce task has stopped.
    pub fn send(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}
