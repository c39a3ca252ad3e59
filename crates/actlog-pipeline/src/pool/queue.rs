use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Creates a bounded queue whose receiving half can be shared by many
/// consumers.
///
/// The queue closes once every [`mpsc::Sender`] clone has been dropped;
/// consumers then drain what is left and receive `None`.
pub fn bounded<T>(capacity: usize) -> (mpsc::Sender<T>, SharedReceiver<T>) {
    let (tx, rx) = mpsc::channel(capacity);
    (tx, SharedReceiver::new(rx))
}

/// Multi-consumer handle over an [`mpsc::Receiver`].
///
/// Consumers take turns: whoever holds the lock waits for the next item while
/// the others wait for the lock. Each item is delivered to exactly one
/// consumer.
pub struct SharedReceiver<T> {
    inner: Arc<Mutex<mpsc::Receiver<T>>>,
}

impl<T> SharedReceiver<T> {
    pub fn new(rx: mpsc::Receiver<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rx)),
        }
    }

    /// Receives the next item, or `None` once the queue is closed and empty.
    ///
    /// Cancel safe: dropping the future never loses an item.
    pub async fn recv(&self) -> Option<T> {
        self.inner.lock().await.recv().await
    }
}

impl<T> Clone for SharedReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
