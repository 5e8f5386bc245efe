//! Shared-receiver hand-off so several worker tasks can drain one bounded
//! queue. A recv in progress holds the lock, serializing hand-off of each
//! item to exactly one worker.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

pub type SharedReceiver<T> = Arc<Mutex<mpsc::Receiver<T>>>;

pub fn shared<T>(receiver: mpsc::Receiver<T>) -> SharedReceiver<T> {
    Arc::new(Mutex::new(receiver))
}

/// Receives the next item, or `None` once the queue is closed and drained.
/// Cancel-safe: a receive abandoned mid-wait loses no items.
pub async fn recv<T>(receiver: &SharedReceiver<T>) -> Option<T> {
    receiver.lock().await.recv().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_items_distribute_across_consumers_exactly_once() {
        let (tx, rx) = mpsc::channel(8);
        let rx = shared(rx);

        let mut consumers = Vec::new();
        for _ in 0..4 {
            let rx = rx.clone();
            consumers.push(tokio::spawn(async move {
                let mut seen = Vec::new();
                while let Some(item) = recv(&rx).await {
                    seen.push(item);
                }
                seen
            }));
        }

        for i in 0..100u32 {
            tx.send(i).await.expect("queue open");
        }
        drop(tx);

        let mut all = Vec::new();
        for consumer in consumers {
            all.extend(consumer.await.expect("consumer task"));
        }
        all.sort_unstable();

        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }
}
