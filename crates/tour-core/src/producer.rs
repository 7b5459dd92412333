use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::chan::Sender;

/// Producer group handle.
/// - `request_shutdown()` で全 producer に停止を通知する
/// - `shutdown_and_join()` で全 producer の終了を待てる
/// - 途中で drop された場合（lesson が打ち切られた場合など）は残りを abort する
pub struct ProducerGroup {
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    joins: Vec<JoinHandle<()>>,
}

impl ProducerGroup {
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            shutdown_tx,
            shutdown_rx,
            joins: Vec::new(),
        }
    }

    /// Spawn a task that receives the shutdown signal.
    pub fn spawn<F, Fut>(&mut self, f: F)
    where
        F: FnOnce(watch::Receiver<bool>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let rx = self.shutdown_rx.clone();
        self.joins.push(tokio::spawn(f(rx)));
    }

    /// Spawn a producer that sends `message` on `tx`, then sleeps `interval`, forever.
    pub fn spawn_ticker(&mut self, message: String, interval: Duration, tx: Sender<String>) {
        let producer_id = self.joins.len();
        self.spawn(move |mut rx| async move {
            ticker_loop(producer_id, message, interval, tx, &mut rx).await;
        });
    }

    pub fn len(&self) -> usize {
        self.joins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }

    /// Request shutdown for all producers.
    pub fn request_shutdown(&self) {
        // ignore send error: receivers may already be dropped
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait until every producer returns on its own (no shutdown request).
    pub async fn join(mut self) {
        for j in std::mem::take(&mut self.joins) {
            let _ = j.await;
        }
    }

    /// Shutdown and wait for all producers.
    pub async fn shutdown_and_join(mut self) {
        self.request_shutdown();
        for j in std::mem::take(&mut self.joins) {
            let _ = j.await;
        }
    }
}

impl Default for ProducerGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProducerGroup {
    fn drop(&mut self) {
        for j in &self.joins {
            j.abort();
        }
    }
}

async fn ticker_loop(
    producer_id: usize,
    message: String,
    interval: Duration,
    tx: Sender<String>,
    shutdown_rx: &mut watch::Receiver<bool>,
) {
    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        // send は受信側が来るまで待つので shutdown と競合させる
        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
            sent = tx.send(message.clone()) => {
                if let Err(e) = sent {
                    tracing::debug!(producer_id, error = %e, "producer stopped");
                    break;
                }
            }
        }

        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }
    tracing::trace!(producer_id, "producer exited");
}
