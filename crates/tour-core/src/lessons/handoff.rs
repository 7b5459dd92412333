//! Handoff - rendezvous channel での受け渡し
//!
//! producer は決まった回数だけ送信し、毎回受信側が受け取るまで待ちます。
//!
//! # 受信側のモード
//! - `Once`: 1 件だけ受け取って戻る。残りの送信は完了しない
//! - `Forever`: 受信側も sender を持ったまま受け続ける。最後の 1 件の後は誰も送らないので deadlock
//! - `UntilClosed`: producer が送り終えたら sender を drop (= close)。受信側は close まで読む

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::stalled;
use crate::chan::{self, ChanError, Receiver, Sender};
use crate::config::TourConfig;
use crate::error::TourError;
use crate::ports::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveMode {
    Once,
    Forever,
    UntilClosed,
}

/// Handle to a spawned counting producer.
///
/// Aborts the producer when dropped.
pub struct Producer {
    handle: JoinHandle<Result<usize, ChanError>>,
    sent: watch::Receiver<usize>,
}

impl Producer {
    /// Number of sends that have completed so far.
    pub fn sent(&self) -> usize {
        *self.sent.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the producer to finish and return how many sends completed.
    pub async fn join(mut self) -> Result<usize, TourError> {
        let res = (&mut self.handle)
            .await
            .map_err(|e| TourError::Other(format!("producer task failed: {e}")))?;
        Ok(res?)
    }
}

impl Drop for Producer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a producer that sends `message` `count` times, sleeping `interval` after each send.
///
/// `tx` is dropped when the producer finishes, which closes the channel if it was the last sender.
pub fn spawn_counter(
    message: impl Into<String>,
    count: usize,
    interval: Duration,
    tx: Sender<String>,
) -> Producer {
    let message = message.into();
    let (sent_tx, sent_rx) = watch::channel(0usize);

    let handle = tokio::spawn(async move {
        for n in 1..=count {
            tx.send(message.clone()).await?;
            sent_tx.send_replace(n);
            tracing::trace!(sent = n, "handoff send completed");
            tokio::time::sleep(interval).await;
        }
        Ok(count)
    });

    Producer {
        handle,
        sent: sent_rx,
    }
}

async fn recv_within(rx: &mut Receiver<String>, stall: Duration) -> Result<Option<String>, TourError> {
    rx.recv_timeout(stall).await.map_err(stalled("receive"))
}

/// Run the handoff with `cfg.handoff_messages` messages and return what the consumer read.
pub async fn handoff(
    mode: ReceiveMode,
    cfg: &TourConfig,
    out: &dyn Output,
) -> Result<Vec<String>, TourError> {
    cfg.validate()?;
    let stall = cfg.stall_timeout();
    let (tx, mut rx) = chan::channel::<String>(0);

    // the consumer keeps the channel open in Forever mode, so nobody ever closes it
    let keepalive = (mode == ReceiveMode::Forever).then(|| tx.clone());
    let _producer = spawn_counter("sheep", cfg.handoff_messages, cfg.handoff_interval(), tx);

    let mut received = Vec::new();
    match mode {
        ReceiveMode::Once => {
            if let Some(msg) = recv_within(&mut rx, stall).await? {
                out.line(&msg);
                received.push(msg);
            }
        }
        ReceiveMode::Forever | ReceiveMode::UntilClosed => {
            while let Some(msg) = recv_within(&mut rx, stall).await? {
                out.line(&msg);
                received.push(msg);
            }
        }
    }

    drop(keepalive);
    tracing::debug!(?mode, received = received.len(), "handoff finished");
    Ok(received)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::MemoryOutput;

    fn cfg() -> TourConfig {
        TourConfig::default()
    }

    #[tokio::test(start_paused = true)]
    async fn single_read_leaves_remaining_sends_blocked() {
        let (tx, mut rx) = chan::channel::<String>(0);
        let producer = spawn_counter("sheep", 6, Duration::from_millis(500), tx);

        assert_eq!(rx.recv().await.as_deref(), Some("sheep"));

        // far longer than 5 more intervals
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(producer.sent(), 1);
        assert!(!producer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn once_mode_observes_exactly_one_message() {
        let out = MemoryOutput::new();
        let got = handoff(ReceiveMode::Once, &cfg(), &out).await.unwrap();
        assert_eq!(got, vec!["sheep"]);
        assert_eq!(out.lines(), vec!["sheep"]);
    }

    #[tokio::test(start_paused = true)]
    async fn until_closed_observes_all_messages() {
        let out = MemoryOutput::new();
        let got = handoff(ReceiveMode::UntilClosed, &cfg(), &out).await.unwrap();
        assert_eq!(got.len(), 6);
        assert_eq!(out.count("sheep"), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn forever_mode_deadlocks_after_last_message() {
        let out = MemoryOutput::new();
        let err = handoff(ReceiveMode::Forever, &cfg(), &out).await.unwrap_err();

        assert!(matches!(err, TourError::Deadlock { op: "receive", .. }));
        assert_eq!(out.count("sheep"), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn until_closed_with_slow_producer_is_invalid_config_not_deadlock() {
        let cfg = TourConfig {
            handoff_interval_ms: 4000,
            ..TourConfig::default()
        };
        let out = MemoryOutput::new();
        let err = handoff(ReceiveMode::UntilClosed, &cfg, &out).await.unwrap_err();

        assert!(matches!(err, TourError::InvalidConfig(_)));
        assert!(out.lines().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn until_closed_with_interval_just_below_stall_reads_all() {
        let cfg = TourConfig {
            handoff_interval_ms: 2_900,
            ..TourConfig::default()
        };
        let out = MemoryOutput::new();
        let got = handoff(ReceiveMode::UntilClosed, &cfg, &out).await.unwrap();
        assert_eq!(got.len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn producer_join_reports_completed_sends() {
        let (tx, mut rx) = chan::channel::<String>(0);
        let producer = spawn_counter("fish", 3, Duration::from_millis(10), tx);

        let mut n = 0;
        while rx.recv().await.is_some() {
            n += 1;
        }
        assert_eq!(n, 3);
        assert_eq!(producer.join().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn producer_fails_when_receiver_gone() {
        let (tx, rx) = chan::channel::<String>(0);
        drop(rx);
        let producer = spawn_counter("fish", 3, Duration::from_millis(10), tx);
        let err = producer.join().await.unwrap_err();
        assert!(matches!(err, TourError::Channel(ChanError::Closed)));
    }
}
