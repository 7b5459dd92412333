//! Chan - 容量付きのチャネル
//!
//! `channel(0)` は rendezvous（unbuffered）、`channel(n)` は n 件までの FIFO バッファ。
//!
//! # 学習ポイント
//! - tokio の `mpsc` は容量 0 を持てないので、rendezvous は「送信 + 受領通知 (oneshot)」で作る
//! - 送信側は受信側が値を取り出すまで `send().await` から戻らない
//! - すべての `Sender` が drop されると `recv()` は `None`（= close）
//!
//! # 使用例
//! ```ignore
//! let (tx, mut rx) = chan::channel::<String>(0);
//! tokio::spawn(async move { tx.send("sheep".to_string()).await });
//! assert_eq!(rx.recv().await.as_deref(), Some("sheep"));
//! ```

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChanError {
    #[error("send on closed channel")]
    Closed,

    #[error("channel operation timed out after {0:?}")]
    Timeout(Duration),
}

/// One value in flight. `ack` is only set on rendezvous channels.
struct Parcel<T> {
    value: T,
    ack: Option<oneshot::Sender<()>>,
}

/// Sending half. Cloning adds another sender; the channel closes when the last one drops.
pub struct Sender<T> {
    inner: mpsc::Sender<Parcel<T>>,
    capacity: usize,
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            capacity: self.capacity,
        }
    }
}

pub struct Receiver<T> {
    inner: mpsc::Receiver<Parcel<T>>,
    rendezvous: bool,
}

/// Create a channel holding up to `capacity` unreceived values.
///
/// `capacity == 0` makes every send wait for a receiver to take the value.
pub fn channel<T: Send>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        Sender {
            inner: tx,
            capacity,
        },
        Receiver {
            inner: rx,
            rendezvous: capacity == 0,
        },
    )
}

impl<T: Send> Sender<T> {
    pub fn is_rendezvous(&self) -> bool {
        self.capacity == 0
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Send one value.
    ///
    /// - buffered: returns once the value is in the buffer (waits while the buffer is full)
    /// - rendezvous: returns once a receiver has taken the value
    pub async fn send(&self, value: T) -> Result<(), ChanError> {
        if !self.is_rendezvous() {
            return self
                .inner
                .send(Parcel { value, ack: None })
                .await
                .map_err(|_| ChanError::Closed);
        }

        let (ack_tx, ack_rx) = oneshot::channel();
        self.inner
            .send(Parcel {
                value,
                ack: Some(ack_tx),
            })
            .await
            .map_err(|_| ChanError::Closed)?;

        // receiver dropped the parcel without taking it
        ack_rx.await.map_err(|_| ChanError::Closed)
    }

    /// `send` bounded by `timeout`.
    ///
    /// On a rendezvous channel a timed-out value may already sit in the hand-off
    /// slot; a later `recv` still gets it.
    pub async fn send_timeout(&self, value: T, timeout: Duration) -> Result<(), ChanError> {
        tokio::time::timeout(timeout, self.send(value))
            .await
            .map_err(|_| ChanError::Timeout(timeout))?
    }
}

impl<T: Send> Receiver<T> {
    /// Receive the next value, or `None` once every sender is gone and nothing is left.
    ///
    /// Cancel safe: the only await point is the underlying `mpsc::Receiver::recv`.
    pub async fn recv(&mut self) -> Option<T> {
        let parcel = self.inner.recv().await?;
        if let Some(ack) = parcel.ack {
            // the sender may have given up (send_timeout); the value is still ours
            let _ = ack.send(());
        }
        Some(parcel.value)
    }

    pub async fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<T>, ChanError> {
        tokio::time::timeout(timeout, self.recv())
            .await
            .map_err(|_| ChanError::Timeout(timeout))
    }

    /// Stop accepting new values.
    ///
    /// - buffered: values already in the buffer can still be received
    /// - rendezvous: a value waiting in the hand-off slot was never taken, so it is
    ///   dropped and its sender fails with `Closed`
    pub fn close(&mut self) {
        self.inner.close();
        if self.rendezvous {
            while let Ok(parcel) = self.inner.try_recv() {
                drop(parcel.ack);
            }
        }
    }
}
