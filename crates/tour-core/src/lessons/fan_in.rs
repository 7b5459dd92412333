//! FanIn - 2 つの producer を 1 つの consumer で読む
//!
//! # 学習ポイント
//! - 固定順（c1 → c2）で読むと、遅い方を待つ間は速い方も止まる
//! - `tokio::select!` なら準備できた方から読むので、速い方は止まらない
//! - `select!` の分岐は cancel safe な future だけにする（`chan::Receiver::recv` は cancel safe）

use std::time::Duration;

use crate::chan::{self, ChanError, Receiver};
use crate::config::TourConfig;
use crate::error::TourError;
use crate::ports::Output;
use crate::producer::ProducerGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanInStrategy {
    /// Read c1 then c2, in that order, every round.
    RoundRobin,
    /// Read whichever channel is ready first.
    Select,
}

/// Label a producer by its interval: `Every 500ms`, `Every 2 seconds`.
pub fn interval_label(interval: Duration) -> String {
    let ms = interval.as_millis();
    match ms {
        1000 => "Every 1 second".to_string(),
        ms if ms > 0 && ms % 1000 == 0 => format!("Every {} seconds", ms / 1000),
        ms => format!("Every {ms}ms"),
    }
}

fn emit(out: &dyn Output, received: &mut Vec<String>, msg: Option<String>) -> Result<(), TourError> {
    let msg = msg.ok_or(TourError::Channel(ChanError::Closed))?;
    out.line(&msg);
    received.push(msg);
    Ok(())
}

fn done(received: &[String], limit: Option<usize>) -> bool {
    limit.is_some_and(|n| received.len() >= n)
}

/// Start the fast and slow producers and read `limit` messages (forever if `None`).
pub async fn fan_in(
    strategy: FanInStrategy,
    cfg: &TourConfig,
    out: &dyn Output,
    limit: Option<usize>,
) -> Result<Vec<String>, TourError> {
    let (tx1, mut c1) = chan::channel::<String>(0);
    let (tx2, mut c2) = chan::channel::<String>(0);

    let mut group = ProducerGroup::new();
    group.spawn_ticker(interval_label(cfg.fast_interval()), cfg.fast_interval(), tx1);
    group.spawn_ticker(interval_label(cfg.slow_interval()), cfg.slow_interval(), tx2);

    let result = match strategy {
        FanInStrategy::RoundRobin => round_robin(&mut c1, &mut c2, out, limit).await,
        FanInStrategy::Select => select_ready(&mut c1, &mut c2, out, limit).await,
    };

    group.shutdown_and_join().await;
    tracing::debug!(?strategy, "fan-in finished");
    result
}

async fn round_robin(
    c1: &mut Receiver<String>,
    c2: &mut Receiver<String>,
    out: &dyn Output,
    limit: Option<usize>,
) -> Result<Vec<String>, TourError> {
    let mut received = Vec::new();
    while !done(&received, limit) {
        emit(out, &mut received, c1.recv().await)?;
        if done(&received, limit) {
            break;
        }
        emit(out, &mut received, c2.recv().await)?;
    }
    Ok(received)
}

async fn select_ready(
    c1: &mut Receiver<String>,
    c2: &mut Receiver<String>,
    out: &dyn Output,
    limit: Option<usize>,
) -> Result<Vec<String>, TourError> {
    let mut received = Vec::new();
    while !done(&received, limit) {
        let msg = tokio::select! {
            m = c1.recv() => m,
            m = c2.recv() => m,
        };
        emit(out, &mut received, msg)?;
    }
    Ok(received)
}
