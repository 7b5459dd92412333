//! Buffered - 同じ task の中で send してから recv する
//!
//! - 容量 0: send は受信側を待つが、受信するのは自分自身なので永遠に進まない（deadlock）
//! - 容量 > 0: send はバッファに入った時点で戻るので、続く recv で受け取れる

use std::time::Duration;

use super::stalled;
use crate::chan::{self, ChanError};
use crate::error::TourError;
use crate::ports::Output;

/// Send "hello" and receive it back on a single task.
pub async fn send_then_receive(capacity: usize, stall: Duration) -> Result<String, TourError> {
    let (tx, mut rx) = chan::channel::<String>(capacity);

    tx.send_timeout("hello".to_string(), stall)
        .await
        .map_err(stalled("send"))?;

    rx.recv_timeout(stall)
        .await
        .map_err(stalled("receive"))?
        .ok_or(TourError::Channel(ChanError::Closed))
}

pub async fn buffered_lesson(
    capacity: usize,
    stall: Duration,
    out: &dyn Output,
) -> Result<(), TourError> {
    tracing::debug!(capacity, "send then receive on one task");
    let msg = send_then_receive(capacity, stall).await?;
    out.line(&msg);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::MemoryOutput;
    use rstest::rstest;

    const STALL: Duration = Duration::from_secs(3);

    #[tokio::test(start_paused = true)]
    async fn unbuffered_send_on_same_task_deadlocks() {
        let err = send_then_receive(0, STALL).await.unwrap_err();
        match err {
            TourError::Deadlock { op, waited } => {
                assert_eq!(op, "send");
                assert_eq!(waited, STALL);
            }
            other => panic!("expected deadlock, got {other:?}"),
        }
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[tokio::test(start_paused = true)]
    async fn buffered_send_completes_without_receiver(#[case] capacity: usize) {
        let out = MemoryOutput::new();
        buffered_lesson(capacity, STALL, &out).await.unwrap();
        assert_eq!(out.lines(), vec!["hello"]);
    }
}
