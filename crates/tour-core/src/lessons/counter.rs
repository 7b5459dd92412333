//! Counter - 終わらない task を順番に呼ぶか、並行に動かすか

use std::sync::Arc;
use std::time::Duration;

use crate::ports::Output;
use crate::producer::ProducerGroup;

/// Print `thing` every `interval`, forever.
pub async fn count_forever(thing: &str, interval: Duration, out: &dyn Output) {
    loop {
        out.line(thing);
        tokio::time::sleep(interval).await;
    }
}

/// The first counter never returns, so "fish" is never printed.
pub async fn count_sequential(interval: Duration, out: &dyn Output) {
    count_forever("sheep", interval, out).await;
    count_forever("fish", interval, out).await;
}

/// Both counters run as their own tasks. Returns only if both tasks end.
pub async fn count_concurrent(interval: Duration, out: Arc<dyn Output>) {
    let mut group = ProducerGroup::new();
    for thing in ["sheep", "fish"] {
        let out = Arc::clone(&out);
        group.spawn(move |_shutdown| async move {
            count_forever(thing, interval, out.as_ref()).await;
        });
    }
    // dropping this future (e.g. on a run_for timeout) aborts both tasks
    group.join().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::MemoryOutput;

    #[tokio::test(start_paused = true)]
    async fn sequential_counter_never_reaches_second() {
        let out = MemoryOutput::new();
        let res = tokio::time::timeout(
            Duration::from_millis(1600),
            count_sequential(Duration::from_millis(500), &out),
        )
        .await;

        assert!(res.is_err());
        assert_eq!(out.count("sheep"), 4);
        assert_eq!(out.count("fish"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_counters_interleave() {
        let out = Arc::new(MemoryOutput::new());
        let res = tokio::time::timeout(
            Duration::from_millis(1600),
            count_concurrent(Duration::from_millis(500), out.clone()),
        )
        .await;

        assert!(res.is_err());
        assert_eq!(out.count("sheep"), 4);
        assert_eq!(out.count("fish"), 4);
    }
}
