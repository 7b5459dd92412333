//! Lessons - パターンごとの小さなデモ
//!
//! 各モジュールは互いに依存しません。値を返す関数はそのままテストでき、
//! 出力は `Output` port 経由で書き出します。
//!
//! - basics / pointers / animals / errors: 同期の lesson
//! - counter / handoff / buffered / fan_in: task と channel を使う lesson

pub mod animals;
pub mod basics;
pub mod buffered;
pub mod counter;
pub mod errors;
pub mod fan_in;
pub mod handoff;
pub mod pointers;

use crate::chan::ChanError;
use crate::error::TourError;

/// Map a channel timeout on `op` to a deadlock; other channel errors pass through.
pub(crate) fn stalled(op: &'static str) -> impl FnOnce(ChanError) -> TourError {
    move |e| match e {
        ChanError::Timeout(waited) => TourError::Deadlock { op, waited },
        other => TourError::Channel(other),
    }
}
