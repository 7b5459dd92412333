//! MemoryOutput - テスト用の Output 実装
//!
//! # 学習ポイント
//! - `&self` のまま書き込むための内部可変性（Mutex）
//! - ロックを await を跨いで保持しない（同期 Mutex で十分）

use std::sync::{Mutex, PoisonError};

use crate::ports::Output;

/// MemoryOutput は書き込まれた行をメモリに溜める
#[derive(Debug, Default)]
pub struct MemoryOutput {
    lines: Mutex<Vec<String>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでに書かれた行のスナップショット
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `line` と完全一致する行の数
    pub fn count(&self, line: &str) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|l| l.as_str() == line)
            .count()
    }
}

impl Output for MemoryOutput {
    fn line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}
