//! StdoutOutput - 標準出力への Output 実装

use std::io::Write;

use crate::ports::Output;

/// StdoutOutput は 1 行ごとに stdout へ書き出す
///
/// 並行 task からの行が混ざらないよう、1 行単位で stdout をロックします。
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutOutput;

impl StdoutOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for StdoutOutput {
    fn line(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{line}") {
            tracing::warn!(error = %e, "stdout write failed");
        }
    }
}
