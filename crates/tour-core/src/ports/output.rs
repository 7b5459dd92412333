//! Output port - lesson の出力先の抽象化
//!
//! Lesson は stdout へ直接 `println!` せず、`Output` に 1 行ずつ書きます。
//! テストでは `MemoryOutput` に差し替えて、出力された行をそのまま検証できます。
//!
//! # 実装
//! - **StdoutOutput**: 本番用（CLI）
//! - **MemoryOutput**: テスト用

use std::fmt::Display;

/// Output は lesson が出力する行を受け取る
///
/// # Thread Safety
/// - 並行に動く producer task からも書けるように `Send + Sync` を要求
pub trait Output: Send + Sync {
    /// 1 行を書き出す（改行は実装側で付ける）
    fn line(&self, line: &str);

    /// `Display` な値を 1 行として書き出す
    fn show(&self, value: &dyn Display) {
        self.line(&value.to_string());
    }
}
