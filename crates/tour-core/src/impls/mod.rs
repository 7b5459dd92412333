//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **StdoutOutput**: CLI 用
//! - **MemoryOutput**: テスト用

pub mod memory;
pub mod stdout;

pub use self::memory::MemoryOutput;
pub use self::stdout::StdoutOutput;
