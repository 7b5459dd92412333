//! tour-core
//!
//! Small, self-contained lessons on language patterns, runnable by name.
//!
//! # モジュール構成
//! - **chan**: 容量付きチャネル（容量 0 = rendezvous）
//! - **lessons**: パターンごとの lesson（basics, pointers, animals, errors, counter, handoff, buffered, fan_in）
//! - **producer**: shutdown 付きの producer task 群
//! - **ports / impls**: 出力先の抽象化と実装（stdout, memory）
//! - **runtime**: Lesson trait, LessonRegistry, Runtime
//! - **catalog**: すべての lesson の登録
//! - **config / error**: 設定とエラー型

pub mod catalog;
pub mod chan;
pub mod config;
pub mod error;
pub mod impls;
pub mod lessons;
pub mod ports;
pub mod producer;
pub mod runtime;

pub use error::TourError;
