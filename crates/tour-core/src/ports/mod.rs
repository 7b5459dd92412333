//! Ports - 抽象化レイヤー
//!
//! lesson が外界（今は出力先だけ）に触れるところを trait にしています。

pub mod output;

pub use self::output::Output;
