//! Errors - 文字列だけの汎用エラーと独自エラー型
//!
//! # 学習ポイント
//! - 「値 + エラー」の 2 値返却は `Result<f64, E>` で表す
//! - 汎用エラーは `TourError::Other(String)`、独自エラーは専用の型を定義する
//! - 呼び出し側は `?` か `match` でエラーを確認してから値を使う

use thiserror::Error;

use crate::error::TourError;
use crate::ports::Output;

pub const NEGATIVE_NOT_ALLOWED: &str = "negative number is not allowed";
pub const INPUT_IS_NEGATIVE: &str = "input number is negative";

/// Custom error kind carrying a single message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NegativeInputError {
    message: String,
}

impl NegativeInputError {
    pub fn new() -> Self {
        Self {
            message: INPUT_IS_NEGATIVE.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for NegativeInputError {
    fn default() -> Self {
        Self::new()
    }
}

pub fn sqrt(num: f64) -> Result<f64, TourError> {
    if num < 0.0 {
        return Err(TourError::Other(NEGATIVE_NOT_ALLOWED.to_string()));
    }
    Ok(num.sqrt())
}

/// Same contract as [`sqrt`], written with named bindings filled in each branch.
pub fn sqrt_named(num: f64) -> Result<f64, TourError> {
    let result: f64;
    let err: Option<TourError>;
    if num < 0.0 {
        result = 0.0;
        err = Some(TourError::Other(NEGATIVE_NOT_ALLOWED.to_string()));
    } else {
        result = num.sqrt();
        err = None;
    }
    match err {
        Some(e) => Err(e),
        None => Ok(result),
    }
}

pub fn sqrt_with_error(f: f64) -> Result<f64, NegativeInputError> {
    if f < 0.0 {
        return Err(NegativeInputError::new());
    }
    Ok(f.sqrt())
}

/// `sqrt` lesson: one good input and one bad input for both forms.
pub fn sqrt_lesson(out: &dyn Output) {
    for num in [16.0, -1.0] {
        match sqrt(num) {
            Ok(v) => out.show(&v),
            Err(e) => out.show(&e),
        }
        match sqrt_named(num) {
            Ok(v) => out.show(&v),
            Err(e) => out.show(&e),
        }
    }
}

pub fn error_lesson(out: &dyn Output) {
    let i = 4.0;
    match sqrt_with_error(i) {
        Ok(value) => out.show(&value),
        Err(err) => out.show(&err),
    }
}
