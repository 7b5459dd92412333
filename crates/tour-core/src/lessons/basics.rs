//! Basics - 変数・条件分岐・配列/Vec・Map・ループ・関数
//!
//! ここの関数は値を返すだけの純粋な部分と、`Output` に書き出す lesson 本体に分かれています。

use std::collections::{BTreeMap, HashMap};

use crate::ports::Output;

/// zero value, explicit type, inferred type
pub fn var_init(out: &dyn Output) {
    let i: i32 = Default::default();
    out.show(&i);

    let y: i32 = 5;
    out.show(&y);

    let a = 10;
    out.show(&a);
}

/// Result of comparing a number against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    Greater,
    Equal,
}

pub fn compare(x: i32, threshold: i32) -> Comparison {
    if x < threshold {
        Comparison::Less
    } else if x > threshold {
        Comparison::Greater
    } else {
        Comparison::Equal
    }
}

pub fn condition(out: &dyn Output) {
    let x = 7;
    let line = match compare(x, 8) {
        Comparison::Less => "less than 8",
        Comparison::Greater => "greater than 8",
        Comparison::Equal => "nothing",
    };
    out.line(line);
}

pub fn array(out: &dyn Output) -> [i32; 5] {
    let mut arr = [0; 5];
    out.line(&format!("{arr:?}"));
    arr[0] = 5;
    out.line(&format!("{arr:?}"));
    arr
}

pub fn slices(out: &dyn Output) -> Vec<i32> {
    let mut v: Vec<i32> = (1..=10).collect();
    out.line(&format!("{v:?}"));
    v[0] = 5;
    out.line(&format!("{v:?}"));
    v
}

/// Insert two keys, print, delete one, print.
///
/// `BTreeMap` so the printed form is stable.
pub fn map(out: &dyn Output) -> BTreeMap<String, i32> {
    let mut m = BTreeMap::new();
    m.insert("hello".to_string(), 1);
    m.insert("world".to_string(), 2);
    out.line(&format!("{m:?}"));

    m.remove("world");
    out.line(&format!("{m:?}"));
    m
}

pub fn for_loop(out: &dyn Output) {
    for i in 1..10 {
        out.show(&i);
    }
}

pub fn while_loop(out: &dyn Output) {
    let mut a = 0;
    while a < 5 {
        out.show(&a);
        a += 1;
    }
}

pub fn range_slice(out: &dyn Output) {
    let sl = ["h", "e", "l", "l", "o"];
    for (index, value) in sl.iter().enumerate() {
        out.line(&format!("index {index} value {value}"));
    }
}

/// Iteration order of a `HashMap` is unspecified.
pub fn range_map(out: &dyn Output) {
    let m: HashMap<&str, i32> = HashMap::from([("h", 1), ("e", 2), ("l", 3)]);
    for (key, value) in &m {
        out.line(&format!("key {key} value {value}"));
    }
}

pub fn sum(x: i32, y: i32) -> i32 {
    x + y
}
