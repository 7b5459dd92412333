//! Pointers - 値渡しと参照渡し、レシーバの違い
//!
//! # 学習ポイント
//! - `fn inc(i: i32)` はコピーを受け取るので呼び出し元は変わらない
//! - `fn inc_pointer(i: &mut i32)` は呼び出し元の値を書き換える
//! - メソッドも同じ: `self`（値）と `&mut self`（参照）

use std::fmt;

use crate::ports::Output;

/// Print a value, its address, and the value read back through the reference.
pub fn pointer(out: &dyn Output) {
    let i = 7;
    out.show(&i);

    let r = &i;
    out.line(&format!("{r:p}"));
    out.show(&*r);
}

#[allow(unused_assignments)]
pub fn inc(mut i: i32) {
    i += 1;
}

pub fn inc_pointer(i: &mut i32) {
    *i += 1;
}

/// Returns the value after `inc` and after `inc_pointer`.
pub fn advanced_pointer(out: &dyn Output) -> (i32, i32) {
    let mut i = 7;
    inc(i);
    out.show(&i);
    let after_copy = i;

    inc_pointer(&mut i);
    out.show(&i);
    (after_copy, i)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    /// Renames the caller's value.
    pub fn change_name(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
    }

    /// Renames a copy. The copy is dropped at the end of the call.
    pub fn change_name_without_pointer(mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {}}}", self.name, self.age)
    }
}

pub fn person(out: &dyn Output) -> Person {
    let person = Person::new("nhat", 23);
    out.show(&person);
    out.line(&person.name);
    person
}

pub fn person_methods(out: &dyn Output) -> Person {
    let mut p = Person::new("nhat", 23);
    out.show(&p);

    p.clone().change_name_without_pointer("hello");
    out.show(&p);

    p.change_name("codelink");
    out.show(&p);
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::MemoryOutput;

    #[test]
    fn inc_by_value_is_invisible_to_caller() {
        let mut i = 7;
        inc(i);
        assert_eq!(i, 7);
        inc_pointer(&mut i);
        assert_eq!(i, 8);
    }

    #[test]
    fn advanced_pointer_prints_seven_then_eight() {
        let out = MemoryOutput::new();
        assert_eq!(advanced_pointer(&out), (7, 8));
        assert_eq!(out.lines(), vec!["7", "8"]);
    }

    #[test]
    fn pointer_prints_value_address_value() {
        let out = MemoryOutput::new();
        pointer(&out);
        let lines = out.lines();
        assert_eq!(lines[0], "7");
        assert!(lines[1].starts_with("0x"));
        assert_eq!(lines[2], "7");
    }

    #[test]
    fn reference_receiver_mutation_is_visible() {
        let mut p = Person::new("nhat", 23);
        p.change_name("codelink");
        assert_eq!(p.name, "codelink");
    }

    #[test]
    fn value_receiver_mutation_is_not_visible() {
        let p = Person::new("nhat", 23);
        p.clone().change_name_without_pointer("hello");
        assert_eq!(p.name, "nhat");
    }

    #[test]
    fn person_methods_lesson_output() {
        let out = MemoryOutput::new();
        let p = person_methods(&out);
        assert_eq!(p, Person::new("codelink", 23));
        assert_eq!(
            out.lines(),
            vec!["{nhat 23}", "{nhat 23}", "{codelink 23}"]
        );
    }

    #[test]
    fn person_lesson_prints_record_and_name() {
        let out = MemoryOutput::new();
        person(&out);
        assert_eq!(out.lines(), vec!["{nhat 23}", "nhat"]);
    }
}
