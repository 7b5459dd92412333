//! Animals - trait による動的ディスパッチと「空」の扱い
//!
//! # 学習ポイント
//! - `Box<dyn Animal>` は実行時の具体型（Dog / Cat）でメソッドを選ぶ
//! - 閉じた enum（`Pet`）で同じことを `match` で書くこともできる
//! - 「中身が None の Option<Dog> を入れた slot」と「何も入っていない slot」は別物
//!   - 前者は dispatch できる（実装側が None を許容する）
//!   - 後者は呼び出し自体が失敗する（`TourError::NilCapability`）

use std::fmt::Debug;

use crate::error::TourError;
use crate::ports::Output;

/// Introduce-yourself capability.
pub trait Animal: Debug + Send + Sync {
    fn introduce(&self) -> String;

    /// Runtime type name used by [`AnimalSlot::describe`].
    fn type_name(&self) -> String;

    /// Value part of [`AnimalSlot::describe`].
    fn describe_value(&self) -> String {
        format!("{self:?}")
    }
}

/// Static name of a concrete animal type (available without an instance).
pub trait Species {
    const TYPE_NAME: &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dog {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cat {
    pub name: String,
}

impl Dog {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Cat {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Species for Dog {
    const TYPE_NAME: &'static str = "Dog";
}

impl Species for Cat {
    const TYPE_NAME: &'static str = "Cat";
}

fn greeting(name: &str) -> String {
    format!("My name is {name}")
}

impl Animal for Dog {
    fn introduce(&self) -> String {
        greeting(&self.name)
    }

    fn type_name(&self) -> String {
        Self::TYPE_NAME.to_string()
    }
}

impl Animal for Cat {
    fn introduce(&self) -> String {
        greeting(&self.name)
    }

    fn type_name(&self) -> String {
        Self::TYPE_NAME.to_string()
    }
}

/// An animal that may be absent. The slot holding it is still occupied.
impl<A> Animal for Option<A>
where
    A: Animal + Species,
{
    fn introduce(&self) -> String {
        match self {
            Some(a) => a.introduce(),
            None => "<nil>".to_string(),
        }
    }

    fn type_name(&self) -> String {
        // fixed per A, so a None still reports its declared type
        format!("Option<{}>", A::TYPE_NAME)
    }

    fn describe_value(&self) -> String {
        match self {
            Some(a) => a.describe_value(),
            None => "<nil>".to_string(),
        }
    }
}

/// Closed set of animals dispatched with `match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pet {
    Dog(Dog),
    Cat(Cat),
}

impl Animal for Pet {
    fn introduce(&self) -> String {
        match self {
            Pet::Dog(d) => d.introduce(),
            Pet::Cat(c) => c.introduce(),
        }
    }

    fn type_name(&self) -> String {
        match self {
            Pet::Dog(d) => d.type_name(),
            Pet::Cat(c) => c.type_name(),
        }
    }
}

/// A place that may hold some `Animal`.
#[derive(Debug, Default)]
pub struct AnimalSlot {
    animal: Option<Box<dyn Animal>>,
}

impl AnimalSlot {
    pub fn empty() -> Self {
        Self { animal: None }
    }

    pub fn holding(animal: impl Animal + 'static) -> Self {
        Self {
            animal: Some(Box::new(animal)),
        }
    }

    pub fn set(&mut self, animal: impl Animal + 'static) {
        self.animal = Some(Box::new(animal));
    }

    pub fn is_empty(&self) -> bool {
        self.animal.is_none()
    }

    /// Dispatch `introduce` to whatever the slot holds.
    pub fn introduce(&self) -> Result<String, TourError> {
        self.animal
            .as_ref()
            .map(|a| a.introduce())
            .ok_or(TourError::NilCapability("Animal"))
    }

    pub fn describe(&self) -> String {
        match &self.animal {
            Some(a) => format!("(Type: {}, Value: {})", a.type_name(), a.describe_value()),
            None => "(Type: <nil>, Value: <nil>)".to_string(),
        }
    }
}

/// Describe any value by its compile-time type name.
pub fn describe_any<T: Debug + ?Sized>(value: &T) -> String {
    format!("(Type: {}, Value: {:?})", std::any::type_name::<T>(), value)
}

pub fn interface(out: &dyn Output) -> Result<(), TourError> {
    let mut animal = AnimalSlot::holding(Cat::new("Mèo"));
    out.line(&animal.introduce()?);
    animal.set(Dog::new("Chó"));
    out.line(&animal.introduce()?);
    Ok(())
}

pub fn interface_values(out: &dyn Output) {
    let mut animal = AnimalSlot::holding(Cat::new("C"));
    out.line(&animal.describe());
    animal.set(Dog::new("D"));
    out.line(&animal.describe());
}

/// A slot holding an absent dog still dispatches.
pub fn interface_with_underlying_nil(out: &dyn Output) -> Result<(), TourError> {
    let dog: Option<Dog> = None;
    let animal = AnimalSlot::holding(dog);
    out.line(&animal.describe());
    out.line(&animal.introduce()?);
    Ok(())
}

/// An empty slot cannot dispatch.
pub fn interface_with_nil(out: &dyn Output) -> Result<(), TourError> {
    let animal = AnimalSlot::empty();
    out.line(&animal.describe());
    out.line(&animal.introduce()?);
    Ok(())
}

pub fn empty_interface(out: &dyn Output) {
    out.line(&describe_any(&1));
    out.line(&describe_any("hello"));
    let i = 5;
    out.line(&describe_any(&i));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::MemoryOutput;
    use rstest::rstest;

    #[rstest]
    #[case::dog(AnimalSlot::holding(Dog::new("Rex")), "Rex", "Tom")]
    #[case::cat(AnimalSlot::holding(Cat::new("Tom")), "Tom", "Rex")]
    #[case::pet_dog(AnimalSlot::holding(Pet::Dog(Dog::new("Rex"))), "Rex", "Tom")]
    #[case::pet_cat(AnimalSlot::holding(Pet::Cat(Cat::new("Tom"))), "Tom", "Rex")]
    fn dispatch_uses_own_name(#[case] slot: AnimalSlot, #[case] own: &str, #[case] other: &str) {
        let msg = slot.introduce().unwrap();
        assert!(msg.contains(own));
        assert!(!msg.contains(other));
    }

    #[test]
    fn absent_variant_still_dispatches() {
        let slot = AnimalSlot::holding(None::<Dog>);
        assert!(!slot.is_empty());
        assert_eq!(slot.introduce().unwrap(), "<nil>");
        assert_eq!(slot.describe(), "(Type: Option<Dog>, Value: <nil>)");
    }

    #[test]
    fn empty_slot_fails_dispatch() {
        let slot = AnimalSlot::empty();
        assert!(slot.is_empty());
        let err = slot.introduce().unwrap_err();
        assert!(matches!(err, TourError::NilCapability("Animal")));
        assert_eq!(slot.describe(), "(Type: <nil>, Value: <nil>)");
    }

    #[test]
    fn describe_reports_runtime_type() {
        let slot = AnimalSlot::holding(Cat::new("C"));
        assert_eq!(slot.describe(), r#"(Type: Cat, Value: Cat { name: "C" })"#);
        let slot = AnimalSlot::holding(Some(Dog::new("D")));
        assert_eq!(slot.describe(), r#"(Type: Option<Dog>, Value: Dog { name: "D" })"#);
    }

    #[test]
    fn interface_lesson_prints_both_names() {
        let out = MemoryOutput::new();
        interface(&out).unwrap();
        assert_eq!(out.lines(), vec!["My name is Mèo", "My name is Chó"]);
    }

    #[test]
    fn nil_lessons() {
        let out = MemoryOutput::new();
        interface_with_underlying_nil(&out).unwrap();
        assert_eq!(out.lines()[1], "<nil>");

        let out = MemoryOutput::new();
        let err = interface_with_nil(&out).unwrap_err();
        assert!(matches!(err, TourError::NilCapability(_)));
        // describe ran before the failing call
        assert_eq!(out.lines(), vec!["(Type: <nil>, Value: <nil>)"]);
    }

    #[test]
    fn empty_interface_describes_each_value() {
        let out = MemoryOutput::new();
        empty_interface(&out);
        assert_eq!(
            out.lines(),
            vec![
                "(Type: i32, Value: 1)",
                r#"(Type: str, Value: "hello")"#,
                "(Type: i32, Value: 5)",
            ]
        );
    }
}
