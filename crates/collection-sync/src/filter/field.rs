//! Typed field builders that produce predicates.
//!
//! A [`Field`] is parameterized by its kind, which decides the operator
//! surface available on it:
//!
//! | Kind        | Operations                                              |
//! |-------------|---------------------------------------------------------|
//! | [`Plain`]   | `is_in`, `is`, `equals`, ordering                       |
//! | [`Text`]    | plain operations + `like`, `ilike`, `full_text_search`  |
//! | [`Numeric`] | plain operations + `gt`, `lt`, `gte`, `lte` comparisons |
//!
//! Negation is a flag on the field rather than a parallel type. The
//! negated twin of a field is obtained with [`Field::not`] and every
//! operation on it emits `not.<op>`.
//!
//! # Example
//!
//! ```rust
//! use collection_sync::filter::Field;
//!
//! let age = Field::numeric("age");
//! assert_eq!(age.greater_than(21).to_url_argument().value, "gt.21");
//! assert_eq!(age.not().greater_than(21).to_url_argument().value, "not.gt.21");
//! assert_eq!(age.not().not(), age);
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::filter::Predicate;

/// Prefix applied to the operator of every negated predicate.
pub const NOT_PREFIX: &str = "not.";

/// Runtime tag naming a field's kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Plain,
    Text,
    Numeric,
}

/// Type-level field kind, deciding which operators a [`Field`] offers.
pub trait FieldKind: fmt::Debug + Clone + Copy + Default + PartialEq + Eq + std::hash::Hash {
    const TYPE: FieldType;
}

/// Field supporting only the common operators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Plain;

/// Field supporting pattern and full-text operators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Text;

/// Field supporting ordered comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Numeric;

impl FieldKind for Plain {
    const TYPE: FieldType = FieldType::Plain;
}

impl FieldKind for Text {
    const TYPE: FieldType = FieldType::Text;
}

impl FieldKind for Numeric {
    const TYPE: FieldType = FieldType::Numeric;
}

/// Values accepted by numeric comparisons.
pub trait NumericValue: fmt::Display + Copy {}

macro_rules! impl_numeric_value {
    ($($t:ty),*) => {
        $(impl NumericValue for $t {})*
    };
}

impl_numeric_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// A named column of a model, producing predicates against it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field<K: FieldKind = Plain> {
    name: String,
    primary: bool,
    negated: bool,
    kind: PhantomData<K>,
}

impl<K: FieldKind> Default for Field<K> {
    fn default() -> Self {
        Self {
            name: String::new(),
            primary: false,
            negated: false,
            kind: PhantomData,
        }
    }
}

impl<K: FieldKind> Field<K> {
    /// Creates a field with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a field whose name is filled in from its schema key.
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Marks this field as part of the model's composite key.
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Sets the field name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn field_type(&self) -> FieldType {
        K::TYPE
    }

    /// Returns the negated twin of this field.
    ///
    /// The twin shares name and primary flag. Negating twice yields a
    /// field equal to the original.
    pub fn not(&self) -> Self {
        Self {
            negated: !self.negated,
            ..self.clone()
        }
    }

    /// Views this field through the common operator set only.
    pub fn as_plain(&self) -> Field<Plain> {
        Field {
            name: self.name.clone(),
            primary: self.primary,
            negated: self.negated,
            kind: PhantomData,
        }
    }

    fn predicate(&self, operator: &str, value: impl Into<String>) -> Predicate {
        if self.negated {
            Predicate::new(&*self.name, format!("{NOT_PREFIX}{operator}"), value)
        } else {
            Predicate::new(&*self.name, operator, value)
        }
    }

    /// Matches any of `values` (`in`).
    ///
    /// Values are joined with `,` without escaping, so a value that itself
    /// contains a comma is split on the server side.
    pub fn is_in<I, V>(&self, values: I) -> Predicate
    where
        I: IntoIterator<Item = V>,
        V: fmt::Display,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.predicate("in", joined)
    }

    /// Identity comparison (`is`); `None` renders as `null`.
    ///
    /// For a plain null check prefer [`Field::is_null`], which needs no
    /// type annotation.
    pub fn is<V: fmt::Display>(&self, value: Option<V>) -> Predicate {
        match value {
            Some(v) => self.predicate("is", v.to_string()),
            None => self.predicate("is", "null"),
        }
    }

    /// Null check (`is.null`).
    pub fn is_null(&self) -> Predicate {
        self.predicate("is", "null")
    }

    /// Equality (`eq`).
    pub fn equals<V: fmt::Display>(&self, value: V) -> Predicate {
        self.predicate("eq", value.to_string())
    }

    /// Ascending order token, e.g. `name.asc`.
    pub fn order_ascending(&self) -> String {
        format!("{}.asc", self.name)
    }

    /// Descending order token, e.g. `name.desc`.
    pub fn order_descending(&self) -> String {
        format!("{}.desc", self.name)
    }
}

impl Field<Plain> {
    pub fn plain(name: impl Into<String>) -> Self {
        Self::new(name)
    }
}

impl Field<Text> {
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    /// Case-sensitive pattern match (`like`). `*` is the wildcard.
    pub fn like(&self, pattern: impl AsRef<str>) -> Predicate {
        self.predicate("like", pattern.as_ref())
    }

    /// Case-insensitive pattern match (`ilike`).
    pub fn ilike(&self, pattern: impl AsRef<str>) -> Predicate {
        self.predicate("ilike", pattern.as_ref())
    }

    /// Full-text search (`fts`).
    pub fn full_text_search(&self, terms: impl AsRef<str>) -> Predicate {
        self.predicate("fts", terms.as_ref())
    }
}

impl Field<Numeric> {
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    pub fn greater_than<N: NumericValue>(&self, value: N) -> Predicate {
        self.predicate("gt", value.to_string())
    }

    pub fn less_than<N: NumericValue>(&self, value: N) -> Predicate {
        self.predicate("lt", value.to_string())
    }

    pub fn greater_than_or_equal_to<N: NumericValue>(&self, value: N) -> Predicate {
        self.predicate("gte", value.to_string())
    }

    pub fn less_than_or_equal_to<N: NumericValue>(&self, value: N) -> Predicate {
        self.predicate("lte", value.to_string())
    }
}

/// A field of any kind, as stored in a model schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyField {
    Plain(Field<Plain>),
    Text(Field<Text>),
    Numeric(Field<Numeric>),
}

impl AnyField {
    pub fn name(&self) -> &str {
        match self {
            AnyField::Plain(f) => f.name(),
            AnyField::Text(f) => f.name(),
            AnyField::Numeric(f) => f.name(),
        }
    }

    pub fn is_primary(&self) -> bool {
        match self {
            AnyField::Plain(f) => f.is_primary(),
            AnyField::Text(f) => f.is_primary(),
            AnyField::Numeric(f) => f.is_primary(),
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            AnyField::Plain(_) => FieldType::Plain,
            AnyField::Text(_) => FieldType::Text,
            AnyField::Numeric(_) => FieldType::Numeric,
        }
    }

    /// Fills in the name if none was declared.
    pub(crate) fn name_or(self, key: &str) -> Self {
        if !self.name().is_empty() {
            return self;
        }
        match self {
            AnyField::Plain(f) => AnyField::Plain(f.with_name(key)),
            AnyField::Text(f) => AnyField::Text(f.with_name(key)),
            AnyField::Numeric(f) => AnyField::Numeric(f.with_name(key)),
        }
    }

    pub fn as_plain(&self) -> Field<Plain> {
        match self {
            AnyField::Plain(f) => f.clone(),
            AnyField::Text(f) => f.as_plain(),
            AnyField::Numeric(f) => f.as_plain(),
        }
    }

    pub fn as_text(&self) -> Option<&Field<Text>> {
        match self {
            AnyField::Text(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<&Field<Numeric>> {
        match self {
            AnyField::Numeric(f) => Some(f),
            _ => None,
        }
    }
}

impl From<Field<Plain>> for AnyField {
    fn from(field: Field<Plain>) -> Self {
        AnyField::Plain(field)
    }
}

impl From<Field<Text>> for AnyField {
    fn from(field: Field<Text>) -> Self {
        AnyField::Text(field)
    }
}

impl From<Field<Numeric>> for AnyField {
    fn from(field: Field<Numeric>) -> Self {
        AnyField::Numeric(field)
    }
}

impl From<FieldType> for AnyField {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Plain => AnyField::Plain(Field::unnamed()),
            FieldType::Text => AnyField::Text(Field::unnamed()),
            FieldType::Numeric => AnyField::Numeric(Field::unnamed()),
        }
    }
}
