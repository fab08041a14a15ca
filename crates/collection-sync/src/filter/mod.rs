//! Filter DSL: fields, predicates and queries.
//!
//! - [`Field`] turns typed method calls into [`Predicate`]s
//! - [`Predicate`] renders to one wire [`UrlArgument`]
//! - [`Query`] collects predicates with pagination and ordering, and
//!   compiles them into URL arguments and request headers

pub mod field;
pub mod predicate;
pub mod query;

pub use field::{AnyField, Field, FieldKind, FieldType, Numeric, NumericValue, Plain, Text, NOT_PREFIX};
pub use predicate::{Predicate, UrlArgument};
pub use query::{Query, QueryConfig, ORDER_ARGUMENT};
