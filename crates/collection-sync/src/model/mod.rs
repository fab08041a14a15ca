//! Model schemas and record collections.
//!
//! This module contains:
//! - Records and keyed collections
//! - Model schemas with composite indexing and record normalization

pub mod record;
pub mod schema;

pub use record::{key_fragment, records_from_response, Collection, Record};
pub use schema::{
    identity, primary_key_index, FactoryFn, FieldSpec, IndexFn, Model, ModelBuilder, ModelConfig,
    PrimaryField, KEY_SEPARATOR,
};
