//! Model schemas: fields, composite indexing and record normalization.
//!
//! A [`Model`] is declared explicitly through a [`ModelBuilder`]: each
//! field is registered under a schema key, and fields flagged primary form
//! the composite key in declaration order.
//!
//! # Example
//!
//! ```rust
//! use collection_sync::model::Model;
//! use collection_sync::filter::Field;
//! use serde_json::json;
//!
//! let model = Model::builder("memberships")
//!     .field("team", Field::text("team").primary())
//!     .field("user", Field::numeric("user").primary())
//!     .field("role", Field::text("role"))
//!     .build();
//!
//! let key = model.index(&json!({"team": "red", "user": 7, "role": "admin"})).unwrap();
//! assert_eq!(key, "red:7");
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ModelError;
use crate::filter::{AnyField, Field, FieldType, Numeric, Plain, Text};
use crate::model::record::{key_fragment, Record};

/// Separator between primary values in a composite key.
pub const KEY_SEPARATOR: char = ':';

/// Custom index function replacing the primary-key join.
pub type IndexFn = Arc<dyn Fn(&Record) -> Result<String, ModelError> + Send + Sync>;

/// Normalizes a raw record into its stored form.
pub type FactoryFn = Arc<dyn Fn(Record) -> Record + Send + Sync>;

/// A primary field, in the order it contributes to the composite key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryField {
    /// Schema key; also the record property read when indexing.
    pub name: String,
    pub field: AnyField,
}

/// A field declaration in a [`ModelConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldSpec {
    pub key: String,
    /// Wire name; defaults to `key`.
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub primary: bool,
}

impl FieldSpec {
    fn into_field(self) -> (String, AnyField) {
        let mut field = AnyField::from(self.field_type);
        if let Some(name) = self.name {
            field = field.name_or(&name);
        }
        if self.primary {
            field = match field {
                AnyField::Plain(f) => AnyField::Plain(f.primary()),
                AnyField::Text(f) => AnyField::Text(f.primary()),
                AnyField::Numeric(f) => AnyField::Numeric(f.primary()),
            };
        }
        (self.key, field)
    }
}

/// Declarative model configuration, e.g. loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelConfig {
    pub model_name: String,
    pub fields: Vec<FieldSpec>,
}

/// A named record schema.
#[derive(Clone)]
pub struct Model {
    name: String,
    fields: Vec<(String, AnyField)>,
    primary: Vec<PrimaryField>,
    index: Option<IndexFn>,
    factory: Option<FactoryFn>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("primary", &self.primary)
            .field("custom_index", &self.index.is_some())
            .field("custom_factory", &self.factory.is_some())
            .finish()
    }
}

impl Model {
    /// Starts building a model with the given name.
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder::new(name)
    }

    /// Builds a model from a declarative configuration.
    pub fn create(config: ModelConfig) -> Model {
        config
            .fields
            .into_iter()
            .map(FieldSpec::into_field)
            .fold(ModelBuilder::new(config.model_name), |builder, (key, field)| {
                builder.field(key, field)
            })
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order, keyed by schema key.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &AnyField)> {
        self.fields.iter().map(|(key, field)| (key.as_str(), field))
    }

    pub fn primary(&self) -> &[PrimaryField] {
        &self.primary
    }

    fn get(&self, key: &str) -> Option<&AnyField> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    /// Returns the field under `key` with the common operator set.
    pub fn field(&self, key: &str) -> Option<Field<Plain>> {
        self.get(key).map(AnyField::as_plain)
    }

    /// Returns the field under `key` if it was declared as text.
    pub fn text_field(&self, key: &str) -> Option<Field<Text>> {
        self.get(key).and_then(AnyField::as_text).cloned()
    }

    /// Returns the field under `key` if it was declared as numeric.
    pub fn numeric_field(&self, key: &str) -> Option<Field<Numeric>> {
        self.get(key).and_then(AnyField::as_numeric).cloned()
    }

    /// Computes the composite key of a record.
    ///
    /// Uses the custom index function when one was configured; otherwise
    /// joins the primary values with `:`.
    pub fn index(&self, record: &Record) -> Result<String, ModelError> {
        match &self.index {
            Some(index) => index(record),
            None => primary_key_index(self, record),
        }
    }

    /// Normalizes a raw record into its stored form.
    pub fn factory(&self, record: Record) -> Record {
        match &self.factory {
            Some(factory) => factory(record),
            None => identity(record),
        }
    }
}

/// Default index: primary values joined with [`KEY_SEPARATOR`].
pub fn primary_key_index(model: &Model, record: &Record) -> Result<String, ModelError> {
    let (first, rest) = model
        .primary
        .split_first()
        .ok_or_else(|| ModelError::NoPrimaryField {
            model: model.name.clone(),
        })?;

    let mut key = primary_value(record, first);
    for primary in rest {
        key.push(KEY_SEPARATOR);
        key.push_str(&primary_value(record, primary));
    }
    Ok(key)
}

/// An absent primary value renders like an explicit `null`.
fn primary_value(record: &Record, primary: &PrimaryField) -> String {
    key_fragment(record.get(&primary.name).unwrap_or(&Value::Null))
}

/// Default factory: returns the record unchanged.
pub fn identity(record: Record) -> Record {
    record
}

/// Builder for [`Model`].
#[derive(Clone)]
pub struct ModelBuilder {
    name: String,
    fields: Vec<(String, AnyField)>,
    index: Option<IndexFn>,
    factory: Option<FactoryFn>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            index: None,
            factory: None,
        }
    }

    /// Declares a field under `key`.
    ///
    /// A field without a name takes `key` as its name. Declaring the same
    /// key twice replaces the earlier field in place.
    pub fn field(mut self, key: impl Into<String>, field: impl Into<AnyField>) -> Self {
        let key = key.into();
        let field = field.into().name_or(&key);
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = field,
            None => self.fields.push((key, field)),
        }
        self
    }

    /// Replaces the default primary-key index.
    pub fn index<F>(mut self, index: F) -> Self
    where
        F: Fn(&Record) -> Result<String, ModelError> + Send + Sync + 'static,
    {
        self.index = Some(Arc::new(index));
        self
    }

    /// Replaces the default identity factory.
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(Record) -> Record + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Builds the model. Never fails; a missing primary key surfaces on
    /// the first call to [`Model::index`].
    pub fn build(self) -> Model {
        let primary = self
            .fields
            .iter()
            .filter(|(_, field)| field.is_primary())
            .map(|(key, field)| PrimaryField {
                name: key.clone(),
                field: field.clone(),
            })
            .collect();

        Model {
            name: self.name,
            fields: self.fields,
            primary,
            index: self.index,
            factory: self.factory,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn two_key_model() -> Model {
        Model::builder("pairs")
            .field("a", Field::text("a").primary())
            .field("b", Field::text("b").primary())
            .field("c", Field::plain("c"))
            .build()
    }

    #[test]
    fn test_composite_index() {
        let model = two_key_model();
        assert_eq!(model.index(&json!({"a": "1", "b": "2"})).unwrap(), "1:2");
    }

    #[test]
    fn test_single_primary_numeric() {
        let model = Model::builder("todos")
            .field("id", Field::numeric("id").primary())
            .build();
        assert_eq!(model.index(&json!({"id": 42, "title": "x"})).unwrap(), "42");
    }

    #[test]
    fn test_no_primary_fails_lazily() {
        let model = Model::builder("loose").field("a", Field::plain("a")).build();
        assert!(model.primary().is_empty());
        let err = model.index(&json!({"a": 1})).unwrap_err();
        assert!(matches!(err, ModelError::NoPrimaryField { .. }));
    }

    #[test]
    fn test_custom_index_without_primary() {
        let model = Model::builder("loose")
            .field("slug", Field::text("slug"))
            .index(|record| Ok(format!("slug/{}", key_fragment(&record["slug"]))))
            .build();
        assert_eq!(model.index(&json!({"slug": "hello"})).unwrap(), "slug/hello");
    }

    #[test]
    fn test_missing_primary_value_renders_null() {
        let model = two_key_model();
        assert_eq!(model.index(&json!({"a": "1"})).unwrap(), "1:null");
        assert_eq!(model.index(&json!({"a": "1", "b": null})).unwrap(), "1:null");
    }

    #[test]
    fn test_name_inferred_from_key() {
        let model = Model::builder("todos")
            .field("title", Field::<Text>::unnamed())
            .field("id", Field::<Numeric>::unnamed().primary())
            .build();
        let title = model.text_field("title").unwrap();
        assert_eq!(title.name(), "title");
        assert_eq!(title.like("a*").to_url_argument().argument, "title");
        assert_eq!(model.primary()[0].name, "id");
        assert_eq!(model.primary()[0].field.name(), "id");
    }

    #[test]
    fn test_explicit_name_kept() {
        let model = Model::builder("users")
            .field("createdAt", Field::numeric("created_at"))
            .build();
        assert_eq!(model.numeric_field("createdAt").unwrap().name(), "created_at");
    }

    #[test]
    fn test_typed_accessors() {
        let model = two_key_model();
        assert!(model.text_field("a").is_some());
        assert!(model.numeric_field("a").is_none());
        assert!(model.field("a").is_some());
        assert!(model.field("missing").is_none());
    }

    #[test]
    fn test_primary_order_follows_declaration() {
        let model = Model::builder("m")
            .field("z", Field::plain("z").primary())
            .field("a", Field::plain("a").primary())
            .build();
        assert_eq!(model.index(&json!({"a": 1, "z": 2})).unwrap(), "2:1");
    }

    #[test]
    fn test_redeclared_key_replaces() {
        let model = Model::builder("m")
            .field("id", Field::plain("id"))
            .field("id", Field::numeric("id").primary())
            .build();
        assert_eq!(model.fields().count(), 1);
        assert_eq!(model.primary().len(), 1);
    }

    #[test]
    fn test_factory() {
        let model = two_key_model();
        assert_eq!(model.factory(json!({"a": "1"})), json!({"a": "1"}));

        let model = Model::builder("m")
            .field("id", Field::plain("id").primary())
            .factory(|mut record| {
                record["seen"] = json!(true);
                record
            })
            .build();
        assert_eq!(model.factory(json!({"id": 1})), json!({"id": 1, "seen": true}));
    }

    #[test]
    fn test_create_from_config() {
        let config: ModelConfig = serde_json::from_value(json!({
            "modelName": "todos",
            "fields": [
                {"key": "id", "type": "numeric", "primary": true},
                {"key": "title", "type": "text"},
                {"key": "ownerId", "name": "owner_id"}
            ]
        }))
        .unwrap();
        let model = Model::create(config);

        assert_eq!(model.name(), "todos");
        assert_eq!(model.primary().len(), 1);
        assert!(model.text_field("title").is_some());
        assert_eq!(model.field("ownerId").unwrap().name(), "owner_id");
        assert_eq!(model.index(&json!({"id": 3})).unwrap(), "3");
    }
}
