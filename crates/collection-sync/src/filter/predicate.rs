//! Single filter conditions in wire form.

use serde::{Deserialize, Serialize};

/// A URL query argument as handed to the transport.
///
/// Predicates render as `{argument: field, value: "<op>.<value>"}`;
/// ordering renders as `{argument: "order", value: "a.asc,b.desc"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UrlArgument {
    pub argument: String,
    pub value: String,
}

impl UrlArgument {
    /// Creates a new argument.
    pub fn new(argument: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            argument: argument.into(),
            value: value.into(),
        }
    }
}

/// One filter condition: a `(field, operator, value)` triple.
///
/// The operator already carries the `not.` prefix for negated fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    field: String,
    operator: String,
    value: String,
}

impl Predicate {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Renders this predicate as a URL argument.
    pub fn to_url_argument(&self) -> UrlArgument {
        UrlArgument {
            argument: self.field.clone(),
            value: format!("{}.{}", self.operator, self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_url_argument() {
        let predicate = Predicate::new("age", "gte", "21");
        assert_eq!(predicate.to_url_argument(), UrlArgument::new("age", "gte.21"));
    }

    #[test]
    fn test_negated_operator_passes_through() {
        let predicate = Predicate::new("status", "not.eq", "done");
        assert_eq!(predicate.to_url_argument().value, "not.eq.done");
    }

    #[test]
    fn test_url_argument_json_shape() {
        let arg = UrlArgument::new("order", "name.asc");
        let json = serde_json::to_value(&arg).unwrap();
        assert_eq!(json, serde_json::json!({"argument": "order", "value": "name.asc"}));
    }
}
