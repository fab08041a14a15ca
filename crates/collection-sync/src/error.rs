//! Error types for model indexing and CRUD action execution.

use thiserror::Error;

/// Error raised while deriving a record's composite index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The model declares no primary field and no custom index function.
    ///
    /// Raised lazily by [`Model::index`](crate::Model::index), never while
    /// the model is being built.
    #[error(
        "model {model:?}: All models must have at least one primary field, or specify an index function"
    )]
    NoPrimaryField { model: String },
}

/// Error raised while running a CRUD action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The action was used before a model was attached to it.
    #[error("action {action:?} has no model attached")]
    ModelNotConfigured { action: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_primary_field_message() {
        let err = ModelError::NoPrimaryField {
            model: "todos".to_string(),
        };
        assert!(
            err.to_string()
                .contains("All models must have at least one primary field, or specify an index function")
        );
    }

    #[test]
    fn test_model_error_converts() {
        let err: Error = ModelError::NoPrimaryField {
            model: "todos".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Model(ModelError::NoPrimaryField { .. })));
        assert!(err.to_string().starts_with("model \"todos\""));
    }
}
