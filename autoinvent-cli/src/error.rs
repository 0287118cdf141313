//! Error types for CLI commands

use autoinvent_schema::SchemaError;
use thiserror::Error;

/// Result type for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The `table` command was pointed at a plain attribute
    #[error("field '{model}.{field}' is not a relationship")]
    NotRelationship { model: String, field: String },

    /// `check` found problems; the report has already been printed
    #[error("{count} schema problem(s) found")]
    ProblemsFound { count: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_is_transparent() {
        let err: CliError = SchemaError::ModelNotFound {
            name: "user".into(),
        }
        .into();
        assert_eq!(err.to_string(), "model not found: user");
    }

    #[test]
    fn test_not_relationship_display() {
        let err = CliError::NotRelationship {
            model: "user".into(),
            field: "name".into(),
        };
        assert_eq!(err.to_string(), "field 'user.name' is not a relationship");
    }
}
