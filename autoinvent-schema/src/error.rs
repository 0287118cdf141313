//! Error types for schema construction and resolution

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Broad classes of [`SchemaError`], used when reporting diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced field or model name does not exist.
    Lookup,
    /// The declaration contradicts itself (tab trees, naming).
    Configuration,
    /// The graph was used before or outside of linking.
    Structural,
    /// Reading or parsing declarations failed.
    Io,
}

/// Errors that can occur while building or resolving a schema
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Field name not present in the model's field mapping
    #[error("field not found: {model}.{field}")]
    FieldNotFound { model: String, field: String },

    /// Model name not present in the schema
    #[error("model not found: {name}")]
    ModelNotFound { name: String },

    /// A detail tab lists a field the model does not declare
    #[error("detail tab '{tab}' on model '{model}' lists unknown field '{field}'")]
    TabFieldNotFound {
        model: String,
        tab: String,
        field: String,
    },

    /// Two entries of a list declaration share a name
    #[error("duplicate {kind} name '{name}' in {scope}")]
    DuplicateName {
        kind: &'static str,
        scope: String,
        name: String,
    },

    /// A list declaration entry has no name
    #[error("{kind} declared without a name in {scope}")]
    MissingName { kind: &'static str, scope: String },

    /// A mapping declaration's key disagrees with the entry's name
    #[error("{kind} key '{key}' does not match declared name '{name}'")]
    NameMismatch {
        kind: &'static str,
        key: String,
        name: String,
    },

    /// Resolver called on a model or relationship that was never linked into a schema
    #[error("'{name}' is not linked into a schema")]
    Unlinked { name: String },

    /// A back-reference points into a different schema
    #[error("'{name}' belongs to a different schema")]
    ForeignHandle { name: String },

    /// The instance passed to `display_value` has no such attribute
    #[error("instance of '{model}' has no attribute '{attribute}'")]
    MissingAttribute { model: String, attribute: String },

    /// Instance could not be converted for display
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Declaration file or directory does not exist
    #[error("schema declaration not found: {path}")]
    NotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML declaration could not be parsed
    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },
}

impl SchemaError {
    /// The class of failure this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::FieldNotFound { .. }
            | SchemaError::ModelNotFound { .. }
            | SchemaError::MissingAttribute { .. } => ErrorKind::Lookup,
            SchemaError::TabFieldNotFound { .. }
            | SchemaError::DuplicateName { .. }
            | SchemaError::MissingName { .. }
            | SchemaError::NameMismatch { .. } => ErrorKind::Configuration,
            SchemaError::Unlinked { .. } | SchemaError::ForeignHandle { .. } => {
                ErrorKind::Structural
            }
            SchemaError::Json(_)
            | SchemaError::NotFound { .. }
            | SchemaError::Io(_)
            | SchemaError::Yaml { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn field_not_found(model: &str, field: &str) -> Self {
        SchemaError::FieldNotFound {
            model: model.to_string(),
            field: field.to_string(),
        }
    }
}
