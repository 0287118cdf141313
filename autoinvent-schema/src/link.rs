//! Back-reference installation.
//!
//! The schema is the single owner of every model, field and relationship.
//! Upward navigation uses index handles rather than pointers: a model knows
//! its position in the schema, a field knows its model's position and its own,
//! and a relationship shares its field's handle. Each handle also carries the
//! identity of the schema that installed it, so a handle can never be resolved
//! against the wrong schema.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use tracing::debug;

use crate::model::Model;

static NEXT_SCHEMA_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a constructed [`crate::Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(u64);

impl SchemaId {
    pub(crate) fn next() -> Self {
        SchemaId(NEXT_SCHEMA_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for SchemaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "schema#{}", self.0)
    }
}

/// Back-reference from a model to its schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelLink {
    pub schema: SchemaId,
    pub model: usize,
}

/// Back-reference from a field (or its relationship) to its model and schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldLink {
    pub schema: SchemaId,
    pub model: usize,
    pub field: usize,
}

impl FieldLink {
    pub fn model_link(self) -> ModelLink {
        ModelLink {
            schema: self.schema,
            model: self.model,
        }
    }
}

/// Install back-references on every model, field and relationship.
///
/// Called once by the schema constructor, before the schema is handed out.
pub(crate) fn link(schema: SchemaId, models: &mut IndexMap<String, Model>) {
    let mut fields = 0usize;
    let mut relationships = 0usize;

    for (model_idx, model) in models.values_mut().enumerate() {
        model.link = Some(ModelLink {
            schema,
            model: model_idx,
        });

        for (field_idx, field) in model.fields.values_mut().enumerate() {
            let handle = FieldLink {
                schema,
                model: model_idx,
                field: field_idx,
            };
            field.link = Some(handle);
            fields += 1;

            if let Some(rel) = field.type_.relationship_mut() {
                rel.link = Some(handle);
                relationships += 1;
            }
        }
    }

    debug!(
        %schema,
        models = models.len(),
        fields,
        relationships,
        "schema linked"
    );
}
