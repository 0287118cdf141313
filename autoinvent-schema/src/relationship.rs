//! Relationship metadata and embedded-table column resolution.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, SchemaError};
use crate::link::FieldLink;
use crate::schema::Schema;
use crate::types::RelationshipType;

/// Extra information on a field that points to another model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationshipInfo {
    #[serde(rename = "type")]
    pub kind: RelationshipType,
    /// Name of the related model. Resolved lazily against the schema.
    pub target: String,
    /// Field on the target model that points back to this model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backref: Option<String>,
    /// Target columns to show when the relationship is rendered as a table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_field_order: Option<Vec<String>>,

    #[serde(skip)]
    pub(crate) link: Option<FieldLink>,
}

impl RelationshipInfo {
    pub fn new(kind: RelationshipType, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            backref: None,
            table_field_order: None,
            link: None,
        }
    }

    pub fn with_backref(mut self, backref: impl Into<String>) -> Self {
        self.backref = Some(backref.into());
        self
    }

    pub fn with_table_field_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table_field_order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    /// Handle of the owning field, installed when the schema is linked.
    pub fn link(&self) -> Option<FieldLink> {
        self.link
    }

    /// Target-model columns for an embedded table, in order.
    ///
    /// Uses `table_field_order` verbatim when set, otherwise the target
    /// model's index order. The target is looked up here, not when the schema
    /// is built, so models may reference each other in any order.
    pub fn table_field_order(&self, schema: &Schema) -> Result<Vec<String>> {
        let handle = self.link.ok_or_else(|| SchemaError::Unlinked {
            name: format!("relationship to {}", self.target),
        })?;
        if handle.schema != schema.id() {
            return Err(SchemaError::ForeignHandle {
                name: self.target.clone(),
            });
        }

        if let Some(order) = &self.table_field_order {
            return Ok(order.clone());
        }

        let target = schema
            .get_model(&self.target)
            .ok_or_else(|| SchemaError::ModelNotFound {
                name: self.target.clone(),
            })?;
        trace!(target = %self.target, "table order falls back to target index order");
        target.index_field_order()
    }
}
