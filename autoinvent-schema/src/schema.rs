//! The schema root and navigation across its entity graph.

use std::ops::Deref;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::field::Field;
use crate::link::{self, FieldLink, ModelLink, SchemaId};
use crate::model::{Model, ModelDef};
use crate::relationship::RelationshipInfo;
use crate::types::{Declaration, Keyed};

/// A whole schema as declared in one YAML document.
///
/// ```yaml
/// models:
///   user:
///     fields:
///       id: {type: id}
///       name: {}
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaDef {
    #[serde(default)]
    pub models: Keyed<ModelDef>,
}

/// Root container owning every model.
///
/// Built once, then read-only. Every contained model, field and relationship
/// carries a handle back to this schema.
#[derive(Debug)]
pub struct Schema {
    id: SchemaId,
    models: IndexMap<String, Model>,
}

impl Schema {
    /// Build from resolved models, in order. Names must be unique.
    pub fn new(models: impl IntoIterator<Item = Model>) -> Result<Self> {
        let mut map = IndexMap::new();
        for model in models {
            if map.contains_key(&model.name) {
                return Err(SchemaError::DuplicateName {
                    kind: ModelDef::KIND,
                    scope: "schema".to_string(),
                    name: model.name,
                });
            }
            map.insert(model.name.clone(), model);
        }
        Ok(Self::linked(map))
    }

    /// Build from a mapping of resolved models. Each key must equal its model's name.
    pub fn from_map(models: IndexMap<String, Model>) -> Result<Self> {
        for (key, model) in &models {
            if *key != model.name {
                return Err(SchemaError::NameMismatch {
                    kind: ModelDef::KIND,
                    key: key.clone(),
                    name: model.name.clone(),
                });
            }
        }
        Ok(Self::linked(models))
    }

    /// Apply defaults to each declaration, then build.
    pub fn from_defs(defs: impl IntoIterator<Item = ModelDef>) -> Result<Self> {
        let models = defs
            .into_iter()
            .map(Model::from_def)
            .collect::<Result<Vec<_>>>()?;
        Self::new(models)
    }

    pub fn from_def(def: SchemaDef) -> Result<Self> {
        let models = def
            .models
            .into_named("schema")?
            .into_values()
            .map(Model::from_def)
            .collect::<Result<Vec<_>>>()?;
        Self::new(models)
    }

    fn linked(mut models: IndexMap<String, Model>) -> Self {
        let id = SchemaId::next();
        link::link(id, &mut models);
        debug!(%id, models = models.len(), "schema constructed");
        Self { id, models }
    }

    pub fn id(&self) -> SchemaId {
        self.id
    }

    pub fn models(&self) -> &IndexMap<String, Model> {
        &self.models
    }

    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// Look up a model by name.
    pub fn model(&self, name: &str) -> Result<ModelRef<'_>> {
        let model = self
            .models
            .get(name)
            .ok_or_else(|| SchemaError::ModelNotFound {
                name: name.to_string(),
            })?;
        Ok(ModelRef {
            schema: self,
            model,
        })
    }

    /// Every model, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = ModelRef<'_>> {
        self.models.values().map(move |model| ModelRef {
            schema: self,
            model,
        })
    }

    /// Follow a model handle back to its model.
    pub fn resolve_model(&self, handle: ModelLink) -> Result<ModelRef<'_>> {
        if handle.schema != self.id {
            return Err(SchemaError::ForeignHandle {
                name: handle.schema.to_string(),
            });
        }
        let (_, model) =
            self.models
                .get_index(handle.model)
                .ok_or_else(|| SchemaError::ForeignHandle {
                    name: handle.schema.to_string(),
                })?;
        Ok(ModelRef {
            schema: self,
            model,
        })
    }

    /// Follow a field handle back to its field.
    pub fn resolve_field(&self, handle: FieldLink) -> Result<FieldRef<'_>> {
        let model = self.resolve_model(handle.model_link())?;
        let model = model.get();
        let (_, field) =
            model
                .fields
                .get_index(handle.field)
                .ok_or_else(|| SchemaError::ForeignHandle {
                    name: model.name.clone(),
                })?;
        Ok(FieldRef {
            schema: self,
            field,
        })
    }

    /// The model owning `field`, found through its back-reference.
    pub fn model_of(&self, field: &Field) -> Result<ModelRef<'_>> {
        let handle = field.link().ok_or_else(|| SchemaError::Unlinked {
            name: field.name.clone(),
        })?;
        self.resolve_model(handle.model_link())
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = ModelRef<'a>;
    type IntoIter = Box<dyn Iterator<Item = ModelRef<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// A model borrowed together with its schema.
#[derive(Debug, Clone, Copy)]
pub struct ModelRef<'a> {
    schema: &'a Schema,
    model: &'a Model,
}

impl<'a> ModelRef<'a> {
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn get(&self) -> &'a Model {
        self.model
    }

    pub fn field(&self, name: &str) -> Result<FieldRef<'a>> {
        Ok(FieldRef {
            schema: self.schema,
            field: self.model.field(name)?,
        })
    }

    /// Every field, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = FieldRef<'a>> + 'a {
        let schema = self.schema;
        let model = self.model;
        model
            .fields
            .values()
            .map(move |field| FieldRef { schema, field })
    }

    /// Every relationship field, in declaration order.
    pub fn relationships(&self) -> impl Iterator<Item = RelationshipRef<'a>> + 'a {
        self.fields().filter_map(|field| field.relationship())
    }

    /// The field named by `display_field`.
    pub fn display_field(&self) -> Result<FieldRef<'a>> {
        self.field(&self.model.display_field)
    }

    /// The field named by `table_link_field`.
    pub fn table_link_field(&self) -> Result<FieldRef<'a>> {
        self.field(&self.model.table_link_field)
    }
}

impl Deref for ModelRef<'_> {
    type Target = Model;

    fn deref(&self) -> &Model {
        self.model
    }
}

/// A field borrowed together with its schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    schema: &'a Schema,
    field: &'a Field,
}

impl<'a> FieldRef<'a> {
    pub fn get(&self) -> &'a Field {
        self.field
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// The owning model.
    pub fn model(&self) -> Result<ModelRef<'a>> {
        self.schema.model_of(self.field)
    }

    pub fn relationship(&self) -> Option<RelationshipRef<'a>> {
        let info = self.field.relationship()?;
        Some(RelationshipRef {
            schema: self.schema,
            info,
        })
    }
}

impl Deref for FieldRef<'_> {
    type Target = Field;

    fn deref(&self) -> &Field {
        self.field
    }
}

/// Relationship metadata borrowed together with its schema.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipRef<'a> {
    schema: &'a Schema,
    info: &'a RelationshipInfo,
}

impl<'a> RelationshipRef<'a> {
    pub fn get(&self) -> &'a RelationshipInfo {
        self.info
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    fn handle(&self) -> Result<FieldLink> {
        self.info.link().ok_or_else(|| SchemaError::Unlinked {
            name: format!("relationship to {}", self.info.target),
        })
    }

    /// The field carrying this relationship.
    pub fn field(&self) -> Result<FieldRef<'a>> {
        self.schema.resolve_field(self.handle()?)
    }

    /// The model owning the field carrying this relationship.
    pub fn model(&self) -> Result<ModelRef<'a>> {
        self.schema.resolve_model(self.handle()?.model_link())
    }

    /// The related model named by `target`.
    pub fn target_model(&self) -> Result<ModelRef<'a>> {
        self.schema.model(&self.info.target)
    }

    pub fn table_field_order(&self) -> Result<Vec<String>> {
        self.info.table_field_order(self.schema)
    }
}

impl Deref for RelationshipRef<'_> {
    type Target = RelationshipInfo;

    fn deref(&self) -> &RelationshipInfo {
        self.info
    }
}
