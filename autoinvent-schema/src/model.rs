//! Model declarations and their resolved form.
//!
//! Defaults cascade in a fixed order during `Model::from_def`:
//! `name` → `label` → `label_plural` → `query_list` / `query_single`, and
//! `display_field` → `table_link_field` / `query_required_fields`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::field::{Field, FieldDef};
use crate::inflect::{lower_camel, plural_noun, title_case};
use crate::link::ModelLink;
use crate::tabs::{DetailTab, DetailTabDef};
use crate::types::{Declaration, Keyed, View};

const DEFAULT_DISPLAY_FIELD: &str = "name";
const DEFAULT_ID_FIELD: &str = "id";

/// A model as declared, before defaults are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_plural: Option<String>,
    pub fields: Keyed<FieldDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_singleton: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_index: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_field_order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_link_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_can_sort: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_can_filter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_can_page: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_create: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_field_order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_in_rel_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_detail: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_in_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_tabs: Option<Vec<DetailTabDef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_field_order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_field_order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_single: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_required_fields: Option<Vec<String>>,
}

impl ModelDef {
    pub fn new(name: impl Into<String>, fields: impl Into<Keyed<FieldDef>>) -> Self {
        Self {
            name: Some(name.into()),
            fields: fields.into(),
            ..Default::default()
        }
    }

    pub fn with_display_field(mut self, field: impl Into<String>) -> Self {
        self.display_field = Some(field.into());
        self
    }

    /// Set the explicit override list for one view.
    pub fn with_view_order<I, S>(mut self, view: View, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let order = Some(order.into_iter().map(Into::into).collect());
        match view {
            View::Index => self.index_field_order = order,
            View::Create => self.create_field_order = order,
            View::Detail => self.detail_field_order = order,
            View::Tooltip => self.tooltip_field_order = order,
        }
        self
    }

    pub fn with_detail_tabs(mut self, tabs: Vec<DetailTabDef>) -> Self {
        self.detail_tabs = Some(tabs);
        self
    }

    pub fn with_required_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_required_fields = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

impl Declaration for ModelDef {
    const KIND: &'static str = "model";

    fn declared_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }
}

/// One entity type, with every default applied.
///
/// Field-order resolution lives in the `resolve` module; see
/// [`Model::index_field_order`] and friends.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub label: String,
    pub label_plural: String,
    pub fields: IndexMap<String, Field>,
    /// Base order used whenever a view has no explicit override.
    pub field_order: Vec<String>,
    /// Field whose value represents an instance.
    pub display_field: String,
    /// A singleton has one URL instead of index and detail pages.
    pub is_singleton: bool,
    pub has_index: bool,
    pub index_field_order: Option<Vec<String>>,
    /// Field linking a table row to the detail page.
    pub table_link_field: String,
    pub table_can_sort: bool,
    pub table_can_filter: bool,
    pub table_can_page: bool,
    pub has_create: bool,
    pub create_field_order: Option<Vec<String>>,
    pub has_delete: bool,
    /// Listed when checking whether a related instance is safe to delete.
    pub show_in_rel_delete: bool,
    pub has_detail: bool,
    pub show_in_search: bool,
    pub detail_tabs: Option<Vec<DetailTab>>,
    pub detail_field_order: Option<Vec<String>>,
    pub tooltip_field_order: Option<Vec<String>>,
    pub query_list: String,
    pub query_single: String,
    /// Always requested, ahead of every other field.
    pub query_required_fields: Vec<String>,

    pub(crate) link: Option<ModelLink>,
}

impl Model {
    /// Apply defaults to a declaration. The result is not linked to a schema.
    pub fn from_def(def: ModelDef) -> Result<Self> {
        let name = def.name.ok_or_else(|| SchemaError::MissingName {
            kind: ModelDef::KIND,
            scope: "model declaration".to_string(),
        })?;
        let label = def.label.unwrap_or_else(|| title_case(&name));
        let label_plural = def.label_plural.unwrap_or_else(|| plural_noun(&label));
        let query_list = def.query_list.unwrap_or_else(|| lower_camel(&label_plural));
        let query_single = def.query_single.unwrap_or_else(|| lower_camel(&label));

        let fields = def
            .fields
            .into_named(&format!("model '{name}'"))?
            .into_iter()
            .map(|(key, field)| Ok((key, Field::from_def(field)?)))
            .collect::<Result<IndexMap<_, _>>>()?;
        let field_order = def
            .field_order
            .unwrap_or_else(|| fields.keys().cloned().collect());

        let display_field = def
            .display_field
            .unwrap_or_else(|| DEFAULT_DISPLAY_FIELD.to_string());
        let table_link_field = def
            .table_link_field
            .unwrap_or_else(|| display_field.clone());
        let query_required_fields = def
            .query_required_fields
            .unwrap_or_else(|| vec![DEFAULT_ID_FIELD.to_string(), display_field.clone()]);

        let has_detail = def.has_detail.unwrap_or(true);

        Ok(Self {
            name,
            label,
            label_plural,
            fields,
            field_order,
            display_field,
            is_singleton: def.is_singleton.unwrap_or(false),
            has_index: def.has_index.unwrap_or(true),
            index_field_order: def.index_field_order,
            table_link_field,
            table_can_sort: def.table_can_sort.unwrap_or(true),
            table_can_filter: def.table_can_filter.unwrap_or(true),
            table_can_page: def.table_can_page.unwrap_or(true),
            has_create: def.has_create.unwrap_or(true),
            create_field_order: def.create_field_order,
            has_delete: def.has_delete.unwrap_or(true),
            show_in_rel_delete: def.show_in_rel_delete.unwrap_or(true),
            has_detail,
            show_in_search: def.show_in_search.unwrap_or(has_detail),
            detail_tabs: def
                .detail_tabs
                .map(|tabs| tabs.into_iter().map(DetailTab::from_def).collect()),
            detail_field_order: def.detail_field_order,
            tooltip_field_order: def.tooltip_field_order,
            query_list,
            query_single,
            query_required_fields,
            link: None,
        })
    }

    /// Handle to the owning schema, installed when the schema is linked.
    pub fn link(&self) -> Option<ModelLink> {
        self.link
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Result<&Field> {
        self.fields
            .get(name)
            .ok_or_else(|| SchemaError::field_not_found(&self.name, name))
    }

    /// The explicit override list for a view, if one is declared.
    pub fn view_override(&self, view: View) -> Option<&[String]> {
        match view {
            View::Index => self.index_field_order.as_deref(),
            View::Create => self.create_field_order.as_deref(),
            View::Detail => self.detail_field_order.as_deref(),
            View::Tooltip => self.tooltip_field_order.as_deref(),
        }
    }

    /// The value representing `instance`: its `display_field` attribute as a string.
    ///
    /// Any `Serialize` value that serializes to a map works. String values are
    /// returned bare, other scalars as JSON text, and `null` as the display
    /// field's `no_data_value`.
    pub fn display_value<T: Serialize + ?Sized>(&self, instance: &T) -> Result<String> {
        let field = self.field(&self.display_field)?;
        let value = serde_json::to_value(instance)?;
        let attr = value
            .get(&self.display_field)
            .ok_or_else(|| SchemaError::MissingAttribute {
                model: self.name.clone(),
                attribute: self.display_field.clone(),
            })?;

        Ok(match attr {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => field.no_data_value.clone().unwrap_or_default(),
            other => other.to_string(),
        })
    }

    pub(crate) fn ensure_linked(&self) -> Result<ModelLink> {
        self.link.ok_or_else(|| SchemaError::Unlinked {
            name: self.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_def() -> ModelDef {
        ModelDef::new(
            "user",
            vec![
                FieldDef::new("id").with_type("id").hidden(),
                FieldDef::new("name"),
            ],
        )
    }

    #[test]
    fn defaults_cascade_from_name() {
        let model = Model::from_def(user_def()).unwrap();
        assert_eq!(model.label, "User");
        assert_eq!(model.label_plural, "Users");
        assert_eq!(model.query_list, "users");
        assert_eq!(model.query_single, "user");
        assert_eq!(model.field_order, ["id", "name"]);
        assert_eq!(model.display_field, "name");
        assert_eq!(model.table_link_field, "name");
        assert_eq!(model.query_required_fields, ["id", "name"]);
        assert!(model.show_in_search);
        assert!(model.link().is_none());
    }

    #[test]
    fn explicit_label_feeds_later_defaults() {
        let model = Model::from_def(ModelDef {
            label: Some("Line Item".into()),
            ..ModelDef::new("order_line", Vec::<FieldDef>::new())
        })
        .unwrap();
        assert_eq!(model.label_plural, "Line Items");
        assert_eq!(model.query_list, "lineItems");
        assert_eq!(model.query_single, "lineItem");
    }

    #[test]
    fn display_field_drives_link_and_required_fields() {
        let model = Model::from_def(user_def().with_display_field("email")).unwrap();
        assert_eq!(model.table_link_field, "email");
        assert_eq!(model.query_required_fields, ["id", "email"]);

        let explicit = Model::from_def(ModelDef {
            table_link_field: Some("id".into()),
            ..user_def()
        })
        .unwrap();
        assert_eq!(explicit.table_link_field, "id");
        assert_eq!(explicit.display_field, "name");
    }

    #[test]
    fn show_in_search_follows_has_detail() {
        let model = Model::from_def(ModelDef {
            has_detail: Some(false),
            ..user_def()
        })
        .unwrap();
        assert!(!model.show_in_search);

        let forced = Model::from_def(ModelDef {
            has_detail: Some(false),
            show_in_search: Some(true),
            ..user_def()
        })
        .unwrap();
        assert!(forced.show_in_search);
    }

    #[test]
    fn duplicate_field_names_rejected() {
        let err = Model::from_def(ModelDef::new(
            "user",
            vec![FieldDef::new("name"), FieldDef::new("name")],
        ))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate field name 'name' in model 'user'"
        );
    }

    #[test]
    fn display_value_reads_attribute() {
        let model = Model::from_def(user_def()).unwrap();
        assert_eq!(
            model
                .display_value(&json!({"id": 1, "name": "admin"}))
                .unwrap(),
            "admin"
        );

        let numeric = Model::from_def(user_def().with_display_field("id")).unwrap();
        assert_eq!(numeric.display_value(&json!({"id": 7})).unwrap(), "7");
    }

    #[test]
    fn display_value_null_uses_no_data_value() {
        let model = Model::from_def(user_def()).unwrap();
        assert_eq!(model.display_value(&json!({"name": null})).unwrap(), "N/A");
    }

    #[test]
    fn display_value_missing_attribute() {
        let model = Model::from_def(user_def()).unwrap();
        let err = model.display_value(&json!({"id": 1})).unwrap_err();
        assert!(matches!(err, SchemaError::MissingAttribute { .. }));
    }

    #[test]
    fn display_value_unknown_display_field() {
        let model = Model::from_def(user_def().with_display_field("title")).unwrap();
        let err = model.display_value(&json!({"title": "x"})).unwrap_err();
        assert!(matches!(err, SchemaError::FieldNotFound { ref field, .. } if field == "title"));
    }

    #[test]
    fn fields_from_yaml_mapping() {
        let def: ModelDef = serde_yaml_ng::from_str(
            r#"
name: tag
fields:
  id:
    type: id
  name: {}
  color:
    choices: [red, green]
"#,
        )
        .unwrap();
        let model = Model::from_def(def).unwrap();
        assert_eq!(model.field_order, ["id", "name", "color"]);
        assert_eq!(model.fields["color"].choices.as_ref().unwrap().len(), 2);
    }
}
