//! Field declarations and their resolved form.
//!
//! A `FieldDef` is what a schema author writes: every attribute except the
//! name is optional. `Field::from_def` fills in the defaults once, so the
//! resolver only ever reads plain values.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SchemaError};
use crate::inflect::title_case;
use crate::link::FieldLink;
use crate::relationship::RelationshipInfo;
use crate::types::{Choice, ChoicesDef, Declaration, FieldType, QueryPurpose, View};

const DEFAULT_NO_DATA_VALUE: &str = "N/A";

/// Distinguish an explicit `null` (`Some(None)`) from a missing key (`None`).
fn explicit_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A field as declared, before defaults are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<FieldType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_attribute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<ChoicesDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_help: Option<String>,
    #[serde(
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub no_data_value: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_sort: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_filter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_edit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_collapse: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_index: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_create: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_detail: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_tooltip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_list_include: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_single_include: Option<bool>,
    #[serde(rename = "virtual", skip_serializing_if = "Option::is_none")]
    pub is_virtual: Option<bool>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, type_: impl Into<FieldType>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_choices(mut self, choices: ChoicesDef) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Hide from the index, create and detail views.
    pub fn hidden(mut self) -> Self {
        self.show_index = Some(false);
        self.show_create = Some(false);
        self.show_detail = Some(false);
        self
    }

    /// Set the `show_<view>` flag for one view.
    pub fn show(mut self, view: View, show: bool) -> Self {
        let slot = match view {
            View::Index => &mut self.show_index,
            View::Create => &mut self.show_create,
            View::Detail => &mut self.show_detail,
            View::Tooltip => &mut self.show_tooltip,
        };
        *slot = Some(show);
        self
    }

    /// Set the `query_<purpose>_include` flag for one query.
    pub fn include_in(mut self, purpose: QueryPurpose, include: bool) -> Self {
        let slot = match purpose {
            QueryPurpose::List => &mut self.query_list_include,
            QueryPurpose::Single => &mut self.query_single_include,
        };
        *slot = Some(include);
        self
    }

    /// Mark as UI-only; never requested by queries.
    pub fn virtual_field(mut self) -> Self {
        self.is_virtual = Some(true);
        self
    }
}

impl Declaration for FieldDef {
    const KIND: &'static str = "field";

    fn declared_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }
}

/// One attribute or relationship slot on a model, with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub type_: FieldType,
    /// Rendered as a key/value attribute rather than a relationship table.
    pub is_attribute: bool,
    pub choices: Option<Vec<Choice>>,
    pub label: String,
    pub label_help: Option<String>,
    /// Shown when the value is missing. `None` shows nothing.
    pub no_data_value: Option<String>,
    pub input_help: Option<String>,
    pub is_disabled: bool,
    pub can_sort: bool,
    pub can_filter: bool,
    pub can_edit: bool,
    pub can_collapse: bool,
    pub show_index: bool,
    pub show_create: bool,
    pub show_detail: bool,
    pub show_tooltip: bool,
    pub query_list_include: bool,
    pub query_single_include: bool,
    /// Exists for local UI behaviour only; never part of a query.
    pub is_virtual: bool,

    pub(crate) link: Option<FieldLink>,
}

impl Field {
    /// Apply defaults to a declaration.
    pub fn from_def(def: FieldDef) -> Result<Self> {
        let name = def.name.ok_or_else(|| SchemaError::MissingName {
            kind: FieldDef::KIND,
            scope: "field declaration".to_string(),
        })?;
        let type_ = def.type_.unwrap_or_default();
        let is_attribute = def
            .is_attribute
            .unwrap_or_else(|| type_.is_attribute_by_default());
        let label = def.label.unwrap_or_else(|| title_case(&name));

        Ok(Self {
            is_attribute,
            choices: def.choices.map(ChoicesDef::normalize),
            label,
            label_help: def.label_help,
            no_data_value: def
                .no_data_value
                .unwrap_or_else(|| Some(DEFAULT_NO_DATA_VALUE.to_string())),
            input_help: def.input_help,
            is_disabled: def.is_disabled.unwrap_or(false),
            can_sort: def.can_sort.unwrap_or(true),
            can_filter: def.can_filter.unwrap_or(true),
            can_edit: def.can_edit.unwrap_or(true),
            can_collapse: def.can_collapse.unwrap_or(true),
            show_index: def.show_index.unwrap_or(true),
            show_create: def.show_create.unwrap_or(true),
            show_detail: def.show_detail.unwrap_or(true),
            show_tooltip: def.show_tooltip.unwrap_or(false),
            query_list_include: def.query_list_include.unwrap_or(true),
            query_single_include: def.query_single_include.unwrap_or(true),
            is_virtual: def.is_virtual.unwrap_or(false),
            name,
            type_,
            link: None,
        })
    }

    pub fn relationship(&self) -> Option<&RelationshipInfo> {
        self.type_.relationship()
    }

    /// Handle to the owning model and schema, installed when the schema is linked.
    pub fn link(&self) -> Option<FieldLink> {
        self.link
    }

    pub fn shows_in(&self, view: View) -> bool {
        view.show_flag()(self)
    }

    /// Whether a query for `purpose` requests this field when no override applies.
    pub fn queried_for(&self, purpose: QueryPurpose) -> bool {
        !self.is_virtual && (self.shows_in(purpose.view()) || purpose.include_flag()(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RelationshipType;

    #[test]
    fn defaults_applied() {
        let field = Field::from_def(FieldDef::new("first_name")).unwrap();
        assert_eq!(field.label, "First Name");
        assert_eq!(field.type_.tag(), Some("string"));
        assert!(field.is_attribute);
        assert_eq!(field.no_data_value.as_deref(), Some("N/A"));
        assert!(field.show_index && field.show_create && field.show_detail);
        assert!(!field.show_tooltip);
        assert!(field.query_list_include && field.query_single_include);
        assert!(!field.is_virtual);
        assert!(field.link().is_none());
    }

    #[test]
    fn relationship_attribute_default_depends_on_direction() {
        let to_one = Field::from_def(
            FieldDef::new("author")
                .with_type(RelationshipInfo::new(RelationshipType::ManyToOne, "user")),
        )
        .unwrap();
        assert!(to_one.is_attribute);

        let to_many = Field::from_def(
            FieldDef::new("posts")
                .with_type(RelationshipInfo::new(RelationshipType::OneToMany, "post")),
        )
        .unwrap();
        assert!(!to_many.is_attribute);

        let forced = Field::from_def(FieldDef {
            is_attribute: Some(true),
            ..FieldDef::new("tags")
                .with_type(RelationshipInfo::new(RelationshipType::ManyToMany, "tag"))
        })
        .unwrap();
        assert!(forced.is_attribute);
    }

    #[test]
    fn choices_normalized() {
        let field = Field::from_def(
            FieldDef::new("color").with_choices(ChoicesDef::values(["red", "green"])),
        )
        .unwrap();
        assert_eq!(
            field.choices.unwrap(),
            vec![Choice::new("red", "red"), Choice::new("green", "green")]
        );
    }

    #[test]
    fn no_data_value_null_vs_missing() {
        let explicit: FieldDef = serde_yaml_ng::from_str("name: note\nno_data_value: null\n").unwrap();
        assert_eq!(explicit.no_data_value, Some(None));
        assert_eq!(Field::from_def(explicit).unwrap().no_data_value, None);

        let missing: FieldDef = serde_yaml_ng::from_str("name: note\n").unwrap();
        assert_eq!(missing.no_data_value, None);

        let custom: FieldDef = serde_yaml_ng::from_str("name: note\nno_data_value: '-'\n").unwrap();
        assert_eq!(
            Field::from_def(custom).unwrap().no_data_value.as_deref(),
            Some("-")
        );
    }

    #[test]
    fn virtual_key_in_yaml() {
        let def: FieldDef = serde_yaml_ng::from_str("name: preview\nvirtual: true\n").unwrap();
        let field = Field::from_def(def).unwrap();
        assert!(field.is_virtual);
        assert!(!field.queried_for(QueryPurpose::List));
    }

    #[test]
    fn queried_for_uses_view_or_include_flag() {
        let hidden_but_fetched = Field::from_def(
            FieldDef::new("secret_code").show(View::Index, false),
        )
        .unwrap();
        assert!(hidden_but_fetched.queried_for(QueryPurpose::List));

        let hidden_and_skipped = Field::from_def(
            FieldDef::new("blob")
                .show(View::Index, false)
                .include_in(QueryPurpose::List, false),
        )
        .unwrap();
        assert!(!hidden_and_skipped.queried_for(QueryPurpose::List));
        assert!(hidden_and_skipped.queried_for(QueryPurpose::Single));
    }

    #[test]
    fn missing_name_is_an_error() {
        let err = Field::from_def(FieldDef::default()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingName { kind: "field", .. }));
    }
}
