//! Shared vocabulary for schema declarations.
//!
//! Field types are opaque tags or relationship metadata. Views and query
//! purposes are closed enums that map onto the per-field visibility and
//! inclusion flags.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::field::Field;
use crate::relationship::RelationshipInfo;

/// Size and direction of a relationship between two models.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    ManyToOne,
    OneToMany,
    ManyToMany,
    OneToOne,
}

impl RelationshipType {
    /// Whether the relationship points at a single related instance.
    pub fn is_to_one(self) -> bool {
        matches!(self, RelationshipType::ManyToOne | RelationshipType::OneToOne)
    }
}

/// Built-in type tags understood by generated UIs.
///
/// Fields store these as plain tags; custom tags are equally valid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinType {
    String,
    Textarea,
    Password,
    Integer,
    Float,
    DateTime,
    Date,
    Color,
    Url,
    Email,
    Phone,
    Currency,
    File,
    Boolean,
    Radio,
    Checkbox,
    CreatableSelect,
    Id,
}

impl BuiltinType {
    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinType::String => "string",
            BuiltinType::Textarea => "textarea",
            BuiltinType::Password => "password",
            BuiltinType::Integer => "integer",
            BuiltinType::Float => "float",
            BuiltinType::DateTime => "date_time",
            BuiltinType::Date => "date",
            BuiltinType::Color => "color",
            BuiltinType::Url => "url",
            BuiltinType::Email => "email",
            BuiltinType::Phone => "phone",
            BuiltinType::Currency => "currency",
            BuiltinType::File => "file",
            BuiltinType::Boolean => "boolean",
            BuiltinType::Radio => "radio",
            BuiltinType::Checkbox => "checkbox",
            BuiltinType::CreatableSelect => "creatable_select",
            BuiltinType::Id => "id",
        }
    }
}

/// The type of a field: an opaque tag or a relationship to another model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldType {
    Tag(String),
    Relationship(RelationshipInfo),
}

impl FieldType {
    /// Plain tags and to-one relationships are attributes unless declared otherwise.
    pub fn is_attribute_by_default(&self) -> bool {
        match self {
            FieldType::Tag(_) => true,
            FieldType::Relationship(rel) => rel.kind.is_to_one(),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            FieldType::Tag(tag) => Some(tag),
            FieldType::Relationship(_) => None,
        }
    }

    pub fn relationship(&self) -> Option<&RelationshipInfo> {
        match self {
            FieldType::Tag(_) => None,
            FieldType::Relationship(rel) => Some(rel),
        }
    }

    pub(crate) fn relationship_mut(&mut self) -> Option<&mut RelationshipInfo> {
        match self {
            FieldType::Tag(_) => None,
            FieldType::Relationship(rel) => Some(rel),
        }
    }
}

impl Default for FieldType {
    fn default() -> Self {
        BuiltinType::String.into()
    }
}

impl From<BuiltinType> for FieldType {
    fn from(value: BuiltinType) -> Self {
        FieldType::Tag(value.as_str().to_string())
    }
}

impl From<&str> for FieldType {
    fn from(value: &str) -> Self {
        FieldType::Tag(value.to_string())
    }
}

impl From<RelationshipInfo> for FieldType {
    fn from(value: RelationshipInfo) -> Self {
        FieldType::Relationship(value)
    }
}

/// One allowed value of a field, with its user-facing label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declared choices, in any of the accepted shorthand forms.
///
/// ```yaml
/// choices: [red, green]            # value and label are the same
/// choices: {red: Red, green: Green}
/// choices: [[red, Red], [green, Green]]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChoicesDef {
    Values(Vec<String>),
    Pairs(Vec<(String, String)>),
    Full(Vec<Choice>),
    Labels(IndexMap<String, String>),
}

impl ChoicesDef {
    /// Choices whose labels equal their values.
    pub fn values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ChoicesDef::Values(values.into_iter().map(Into::into).collect())
    }

    /// Choices as `(value, label)` pairs, in order.
    pub fn labels<I, V, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        ChoicesDef::Labels(
            pairs
                .into_iter()
                .map(|(v, l)| (v.into(), l.into()))
                .collect(),
        )
    }

    /// Normalize to the canonical ordered list of choices.
    pub fn normalize(self) -> Vec<Choice> {
        match self {
            ChoicesDef::Values(values) => values
                .into_iter()
                .map(|v| Choice {
                    label: v.clone(),
                    value: v,
                })
                .collect(),
            ChoicesDef::Pairs(pairs) => pairs
                .into_iter()
                .map(|(value, label)| Choice { value, label })
                .collect(),
            ChoicesDef::Full(choices) => choices,
            ChoicesDef::Labels(map) => map
                .into_iter()
                .map(|(value, label)| Choice { value, label })
                .collect(),
        }
    }
}

/// A UI context whose field order can be resolved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Index,
    Create,
    Detail,
    Tooltip,
}

impl View {
    pub const ALL: [View; 4] = [View::Index, View::Create, View::Detail, View::Tooltip];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Index => "index",
            View::Create => "create",
            View::Detail => "detail",
            View::Tooltip => "tooltip",
        }
    }

    /// Accessor for the field's `show_<view>` flag.
    pub fn show_flag(self) -> fn(&Field) -> bool {
        match self {
            View::Index => |f| f.show_index,
            View::Create => |f| f.show_create,
            View::Detail => |f| f.show_detail,
            View::Tooltip => |f| f.show_tooltip,
        }
    }
}

/// A data-fetch context layered on top of a view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QueryPurpose {
    List,
    Single,
}

impl QueryPurpose {
    pub const ALL: [QueryPurpose; 2] = [QueryPurpose::List, QueryPurpose::Single];

    pub fn as_str(self) -> &'static str {
        match self {
            QueryPurpose::List => "list",
            QueryPurpose::Single => "single",
        }
    }

    /// The view whose visibility flags this query also honours.
    pub fn view(self) -> View {
        match self {
            QueryPurpose::List => View::Index,
            QueryPurpose::Single => View::Detail,
        }
    }

    /// Accessor for the field's `query_<purpose>_include` flag.
    pub fn include_flag(self) -> fn(&Field) -> bool {
        match self {
            QueryPurpose::List => |f| f.query_list_include,
            QueryPurpose::Single => |f| f.query_single_include,
        }
    }
}

/// A declaration that carries its own name.
pub trait Declaration {
    /// Used in error messages: `"model"`, `"field"`.
    const KIND: &'static str;

    fn declared_name(&self) -> Option<&str>;

    fn set_name(&mut self, name: String);
}

/// A collection of named declarations given either as a list or as a mapping.
///
/// List entries must name themselves and names must be unique. Mapping entries
/// take their name from the key when they omit it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Keyed<T> {
    List(Vec<T>),
    Map(IndexMap<String, T>),
}

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Keyed::List(Vec::new())
    }
}

impl<T> From<Vec<T>> for Keyed<T> {
    fn from(value: Vec<T>) -> Self {
        Keyed::List(value)
    }
}

impl<T> From<IndexMap<String, T>> for Keyed<T> {
    fn from(value: IndexMap<String, T>) -> Self {
        Keyed::Map(value)
    }
}

impl<T: Declaration> Keyed<T> {
    /// Normalize to an insertion-ordered mapping keyed by name.
    ///
    /// `scope` names the container in error messages.
    pub fn into_named(self, scope: &str) -> Result<IndexMap<String, T>> {
        let mut out = IndexMap::new();
        match self {
            Keyed::List(items) => {
                for item in items {
                    let name = item
                        .declared_name()
                        .ok_or_else(|| SchemaError::MissingName {
                            kind: T::KIND,
                            scope: scope.to_string(),
                        })?
                        .to_string();
                    if out.contains_key(&name) {
                        return Err(SchemaError::DuplicateName {
                            kind: T::KIND,
                            scope: scope.to_string(),
                            name,
                        });
                    }
                    out.insert(name, item);
                }
            }
            Keyed::Map(items) => {
                for (key, mut item) in items {
                    match item.declared_name() {
                        Some(name) if name != key => {
                            return Err(SchemaError::NameMismatch {
                                kind: T::KIND,
                                key,
                                name: name.to_string(),
                            });
                        }
                        Some(_) => {}
                        None => item.set_name(key.clone()),
                    }
                    out.insert(key, item);
                }
            }
        }
        Ok(out)
    }
}
