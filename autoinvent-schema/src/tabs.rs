//! Detail-page tabs and their flattening into one field order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::field::Field;
use crate::inflect::title_case;

/// A detail tab as declared.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DetailTabDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabs: Option<Vec<DetailTabDef>>,
}

impl DetailTabDef {
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            label: None,
            fields: fields.into_iter().map(Into::into).collect(),
            tabs: None,
        }
    }

    pub fn with_tabs(mut self, tabs: Vec<DetailTabDef>) -> Self {
        self.tabs = Some(tabs);
        self
    }
}

/// A named grouping of fields on the detail page.
///
/// A tab with no fields and no sub-tabs is a placeholder for custom UI.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailTab {
    pub name: String,
    pub label: String,
    pub fields: Vec<String>,
    pub tabs: Option<Vec<DetailTab>>,
}

impl DetailTab {
    pub fn from_def(def: DetailTabDef) -> Self {
        let label = def.label.unwrap_or_else(|| title_case(&def.name));
        Self {
            label,
            name: def.name,
            fields: def.fields,
            tabs: def
                .tabs
                .map(|tabs| tabs.into_iter().map(DetailTab::from_def).collect()),
        }
    }
}

/// Linearize a tab tree: each tab's own fields, then its sub-tabs, in order.
///
/// Names are returned as encountered, repeats included, but each must exist in
/// `fields`. Tab names are labels only and may repeat anywhere in the tree.
pub fn flatten_tabs(
    model: &str,
    fields: &IndexMap<String, Field>,
    tabs: &[DetailTab],
) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for tab in tabs {
        flatten_into(model, fields, tab, &mut out)?;
    }
    Ok(out)
}

fn flatten_into(
    model: &str,
    fields: &IndexMap<String, Field>,
    tab: &DetailTab,
    out: &mut Vec<String>,
) -> Result<()> {
    for name in &tab.fields {
        if !fields.contains_key(name) {
            return Err(SchemaError::TabFieldNotFound {
                model: model.to_string(),
                tab: tab.name.clone(),
                field: name.clone(),
            });
        }
        out.push(name.clone());
    }

    for child in tab.tabs.iter().flatten() {
        flatten_into(model, fields, child, out)?;
    }

    Ok(())
}
