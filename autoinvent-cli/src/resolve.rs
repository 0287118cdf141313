//! `autoinvent resolve` - dump every model's resolved orders.

use std::path::Path;

use autoinvent_schema::{load_schema, ModelRef, Schema};
use serde::Serialize;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::Result;

/// Resolved view and query orders for one model.
#[derive(Debug, Serialize, PartialEq)]
pub struct ResolvedOrders {
    pub index: Vec<String>,
    pub create: Vec<String>,
    pub detail: Vec<String>,
    pub tooltip: Vec<String>,
    pub query_list: Vec<String>,
    pub query_single: Vec<String>,
}

/// Defaulted names and resolved orders for one model.
#[derive(Debug, Serialize, PartialEq)]
pub struct ModelReport {
    pub name: String,
    pub label: String,
    pub label_plural: String,
    pub display_field: String,
    pub table_link_field: String,
    pub query_list: String,
    pub query_single: String,
    pub show_in_search: bool,
    pub orders: ResolvedOrders,
}

impl ModelReport {
    pub fn from_model(model: ModelRef<'_>) -> Result<Self> {
        Ok(Self {
            name: model.name.clone(),
            label: model.label.clone(),
            label_plural: model.label_plural.clone(),
            display_field: model.display_field.clone(),
            table_link_field: model.table_link_field.clone(),
            query_list: model.query_list.clone(),
            query_single: model.query_single.clone(),
            show_in_search: model.show_in_search,
            orders: ResolvedOrders {
                index: model.index_field_order()?,
                create: model.create_field_order()?,
                detail: model.detail_field_order()?,
                tooltip: model.tooltip_field_order()?,
                query_list: model.query_list_fields()?,
                query_single: model.query_single_fields()?,
            },
        })
    }
}

/// Build reports for one model, or every model in declaration order.
pub fn build_reports(schema: &Schema, model: Option<&str>) -> Result<Vec<ModelReport>> {
    match model {
        Some(name) => Ok(vec![ModelReport::from_model(schema.model(name)?)?]),
        None => schema.iter().map(ModelReport::from_model).collect(),
    }
}

pub fn render(reports: &[ModelReport], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(reports)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(reports)?,
    })
}

/// Run the resolve command.
pub async fn run_resolve(path: &Path, model: Option<&str>, format: OutputFormat) -> Result<()> {
    let schema = load_schema(path).await?;
    let reports = build_reports(&schema, model)?;
    debug!(models = reports.len(), %format, "rendering resolved orders");
    println!("{}", render(&reports, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoinvent_schema::{FieldDef, ModelDef};

    fn schema() -> Schema {
        Schema::from_defs([
            ModelDef::new(
                "user",
                vec![
                    FieldDef::new("id").with_type("id").hidden(),
                    FieldDef::new("name"),
                ],
            ),
            ModelDef::new("tag", vec![FieldDef::new("id"), FieldDef::new("name")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_report_for_user() {
        let reports = build_reports(&schema(), Some("user")).unwrap();
        assert_eq!(reports.len(), 1);
        let user = &reports[0];
        assert_eq!(user.label_plural, "Users");
        assert_eq!(user.query_list, "users");
        assert_eq!(user.orders.index, ["name"]);
        assert!(user.orders.tooltip.is_empty());
        assert_eq!(user.orders.query_single, ["id", "name"]);
    }

    #[test]
    fn test_reports_for_all_models_in_order() {
        let reports = build_reports(&schema(), None).unwrap();
        let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["user", "tag"]);
    }

    #[test]
    fn test_unknown_model() {
        assert!(build_reports(&schema(), Some("post")).is_err());
    }

    #[test]
    fn test_render_json() {
        let reports = build_reports(&schema(), Some("user")).unwrap();
        let out = render(&reports, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["orders"]["query_list"][0], "id");
    }

    #[test]
    fn test_render_yaml() {
        let reports = build_reports(&schema(), Some("tag")).unwrap();
        let out = render(&reports, OutputFormat::Yaml).unwrap();
        assert!(out.contains("label_plural: Tags"));
    }
}
