//! `autoinvent table` - embedded-table columns for a relationship field.

use std::path::Path;

use autoinvent_schema::{load_schema, Schema};
use comfy_table::Table;

use crate::error::{CliError, Result};
use crate::table::new_table;

/// Target-model columns for `model.field`, with each column's label.
pub fn relationship_columns(
    schema: &Schema,
    model: &str,
    field: &str,
) -> Result<Vec<(String, String)>> {
    let field_ref = schema.model(model)?.field(field)?;
    let rel = field_ref
        .relationship()
        .ok_or_else(|| CliError::NotRelationship {
            model: model.to_string(),
            field: field.to_string(),
        })?;
    let target = rel.target_model()?;

    rel.table_field_order()?
        .into_iter()
        .map(|name| -> Result<(String, String)> {
            let label = target.field(&name)?.label.clone();
            Ok((name, label))
        })
        .collect()
}

pub fn render_columns(columns: &[(String, String)]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Field", "Label"]);
    for (i, (name, label)) in columns.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), name.clone(), label.clone()]);
    }
    table
}

/// Run the table command.
pub async fn run_table(path: &Path, model: &str, field: &str) -> Result<()> {
    let schema = load_schema(path).await?;
    let columns = relationship_columns(&schema, model, field)?;
    if columns.is_empty() {
        println!("No columns for {model}.{field}.");
    } else {
        println!("{}", render_columns(&columns));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoinvent_schema::{FieldDef, ModelDef, RelationshipInfo, RelationshipType};

    fn schema() -> Schema {
        Schema::from_defs([
            ModelDef::new(
                "user",
                vec![
                    FieldDef::new("id").hidden(),
                    FieldDef::new("name").with_label("Full Name"),
                    FieldDef::new("email"),
                ],
            ),
            ModelDef::new(
                "post",
                vec![
                    FieldDef::new("id"),
                    FieldDef::new("name"),
                    FieldDef::new("author").with_type(RelationshipInfo::new(
                        RelationshipType::ManyToOne,
                        "user",
                    )),
                    FieldDef::new("reviewer").with_type(
                        RelationshipInfo::new(RelationshipType::ManyToOne, "user")
                            .with_table_field_order(["email"]),
                    ),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_columns_fall_back_to_target_index_order() {
        let columns = relationship_columns(&schema(), "post", "author").unwrap();
        assert_eq!(
            columns,
            vec![
                ("name".to_string(), "Full Name".to_string()),
                ("email".to_string(), "Email".to_string())
            ]
        );
    }

    #[test]
    fn test_explicit_columns() {
        let columns = relationship_columns(&schema(), "post", "reviewer").unwrap();
        assert_eq!(columns, vec![("email".to_string(), "Email".to_string())]);
    }

    #[test]
    fn test_plain_field_is_rejected() {
        let err = relationship_columns(&schema(), "post", "name").unwrap_err();
        assert!(matches!(err, CliError::NotRelationship { .. }));
    }

    #[test]
    fn test_render_columns() {
        let columns = relationship_columns(&schema(), "post", "author").unwrap();
        let rendered = render_columns(&columns).to_string();
        assert!(rendered.contains("Full Name"));
    }
}
