//! Opt-in whole-schema diagnostics.
//!
//! Construction never cross-checks names. `Schema::diagnose` runs every lookup
//! a consumer could trigger and reports each failure instead of stopping at
//! the first.

use tracing::{debug, warn};

use crate::error::{ErrorKind, SchemaError};
use crate::schema::{ModelRef, Schema};
use crate::types::{QueryPurpose, View};

/// One failed lookup found by [`Schema::diagnose`].
#[derive(Debug)]
pub struct Diagnostic {
    pub model: String,
    /// Set when the failure belongs to a single field, e.g. a relationship's table order.
    pub field: Option<String>,
    /// The operation that failed, e.g. `index_field_order`.
    pub check: String,
    pub error: SchemaError,
}

impl Diagnostic {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}.{} ({}): {}", self.model, field, self.check, self.error),
            None => write!(f, "{} ({}): {}", self.model, self.check, self.error),
        }
    }
}

impl Schema {
    /// Run every resolver, relationship table order and field reference.
    pub fn diagnose(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        for model in self.iter() {
            diagnose_model(model, &mut out);
        }

        if out.is_empty() {
            debug!(models = self.models().len(), "schema diagnostics clean");
        } else {
            warn!(problems = out.len(), "schema diagnostics found problems");
        }
        out
    }
}

fn diagnose_model(model: ModelRef<'_>, out: &mut Vec<Diagnostic>) {
    let mut record = |field: Option<&str>, check: String, error: SchemaError| {
        out.push(Diagnostic {
            model: model.name.clone(),
            field: field.map(str::to_string),
            check,
            error,
        });
    };

    for view in View::ALL {
        if let Err(error) = model.view_field_order(view) {
            record(None, format!("{}_field_order", view.as_str()), error);
        }
    }
    for purpose in QueryPurpose::ALL {
        if let Err(error) = model.query_fields(purpose) {
            record(None, format!("query_{}_fields", purpose.as_str()), error);
        }
    }
    if let Err(error) = model.display_field() {
        record(None, "display_field".to_string(), error);
    }
    if let Err(error) = model.table_link_field() {
        record(None, "table_link_field".to_string(), error);
    }

    for field in model.fields() {
        let Some(rel) = field.relationship() else {
            continue;
        };
        if let Err(error) = rel.target_model() {
            record(Some(field.name.as_str()), "target".to_string(), error);
        } else if let Err(error) = rel.table_field_order() {
            record(Some(field.name.as_str()), "table_field_order".to_string(), error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDef;
    use crate::model::ModelDef;
    use crate::relationship::RelationshipInfo;
    use crate::tabs::DetailTabDef;
    use crate::types::RelationshipType;

    #[test_log::test]
    fn clean_schema_has_no_diagnostics() {
        let schema = Schema::from_defs([ModelDef::new(
            "user",
            vec![FieldDef::new("id").hidden(), FieldDef::new("name")],
        )])
        .unwrap();
        assert!(schema.diagnose().is_empty());
    }

    #[test_log::test]
    fn collects_every_failure() {
        let post = ModelDef::new(
            "post",
            vec![
                FieldDef::new("id"),
                FieldDef::new("title"),
                FieldDef::new("tags").with_type(RelationshipInfo::new(
                    RelationshipType::ManyToMany,
                    "tag",
                )),
            ],
        )
        .with_display_field("title")
        .with_view_order(View::Tooltip, ["summary"])
        .with_detail_tabs(vec![DetailTabDef::new("main", ["ghost"])]);
        let schema = Schema::from_defs([post]).unwrap();

        let problems = schema.diagnose();
        let checks: Vec<_> = problems.iter().map(|d| d.check.as_str()).collect();
        assert_eq!(
            checks,
            ["detail_field_order", "tooltip_field_order", "query_single_fields", "target"]
        );
        assert_eq!(problems[3].field.as_deref(), Some("tags"));
        assert_eq!(problems[0].kind(), ErrorKind::Configuration);
        assert_eq!(problems[3].kind(), ErrorKind::Lookup);
        assert!(problems[1].to_string().starts_with("post (tooltip_field_order): "));
    }

    #[test]
    fn missing_display_field_reported() {
        let schema = Schema::from_defs([ModelDef::new(
            "tag",
            vec![FieldDef::new("id"), FieldDef::new("label")],
        )])
        .unwrap();
        let checks: Vec<_> = schema
            .diagnose()
            .into_iter()
            .map(|d| d.check)
            .collect();
        assert_eq!(
            checks,
            ["query_list_fields", "query_single_fields", "display_field", "table_link_field"]
        );
    }
}
