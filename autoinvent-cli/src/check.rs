//! `autoinvent check` - report every lookup failure in a schema.

use std::path::Path;

use autoinvent_schema::{load_schema, Diagnostic, ErrorKind};
use comfy_table::Table;

use crate::error::{CliError, Result};
use crate::table::new_table;

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Lookup => "lookup",
        ErrorKind::Configuration => "configuration",
        ErrorKind::Structural => "structural",
        ErrorKind::Io => "io",
    }
}

pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Model", "Field", "Check", "Kind", "Problem"]);
    for d in diagnostics {
        table.add_row(vec![
            d.model.clone(),
            d.field.clone().unwrap_or_default(),
            d.check.clone(),
            kind_label(d.kind()).to_string(),
            d.error.to_string(),
        ]);
    }
    table
}

/// Run the check command. Problems are printed, then returned as an error.
pub async fn run_check(path: &Path) -> Result<()> {
    let schema = load_schema(path).await?;
    let diagnostics = schema.diagnose();
    if diagnostics.is_empty() {
        println!("{} model(s), no problems found.", schema.models().len());
        return Ok(());
    }

    println!("{}", render_diagnostics(&diagnostics));
    Err(CliError::ProblemsFound {
        count: diagnostics.len(),
    })
}
