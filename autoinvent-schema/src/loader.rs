//! Loading schema declarations from YAML on disk.
//!
//! A schema is either one file holding `{models: ...}` or a directory with one
//! model per `*.yaml` file. In a directory the file stem names the model when
//! the document omits `name`, and files load in file-name order.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::model::ModelDef;
use crate::schema::{Schema, SchemaDef};
use crate::types::Declaration;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

async fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).await?;
    serde_yaml_ng::from_str(&content).map_err(|source| SchemaError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a schema from a file or a directory.
pub async fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let meta = fs::metadata(path)
        .await
        .map_err(|_| SchemaError::NotFound {
            path: path.to_path_buf(),
        })?;
    if meta.is_dir() {
        load_schema_dir(path).await
    } else {
        load_schema_file(path).await
    }
}

/// Load a schema from a single YAML document.
pub async fn load_schema_file(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    if !fs::try_exists(path).await? {
        return Err(SchemaError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let def: SchemaDef = read_yaml(path).await?;
    debug!(?path, "loaded schema file");
    Schema::from_def(def)
}

/// Load a schema from a directory of per-model YAML files.
pub async fn load_schema_dir(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    if !fs::try_exists(path).await? {
        return Err(SchemaError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut files: Vec<PathBuf> = Vec::new();
    let mut entries = fs::read_dir(path).await?;
    while let Some(entry) = entries.next_entry().await? {
        let file = entry.path();
        if is_yaml(&file) && entry.file_type().await?.is_file() {
            files.push(file);
        }
    }
    files.sort();

    let mut defs = Vec::with_capacity(files.len());
    for file in &files {
        let mut def: ModelDef = read_yaml(file).await?;
        if def.declared_name().is_none() {
            if let Some(stem) = file.file_stem().and_then(|s| s.to_str()) {
                def.set_name(stem.to_string());
            }
        }
        defs.push(def);
    }

    debug!(?path, models = defs.len(), "loaded schema directory");
    Schema::from_defs(defs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BLOG: &str = r#"
models:
  user:
    fields:
      id: {type: id, show_index: false, show_create: false, show_detail: false}
      name: {}
  post:
    fields:
      - name: id
        type: id
      - name: name
      - name: author
        type: {type: many_to_one, target: user}
"#;

    #[tokio::test]
    async fn loads_single_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("schema.yaml");
        std::fs::write(&file, BLOG).unwrap();

        let schema = load_schema(&file).await.unwrap();
        assert_eq!(schema.models().len(), 2);
        let user = schema.model("user").unwrap();
        assert_eq!(user.index_field_order().unwrap(), ["name"]);
    }

    #[tokio::test]
    async fn loads_directory_in_file_name_order() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b_post.yaml"), "name: post\nfields: {name: {}}\n")
            .unwrap();
        std::fs::write(tmp.path().join("a_user.yml"), "fields: {name: {}}\n").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "not yaml").unwrap();

        let schema = load_schema(tmp.path()).await.unwrap();
        assert_eq!(
            schema.models().keys().collect::<Vec<_>>(),
            ["a_user", "post"]
        );
    }

    #[tokio::test]
    async fn parse_error_carries_path() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("broken.yaml");
        std::fs::write(&file, "models: [1, 2").unwrap();

        let err = load_schema_file(&file).await.unwrap_err();
        match err {
            SchemaError::Yaml { path, .. } => assert_eq!(path, file),
            other => panic!("expected yaml error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_path_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = load_schema(tmp.path().join("nope")).await.unwrap_err();
        assert!(matches!(err, SchemaError::NotFound { .. }));
    }

    #[tokio::test]
    async fn empty_directory_gives_empty_schema() {
        let tmp = TempDir::new().unwrap();
        let schema = load_schema_dir(tmp.path()).await.unwrap();
        assert!(schema.models().is_empty());
    }
}
