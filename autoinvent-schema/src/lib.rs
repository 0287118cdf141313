//! Declarative model schema with field-order resolution
//!
//! `autoinvent-schema` describes data models (entities, their fields, and
//! relationships) without any UI or query code. Consumers ask the schema which
//! fields to show or request for a given purpose and receive a deterministic,
//! ordered list of field names.
//!
//! # Architecture
//!
//! - **Declarations vs. resolved records**: `ModelDef` / `FieldDef` /
//!   `DetailTabDef` are partially specified inputs (YAML or Rust). A single
//!   defaulting pass turns them into `Model` / `Field` / `DetailTab` with every
//!   derived value filled in.
//! - **One owner**: `Schema` owns every model, each model owns its fields and
//!   tab tree. Upward navigation (field → model → schema) goes through index
//!   handles installed once by the linker.
//! - **Lazy lookups**: nothing is cross-checked at construction time. A missing
//!   field or model surfaces as a `SchemaError` from the operation that
//!   dereferences it. `Schema::diagnose()` runs every lookup on demand.
//! - **Read-only after construction**: a `Schema` is `Send + Sync`; wrap it in
//!   an `Arc` to share it between threads.
//!
//! # Example
//!
//! ```
//! use autoinvent_schema::{FieldDef, ModelDef, Schema};
//!
//! let user = ModelDef::new(
//!     "user",
//!     vec![
//!         FieldDef::new("id").with_type("id").hidden(),
//!         FieldDef::new("name"),
//!     ],
//! );
//! let schema = Schema::from_defs([user])?;
//! let model = schema.model("user")?;
//!
//! assert_eq!(model.label_plural, "Users");
//! assert_eq!(model.index_field_order()?, ["name"]);
//! assert_eq!(model.query_list_fields()?, ["id", "name"]);
//! # Ok::<(), autoinvent_schema::SchemaError>(())
//! ```

pub mod check;
pub mod error;
pub mod field;
pub mod inflect;
mod link;
pub mod loader;
pub mod model;
pub mod relationship;
mod resolve;
pub mod schema;
pub mod tabs;
pub mod types;

pub use check::Diagnostic;
pub use error::{ErrorKind, Result, SchemaError};
pub use field::{Field, FieldDef};
pub use link::{FieldLink, ModelLink, SchemaId};
pub use loader::{load_schema, load_schema_dir, load_schema_file};
pub use model::{Model, ModelDef};
pub use relationship::RelationshipInfo;
pub use schema::{FieldRef, ModelRef, RelationshipRef, Schema, SchemaDef};
pub use tabs::{DetailTab, DetailTabDef};
pub use types::{
    BuiltinType, Choice, ChoicesDef, FieldType, Keyed, QueryPurpose, RelationshipType, View,
};
