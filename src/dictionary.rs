//! Data dictionary generation for fields and database tables.
//!
//! Turns declarative field and table descriptions into readable documentation.
//!
//! ## Core Concepts
//!
//! - **Field catalog**: one generated paragraph per field, built from its type
//!   and constraints (length, value range, options, uniqueness, default)
//! - **Table catalog**: expanded descriptions with context inferred from the
//!   table name and description (domain, entity type, importance)
//! - **Reports**: Markdown renderings of either catalog, plus JSON export
//!
//! ## Usage
//!
//! ```no_run
//! use datadoc::dictionary::{FieldCatalog, FieldSpec, render_fields_markdown};
//! use datadoc::dictionary::storage::save_report;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut catalog = FieldCatalog::new();
//! catalog.add_field(FieldSpec {
//!     required: true,
//!     max_length: Some(100),
//!     ..FieldSpec::new("nome_completo", "string")
//! });
//!
//! let markdown = render_fields_markdown(&catalog, "Campos", &chrono::Local::now());
//! save_report(&markdown, Path::new("reports/campos.md"))?;
//! # Ok(())
//! # }
//! ```

pub mod fields;
pub mod renderer;
pub mod storage;
pub mod tables;

pub use fields::{FieldCatalog, FieldDescriptor, FieldSpec, describe_field, type_description};
pub use renderer::{render_fields_markdown, render_tables_markdown};
pub use storage::{report_path, save_json, save_report};
pub use tables::{
    Importance, TableCatalog, TableContext, TableSpec, expanded_description, friendly_name,
    infer_context, technical_considerations, usage_purposes,
};
