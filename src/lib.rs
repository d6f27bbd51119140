//! fieldgen
//!
//! Compiles declarative field-group schema definitions into generated Go
//! record declarations and an Elasticsearch index-template document.
//!
//! ## Pipeline
//!
//! ```text
//! schemas/*.yml
//!     │  schema::load_dir      parse, flatten sub-fields, promote base
//!     ▼
//! Vec<FieldSet>
//!     ├─ codegen::generate     resolve types/names, split nested groups,
//!     │                        render one .go artifact per group + version.go
//!     └─ template::generate    compile the recursive property tree into a
//!                              legacy index-template JSON document
//! ```
//!
//! The whole run is a single-threaded batch: any failure aborts before later
//! stages, and identical input plus version reproduces byte-identical output.

pub mod codegen;
pub mod config;
pub mod error;
pub mod resolve;
pub mod schema;
pub mod template;
pub mod wrap;

pub use codegen::Artifact;
pub use config::Config;
pub use error::{FieldgenError, Result};
pub use schema::{FieldDef, FieldSet};
