//! emmyjar: EmmyLua annotation stub generator for Java APIs
//!
//! Parses Java sources (source jars or directories of `.java` files) with
//! tree-sitter and emits one EmmyLua/LuaCATS annotation stub per class,
//! interface, or enum, plus an aggregate `imports.lua` alias index. Lua
//! scripts written against the Java API then get autocomplete and type
//! checking without any change to the API itself.
//!
//! # Example
//!
//! ```ignore
//! use emmyjar::{collect_sources, emit_stub, extract_declarations, scan_unit};
//! use emmyjar::{ProjectIndex, UnitResolver};
//!
//! let units = collect_sources(&[std::path::PathBuf::from("api-sources.jar")])?;
//! let parsed: Vec<_> = units
//!     .into_iter()
//!     .filter_map(|u| scan_unit(u).ok())
//!     .collect();
//! let index = ProjectIndex::from_units(&parsed);
//! for unit in &parsed {
//!     let resolver = UnitResolver::new(&index, &unit.package, &unit.imports);
//!     for decl in extract_declarations(unit, &resolver) {
//!         println!("{}", emit_stub(&decl));
//!     }
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod emit;
pub mod error;
pub mod extract;
pub mod javadoc;
pub mod resolve;
pub mod schema;
pub mod sources;
pub mod typemap;

// Re-export commonly used types
pub use cli::{Cli, Commands, OutputFormat};
pub use emit::{emit_imports_index, emit_stub, stub_file_name};
pub use error::{Result, StubGenError};
pub use extract::{extract_declarations, parse_java, scan_unit, ParsedUnit};
pub use javadoc::{extract_doc_info, DocInfo};
pub use resolve::{Import, ProjectIndex, Resolution, TypeResolver, UnitResolver};
pub use schema::{DeclKind, Declaration, Field, Method, Parameter, Visibility};
pub use sources::{collect_sources, SourceUnit};
pub use typemap::{classify, map_type, TypeShape};
