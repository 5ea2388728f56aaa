//! Inspect command implementation
//!
//! Parses the inputs and prints the declaration model without writing any
//! stub files. Useful for checking what the builder sees before generating.

use crate::cli::{InspectArgs, OutputFormat};
use crate::error::{Result, StubGenError};
use crate::schema::{DeclKind, Declaration};

use super::generate::build_declaration_set;
use super::CommandContext;

/// Run the inspect command
pub fn run_inspect(ctx: &CommandContext, args: &InspectArgs) -> Result<String> {
    let mut declarations = build_declaration_set(ctx, &args.inputs)?;

    if let Some(filter) = &args.name {
        let needle = filter.to_lowercase();
        declarations.retain(|d| d.fqcn().to_lowercase().contains(&needle));
    }

    if declarations.is_empty() {
        return Ok("No matching declarations\n".to_string());
    }

    match ctx.format {
        OutputFormat::Text => Ok(render_text(&declarations)),
        OutputFormat::Json => {
            let out = serde_json::to_string_pretty(&declarations).map_err(|e| {
                StubGenError::ExtractionFailure {
                    message: format!("JSON serialization failed: {}", e),
                }
            })?;
            Ok(format!("{}\n", out))
        }
    }
}

fn render_text(declarations: &[Declaration]) -> String {
    let mut out = String::new();
    for decl in declarations {
        let kind = match decl.kind {
            DeclKind::ClassOrInterface => "class",
            DeclKind::Enum => "enum",
        };
        out.push_str(&format!(
            "{} ({}) fields={} methods={} constructors={}\n",
            decl.fqcn(),
            kind,
            decl.fields.len(),
            decl.methods.len(),
            decl.constructors.len()
        ));
        for method in &decl.methods {
            let params = method
                .params
                .iter()
                .map(|p| format!("{}: {}", p.name, p.type_expr))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(
                "  {}({}) -> {}\n",
                method.name, params, method.return_type
            ));
        }
    }
    out
}
