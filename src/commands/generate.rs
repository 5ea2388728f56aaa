//! Generate command implementation
//!
//! Runs the full pipeline: collect sources, parse them in parallel, build
//! the declaration model, then write one stub file per declaration plus the
//! aggregate imports index.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::cli::{GenerateArgs, OutputFormat};
use crate::emit::{emit_imports_index, emit_stub, stub_file_name};
use crate::error::{Result, StubGenError};
use crate::extract::{extract_declarations, scan_unit, ParsedUnit};
use crate::resolve::{ProjectIndex, UnitResolver};
use crate::schema::Declaration;
use crate::sources::collect_sources;

use super::CommandContext;

/// Run the generate command
pub fn run_generate(ctx: &CommandContext, args: &GenerateArgs) -> Result<String> {
    let declarations = build_declaration_set(ctx, &args.inputs)?;
    if declarations.is_empty() {
        return Ok("No Java declarations found in the given inputs\n".to_string());
    }

    fs::create_dir_all(&args.output_dir)?;

    let mut written: Vec<(String, String)> = Vec::new();
    for decl in &declarations {
        let stub = emit_stub(decl);
        let file_name = stub_file_name(decl);
        let path = args.output_dir.join(&file_name);
        match fs::write(&path, stub) {
            Ok(()) => {
                if ctx.verbose {
                    eprintln!("Generated stubs for {} in {}", decl.fqcn(), path.display());
                }
                written.push((decl.fqcn(), file_name));
            }
            Err(e) => {
                // one failed write must not stop the rest of the set
                tracing::warn!("failed to write {}: {}", path.display(), e);
                eprintln!("Warning: failed to write stubs for {}: {}", decl.fqcn(), e);
            }
        }
    }

    let index_text = emit_imports_index(&declarations);
    fs::write(args.output_dir.join("imports.lua"), index_text)?;

    match ctx.format {
        OutputFormat::Text => {
            let mut out = format!(
                "Generated {} stub files in {}\n",
                written.len(),
                args.output_dir.display()
            );
            for (fqcn, file_name) in &written {
                out.push_str(&format!("  {} -> {}\n", fqcn, file_name));
            }
            out.push_str(&format!("imports.lua lists {} classes\n", declarations.len()));
            Ok(out)
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "output_dir": args.output_dir.display().to_string(),
                "stubs": written
                    .iter()
                    .map(|(fqcn, file_name)| serde_json::json!({
                        "class": fqcn,
                        "file": file_name,
                    }))
                    .collect::<Vec<_>>(),
                "imports_file": "imports.lua",
                "declarations": declarations.len(),
            });
            let out = serde_json::to_string_pretty(&report).map_err(|e| {
                StubGenError::ExtractionFailure {
                    message: format!("JSON serialization failed: {}", e),
                }
            })?;
            Ok(format!("{}\n", out))
        }
    }
}

/// Collect, parse, and build the declaration set for the given inputs.
///
/// Parsing is parallel per unit; units that fail to parse are reported and
/// skipped. Duplicate fully-qualified names are deduplicated last-wins at
/// the first occurrence's position.
pub(crate) fn build_declaration_set(
    ctx: &CommandContext,
    inputs: &[PathBuf],
) -> Result<Vec<Declaration>> {
    let units = collect_sources(inputs)?;
    if ctx.verbose {
        eprintln!("Collected {} source units", units.len());
    }

    let parsed: Vec<ParsedUnit> = units
        .into_par_iter()
        .filter_map(|unit| {
            let origin = unit.origin.clone();
            match scan_unit(unit) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", origin, e);
                    eprintln!("Warning: skipping {}: {}", origin, e);
                    None
                }
            }
        })
        .collect();

    let index = ProjectIndex::from_units(&parsed);
    if ctx.verbose {
        eprintln!("Indexed {} known type names", index.len());
    }

    let mut declarations = Vec::new();
    for unit in &parsed {
        let resolver = UnitResolver::new(&index, &unit.package, &unit.imports);
        declarations.extend(extract_declarations(unit, &resolver));
    }

    Ok(dedupe_by_fqcn(declarations))
}

/// Keep one declaration per fully-qualified name: the latest value at the
/// earliest position, matching the accumulate-into-a-map behavior scripts
/// already rely on
fn dedupe_by_fqcn(declarations: Vec<Declaration>) -> Vec<Declaration> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<Declaration> = Vec::new();
    for decl in declarations {
        match positions.get(&decl.fqcn()) {
            Some(&i) => out[i] = decl,
            None => {
                positions.insert(decl.fqcn(), out.len());
                out.push(decl);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DeclKind;

    fn decl(name: &str, package: &str, field_count: usize) -> Declaration {
        Declaration {
            name: name.to_string(),
            package: package.to_string(),
            kind: DeclKind::ClassOrInterface,
            extends: Vec::new(),
            implements: Vec::new(),
            fields: vec![
                crate::schema::Field {
                    name: "f".to_string(),
                    type_expr: "int".to_string(),
                    visibility: Default::default(),
                    comment: None,
                };
                field_count
            ],
            methods: Vec::new(),
            constructors: Vec::new(),
            comment: None,
        }
    }

    #[test]
    fn test_dedupe_last_wins_first_position() {
        let deduped = dedupe_by_fqcn(vec![
            decl("Widget", "com.example", 1),
            decl("Other", "com.example", 0),
            decl("Widget", "com.example", 2),
        ]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].name, "Widget");
        assert_eq!(deduped[0].fields.len(), 2);
        assert_eq!(deduped[1].name, "Other");
    }
}
