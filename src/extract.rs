//! Java declaration extraction from tree-sitter syntax trees
//!
//! `scan_unit` parses one source unit and records what resolution needs
//! (package, imports, declared type names); `extract_declarations` walks the
//! tree once more and populates the declaration model. The builder is not a
//! parser — it trusts tree-sitter's structure and only applies this crate's
//! own rules (visibility defaults, deprecation, the async and nullability
//! heuristics, and type resolution fallbacks).

use tree_sitter::{Node, Parser, Tree};

use crate::error::{Result, StubGenError};
use crate::javadoc::{extract_doc_info, DocInfo};
use crate::resolve::{Import, Resolution, TypeResolver};
use crate::schema::{DeclKind, Declaration, Field, Method, Parameter, Visibility};
use crate::sources::SourceUnit;

/// One parsed compilation unit plus the context the resolver needs
pub struct ParsedUnit {
    /// Where the unit came from (file path or `archive!entry`)
    pub origin: String,
    pub source: String,
    pub tree: Tree,
    /// Declared package; empty for the root package
    pub package: String,
    pub imports: Vec<Import>,
    /// Simple names of the unit's top-level type declarations
    pub type_names: Vec<String>,
}

impl ParsedUnit {
    /// Fully-qualified names of the types this unit declares
    pub fn declared_fqcns(&self) -> Vec<String> {
        self.type_names
            .iter()
            .map(|name| {
                if self.package.is_empty() {
                    name.clone()
                } else {
                    format!("{}.{}", self.package, name)
                }
            })
            .collect()
    }
}

/// Parse Java source text into a tree-sitter tree
pub fn parse_java(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| StubGenError::ParseFailure {
            message: format!("failed to load Java grammar: {}", e),
        })?;
    parser
        .parse(source, None)
        .ok_or_else(|| StubGenError::ParseFailure {
            message: "tree-sitter produced no tree".to_string(),
        })
}

/// Parse one source unit and collect its resolution context
pub fn scan_unit(unit: SourceUnit) -> Result<ParsedUnit> {
    let tree = parse_java(&unit.text).map_err(|e| match e {
        StubGenError::ParseFailure { message } => StubGenError::ParseFailure {
            message: format!("{}: {}", unit.origin, message),
        },
        other => other,
    })?;
    let root = tree.root_node();

    let package = find_package(&root, &unit.text);
    let imports = find_imports(&root, &unit.text);

    let mut type_names = Vec::new();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if is_type_declaration(child.kind()) {
            if let Some(name) = child.child_by_field_name("name") {
                type_names.push(get_node_text(&name, &unit.text));
            }
        }
    }
    drop(cursor);

    Ok(ParsedUnit {
        origin: unit.origin,
        source: unit.text,
        tree,
        package,
        imports,
        type_names,
    })
}

/// Build the declaration model for every top-level type in the unit.
///
/// A declaration that cannot be built (e.g. a nameless node from a broken
/// parse) is reported and skipped; one bad declaration never stops the rest.
pub fn extract_declarations(unit: &ParsedUnit, resolver: &dyn TypeResolver) -> Vec<Declaration> {
    let root = unit.tree.root_node();
    let mut declarations = Vec::new();

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        let built = match child.kind() {
            "class_declaration" | "interface_declaration" => build_class(unit, &child, resolver),
            "enum_declaration" => build_enum(unit, &child),
            _ => continue,
        };
        match built {
            Ok(decl) => declarations.push(decl),
            Err(e) => {
                tracing::warn!(origin = %unit.origin, "skipping declaration: {}", e);
            }
        }
    }

    declarations
}

fn is_type_declaration(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration" | "interface_declaration" | "enum_declaration"
    )
}

// ============================================================================
// Compilation unit context
// ============================================================================

fn find_package(root: &Node, source: &str) -> String {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() == "package_declaration" {
            let text = get_node_text(&child, source);
            return text
                .trim_start_matches("package")
                .trim_end_matches(';')
                .trim()
                .to_string();
        }
    }
    String::new()
}

fn find_imports(root: &Node, source: &str) -> Vec<Import> {
    let mut imports = Vec::new();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() != "import_declaration" {
            continue;
        }
        let text = get_node_text(&child, source);
        let clean = text
            .trim_start_matches("import")
            .trim_end_matches(';')
            .trim();
        // static imports name members, not types
        if clean.starts_with("static ") {
            continue;
        }
        if let Some(package) = clean.strip_suffix(".*") {
            imports.push(Import::Wildcard {
                package: package.trim().to_string(),
            });
        } else if let Some(simple) = clean.rsplit('.').next() {
            imports.push(Import::Single {
                simple: simple.to_string(),
                fqn: clean.to_string(),
            });
        }
    }
    imports
}

// ============================================================================
// Class / interface declarations
// ============================================================================

fn build_class(unit: &ParsedUnit, node: &Node, resolver: &dyn TypeResolver) -> Result<Declaration> {
    let source = &unit.source;
    let name = node
        .child_by_field_name("name")
        .map(|n| get_node_text(&n, source))
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| StubGenError::ExtractionFailure {
            message: format!("{}: type declaration without a name", unit.origin),
        })?;

    let mut extends = Vec::new();
    if let Some(superclass) = node.child_by_field_name("superclass") {
        extends.extend(collect_type_names(&superclass, source));
    }
    // interfaces extend via an `extends_interfaces` child rather than a field
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "extends_interfaces" {
            extends.extend(collect_type_names(&child, source));
        }
    }
    let extends = extends
        .iter()
        .map(|t| resolve_type(resolver, t))
        .collect::<Vec<_>>();

    let implements = match node.child_by_field_name("interfaces") {
        Some(interfaces) => collect_type_names(&interfaces, source)
            .iter()
            .map(|t| resolve_type(resolver, t))
            .collect(),
        None => Vec::new(),
    };

    let mut fields = Vec::new();
    let mut methods = Vec::new();
    let mut constructors = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.children(&mut cursor) {
            match member.kind() {
                // interface constants parse as constant_declaration
                "field_declaration" | "constant_declaration" => {
                    fields.extend(build_fields(source, &member, resolver));
                }
                "method_declaration" => {
                    if let Some(method) = build_method(source, &member, resolver) {
                        methods.push(method);
                    }
                }
                "constructor_declaration" => {
                    if let Some(ctor) = build_constructor(source, &member, resolver, &name) {
                        constructors.push(ctor);
                    }
                }
                _ => {}
            }
        }
    }

    Ok(Declaration {
        name,
        package: unit.package.clone(),
        kind: DeclKind::ClassOrInterface,
        extends,
        implements,
        fields,
        methods,
        constructors,
        comment: javadoc_of(node, source),
    })
}

// ============================================================================
// Enum declarations
// ============================================================================

fn build_enum(unit: &ParsedUnit, node: &Node) -> Result<Declaration> {
    let source = &unit.source;
    let name = node
        .child_by_field_name("name")
        .map(|n| get_node_text(&n, source))
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| StubGenError::ExtractionFailure {
            message: format!("{}: enum declaration without a name", unit.origin),
        })?;

    let fqcn = if unit.package.is_empty() {
        name.clone()
    } else {
        format!("{}.{}", unit.package, name)
    };

    // Enum constants surface as public fields typed by the enum itself
    let mut fields = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.children(&mut cursor) {
            if member.kind() == "enum_constant" {
                if let Some(constant_name) = member.child_by_field_name("name") {
                    fields.push(Field {
                        name: get_node_text(&constant_name, source),
                        type_expr: fqcn.clone(),
                        visibility: Visibility::Public,
                        comment: javadoc_of(&member, source),
                    });
                }
            }
        }
    }

    Ok(Declaration {
        name,
        package: unit.package.clone(),
        kind: DeclKind::Enum,
        extends: Vec::new(),
        implements: Vec::new(),
        fields,
        methods: Vec::new(),
        constructors: Vec::new(),
        comment: javadoc_of(node, source),
    })
}

// ============================================================================
// Members
// ============================================================================

/// One field_declaration can declare several variables of the same type
fn build_fields(source: &str, node: &Node, resolver: &dyn TypeResolver) -> Vec<Field> {
    let type_expr = match node.child_by_field_name("type") {
        Some(ty) => resolve_type(resolver, &get_node_text(&ty, source)),
        None => return Vec::new(),
    };
    let visibility = visibility_of(node, source);
    let comment = javadoc_of(node, source);

    let mut fields = Vec::new();
    let mut cursor = node.walk();
    for declarator in node.children_by_field_name("declarator", &mut cursor) {
        if let Some(name) = declarator.child_by_field_name("name") {
            fields.push(Field {
                name: get_node_text(&name, source),
                type_expr: type_expr.clone(),
                visibility,
                comment: comment.clone(),
            });
        }
    }
    fields
}

fn build_method(source: &str, node: &Node, resolver: &dyn TypeResolver) -> Option<Method> {
    let name = get_node_text(&node.child_by_field_name("name")?, source);
    let return_type = node
        .child_by_field_name("type")
        .map(|ty| resolve_type(resolver, &get_node_text(&ty, source)))
        .unwrap_or_else(|| "void".to_string());

    let comment = javadoc_of(node, source);
    let doc = extract_doc_info(comment.as_deref());
    let params = build_parameters(source, node, resolver, Some(&doc));

    Some(Method {
        is_async: is_async_name(&name),
        name,
        return_type,
        visibility: visibility_of(node, source),
        params,
        comment,
        is_deprecated: is_deprecated(node, source),
        is_constructor: false,
    })
}

fn build_constructor(
    source: &str,
    node: &Node,
    resolver: &dyn TypeResolver,
    class_name: &str,
) -> Option<Method> {
    let name = get_node_text(&node.child_by_field_name("name")?, source);
    let params = build_parameters(source, node, resolver, None);

    Some(Method {
        name,
        // a constructor yields an instance of its declaring type
        return_type: class_name.to_string(),
        visibility: visibility_of(node, source),
        params,
        comment: javadoc_of(node, source),
        is_deprecated: is_deprecated(node, source),
        is_async: false,
        is_constructor: true,
    })
}

fn build_parameters(
    source: &str,
    node: &Node,
    resolver: &dyn TypeResolver,
    doc: Option<&DocInfo>,
) -> Vec<Parameter> {
    let Some(params_node) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut cursor = params_node.walk();
    for param in params_node.named_children(&mut cursor) {
        let (name, raw_type) = match param.kind() {
            "formal_parameter" => {
                let name = param.child_by_field_name("name");
                let ty = param.child_by_field_name("type");
                match (name, ty) {
                    (Some(name), Some(ty)) => {
                        (get_node_text(&name, source), get_node_text(&ty, source))
                    }
                    _ => continue,
                }
            }
            "spread_parameter" => match spread_parameter_parts(&param, source) {
                Some(parts) => parts,
                None => continue,
            },
            _ => continue,
        };

        // The annotation lives in the parameter's modifiers, so the signal is
        // the printed parameter text, not the type node
        let required = !is_nullable_text(&get_node_text(&param, source));
        let raw_type = raw_type.replace("@Nullable ", "");
        let type_expr = resolve_type(resolver, &raw_type);
        let comment = doc.and_then(|d| d.params.get(&name).cloned());

        out.push(Parameter {
            name,
            type_expr,
            required,
            comment,
        });
    }
    out
}

/// Varargs surface as arrays of the element type
fn spread_parameter_parts(param: &Node, source: &str) -> Option<(String, String)> {
    let mut name = None;
    let mut element_type = None;
    let mut cursor = param.walk();
    for child in param.named_children(&mut cursor) {
        match child.kind() {
            "variable_declarator" => {
                name = child
                    .child_by_field_name("name")
                    .map(|n| get_node_text(&n, source));
            }
            "modifiers" => {}
            _ if element_type.is_none() => {
                element_type = Some(get_node_text(&child, source));
            }
            _ => {}
        }
    }
    Some((name?, format!("{}[]", element_type?)))
}

// ============================================================================
// Member attributes
// ============================================================================

fn visibility_of(node: &Node, source: &str) -> Visibility {
    if let Some(modifiers) = find_child_of_kind(node, "modifiers") {
        let mut cursor = modifiers.walk();
        for child in modifiers.children(&mut cursor) {
            if matches!(child.kind(), "public" | "protected" | "private") {
                return Visibility::from_token(&get_node_text(&child, source));
            }
        }
    }
    Visibility::Public
}

fn is_deprecated(node: &Node, source: &str) -> bool {
    find_child_of_kind(node, "modifiers")
        .map(|m| get_node_text(&m, source).contains("@Deprecated"))
        .unwrap_or(false)
}

/// Naming-convention heuristic: a member is treated as asynchronous when its
/// name contains "async" in any casing. Most scheduler-style APIs put the
/// word in the method name; names like `clearAsyncFlag` false-positive and
/// async work behind a neutral name false-negatives. Documented behavior,
/// not a defect to fix here.
pub fn is_async_name(name: &str) -> bool {
    name.to_ascii_lowercase().contains("async")
}

/// Best-effort nullability signal: looks for a `@Nullable` annotation in the
/// printed parameter text. Depends entirely on the API spelling the
/// annotation that way; absence proves nothing.
pub fn is_nullable_text(text: &str) -> bool {
    text.contains("@Nullable")
}

/// The nearest preceding `/** ... */` block comment, skipping line comments
fn javadoc_of(node: &Node, source: &str) -> Option<String> {
    let mut prev = node.prev_sibling();
    while let Some(p) = prev {
        match p.kind() {
            "block_comment" => {
                let text = get_node_text(&p, source);
                return text.starts_with("/**").then_some(text);
            }
            "line_comment" => prev = p.prev_sibling(),
            _ => return None,
        }
    }
    None
}

// ============================================================================
// Node helpers
// ============================================================================

fn get_node_text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}

fn find_child_of_kind<'tree>(node: &Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).find(|c| c.kind() == kind);
    result
}

/// Collect the type names under a supertype clause node: either the direct
/// type child (`superclass`) or the members of a nested `type_list`
fn collect_type_names(node: &Node, source: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "type_list" {
            let mut inner = child.walk();
            for ty in child.named_children(&mut inner) {
                out.push(get_node_text(&ty, source));
            }
        } else {
            out.push(get_node_text(&child, source));
        }
    }
    out
}

/// Apply the resolver's outcome for one type position. Expected fallbacks
/// never fail: unsupported shapes keep their raw text for the mapper,
/// unknown symbols become the explicit `any` marker.
fn resolve_type(resolver: &dyn TypeResolver, raw: &str) -> String {
    let raw = raw.trim();
    match resolver.resolve(raw) {
        Resolution::Resolved(fqn) => fqn,
        Resolution::Unsupported => raw.to_string(),
        Resolution::Unknown => "any".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{ProjectIndex, UnitResolver};
    use crate::schema::DeclKind;

    fn scan(source: &str) -> ParsedUnit {
        scan_unit(SourceUnit {
            origin: "Test.java".to_string(),
            text: source.to_string(),
        })
        .expect("scan failed")
    }

    fn extract_one(source: &str) -> Declaration {
        let unit = scan(source);
        let index = ProjectIndex::from_units(std::slice::from_ref(&unit));
        let resolver = UnitResolver::new(&index, &unit.package, &unit.imports);
        let mut decls = extract_declarations(&unit, &resolver);
        assert_eq!(decls.len(), 1, "expected exactly one declaration");
        decls.remove(0)
    }

    #[test]
    fn test_package_and_imports() {
        let unit = scan(
            "package com.example;\n\
             import java.util.List;\n\
             import com.example.util.*;\n\
             import static java.lang.Math.max;\n\
             public class Widget {}\n",
        );
        assert_eq!(unit.package, "com.example");
        assert_eq!(unit.type_names, vec!["Widget".to_string()]);
        assert_eq!(unit.imports.len(), 2);
        assert!(matches!(
            &unit.imports[0],
            Import::Single { simple, fqn }
                if simple == "List" && fqn == "java.util.List"
        ));
        assert!(matches!(
            &unit.imports[1],
            Import::Wildcard { package } if package == "com.example.util"
        ));
    }

    #[test]
    fn test_class_with_members() {
        let decl = extract_one(
            "package com.example;\n\
             /** A widget. */\n\
             public class Widget {\n\
                 /** How many. */\n\
                 public int count;\n\
                 private String label;\n\
                 public Widget(int count) { this.count = count; }\n\
                 /** Gets the count. @return the count */\n\
                 public int getCount() { return count; }\n\
             }\n",
        );
        assert_eq!(decl.name, "Widget");
        assert_eq!(decl.package, "com.example");
        assert_eq!(decl.kind, DeclKind::ClassOrInterface);
        assert_eq!(decl.fields.len(), 2);
        assert_eq!(decl.fields[0].name, "count");
        assert_eq!(decl.fields[0].type_expr, "int");
        assert!(decl.fields[0].comment.is_some());
        assert_eq!(decl.fields[1].visibility, Visibility::Private);
        assert_eq!(decl.constructors.len(), 1);
        assert!(decl.constructors[0].is_constructor);
        assert_eq!(decl.constructors[0].return_type, "Widget");
        assert!(!decl.constructors[0].is_async);
        assert_eq!(decl.methods.len(), 1);
        assert_eq!(decl.methods[0].name, "getCount");
        assert_eq!(decl.methods[0].return_type, "int");
        assert!(decl.comment.as_deref().unwrap_or("").contains("A widget."));
    }

    #[test]
    fn test_supertypes_resolve() {
        let unit_a = scan("package com.example;\npublic class Base {}\n");
        let unit_b = scan(
            "package com.example;\n\
             public class Derived extends Base implements Runnable {}\n",
        );
        let units = vec![unit_a, unit_b];
        let index = ProjectIndex::from_units(&units);
        let resolver = UnitResolver::new(&index, &units[1].package, &units[1].imports);
        let decls = extract_declarations(&units[1], &resolver);
        assert_eq!(decls[0].extends, vec!["com.example.Base".to_string()]);
        assert_eq!(decls[0].implements, vec!["java.lang.Runnable".to_string()]);
    }

    #[test]
    fn test_interface_extends() {
        let decl = extract_one(
            "package com.example;\n\
             public interface Listener extends Runnable {}\n",
        );
        assert_eq!(decl.extends, vec!["java.lang.Runnable".to_string()]);
        assert!(decl.implements.is_empty());
    }

    #[test]
    fn test_enum_constants() {
        let decl = extract_one(
            "package com.example;\n\
             public enum Color {\n\
                 /** Like the sky. */\n\
                 BLUE,\n\
                 RED;\n\
                 public String hex() { return \"\"; }\n\
             }\n",
        );
        assert_eq!(decl.kind, DeclKind::Enum);
        assert_eq!(decl.fields.len(), 2);
        assert_eq!(decl.fields[0].name, "BLUE");
        assert_eq!(decl.fields[0].type_expr, "com.example.Color");
        assert!(decl.fields[0].comment.is_some());
        // enums contribute constants only
        assert!(decl.methods.is_empty());
    }

    #[test]
    fn test_deprecated_and_async_flags() {
        let decl = extract_one(
            "package com.example;\n\
             public class Scheduler {\n\
                 @Deprecated\n\
                 public void runTaskAsync() {}\n\
                 public void runTask() {}\n\
             }\n",
        );
        assert!(decl.methods[0].is_deprecated);
        assert!(decl.methods[0].is_async);
        assert!(!decl.methods[1].is_deprecated);
        assert!(!decl.methods[1].is_async);
    }

    #[test]
    fn test_nullable_parameter() {
        let decl = extract_one(
            "package com.example;\n\
             public class Widget {\n\
                 public void rename(@Nullable String name, int count) {}\n\
             }\n",
        );
        let params = &decl.methods[0].params;
        assert_eq!(params.len(), 2);
        assert!(!params[0].required);
        assert_eq!(params[0].type_expr, "java.lang.String");
        assert!(params[1].required);
    }

    #[test]
    fn test_param_docs_attach() {
        let decl = extract_one(
            "package com.example;\n\
             public class Widget {\n\
                 /** Renames. @param name the new name */\n\
                 public void rename(String name) {}\n\
             }\n",
        );
        assert_eq!(
            decl.methods[0].params[0].comment.as_deref(),
            Some("the new name")
        );
    }

    #[test]
    fn test_varargs_surface_as_array() {
        let decl = extract_one(
            "package com.example;\n\
             public class Widget {\n\
                 public void addAll(String... names) {}\n\
             }\n",
        );
        let param = &decl.methods[0].params[0];
        assert_eq!(param.name, "names");
        assert_eq!(param.type_expr, "String[]");
    }

    #[test]
    fn test_unknown_type_becomes_any() {
        let decl = extract_one(
            "package com.example;\n\
             public class Widget {\n\
                 public Mystery poke() { return null; }\n\
             }\n",
        );
        assert_eq!(decl.methods[0].return_type, "any");
    }

    #[test]
    fn test_multiple_declarations_per_unit() {
        let unit = scan(
            "package com.example;\n\
             public class First {}\n\
             class Second {}\n",
        );
        let index = ProjectIndex::from_units(std::slice::from_ref(&unit));
        let resolver = UnitResolver::new(&index, &unit.package, &unit.imports);
        let decls = extract_declarations(&unit, &resolver);
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].name, "First");
        assert_eq!(decls[1].name, "Second");
    }
}
