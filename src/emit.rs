//! EmmyLua stub emission
//!
//! Pure string assembly: one annotation stub per declaration plus the
//! aggregate `imports.lua` alias index. File writes belong to the command
//! layer, never here.

use crate::javadoc::extract_doc_info;
use crate::schema::Declaration;
use crate::typemap::{map_type, simple_name};

/// File name for a declaration's stub: `<package>.<Name>.lua`, or just
/// `<Name>.lua` for the root package
pub fn stub_file_name(decl: &Declaration) -> String {
    if decl.package.is_empty() {
        format!("{}.lua", decl.name)
    } else {
        format!("{}.{}.lua", decl.package, decl.name)
    }
}

/// Emit the annotation stub for one declaration.
///
/// Emission order is fixed: header description, `---@meta`, source marker,
/// `---@class` with supertypes, fields, constructor overloads, the local
/// table, then one block per method separated by blank lines.
pub fn emit_stub(decl: &Declaration) -> String {
    let mut out = String::new();

    let class_doc = extract_doc_info(decl.comment.as_deref());
    if !class_doc.main.is_empty() {
        out.push_str(&format!("--- {}\n", class_doc.main));
    }

    out.push_str("---@meta\n");
    out.push_str(&format!("-- {}\n", decl.fqcn()));

    // Inheritance clauses name classes; the value-type mapper would collapse
    // functional supertypes to `function`, so render simple names directly
    let supertypes: Vec<&str> = decl
        .extends
        .iter()
        .chain(decl.implements.iter())
        .map(|t| simple_name(t))
        .collect();
    if supertypes.is_empty() {
        out.push_str(&format!("---@class {}\n", decl.fqcn()));
    } else {
        out.push_str(&format!(
            "---@class {}: {}\n",
            decl.fqcn(),
            supertypes.join(", ")
        ));
    }

    for field in &decl.fields {
        out.push_str(&format!(
            "---@field {} {} {}\n",
            field.visibility.as_lua_token(),
            field.name,
            map_type(&field.type_expr)
        ));
    }

    for ctor in &decl.constructors {
        let params = ctor
            .params
            .iter()
            .map(|p| {
                let mut mapped = map_type(&p.type_expr);
                if !p.required {
                    mapped.push('?');
                }
                format!("{}: {}", p.name, mapped)
            })
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "---@overload fun({}): {}\n",
            params,
            map_type(&ctor.return_type)
        ));
    }

    out.push_str(&format!("local {} = {{}}\n\n", decl.name));

    for method in &decl.methods {
        let doc = extract_doc_info(method.comment.as_deref());

        if method.is_deprecated {
            out.push_str("---@deprecated\n");
        }
        if method.is_async {
            out.push_str("---@async\n");
        }

        for param in &method.params {
            let optional = if param.required { "" } else { "?" };
            let mapped = map_type(&param.type_expr);
            match param.comment.as_deref().filter(|c| !c.trim().is_empty()) {
                Some(text) => out.push_str(&format!(
                    "---@param {}{} {} {}\n",
                    param.name, optional, mapped, text
                )),
                None => {
                    out.push_str(&format!("---@param {}{} {}\n", param.name, optional, mapped))
                }
            }
        }

        out.push_str(&format!("---@{}\n", method.visibility.as_lua_token()));

        let return_type = map_type(&method.return_type);
        match doc.ret.as_deref().filter(|r| !r.trim().is_empty()) {
            Some(text) => out.push_str(&format!("---@return {} {}\n", return_type, text)),
            None => out.push_str(&format!("---@return {}\n", return_type)),
        }

        if !doc.main.is_empty() {
            out.push_str(&format!("--- {}\n", doc.main));
        }

        let param_names = method
            .params
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "function {}:{}({}) end\n\n",
            decl.name, method.name, param_names
        ));
    }

    out
}

/// Emit the aggregate alias index of every known class name.
///
/// The trailing `string` member keeps the alias open-world: an import of a
/// name outside the generated set is advisory-unlisted, not invalid.
pub fn emit_imports_index(declarations: &[Declaration]) -> String {
    let mut out = String::new();
    out.push_str("---@alias JavaClasses\n");
    for decl in declarations {
        out.push_str(&format!("---| '\"{}\"'\n", decl.fqcn()));
    }
    out.push_str("---| string\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DeclKind, Field, Method, Parameter, Visibility};

    fn empty_declaration(name: &str, package: &str) -> Declaration {
        Declaration {
            name: name.to_string(),
            package: package.to_string(),
            kind: DeclKind::ClassOrInterface,
            extends: Vec::new(),
            implements: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            comment: None,
        }
    }

    fn method(name: &str, return_type: &str) -> Method {
        Method {
            name: name.to_string(),
            return_type: return_type.to_string(),
            visibility: Visibility::Public,
            params: Vec::new(),
            comment: None,
            is_deprecated: false,
            is_async: false,
            is_constructor: false,
        }
    }

    #[test]
    fn test_empty_declaration_still_emits_header_and_table() {
        let stub = emit_stub(&empty_declaration("Widget", "com.example"));
        assert!(stub.contains("---@class com.example.Widget\n"));
        assert!(stub.contains("local Widget = {}\n"));
    }

    #[test]
    fn test_class_doc_precedes_all_lines() {
        let mut decl = empty_declaration("Widget", "com.example");
        decl.comment = Some("/** A widget. */".to_string());
        let stub = emit_stub(&decl);
        assert!(stub.starts_with("--- A widget.\n---@meta\n"));
    }

    #[test]
    fn test_supertype_list() {
        let mut decl = empty_declaration("Derived", "com.example");
        decl.extends.push("com.example.Base".to_string());
        decl.implements.push("java.lang.Runnable".to_string());
        let stub = emit_stub(&decl);
        assert!(stub.contains("---@class com.example.Derived: Base, Runnable\n"));
    }

    #[test]
    fn test_field_line() {
        let mut decl = empty_declaration("Widget", "com.example");
        decl.fields.push(Field {
            name: "count".to_string(),
            type_expr: "int".to_string(),
            visibility: Visibility::Public,
            comment: None,
        });
        let stub = emit_stub(&decl);
        assert!(stub.contains("---@field public count number\n"));
    }

    #[test]
    fn test_constructor_overload_line() {
        let mut decl = empty_declaration("Widget", "com.example");
        decl.constructors.push(Method {
            params: vec![
                Parameter {
                    name: "count".to_string(),
                    type_expr: "int".to_string(),
                    required: true,
                    comment: None,
                },
                Parameter {
                    name: "label".to_string(),
                    type_expr: "java.lang.String".to_string(),
                    required: false,
                    comment: None,
                },
            ],
            is_constructor: true,
            ..method("Widget", "Widget")
        });
        let stub = emit_stub(&decl);
        assert!(stub.contains("---@overload fun(count: number, label: string?): Widget\n"));
    }

    #[test]
    fn test_deprecated_marker_precedes_param_lines() {
        let mut decl = empty_declaration("Widget", "com.example");
        decl.methods.push(Method {
            is_deprecated: true,
            params: vec![Parameter {
                name: "name".to_string(),
                type_expr: "java.lang.String".to_string(),
                required: true,
                comment: None,
            }],
            ..method("rename", "void")
        });
        let stub = emit_stub(&decl);
        let deprecated = stub.find("---@deprecated").unwrap();
        let param = stub.find("---@param").unwrap();
        assert!(deprecated < param);
    }

    #[test]
    fn test_method_block_layout() {
        let mut decl = empty_declaration("Widget", "com.example");
        decl.methods.push(Method {
            comment: Some(
                "/** Renames the widget. @param name the new name @return the old name */"
                    .to_string(),
            ),
            params: vec![Parameter {
                name: "name".to_string(),
                type_expr: "java.lang.String".to_string(),
                required: false,
                comment: Some("the new name".to_string()),
            }],
            ..method("rename", "java.lang.String")
        });
        let stub = emit_stub(&decl);
        assert!(stub.contains("---@param name? string the new name\n"));
        assert!(stub.contains("---@public\n"));
        assert!(stub.contains("---@return string the old name\n"));
        assert!(stub.contains("--- Renames the widget.\n"));
        assert!(stub.contains("function Widget:rename(name) end\n"));
    }

    #[test]
    fn test_async_and_visibility_markers() {
        let mut decl = empty_declaration("Scheduler", "com.example");
        decl.methods.push(Method {
            is_async: true,
            visibility: Visibility::Protected,
            ..method("runTaskAsync", "void")
        });
        let stub = emit_stub(&decl);
        assert!(stub.contains("---@async\n"));
        assert!(stub.contains("---@protected\n"));
        assert!(stub.contains("---@return nil\n"));
    }

    #[test]
    fn test_widget_end_to_end() {
        let mut decl = empty_declaration("Widget", "com.example");
        decl.fields.push(Field {
            name: "count".to_string(),
            type_expr: "int".to_string(),
            visibility: Visibility::Public,
            comment: None,
        });
        decl.methods.push(method("getCount", "int"));
        let stub = emit_stub(&decl);
        assert!(stub.contains("---@field public count number\n"));
        assert!(stub.contains("---@return number\n"));
        assert!(stub.contains("function Widget:getCount() end\n"));
    }

    #[test]
    fn test_imports_index() {
        let decls = vec![
            empty_declaration("Widget", "com.example"),
            empty_declaration("Color", "com.example.paint"),
        ];
        let index = emit_imports_index(&decls);
        let lines: Vec<&str> = index.lines().collect();
        assert_eq!(lines[0], "---@alias JavaClasses");
        assert_eq!(lines[1], "---| '\"com.example.Widget\"'");
        assert_eq!(lines[2], "---| '\"com.example.paint.Color\"'");
        assert_eq!(lines[3], "---| string");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            stub_file_name(&empty_declaration("Widget", "com.example")),
            "com.example.Widget.lua"
        );
        assert_eq!(stub_file_name(&empty_declaration("Widget", "")), "Widget.lua");
    }
}
