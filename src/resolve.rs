//! Best-effort resolution of simple type names to fully-qualified names
//!
//! The builder consults a `TypeResolver` for every declared type position.
//! Expected fallbacks are explicit `Resolution` variants consumed locally:
//! the run never fails because a type could not be resolved.

use std::collections::HashSet;

use crate::extract::ParsedUnit;

/// Outcome of one resolution attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The fully-qualified name
    Resolved(String),

    /// Not a shape this resolver addresses (primitives, generics, arrays,
    /// already-qualified names). The caller keeps the raw text and lets the
    /// type mapper handle any structure.
    Unsupported,

    /// A plausible class name that is findable nowhere. The caller falls
    /// back to the explicit `any` marker.
    Unknown,
}

/// The `resolve(typeExpression) -> fullyQualifiedNameOrFailure` boundary
pub trait TypeResolver {
    fn resolve(&self, type_expr: &str) -> Resolution;
}

/// One `import` statement relevant to type resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Import {
    /// `import com.example.Widget;`
    Single { simple: String, fqn: String },
    /// `import com.example.*;`
    Wildcard { package: String },
}

/// `java.lang` types that are importable without an import statement.
/// Only names on this list resolve into `java.lang`; anything else that is
/// findable nowhere stays unknown.
const JAVA_LANG: &[&str] = &[
    "Object",
    "String",
    "Integer",
    "Long",
    "Short",
    "Byte",
    "Float",
    "Double",
    "Boolean",
    "Character",
    "Void",
    "Number",
    "CharSequence",
    "StringBuilder",
    "StringBuffer",
    "Iterable",
    "Comparable",
    "Runnable",
    "Thread",
    "Class",
    "Enum",
    "Exception",
    "RuntimeException",
    "Error",
    "Throwable",
    "Math",
    "System",
];

/// Every fully-qualified type name declared across the parsed input set
#[derive(Debug, Default)]
pub struct ProjectIndex {
    known: HashSet<String>,
}

impl ProjectIndex {
    /// Build the index from all scanned units
    pub fn from_units(units: &[ParsedUnit]) -> Self {
        let mut known = HashSet::new();
        for unit in units {
            known.extend(unit.declared_fqcns());
        }
        Self { known }
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.known.contains(fqn)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

/// Resolver scoped to one compilation unit's package and imports
pub struct UnitResolver<'a> {
    index: &'a ProjectIndex,
    package: &'a str,
    imports: &'a [Import],
}

impl<'a> UnitResolver<'a> {
    pub fn new(index: &'a ProjectIndex, package: &'a str, imports: &'a [Import]) -> Self {
        Self {
            index,
            package,
            imports,
        }
    }
}

impl TypeResolver for UnitResolver<'_> {
    fn resolve(&self, type_expr: &str) -> Resolution {
        let t = type_expr.trim();
        if !is_resolvable_shape(t) {
            return Resolution::Unsupported;
        }

        for import in self.imports {
            if let Import::Single { simple, fqn } = import {
                if simple == t {
                    return Resolution::Resolved(fqn.clone());
                }
            }
        }

        let same_package = if self.package.is_empty() {
            t.to_string()
        } else {
            format!("{}.{}", self.package, t)
        };
        if self.index.contains(&same_package) {
            return Resolution::Resolved(same_package);
        }

        for import in self.imports {
            if let Import::Wildcard { package } = import {
                let candidate = format!("{}.{}", package, t);
                if self.index.contains(&candidate) {
                    return Resolution::Resolved(candidate);
                }
            }
        }

        if JAVA_LANG.contains(&t) {
            return Resolution::Resolved(format!("java.lang.{}", t));
        }

        Resolution::Unknown
    }
}

/// A resolvable shape is a bare class-like identifier: no generics, arrays,
/// qualifiers, or wildcards, starting with an uppercase letter.
fn is_resolvable_shape(t: &str) -> bool {
    !t.is_empty()
        && !t.contains(['<', '[', '.', ' ', '?'])
        && t.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(fqcns: &[&str]) -> ProjectIndex {
        ProjectIndex {
            known: fqcns.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_explicit_import_wins() {
        let index = index_of(&[]);
        let imports = vec![Import::Single {
            simple: "Widget".to_string(),
            fqn: "com.example.Widget".to_string(),
        }];
        let resolver = UnitResolver::new(&index, "org.other", &imports);
        assert_eq!(
            resolver.resolve("Widget"),
            Resolution::Resolved("com.example.Widget".to_string())
        );
    }

    #[test]
    fn test_same_package_resolution() {
        let index = index_of(&["com.example.Widget", "com.example.Gadget"]);
        let resolver = UnitResolver::new(&index, "com.example", &[]);
        assert_eq!(
            resolver.resolve("Gadget"),
            Resolution::Resolved("com.example.Gadget".to_string())
        );
    }

    #[test]
    fn test_wildcard_import_resolution() {
        let index = index_of(&["com.example.util.Helper"]);
        let imports = vec![Import::Wildcard {
            package: "com.example.util".to_string(),
        }];
        let resolver = UnitResolver::new(&index, "org.other", &imports);
        assert_eq!(
            resolver.resolve("Helper"),
            Resolution::Resolved("com.example.util.Helper".to_string())
        );
    }

    #[test]
    fn test_java_lang_fallback() {
        let index = index_of(&[]);
        let resolver = UnitResolver::new(&index, "", &[]);
        assert_eq!(
            resolver.resolve("String"),
            Resolution::Resolved("java.lang.String".to_string())
        );
    }

    #[test]
    fn test_unknown_symbol() {
        let index = index_of(&[]);
        let resolver = UnitResolver::new(&index, "com.example", &[]);
        assert_eq!(resolver.resolve("Mystery"), Resolution::Unknown);
        // type parameters of generic members look like unknown class names
        assert_eq!(resolver.resolve("T"), Resolution::Unknown);
    }

    #[test]
    fn test_unsupported_shapes() {
        let index = index_of(&[]);
        let resolver = UnitResolver::new(&index, "com.example", &[]);
        assert_eq!(resolver.resolve("int"), Resolution::Unsupported);
        assert_eq!(resolver.resolve("List<String>"), Resolution::Unsupported);
        assert_eq!(resolver.resolve("String[]"), Resolution::Unsupported);
        assert_eq!(resolver.resolve("java.util.List"), Resolution::Unsupported);
        assert_eq!(resolver.resolve("? extends Widget"), Resolution::Unsupported);
    }
}
