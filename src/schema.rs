//! Declaration model for parsed Java types
//!
//! One `Declaration` represents a single class, interface, or enum together
//! with its members. Declarations are fully populated by the builder in
//! `extract.rs`, immutable afterwards, and consumed by the emitter. Type
//! expressions are stored raw (resolved-or-unresolved Java text); mapping to
//! EmmyLua syntax happens at emission time.

use serde::{Deserialize, Serialize};

/// What kind of top-level type a declaration is. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    ClassOrInterface,
    Enum,
}

/// Member visibility. Anything the builder cannot recognize becomes Public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Map a visibility token to the enum, case-insensitively.
    /// Unrecognized tokens default to Public rather than failing the run.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "private" => Self::Private,
            "protected" => Self::Protected,
            _ => Self::Public,
        }
    }

    /// The token used in `---@field` / visibility marker lines
    pub fn as_lua_token(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

/// One method or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// Raw Java type expression, pre-mapping
    pub type_expr: String,

    /// False when the raw parameter text carries a nullability marker
    pub required: bool,

    /// Per-parameter Javadoc text, keyed out of the member's `@param` tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One field (or enum constant)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    /// Raw Java type expression, pre-mapping
    pub type_expr: String,

    pub visibility: Visibility,

    /// Raw Javadoc text, not yet normalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One method or constructor
///
/// Constructors are methods with `is_constructor = true`, a return type
/// equal to the declaring type's simple name, and `is_async` always false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,

    /// Raw Java return type expression, pre-mapping
    pub return_type: String,

    pub visibility: Visibility,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,

    /// Raw Javadoc text, not yet normalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_deprecated: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_async: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_constructor: bool,
}

/// One parsed class, interface, or enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Simple name, non-empty after trimming
    pub name: String,

    /// Enclosing package; empty string for the root package, never absent
    pub package: String,

    pub kind: DeclKind,

    /// Resolved extended-type names, in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,

    /// Resolved implemented-interface names, in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructors: Vec<Method>,

    /// Raw Javadoc text attached to the declaration, not yet normalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Declaration {
    /// Fully-qualified name: `package.Name`, or just `Name` for the root package
    pub fn fqcn(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}
