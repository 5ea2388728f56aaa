//! Java type expression to EmmyLua type mapping
//!
//! `map_type` is total: unrecognized input always falls through to the
//! named-type rule, so a malformed expression can degrade the annotation but
//! never abort a run. Classification is separated from mapping so each rule
//! is independently testable instead of depending on string-match order.

/// Closed set of recognized Java type shapes.
///
/// Structural shapes carry their argument expressions un-mapped; `map_type`
/// recurses into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// `List<T>`, `Set<T>` — the target syntax does not distinguish the two
    SequenceOf(String),
    /// `Map<K, V>` with exactly two arguments
    MapOf(String, String),
    /// A container whose generic argument list did not parse
    RawTable,
    /// `T[]`
    ArrayOf(String),
    /// `Class<T>` / `Class<? extends T>`
    ClassOf(String),
    /// Trailing `?` optionality marker
    Nullable(String),
    /// Numeric primitives and their boxed forms
    Number,
    Boolean,
    /// `char`, `Character`, `String`
    Str,
    /// `void` / `Void`
    Nil,
    /// Single-method interface shapes collapsed to an opaque function
    FunctionLike,
    /// Everything else, kept by name
    Named(String),
}

/// Single-method interface types that carry lambdas across the boundary.
/// They have no structural representative in EmmyLua; all collapse to
/// `function`.
const FUNCTIONAL_INTERFACES: &[&str] = &[
    "Runnable",
    "Callable",
    "Function",
    "BiFunction",
    "Consumer",
    "BiConsumer",
    "Supplier",
    "Predicate",
    "BiPredicate",
    "UnaryOperator",
    "BinaryOperator",
];

/// Classify a raw Java type expression into its outermost shape.
///
/// Structural wrappers are peeled before keyword rules so that the head of
/// `List<int>` never matches the primitive rule directly.
pub fn classify(type_expr: &str) -> TypeShape {
    let t = type_expr.trim();

    // Wildcard bounds unwrap to the bound itself; a bare wildcard is unknowable
    if let Some(bound) = t.strip_prefix("? extends ") {
        return classify(bound);
    }
    if let Some(bound) = t.strip_prefix("? super ") {
        return classify(bound);
    }
    if t == "?" {
        return TypeShape::Named("any".to_string());
    }

    if let Some(args) = generic_args(t, "List").or_else(|| generic_args(t, "Set")) {
        return match split_top_level(&args).as_slice() {
            [inner] => TypeShape::SequenceOf(inner.clone()),
            _ => TypeShape::RawTable,
        };
    }

    if let Some(args) = generic_args(t, "Map") {
        return match split_top_level(&args).as_slice() {
            [key, value] => TypeShape::MapOf(key.clone(), value.clone()),
            _ => TypeShape::RawTable,
        };
    }

    if let Some(elem) = t.strip_suffix("[]") {
        return TypeShape::ArrayOf(elem.trim_end().to_string());
    }

    if let Some(inner) = generic_args(t, "Class") {
        return TypeShape::ClassOf(inner.trim().to_string());
    }

    if let Some(base) = t.strip_suffix('?') {
        return TypeShape::Nullable(base.trim_end().to_string());
    }

    match t {
        "int" | "long" | "short" | "byte" | "float" | "double" | "Integer" | "Long" | "Short"
        | "Byte" | "Float" | "Double" | "java.lang.Integer" | "java.lang.Long"
        | "java.lang.Short" | "java.lang.Byte" | "java.lang.Float" | "java.lang.Double" => {
            TypeShape::Number
        }
        "boolean" | "Boolean" | "java.lang.Boolean" => TypeShape::Boolean,
        "char" | "Character" | "String" | "java.lang.Character" | "java.lang.String" => {
            TypeShape::Str
        }
        "void" | "Void" | "java.lang.Void" => TypeShape::Nil,
        _ if is_function_like(t) => TypeShape::FunctionLike,
        _ => TypeShape::Named(t.to_string()),
    }
}

/// Map a raw Java type expression to its EmmyLua annotation type.
///
/// Total, pure, and recursive on nested generic arguments.
pub fn map_type(type_expr: &str) -> String {
    match classify(type_expr) {
        TypeShape::SequenceOf(inner) | TypeShape::ArrayOf(inner) => {
            format!("table<{}>", map_type(&inner))
        }
        TypeShape::MapOf(key, value) => {
            format!("table<{}, {}>", map_type(&key), map_type(&value))
        }
        TypeShape::RawTable => "table".to_string(),
        TypeShape::ClassOf(inner) => format!("optional<{}>", map_type(&inner)),
        TypeShape::Nullable(inner) => format!("{}?", map_type(&inner)),
        TypeShape::Number => "number".to_string(),
        TypeShape::Boolean => "boolean".to_string(),
        TypeShape::Str => "string".to_string(),
        TypeShape::Nil => "nil".to_string(),
        TypeShape::FunctionLike => "function".to_string(),
        // The target namespace is flat; keep the last path segment only
        TypeShape::Named(name) => simple_name(&name).to_string(),
    }
}

/// Last `.`-segment of a (possibly qualified) type name
pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// When `expr` reads `head<...>` and the head's last `.`-segment equals
/// `marker`, return the generic argument text. Matches both `List<T>` and
/// `java.util.List<T>` since the resolver is inconsistent about qualifying
/// container heads.
fn generic_args(expr: &str, marker: &str) -> Option<String> {
    let open = expr.find('<')?;
    if !expr.ends_with('>') {
        return None;
    }
    let head = &expr[..open];
    if simple_name(head) != marker {
        return None;
    }
    Some(expr[open + 1..expr.len() - 1].to_string())
}

/// Split a generic argument list at depth-0 commas, so that
/// `String, Map<Integer, String>` yields exactly two parts.
fn split_top_level(args: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in args.chars() {
        match c {
            '<' => {
                depth += 1;
                current.push(c);
            }
            '>' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    let last = current.trim();
    if !last.is_empty() {
        parts.push(last.to_string());
    }
    parts
}

/// Heuristic recognition of lambda-carrying interface types: the explicit
/// allow-list plus a suffix convention. Names like `MyConsumer` match even
/// when they are not functional interfaces; that precision loss is accepted.
fn is_function_like(name: &str) -> bool {
    let head = name.split('<').next().unwrap_or(name);
    let simple = simple_name(head);
    FUNCTIONAL_INTERFACES.contains(&simple)
        || simple.ends_with("Function")
        || simple.ends_with("Consumer")
        || simple.ends_with("Supplier")
        || simple.ends_with("Predicate")
}
