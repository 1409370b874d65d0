//! Shared schema types.
//!
//! These types are intentionally small and `const`-friendly so configuration
//! records can declare their schema as a `static` table:
//!
//! - `Literal` / `TypeTag` / `FieldSpec` describe a field at definition time
//! - `Value` is what a configuration instance actually stores

use std::fmt;

use serde::Serialize;

/// A runtime configuration value.
///
/// Serialized untagged so a config dumps to JSON as a plain object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// The primitive kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Like `Display`, but strings are written bare (`cuda`, not `"cuda"`).
    pub fn plain(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            // Keep a decimal point so `1.0` does not read like an int.
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl PartialEq<Literal> for Value {
    fn eq(&self, other: &Literal) -> bool {
        match (self, other) {
            (Value::Bool(a), Literal::Bool(b)) => a == b,
            (Value::Int(a), Literal::Int(b)) => a == b,
            (Value::Float(a), Literal::Float(b)) => a == b,
            (Value::Str(a), Literal::Str(b)) => a == b,
            _ => false,
        }
    }
}

/// Primitive kind of a `Value` or `Literal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
}

impl ValueKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "str",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A compile-time constant value.
///
/// Used for closed-enumeration value sets and for field defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'static str),
}

impl Literal {
    pub fn kind(self) -> ValueKind {
        match self {
            Literal::Bool(_) => ValueKind::Bool,
            Literal::Int(_) => ValueKind::Int,
            Literal::Float(_) => ValueKind::Float,
            Literal::Str(_) => ValueKind::Str,
        }
    }

    pub fn to_value(self) -> Value {
        match self {
            Literal::Bool(b) => Value::Bool(b),
            Literal::Int(i) => Value::Int(i),
            Literal::Float(x) => Value::Float(x),
            Literal::Str(s) => Value::Str(s.to_string()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_value().fmt(f)
    }
}

/// Declared type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeTag {
    Bool,
    Int,
    Float,
    Str,
    /// Closed enumeration: only the listed literals are accepted, and only
    /// when they have the same kind as the first entry.
    Enum(&'static [Literal]),
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::Int => f.write_str("int"),
            TypeTag::Float => f.write_str("float"),
            TypeTag::Str => f.write_str("str"),
            TypeTag::Enum(values) => write!(f, "Literal[{}]", format_literals(values)),
        }
    }
}

/// Render a literal set as `a, b, c`.
pub fn format_literals(values: &[Literal]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Static declaration of one configuration field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: TypeTag,
    /// Value used when construction does not supply the field.
    ///
    /// `None` makes the field a required keyword argument.
    pub default: Option<Literal>,
    /// One-line description shown by `tg config`.
    pub help: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, ty: TypeTag) -> Self {
        Self {
            name,
            ty,
            default: None,
            help: "",
        }
    }

    pub const fn default_to(mut self, value: Literal) -> Self {
        self.default = Some(value);
        self
    }

    pub const fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_display_keeps_float_marker() {
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Float(0.01).to_string(), "0.01");
        assert_eq!(Value::Int(5).to_string(), "5");
        assert_eq!(Value::from("cpu").to_string(), "\"cpu\"");
    }

    #[test]
    fn plain_form_leaves_strings_unquoted() {
        assert_eq!(Value::from("cuda").plain(), "cuda");
        assert_eq!(Value::Float(2.0).plain(), "2.0");
        assert_eq!(Value::Bool(true).plain(), "true");
    }

    #[test]
    fn value_literal_equality_is_kind_strict() {
        assert_eq!(Value::Int(1), Literal::Int(1));
        assert_ne!(Value::Float(1.0), Literal::Int(1));
        assert_ne!(Value::Bool(true), Literal::Int(1));
        assert_eq!(Value::from("cuda"), Literal::Str("cuda"));
    }

    #[test]
    fn enum_tag_renders_value_set() {
        const DEVICES: &[Literal] = &[Literal::Str("cpu"), Literal::Str("cuda")];
        assert_eq!(TypeTag::Enum(DEVICES).to_string(), "Literal[\"cpu\", \"cuda\"]");
    }

    #[test]
    fn value_serializes_untagged() {
        let json = serde_json::to_string(&vec![Value::Int(3), Value::from("x"), Value::Bool(false)]).unwrap();
        assert_eq!(json, r#"[3,"x",false]"#);
    }
}
