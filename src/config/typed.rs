//! Strict, keyword-only, type-checked configuration records.
//!
//! A configuration type is a marker implementing [`ConfigSchema`]: it declares
//! its fields once, as a static table. [`TypedConfig`] stores one value per
//! declared field and re-validates every value on construction and on every
//! later [`TypedConfig::update`], so an instance can never hold a value that is
//! incompatible with its schema.
//!
//! Validation rules (shared by construction and update):
//! - `int` values are widened to `float` when the field is declared `float`
//! - closed-enumeration fields accept only members of the declared set, of the
//!   same kind as the set's first entry
//! - every other field requires an exact kind match
//!
//! The update path additionally turns the strings `"true"` / `"false"`
//! (case-insensitive) into booleans, since that is what textual CLI input
//! produces. No other spellings are accepted.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::{FieldSpec, TypeTag, Value, ValueKind, format_literals};
use crate::error::ConfigError;

/// Static schema of a configuration record.
pub trait ConfigSchema: 'static {
    /// Human-readable record name used in messages.
    const NAME: &'static str;
    /// Declared fields, in display order.
    const FIELDS: &'static [FieldSpec];
}

/// One construction argument.
///
/// Construction is keyword-only; `Positional` exists so callers forwarding
/// untyped argument lists get a usage error instead of a silent mix-up.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigArg {
    Positional(Value),
    Keyword(String, Value),
}

impl ConfigArg {
    pub fn kw(name: impl Into<String>, value: impl Into<Value>) -> Self {
        ConfigArg::Keyword(name.into(), value.into())
    }
}

/// A configuration instance for schema `S`.
pub struct TypedConfig<S: ConfigSchema> {
    /// One slot per `S::FIELDS` entry, same order.
    values: Vec<Value>,
    _schema: PhantomData<S>,
}

impl<S: ConfigSchema> TypedConfig<S> {
    /// Build an instance from keyword arguments.
    ///
    /// Fields that are not supplied take their declared default; a field with
    /// no default must be supplied.
    pub fn construct(args: impl IntoIterator<Item = ConfigArg>) -> Result<Self, ConfigError> {
        debug_assert!(
            validate_schema::<S>().is_ok(),
            "{} has an invalid field declaration",
            S::NAME
        );
        let mut supplied: Vec<Option<Value>> = vec![None; S::FIELDS.len()];

        for arg in args {
            let (name, value) = match arg {
                ConfigArg::Keyword(name, value) => (name, value),
                ConfigArg::Positional(value) => {
                    return Err(ConfigError::Usage(format!(
                        "{} only accepts keyword arguments (got positional value {value})",
                        S::NAME
                    )));
                }
            };

            let idx = field_index::<S>(&name).ok_or_else(|| ConfigError::UnknownField {
                config: S::NAME,
                field: name.clone(),
            })?;
            let slot = &mut supplied[idx];
            if slot.is_some() {
                return Err(ConfigError::Usage(format!(
                    "{} got multiple values for keyword argument `{name}`",
                    S::NAME
                )));
            }
            *slot = Some(check_value::<S>(&S::FIELDS[idx], value)?);
        }

        let mut values = Vec::with_capacity(S::FIELDS.len());
        for (spec, slot) in S::FIELDS.iter().zip(supplied) {
            let value = match slot {
                Some(v) => v,
                None => {
                    let default = spec.default.ok_or_else(|| {
                        ConfigError::Usage(format!(
                            "{} missing required keyword argument `{}`",
                            S::NAME,
                            spec.name
                        ))
                    })?;
                    check_value::<S>(spec, default.to_value())?
                }
            };
            values.push(value);
        }

        Ok(Self {
            values,
            _schema: PhantomData,
        })
    }

    /// Build an instance holding every declared default.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::construct(std::iter::empty())
    }

    /// Override a single field, returning the previous value.
    ///
    /// On error the instance is left unchanged.
    pub fn update(&mut self, field: &str, raw: impl Into<Value>) -> Result<Value, ConfigError> {
        let idx = field_index::<S>(field).ok_or_else(|| ConfigError::UnknownField {
            config: S::NAME,
            field: field.to_string(),
        })?;
        let spec = &S::FIELDS[idx];

        let mut value = raw.into();
        if spec.ty == TypeTag::Bool {
            value = coerce_bool_text(value);
        }
        let value = check_value::<S>(spec, value)?;

        log::info!("Overriding hyperparameter: {field} = {}", value.plain());
        Ok(std::mem::replace(&mut self.values[idx], value))
    }

    /// Field name to current value, in declaration order.
    pub fn serialize(&self) -> ConfigMap {
        ConfigMap {
            entries: S::FIELDS
                .iter()
                .map(|spec| spec.name)
                .zip(self.values.iter().cloned())
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        field_index::<S>(field).map(|idx| &self.values[idx])
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    pub fn get_int(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_int)
    }

    pub fn get_float(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_float)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn name(&self) -> &'static str {
        S::NAME
    }

    pub fn schema(&self) -> &'static [FieldSpec] {
        S::FIELDS
    }

    /// Pretty-printed JSON object of the current values.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.serialize())
    }
}

impl<S: ConfigSchema> Clone for TypedConfig<S> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            _schema: PhantomData,
        }
    }
}

impl<S: ConfigSchema> fmt::Debug for TypedConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(S::NAME);
        for (spec, value) in S::FIELDS.iter().zip(&self.values) {
            s.field(spec.name, value);
        }
        s.finish()
    }
}

impl<S: ConfigSchema> fmt::Display for TypedConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", S::NAME, self.serialize())
    }
}

/// Ordered field-name to value mapping produced by [`TypedConfig::serialize`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigMap {
    entries: Vec<(&'static str, Value)>,
}

impl ConfigMap {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ConfigMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k:?}: {v}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for ConfigMap {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Check a schema table for duplicate names and invalid enum sets.
///
/// Defaults are checked separately by construction.
pub fn validate_schema<S: ConfigSchema>() -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for spec in S::FIELDS {
        if !seen.insert(spec.name) {
            return Err(ConfigError::Usage(format!(
                "{} declares field `{}` twice",
                S::NAME,
                spec.name
            )));
        }
        if let TypeTag::Enum(values) = spec.ty {
            if values.is_empty() {
                return Err(ConfigError::Usage(format!(
                    "{} field `{}` declares an empty value set",
                    S::NAME,
                    spec.name
                )));
            }
        }
    }
    Ok(())
}

fn field_index<S: ConfigSchema>(name: &str) -> Option<usize> {
    S::FIELDS.iter().position(|spec| spec.name == name)
}

fn coerce_bool_text(value: Value) -> Value {
    match value {
        Value::Str(s) if s.eq_ignore_ascii_case("true") => Value::Bool(true),
        Value::Str(s) if s.eq_ignore_ascii_case("false") => Value::Bool(false),
        other => other,
    }
}

/// Widen then validate `value` against `spec`.
fn check_value<S: ConfigSchema>(spec: &FieldSpec, value: Value) -> Result<Value, ConfigError> {
    let value = match (spec.ty, value) {
        (TypeTag::Float, Value::Int(i)) => Value::Float(i as f64),
        (_, v) => v,
    };

    let expected = match spec.ty {
        TypeTag::Bool => ValueKind::Bool,
        TypeTag::Int => ValueKind::Int,
        TypeTag::Float => ValueKind::Float,
        TypeTag::Str => ValueKind::Str,
        TypeTag::Enum(allowed) => {
            let same_kind = allowed.first().is_some_and(|first| first.kind() == value.kind());
            if same_kind && allowed.iter().any(|lit| value == *lit) {
                return Ok(value);
            }
            return Err(ConfigError::InvalidEnumValue {
                config: S::NAME,
                field: spec.name.to_string(),
                value: value.to_string(),
                allowed: format_literals(allowed),
            });
        }
    };

    if value.kind() != expected {
        return Err(ConfigError::TypeMismatch {
            config: S::NAME,
            field: spec.name.to_string(),
            expected: expected.to_string(),
            value: format!("{value} ({})", value.kind()),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Literal;

    enum Demo {}

    const MODES: &[Literal] = &[Literal::Str("fast"), Literal::Str("slow")];
    const LEVELS: &[Literal] = &[Literal::Int(1), Literal::Int(2), Literal::Int(3)];

    impl ConfigSchema for Demo {
        const NAME: &'static str = "Demo";
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::new("epochs", TypeTag::Int).default_to(Literal::Int(1)),
            FieldSpec::new("lr", TypeTag::Float).default_to(Literal::Float(0.1)),
            FieldSpec::new("compile", TypeTag::Bool).default_to(Literal::Bool(false)),
            FieldSpec::new("name", TypeTag::Str).default_to(Literal::Str("run")),
            FieldSpec::new("mode", TypeTag::Enum(MODES)).default_to(Literal::Str("fast")),
            FieldSpec::new("level", TypeTag::Enum(LEVELS)).default_to(Literal::Int(1)),
        ];
    }

    enum Required {}

    impl ConfigSchema for Required {
        const NAME: &'static str = "Required";
        const FIELDS: &'static [FieldSpec] = &[FieldSpec::new("path", TypeTag::Str)];
    }

    #[test]
    fn construct_round_trips_supplied_values() {
        let cfg = TypedConfig::<Demo>::construct([
            ConfigArg::kw("epochs", 5),
            ConfigArg::kw("lr", 0.01),
            ConfigArg::kw("compile", true),
            ConfigArg::kw("name", "abc"),
            ConfigArg::kw("mode", "slow"),
            ConfigArg::kw("level", 3),
        ])
        .unwrap();

        let map = cfg.serialize();
        assert_eq!(map.get("epochs"), Some(&Value::Int(5)));
        assert_eq!(map.get("lr"), Some(&Value::Float(0.01)));
        assert_eq!(map.get("compile"), Some(&Value::Bool(true)));
        assert_eq!(map.get("name"), Some(&Value::from("abc")));
        assert_eq!(map.get("mode"), Some(&Value::from("slow")));
        assert_eq!(map.get("level"), Some(&Value::Int(3)));
        assert_eq!(map.keys().collect::<Vec<_>>(), ["epochs", "lr", "compile", "name", "mode", "level"]);
    }

    #[test]
    fn construct_widens_int_to_float() {
        let cfg = TypedConfig::<Demo>::construct([ConfigArg::kw("lr", 2)]).unwrap();
        assert_eq!(cfg.get("lr"), Some(&Value::Float(2.0)));
    }

    #[test]
    fn construct_rejects_positional_arguments() {
        let err = TypedConfig::<Demo>::construct([ConfigArg::Positional(Value::Int(5))]).unwrap_err();
        assert!(matches!(err, ConfigError::Usage(_)), "got {err:?}");
    }

    #[test]
    fn construct_rejects_unknown_field() {
        let err = TypedConfig::<Demo>::construct([ConfigArg::kw("epoch", 5)]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownField {
                config: "Demo",
                field: "epoch".to_string()
            }
        );
    }

    #[test]
    fn construct_rejects_duplicate_keyword() {
        let err = TypedConfig::<Demo>::construct([ConfigArg::kw("epochs", 5), ConfigArg::kw("epochs", 6)])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Usage(_)));
    }

    #[test]
    fn construct_requires_fields_without_default() {
        let err = TypedConfig::<Required>::with_defaults().unwrap_err();
        assert!(matches!(err, ConfigError::Usage(msg) if msg.contains("`path`")));

        let cfg = TypedConfig::<Required>::construct([ConfigArg::kw("path", "a.csv")]).unwrap();
        assert_eq!(cfg.get_str("path"), Some("a.csv"));
    }

    #[test]
    fn construct_type_mismatch_is_exact() {
        let err = TypedConfig::<Demo>::construct([ConfigArg::kw("epochs", 1.5)]).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref field, .. } if field == "epochs"));

        // No narrowing and no bool-as-int.
        assert!(TypedConfig::<Demo>::construct([ConfigArg::kw("epochs", true)]).is_err());
        // Strings are not coerced at construction time.
        assert!(TypedConfig::<Demo>::construct([ConfigArg::kw("compile", "true")]).is_err());
    }

    #[test]
    fn enum_fields_accept_only_members() {
        let err = TypedConfig::<Demo>::construct([ConfigArg::kw("mode", "medium")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnumValue { .. }));

        let mut cfg = TypedConfig::<Demo>::with_defaults().unwrap();
        assert!(matches!(
            cfg.update("level", 4),
            Err(ConfigError::InvalidEnumValue { .. })
        ));
        // Same number, wrong kind.
        assert!(matches!(
            cfg.update("level", 2.0),
            Err(ConfigError::InvalidEnumValue { .. })
        ));
        cfg.update("level", 2).unwrap();
        cfg.update("mode", "slow").unwrap();
        assert_eq!(cfg.get_int("level"), Some(2));
        assert_eq!(cfg.get_str("mode"), Some("slow"));
    }

    #[test]
    fn update_unknown_field_leaves_instance_unchanged() {
        let mut cfg = TypedConfig::<Demo>::with_defaults().unwrap();
        let before = cfg.serialize();
        let err = cfg.update("batch_size", 32).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownField {
                config: "Demo",
                field: "batch_size".to_string()
            }
        );
        assert_eq!(cfg.serialize(), before);
    }

    #[test]
    fn update_coerces_bool_text_case_insensitively() {
        let mut cfg = TypedConfig::<Demo>::with_defaults().unwrap();
        cfg.update("compile", "TRUE").unwrap();
        assert_eq!(cfg.get_bool("compile"), Some(true));
        cfg.update("compile", "false").unwrap();
        assert_eq!(cfg.get_bool("compile"), Some(false));

        for other in ["yes", "1", "no", "0"] {
            let err = cfg.update("compile", other).unwrap_err();
            assert!(matches!(err, ConfigError::TypeMismatch { .. }), "{other}: {err:?}");
        }
        assert_eq!(cfg.get_bool("compile"), Some(false));
    }

    #[test]
    fn update_does_not_coerce_text_for_string_fields() {
        let mut cfg = TypedConfig::<Demo>::with_defaults().unwrap();
        cfg.update("name", "true").unwrap();
        assert_eq!(cfg.get_str("name"), Some("true"));
    }

    #[test]
    fn update_returns_previous_value_and_widens() {
        let mut cfg = TypedConfig::<Demo>::with_defaults().unwrap();
        let old = cfg.update("lr", 3).unwrap();
        assert_eq!(old, Value::Float(0.1));
        assert_eq!(cfg.get_float("lr"), Some(3.0));
    }

    #[test]
    fn display_lists_fields_in_order() {
        let cfg = TypedConfig::<Required>::construct([ConfigArg::kw("path", "x")]).unwrap();
        assert_eq!(cfg.to_string(), r#"Required: {"path": "x"}"#);
    }

    #[test]
    fn json_output_is_plain_object() {
        let cfg = TypedConfig::<Demo>::with_defaults().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(parsed["epochs"], 1);
        assert_eq!(parsed["mode"], "fast");
        assert_eq!(parsed["compile"], false);
    }

    #[test]
    fn schema_validation_catches_duplicates() {
        enum Dup {}
        impl ConfigSchema for Dup {
            const NAME: &'static str = "Dup";
            const FIELDS: &'static [FieldSpec] = &[
                FieldSpec::new("a", TypeTag::Int),
                FieldSpec::new("a", TypeTag::Str),
            ];
        }
        assert!(validate_schema::<Demo>().is_ok());
        assert!(validate_schema::<Dup>().is_err());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "EmptyEnum has an invalid field declaration")]
    fn construct_rejects_invalid_schema_in_debug_builds() {
        enum EmptyEnum {}
        impl ConfigSchema for EmptyEnum {
            const NAME: &'static str = "EmptyEnum";
            const FIELDS: &'static [FieldSpec] = &[FieldSpec::new("mode", TypeTag::Enum(&[]))];
        }
        let _ = TypedConfig::<EmptyEnum>::with_defaults();
    }
}
