//! `--key=value` command-line overrides.
//!
//! Every argument must have the shape `--<field>=<value>`; anything else is a
//! usage error rather than being ignored. Values go through a small ordered
//! literal parser before being handed to [`TypedConfig::update`]:
//!
//! 1. `True` / `False`            -> bool
//! 2. integer                     -> int
//! 3. float (text with a digit)   -> float
//! 4. `'quoted'` / `"quoted"`     -> the unquoted string
//! 5. anything else               -> the raw string
//!
//! Lowercase `true`/`false` stay strings here; the update path coerces them for
//! boolean fields only.

use crate::config::typed::{ConfigSchema, TypedConfig};
use crate::domain::Value;
use crate::error::ConfigError;

/// Apply `--key=value` arguments in order, stopping at the first failure.
///
/// Updates applied before a failing argument are kept.
pub fn apply_cli_arguments<S, I, A>(config: &mut TypedConfig<S>, args: I) -> Result<(), ConfigError>
where
    S: ConfigSchema,
    I: IntoIterator<Item = A>,
    A: AsRef<str>,
{
    for arg in args {
        let (key, raw) = split_override(arg.as_ref())?;
        config.update(key, parse_literal(raw))?;
    }
    Ok(())
}

/// Apply the current process arguments (after the program name).
pub fn apply_process_arguments<S: ConfigSchema>(config: &mut TypedConfig<S>) -> Result<(), ConfigError> {
    apply_cli_arguments(config, std::env::args().skip(1))
}

/// Split `--key=value` into `(key, value)`.
pub fn split_override(arg: &str) -> Result<(&str, &str), ConfigError> {
    let usage = || ConfigError::Usage(format!("overrides must be in --key=value format, got `{arg}`"));

    let body = arg.strip_prefix("--").ok_or_else(usage)?;
    let (key, value) = body.split_once('=').ok_or_else(usage)?;
    if key.is_empty() || key.chars().any(char::is_whitespace) {
        return Err(usage());
    }
    Ok((key, value))
}

/// Parse a textual override value.
pub fn parse_literal(raw: &str) -> Value {
    match raw {
        "True" => return Value::Bool(true),
        "False" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }

    // `f64::from_str` also takes `inf` / `nan`; those stay text.
    if raw.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(x) = raw.parse::<f64>() {
            return Value::Float(x);
        }
    }

    if let Some(inner) = unquote(raw) {
        return Value::Str(inner.to_string());
    }

    Value::Str(raw.to_string())
}

fn unquote(raw: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if let Some(inner) = raw.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            if !inner.contains(quote) {
                return Some(inner);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldSpec, Literal, TypeTag};

    enum Train {}

    const DEVICES: &[Literal] = &[Literal::Str("cpu"), Literal::Str("cuda")];

    impl ConfigSchema for Train {
        const NAME: &'static str = "Train";
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::new("epochs", TypeTag::Int).default_to(Literal::Int(1)),
            FieldSpec::new("lr", TypeTag::Float).default_to(Literal::Float(1e-3)),
            FieldSpec::new("compile", TypeTag::Bool).default_to(Literal::Bool(false)),
            FieldSpec::new("device", TypeTag::Enum(DEVICES)).default_to(Literal::Str("cpu")),
            FieldSpec::new("out", TypeTag::Str).default_to(Literal::Str("out")),
        ];
    }

    #[test]
    fn applies_int_and_float_overrides() {
        let mut cfg = TypedConfig::<Train>::with_defaults().unwrap();
        apply_cli_arguments(&mut cfg, ["--epochs=5", "--lr=0.01"]).unwrap();
        assert_eq!(cfg.get("epochs"), Some(&Value::Int(5)));
        assert_eq!(cfg.get("lr"), Some(&Value::Float(0.01)));
    }

    #[test]
    fn int_text_widens_for_float_fields() {
        let mut cfg = TypedConfig::<Train>::with_defaults().unwrap();
        apply_cli_arguments(&mut cfg, ["--lr=1"]).unwrap();
        assert_eq!(cfg.get_float("lr"), Some(1.0));
    }

    #[test]
    fn missing_dashes_is_a_usage_error() {
        let mut cfg = TypedConfig::<Train>::with_defaults().unwrap();
        let err = apply_cli_arguments(&mut cfg, ["epochs=5"]).unwrap_err();
        assert!(matches!(err, ConfigError::Usage(_)));
        assert_eq!(cfg.get_int("epochs"), Some(1));
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        for bad in ["--epochs", "-epochs=5", "--=5", "--ep ochs=5"] {
            assert!(
                matches!(split_override(bad), Err(ConfigError::Usage(_))),
                "{bad} should be rejected"
            );
        }
        assert_eq!(split_override("--out=a=b").unwrap(), ("out", "a=b"));
    }

    #[test]
    fn stops_at_first_failure_keeping_earlier_updates() {
        let mut cfg = TypedConfig::<Train>::with_defaults().unwrap();
        let err = apply_cli_arguments(&mut cfg, ["--epochs=7", "--nope=1", "--lr=0.5"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownField { .. }));
        assert_eq!(cfg.get_int("epochs"), Some(7));
        assert_eq!(cfg.get_float("lr"), Some(1e-3));
    }

    #[test]
    fn bool_overrides_accept_keyword_and_text_forms() {
        let mut cfg = TypedConfig::<Train>::with_defaults().unwrap();
        apply_cli_arguments(&mut cfg, ["--compile=True"]).unwrap();
        assert_eq!(cfg.get_bool("compile"), Some(true));
        apply_cli_arguments(&mut cfg, ["--compile=false"]).unwrap();
        assert_eq!(cfg.get_bool("compile"), Some(false));
        let err = apply_cli_arguments(&mut cfg, ["--compile=yes"]).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    }

    #[test]
    fn enum_override_validates_membership() {
        let mut cfg = TypedConfig::<Train>::with_defaults().unwrap();
        apply_cli_arguments(&mut cfg, ["--device=cuda"]).unwrap();
        assert_eq!(cfg.get_str("device"), Some("cuda"));
        let err = apply_cli_arguments(&mut cfg, ["--device=tpu"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnumValue { .. }));
    }

    #[test]
    fn numeric_text_for_string_field_is_a_mismatch() {
        let mut cfg = TypedConfig::<Train>::with_defaults().unwrap();
        let err = apply_cli_arguments(&mut cfg, ["--out=123"]).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
        apply_cli_arguments(&mut cfg, ["--out='123'"]).unwrap();
        assert_eq!(cfg.get_str("out"), Some("123"));
    }

    #[test]
    fn literal_parser_order() {
        assert_eq!(parse_literal("True"), Value::Bool(true));
        assert_eq!(parse_literal("true"), Value::from("true"));
        assert_eq!(parse_literal("-3"), Value::Int(-3));
        assert_eq!(parse_literal("1e-4"), Value::Float(1e-4));
        assert_eq!(parse_literal(".5"), Value::Float(0.5));
        assert_eq!(parse_literal("inf"), Value::from("inf"));
        assert_eq!(parse_literal("nan"), Value::from("nan"));
        assert_eq!(parse_literal("\"cuda\""), Value::from("cuda"));
        assert_eq!(parse_literal("cuda"), Value::from("cuda"));
        assert_eq!(parse_literal(""), Value::from(""));
    }
}
