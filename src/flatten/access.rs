//! Defaulted and required accessors over decoded YAML trees.
//!
//! Every presence check the flattener performs goes through this module, so
//! the "get field or default" and "get field or fail with a diagnostic that
//! names the path" rules live in exactly one place. Paths in diagnostics use
//! dotted notation ("info.outcome.by") so a failing record can be inspected
//! by eye.

use serde_yaml::{Sequence, Value};

use crate::error::{FlattenError, FlattenResult};

/// Dotted-path join; an empty parent path means the record root.
fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Look up a required key, failing with the full dotted path when absent.
pub(crate) fn required<'a>(node: &'a Value, key: &str, path: &str) -> FlattenResult<&'a Value> {
    node.get(key).ok_or_else(|| FlattenError::MissingField {
        path: join(path, key),
    })
}

/// Required string field.
pub(crate) fn required_str<'a>(node: &'a Value, key: &str, path: &str) -> FlattenResult<&'a str> {
    required(node, key, path)?
        .as_str()
        .ok_or_else(|| FlattenError::ExpectedString {
            path: join(path, key),
        })
}

/// Required non-negative integer field.
pub(crate) fn required_u32(node: &Value, key: &str, path: &str) -> FlattenResult<u32> {
    let value = required(node, key, path)?;
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| FlattenError::ExpectedInteger {
            path: join(path, key),
        })
}

/// Required sequence field.
pub(crate) fn required_sequence<'a>(
    node: &'a Value,
    key: &str,
    path: &str,
) -> FlattenResult<&'a Sequence> {
    required(node, key, path)?
        .as_sequence()
        .ok_or_else(|| FlattenError::ExpectedSequence {
            path: join(path, key),
        })
}

/// Optional string field, empty when absent or not a string.
pub(crate) fn str_or_empty(node: &Value, key: &str) -> String {
    node.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Optional counter under an optional sub-structure, zero when either the
/// sub-structure or the key is absent. This is the "get extras sub-field
/// or 0" rule from the delivery contract.
pub(crate) fn u32_or_zero(node: Option<&Value>, key: &str) -> u32 {
    node.and_then(|n| n.get(key))
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

/// Unwrap a single-entry mapping, the shape both innings entries and
/// delivery entries use (one named key wrapping the body).
pub(crate) fn single_entry<'a>(node: &'a Value, path: &str) -> FlattenResult<(&'a Value, &'a Value)> {
    let mapping = node
        .as_mapping()
        .ok_or_else(|| FlattenError::ExpectedMapping { path: path.to_string() })?;
    if mapping.len() != 1 {
        return Err(FlattenError::ExpectedSingleEntry { path: path.to_string() });
    }
    let (key, value) = mapping.iter().next().ok_or_else(|| {
        FlattenError::ExpectedSingleEntry { path: path.to_string() }
    })?;
    Ok((key, value))
}

/// Render a scalar key (string or number) to text. Delivery keys come out
/// of the YAML decoder as floats ("0.1") or occasionally strings.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_required_reports_dotted_path() {
        let v = node("outcome: {}");
        let err = required(&v["outcome"], "by", "info.outcome").unwrap_err();
        assert!(err.to_string().contains("info.outcome.by"));
    }

    #[test]
    fn test_required_str_rejects_non_strings() {
        let v = node("winner: 3");
        assert!(matches!(
            required_str(&v, "winner", "info.toss"),
            Err(FlattenError::ExpectedString { .. })
        ));
        let v = node("winner: Kings XI Punjab");
        assert_eq!(required_str(&v, "winner", "info.toss").unwrap(), "Kings XI Punjab");
    }

    #[test]
    fn test_u32_or_zero_defaults() {
        let v = node("extras: {wides: 2}");
        assert_eq!(u32_or_zero(v.get("extras"), "wides"), 2);
        assert_eq!(u32_or_zero(v.get("extras"), "byes"), 0);
        assert_eq!(u32_or_zero(v.get("absent"), "wides"), 0);
    }

    #[test]
    fn test_str_or_empty() {
        let v = node("city: Sharjah");
        assert_eq!(str_or_empty(&v, "city"), "Sharjah");
        assert_eq!(str_or_empty(&v, "state"), "");
    }

    #[test]
    fn test_single_entry_unwraps_wrapper() {
        let v = node("1st innings: {team: A}");
        let (key, body) = single_entry(&v, "innings[0]").unwrap();
        assert_eq!(key.as_str(), Some("1st innings"));
        assert_eq!(body["team"].as_str(), Some("A"));
    }

    #[test]
    fn test_single_entry_rejects_multi_key_mappings() {
        let v = node("a: 1\nb: 2");
        assert!(matches!(
            single_entry(&v, "innings[0]"),
            Err(FlattenError::ExpectedSingleEntry { .. })
        ));
        let v = node("- 1\n- 2");
        assert!(matches!(
            single_entry(&v, "innings[0]"),
            Err(FlattenError::ExpectedMapping { .. })
        ));
    }

    #[test]
    fn test_scalar_to_string_handles_float_keys() {
        let v = node("0.1");
        assert_eq!(scalar_to_string(&v).unwrap(), "0.1");
        let v = node("\"19.6\"");
        assert_eq!(scalar_to_string(&v).unwrap(), "19.6");
    }
}
