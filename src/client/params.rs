//! Query-parameter encoding.
//!
//! Nested parameter maps flatten into bracket-chained keys
//! (`filter[tags][env]=prod`), arrays render as comma-joined strings, and
//! falsy values are omitted entirely.

use serde_json::{Map, Value};

/// Flattens a nested parameter map into bracketed query pairs.
///
/// `{"filter": {"name": "x", "tags": {"env": "prod"}}}` becomes
/// `[("filter[name]", "x"), ("filter[tags][env]", "prod")]`. Array values
/// render as a single comma-joined string. Entries with falsy values (see
/// [`is_falsy`]) are dropped at every nesting level.
///
/// # Example
///
/// ```rust
/// use asset_sync::client::flatten_params;
/// use serde_json::json;
///
/// let params = json!({"filter": {"name": "web-1", "organization_id": 9}});
/// let pairs = flatten_params(params.as_object().unwrap());
/// assert!(pairs.contains(&("filter[name]".to_string(), "web-1".to_string())));
/// assert!(pairs.contains(&("filter[organization_id]".to_string(), "9".to_string())));
/// ```
#[must_use]
pub fn flatten_params(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    flatten_into(&mut pairs, None, params);
    pairs
}

fn flatten_into(
    pairs: &mut Vec<(String, String)>,
    namespace: Option<&str>,
    params: &Map<String, Value>,
) {
    for (key, value) in params {
        if is_falsy(value) {
            continue;
        }
        let name = namespace.map_or_else(|| key.clone(), |ns| format!("{ns}[{key}]"));
        match value {
            Value::Object(nested) => flatten_into(pairs, Some(&name), nested),
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .map(render_scalar)
                    .collect::<Vec<_>>()
                    .join(",");
                pairs.push((name, joined));
            }
            other => pairs.push((name, render_scalar(other))),
        }
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Returns `true` for values the parameter encoding omits: null, `false`,
/// zero, and empty strings, arrays, and maps.
///
/// The omission is a contract of the wire encoding: a filter value of `0` or
/// `""` is indistinguishable from "not provided".
#[must_use]
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(value: Value) -> Vec<(String, String)> {
        flatten_params(value.as_object().unwrap())
    }

    #[test]
    fn test_flatten_simple_filter() {
        let encoded = pairs(json!({"filter": {"name": "x"}}));
        assert_eq!(encoded, vec![("filter[name]".to_string(), "x".to_string())]);
    }

    #[test]
    fn test_flatten_nested_filter_objects() {
        let encoded = pairs(json!({"filter": {"name": "x", "tags": {"env": "prod"}}}));
        assert!(encoded.contains(&("filter[name]".to_string(), "x".to_string())));
        assert!(encoded.contains(&("filter[tags][env]".to_string(), "prod".to_string())));
        assert_eq!(encoded.len(), 2);
    }

    #[test]
    fn test_flatten_renders_arrays_comma_joined() {
        let encoded = pairs(json!({"filter": {"id": [1, 2, 3]}}));
        assert_eq!(
            encoded,
            vec![("filter[id]".to_string(), "1,2,3".to_string())]
        );
    }

    #[test]
    fn test_flatten_omits_falsy_values() {
        let encoded = pairs(json!({
            "filter": {
                "name": "kept",
                "empty": "",
                "zero": 0,
                "missing": null,
                "off": false
            }
        }));
        assert_eq!(
            encoded,
            vec![("filter[name]".to_string(), "kept".to_string())]
        );
    }

    #[test]
    fn test_flatten_omits_empty_containers() {
        let encoded = pairs(json!({"filter": {}, "page": []}));
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_flatten_numbers_render_bare() {
        let encoded = pairs(json!({"filter": {"organization_id": 9}}));
        assert_eq!(
            encoded,
            vec![("filter[organization_id]".to_string(), "9".to_string())]
        );
    }

    #[test]
    fn test_is_falsy_matrix() {
        assert!(is_falsy(&json!(null)));
        assert!(is_falsy(&json!(false)));
        assert!(is_falsy(&json!(0)));
        assert!(is_falsy(&json!("")));
        assert!(is_falsy(&json!([])));
        assert!(is_falsy(&json!({})));

        assert!(!is_falsy(&json!(true)));
        assert!(!is_falsy(&json!(1)));
        assert!(!is_falsy(&json!("x")));
        assert!(!is_falsy(&json!([0])));
    }
}
