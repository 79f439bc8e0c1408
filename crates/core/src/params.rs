//! Typed lookups in a flat JSON override object such as `{"step_size": 0.02}`.
//!
//! Each helper returns `None` when the key is absent or has the wrong type,
//! so callers can keep their current value with `if let Some(..)`.

use serde_json::Value;

/// Extracts an `f64` (integers are accepted and converted).
pub fn param_f64(params: &Value, name: &str) -> Option<f64> {
    params.get(name).and_then(Value::as_f64)
}

/// Extracts a non-negative integer as `usize`.
pub fn param_usize(params: &Value, name: &str) -> Option<usize> {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
}

/// Extracts a `bool`.
pub fn param_bool(params: &Value, name: &str) -> Option<bool> {
    params.get(name).and_then(Value::as_bool)
}

/// Extracts a string slice.
pub fn param_str<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(Value::as_str)
}

/// Extracts a two-element numeric array `[min, max]`.
pub fn param_range(params: &Value, name: &str) -> Option<(f64, f64)> {
    match params.get(name)?.as_array()?.as_slice() {
        [a, b] => Some((a.as_f64()?, b.as_f64()?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_floats_and_integers() {
        let params = json!({"step": 2.5, "count": 10});
        assert_eq!(param_f64(&params, "step"), Some(2.5));
        assert_eq!(param_f64(&params, "count"), Some(10.0));
    }

    #[test]
    fn param_f64_is_none_when_missing_or_wrong_type() {
        let params = json!({"step": "fast", "nothing": null});
        assert_eq!(param_f64(&params, "step"), None);
        assert_eq!(param_f64(&params, "nothing"), None);
        assert_eq!(param_f64(&params, "absent"), None);
        assert_eq!(param_f64(&json!("not an object"), "step"), None);
    }

    #[test]
    fn param_usize_rejects_floats_and_negatives() {
        let params = json!({"a": 42, "b": 2.5, "c": -1});
        assert_eq!(param_usize(&params, "a"), Some(42));
        assert_eq!(param_usize(&params, "b"), None);
        assert_eq!(param_usize(&params, "c"), None);
    }

    #[test]
    fn param_bool_extracts_only_booleans() {
        let params = json!({"on": true, "off": false, "one": 1});
        assert_eq!(param_bool(&params, "on"), Some(true));
        assert_eq!(param_bool(&params, "off"), Some(false));
        assert_eq!(param_bool(&params, "one"), None);
    }

    #[test]
    fn param_str_borrows_from_params() {
        let params = json!({"palette": "ocean", "n": 3});
        assert_eq!(param_str(&params, "palette"), Some("ocean"));
        assert_eq!(param_str(&params, "n"), None);
    }

    #[test]
    fn param_range_requires_two_numbers() {
        let params = json!({
            "ok": [-2, 3.5],
            "short": [1.0],
            "long": [1, 2, 3],
            "mixed": [1, "x"],
        });
        assert_eq!(param_range(&params, "ok"), Some((-2.0, 3.5)));
        assert_eq!(param_range(&params, "short"), None);
        assert_eq!(param_range(&params, "long"), None);
        assert_eq!(param_range(&params, "mixed"), None);
        assert_eq!(param_range(&params, "missing"), None);
    }
}
