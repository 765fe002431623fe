pub mod completeness;
pub mod handlers;
pub mod store;
pub mod validation;

use serde_json::Value;

/// Non-blank string value of `key` in a flat form object.
pub(crate) fn field<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Number of consecutive `<prefix>_0`, `<prefix>_1`, ... keys that are filled.
pub(crate) fn count_groups(data: &Value, prefix: &str) -> usize {
    (0..)
        .take_while(|i| field(data, &format!("{prefix}_{i}")).is_some())
        .count()
}
