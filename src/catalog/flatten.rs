//! Nested JSON to flat key map conversion.

use std::collections::HashMap;

use serde_json::Value;

/// Flatten nested JSON object into a separator-joined key map.
///
/// String leaves are kept verbatim, other scalars are stored as their JSON
/// text and array elements get an `[index]` suffix. Keys that already contain
/// the separator are not split.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use page_i18n::catalog::flatten_json;
///
/// let json = json!({
///     "login": {
///         "title": "Log in",
///         "submit": "Continue"
///     },
///     "nav.logout": "Log out"
/// });
///
/// let flattened = flatten_json(&json, ".");
/// assert_eq!(flattened.get("login.title"), Some(&"Log in".to_string()));
/// assert_eq!(flattened.get("nav.logout"), Some(&"Log out".to_string()));
/// ```
#[must_use]
pub fn flatten_json(json: &Value, separator: &str) -> HashMap<String, String> {
    let mut result = HashMap::new();
    flatten_json_value(json, separator, None, &mut result);
    result
}

/// Walks `json` depth-first, writing leaves under `prefix` into `result`.
fn flatten_json_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut HashMap<String, String>,
) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => insert_leaf(prefix, s.clone(), result),
        _ => insert_leaf(prefix, json.to_string(), result),
    }
}

/// Stores one leaf. A key reached both nested and flat keeps the value seen last.
fn insert_leaf(prefix: Option<&str>, value: String, result: &mut HashMap<String, String>) {
    let Some(key) = prefix else {
        return;
    };
    if let Some(previous) = result.insert(key.to_string(), value) {
        // serde_json のマップはキー順に走査されるので、ファイル内の順序とは限らない
        tracing::warn!(key, %previous, "Key defined both nested and flat, one value was dropped");
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn test_flatten_json_nested() {
        let json = json!({
            "edit": {
                "title": "Edit profile",
                "socials": {
                    "x": "X"
                }
            }
        });

        let result = flatten_json(&json, ".");

        expect_that!(result.len(), eq(2));
        expect_that!(result.get("edit.title"), some(eq(&"Edit profile".to_string())));
        expect_that!(result.get("edit.socials.x"), some(eq(&"X".to_string())));
    }

    #[googletest::test]
    fn test_flatten_json_flat_keys_kept() {
        let json = json!({
            "home.greeting": "Welcome back, {{email}}!"
        });

        let result = flatten_json(&json, ".");

        expect_that!(
            result.get("home.greeting"),
            some(eq(&"Welcome back, {{email}}!".to_string()))
        );
    }

    #[googletest::test]
    fn test_flatten_json_custom_separator() {
        let json = json!({
            "nav": {
                "login": "Log in"
            }
        });

        let result = flatten_json(&json, "_");

        expect_that!(result.get("nav_login"), some(eq(&"Log in".to_string())));
    }

    #[googletest::test]
    fn test_flatten_json_non_string_values() {
        let json = json!({
            "number": 42,
            "boolean": true,
            "null": null,
            "list": ["a", "b"]
        });

        let result = flatten_json(&json, ".");

        expect_that!(result.get("number"), some(eq(&"42".to_string())));
        expect_that!(result.get("boolean"), some(eq(&"true".to_string())));
        expect_that!(result.get("null"), some(eq(&"null".to_string())));
        expect_that!(result.get("list[1]"), some(eq(&"b".to_string())));
    }

    #[googletest::test]
    fn test_flatten_json_collision_keeps_single_value() {
        let json = json!({
            "nav": { "login": "Log in", "count": 1 },
            "nav.login": "Sign in",
            "nav.count": 2
        });

        let result = flatten_json(&json, ".");

        expect_that!(result.len(), eq(2));
        expect_that!(
            result.get("nav.login"),
            some(any![eq(&"Log in".to_string()), eq(&"Sign in".to_string())])
        );
        expect_that!(
            result.get("nav.count"),
            some(any![eq(&"1".to_string()), eq(&"2".to_string())])
        );
    }

    #[googletest::test]
    fn test_flatten_json_empty_object() {
        let result = flatten_json(&json!({}), ".");

        expect_that!(result, is_empty());
    }
}
