//! Key lookup with `{{name}}` placeholder interpolation.

use std::collections::{
    BTreeSet,
    HashMap,
};

/// Opening delimiter of a placeholder.
const OPEN: &str = "{{";
/// Closing delimiter of a placeholder.
const CLOSE: &str = "}}";

/// Resolves `key` against `table` and substitutes `params` into the result.
///
/// A missing key resolves to the key itself. Each `(name, value)` pair
/// replaces every `{{name}}` in the current text, in the order given. Text
/// inserted for one parameter is not re-scanned for that parameter, but a
/// later parameter does see it.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use page_i18n::interpolate::resolve;
///
/// let table = HashMap::from([(
///     "home.greeting".to_string(),
///     "Welcome back, {{email}}!".to_string(),
/// )]);
///
/// assert_eq!(
///     resolve(&table, "home.greeting", Some(&[("email", "a@b.com")])),
///     "Welcome back, a@b.com!"
/// );
/// assert_eq!(resolve(&table, "nav.login", None), "nav.login");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn resolve(
    table: &HashMap<String, String>,
    key: &str,
    params: Option<&[(&str, &str)]>,
) -> String {
    let template = table.get(key).map_or(key, String::as_str);
    interpolate(template, params.unwrap_or_default())
}

/// Replaces every `{{name}}` in `template` with its value, one parameter at a time.
#[must_use]
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut value = template.to_string();
    for (name, replacement) in params {
        let pattern = format!("{OPEN}{name}{CLOSE}");
        if value.contains(&pattern) {
            value = value.replace(&pattern, replacement);
        }
    }
    value
}

/// Returns the placeholder names used in `template`.
///
/// A placeholder is the text between `{{` and the next `}}`. Empty names and
/// names containing braces are not placeholders.
#[must_use]
pub fn placeholders(template: &str) -> BTreeSet<&str> {
    let mut names = BTreeSet::new();
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let Some(after_open) = rest.get(start + OPEN.len()..) else {
            break;
        };
        let Some((name, tail)) = after_open.split_once(CLOSE) else {
            break;
        };
        if !name.is_empty() && !name.contains(['{', '}']) {
            names.insert(name);
            rest = tail;
        } else {
            // `{{{a}}` のような連続したブレースは 1 文字ずらして再走査
            rest = rest.get(start + 1..).unwrap_or_default();
        }
    }

    names
}
