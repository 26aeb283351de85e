//! Locale negotiation from the language cookie and the `Accept-Language` header.

use std::fmt;
use std::path::Path;

use crate::config::CookieConfig;

/// Returns the language tags of an `Accept-Language` header, in header order.
///
/// Parameters such as `;q=0.8` are dropped and quality values are not used
/// for ordering. Empty entries and the `*` wildcard are skipped.
///
/// # Examples
/// ```
/// use page_i18n::locale::parse_accept_language;
///
/// assert_eq!(parse_accept_language("es-MX,es;q=0.9, en;q=0.8"), vec!["es-MX", "es", "en"]);
/// ```
#[must_use]
pub fn parse_accept_language(header: &str) -> Vec<&str> {
    header
        .split(',')
        .filter_map(|part| {
            let tag = part.split(';').next().unwrap_or_default().trim();
            (!tag.is_empty() && tag != "*").then_some(tag)
        })
        .collect()
}

/// Chooses the locale for a request.
///
/// 1. `cookie` wins when it names a supported locale exactly.
/// 2. Otherwise the first `Accept-Language` entry that names a supported
///    locale, either as the whole tag (`pt-BR`) or by its primary subtag
///    (`es-MX` -> `es`). The whole tag is tried first.
/// 3. Otherwise `default`.
///
/// Header tags are compared ASCII case-insensitively with `_` and `-`
/// treated alike, since BCP 47 tags are case-insensitive. The cookie is
/// written by [`LocaleCookie`] from a supported value and must match exactly.
#[must_use]
pub fn negotiate_locale<'a, S: AsRef<str>>(
    cookie: Option<&str>,
    accept_language: Option<&str>,
    supported: &'a [S],
    default: &'a str,
) -> &'a str {
    if let Some(value) = cookie
        && let Some(locale) = supported.iter().find(|l| l.as_ref() == value)
    {
        return locale.as_ref();
    }

    let from_header = accept_language.and_then(|header| {
        parse_accept_language(header).into_iter().find_map(|tag| {
            find_supported(tag, supported).or_else(|| {
                let primary = tag.split(['-', '_']).next().unwrap_or_default();
                find_supported(primary, supported)
            })
        })
    });

    from_header.unwrap_or_else(|| {
        tracing::trace!(?cookie, ?accept_language, default, "No supported locale requested");
        default
    })
}

/// The supported spelling of `tag`, ignoring case and `_`/`-` differences.
fn find_supported<'a, S: AsRef<str>>(tag: &str, supported: &'a [S]) -> Option<&'a str> {
    let normalized = normalize_locale_code(tag);
    supported.iter().map(|l| l.as_ref()).find(|l| normalize_locale_code(l) == normalized)
}

/// Returns `requested` when it is supported, `default` otherwise.
///
/// Used for the value posted by the language switcher before it is stored
/// in the cookie.
#[must_use]
pub fn sanitize_locale<'a, S: AsRef<str>>(
    requested: &str,
    supported: &'a [S],
    default: &'a str,
) -> &'a str {
    let requested = requested.trim();
    supported.iter().map(|l| l.as_ref()).find(|l| *l == requested).unwrap_or(default)
}

/// Detects the locale of a translation file from its path.
///
/// The path is split on `/`, `\` and `.`, and the last part naming a
/// supported locale wins (`locales/es.json` -> `es`, `es/common.json` -> `es`).
/// `_` and `-` are interchangeable and case is ignored, so `pt_BR` matches
/// `pt-BR`.
#[must_use]
pub fn detect_locale_from_path<S: AsRef<str>>(path: &Path, supported: &[S]) -> Option<String> {
    let path_str = path.to_string_lossy();

    path_str
        .split(['/', '\\', '.'])
        .rev()
        .find_map(|part| find_supported(part, supported))
        .map(str::to_string)
}

/// Normalize locale code (lowercase and replace _ with -)
fn normalize_locale_code(code: &str) -> String {
    code.to_lowercase().replace('_', "-")
}

/// The language preference cookie set by the language switcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCookie {
    pub name: String,
    pub value: String,
    pub max_age_secs: u64,
}

impl LocaleCookie {
    #[must_use]
    pub fn new(config: &CookieConfig, locale: &str) -> Self {
        Self {
            name: config.name.clone(),
            value: locale.to_string(),
            max_age_secs: config.max_age_secs,
        }
    }
}

/// Renders the `Set-Cookie` header value.
impl fmt::Display for LocaleCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name, self.value, self.max_age_secs
        )
    }
}
