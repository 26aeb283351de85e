use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// One year, the lifetime of the language preference cookie.
const ONE_YEAR_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "supportedLocales[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    pub translation_files: TranslationFilesConfig,

    /// Locales the application serves. Files for other locales are skipped.
    pub supported_locales: Vec<String>,

    /// Used for missing tables, missing keys and failed negotiation.
    /// Must be listed in `supported_locales`.
    pub default_locale: String,

    /// Joins nested JSON object keys (`{"login": {"title": ..}}` -> `login.title`).
    pub key_separator: String,

    pub cookie: CookieConfig,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub file_pattern: String,
    pub exclude_patterns: Vec<String>,
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self {
            file_pattern: "**/locales/*.json".to_string(),
            exclude_patterns: vec!["node_modules/**".to_string()],
        }
    }
}

/// Language preference cookie written by the "set language" form.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieConfig {
    pub name: String,
    pub max_age_secs: u64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self { name: "lang".to_string(), max_age_secs: ONE_YEAR_SECS }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosticsConfig {
    /// Report keys that exist in a locale but not in the default locale.
    pub extra_keys: bool,
    /// Report templates whose `{{name}}` placeholders differ from the default locale.
    pub placeholder_mismatch: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { extra_keys: true, placeholder_mismatch: true }
    }
}

impl I18nSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Default locale is not supported
    /// - Cookie name or a locale is not cookie-safe
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.supported_locales.is_empty() {
            errors.push(ValidationError::new(
                "supportedLocales",
                "At least one locale is required. Example: [\"en\", \"es\"]",
            ));
        }

        for (index, locale) in self.supported_locales.iter().enumerate() {
            if locale.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("supportedLocales[{index}]"),
                    "The locale cannot be empty",
                ));
            } else if !is_cookie_safe(locale) {
                errors.push(ValidationError::new(
                    format!("supportedLocales[{index}]"),
                    format!("'{locale}' contains characters not allowed in a cookie value"),
                ));
            } else if self.supported_locales.iter().take(index).any(|l| l == locale) {
                errors.push(ValidationError::new(
                    format!("supportedLocales[{index}]"),
                    format!("Duplicate locale '{locale}'"),
                ));
            }
        }

        if !self.supported_locales.contains(&self.default_locale) {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!(
                    "'{}' is not listed in 'supportedLocales'. Add it there or pick one of {:?}",
                    self.default_locale, self.supported_locales
                ),
            ));
        }

        if self.translation_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/locales/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_files.file_pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_files.file_pattern),
            ));
        }

        for (index, pattern) in self.translation_files.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("translationFiles.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.cookie.name.is_empty() || !is_cookie_safe(&self.cookie.name) {
            errors.push(ValidationError::new(
                "cookie.name",
                format!(
                    "'{}' is not a valid cookie name. Use letters, digits, '-' or '_'",
                    self.cookie.name
                ),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Whether `value` can be written into a `Set-Cookie` header unquoted.
fn is_cookie_safe(value: &str) -> bool {
    !value.contains(|c: char| {
        !c.is_ascii() || c.is_ascii_whitespace() || c.is_ascii_control() || ";=,\"\\".contains(c)
    })
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            translation_files: TranslationFilesConfig::default(),
            supported_locales: vec!["en".to_string(), "es".to_string()],
            default_locale: "en".to_string(),
            key_separator: ".".to_string(),
            cookie: CookieConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}
