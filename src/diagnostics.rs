//! 診断メッセージ生成モジュール
//!
//! デフォルトロケールを基準に、各ロケールの翻訳テーブルの欠落や
//! プレースホルダーの食い違いを検出する。

use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::{
    Catalog,
    TranslationTable,
};
use crate::config::DiagnosticsConfig;
use crate::interpolate::placeholders;

/// 診断の重大度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// 診断の種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// デフォルトロケールにあるキーがない
    MissingKey,
    /// デフォルトロケールにないキーがある
    ExtraKey,
    /// プレースホルダーの集合がデフォルトロケールと異なる
    PlaceholderMismatch { expected: BTreeSet<String>, found: BTreeSet<String> },
}

/// 1 件の診断
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDiagnostic {
    pub locale: String,
    pub key: String,
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for CatalogDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] {}", self.severity, self.locale, self.message)
    }
}

/// カタログの診断メッセージを生成
///
/// デフォルトロケール以外の各ロケールをデフォルトロケールと比較する。
/// 結果は (ロケール, キー) の順にソートされる。
///
/// # Arguments
/// * `catalog` - チェック対象のカタログ
/// * `config` - 警告の有効・無効
#[must_use]
pub fn check_catalog(catalog: &Catalog, config: &DiagnosticsConfig) -> Vec<CatalogDiagnostic> {
    let default_locale = catalog.default_locale();
    let reference = catalog.table(default_locale);
    let mut diagnostics = Vec::new();

    for locale in catalog.locales() {
        if locale == default_locale {
            continue;
        }
        let Some(table) = catalog.get(locale) else {
            continue;
        };

        tracing::debug!(locale, reference = default_locale, "Checking locale");
        check_locale(locale, table, default_locale, reference, config, &mut diagnostics);
    }

    diagnostics.sort_by(|a, b| (&a.locale, &a.key).cmp(&(&b.locale, &b.key)));
    diagnostics
}

/// 1 ロケール分の診断
fn check_locale(
    locale: &str,
    table: &TranslationTable,
    default_locale: &str,
    reference: &TranslationTable,
    config: &DiagnosticsConfig,
    diagnostics: &mut Vec<CatalogDiagnostic>,
) {
    for (key, expected_template) in reference {
        let Some(template) = table.get(key) else {
            diagnostics.push(CatalogDiagnostic {
                locale: locale.to_string(),
                key: key.clone(),
                severity: Severity::Error,
                kind: DiagnosticKind::MissingKey,
                message: format!("Translation key '{key}' missing (present in '{default_locale}')"),
            });
            continue;
        };

        if config.placeholder_mismatch {
            let expected = owned(&placeholders(expected_template));
            let found = owned(&placeholders(template));
            if expected != found {
                diagnostics.push(CatalogDiagnostic {
                    locale: locale.to_string(),
                    key: key.clone(),
                    severity: Severity::Warning,
                    message: format!(
                        "Placeholders of '{key}' differ: expected {expected:?}, found {found:?}"
                    ),
                    kind: DiagnosticKind::PlaceholderMismatch { expected, found },
                });
            }
        }
    }

    if config.extra_keys {
        for key in table.keys().filter(|key| !reference.contains_key(*key)) {
            diagnostics.push(CatalogDiagnostic {
                locale: locale.to_string(),
                key: key.clone(),
                severity: Severity::Warning,
                kind: DiagnosticKind::ExtraKey,
                message: format!("Translation key '{key}' not found in '{default_locale}'"),
            });
        }
    }
}

/// Converts borrowed placeholder names into owned ones.
fn owned(names: &BTreeSet<&str>) -> BTreeSet<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}
