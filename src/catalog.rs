//! ロケールごとの翻訳テーブルを保持するカタログ
//!
//! ルックアップは失敗しない。ロケールにキーがなければデフォルトロケール、
//! それでもなければキー自体を返す。

/// 読み込みエラー
mod error;
/// JSON のフラット化
mod flatten;
/// 翻訳ファイルの探索と読み込み
mod loader;
/// ロケールに束縛されたビュー
mod localizer;

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

pub use error::CatalogError;
pub use flatten::flatten_json;
pub use localizer::{
    Localizer,
    Translate,
};

use crate::config::I18nSettings;
use crate::interpolate::interpolate;

/// Message key to template string, one per locale.
pub type TranslationTable = HashMap<String, String>;

/// バイナリに埋め込まれたロケールファイル
const EMBEDDED_LOCALES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("es", include_str!("../locales/es.json")),
];

/// 埋め込みカタログのデフォルトロケール
const EMBEDDED_DEFAULT_LOCALE: &str = "en";

/// Read-only set of translation tables with a default locale.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// ロケール → 翻訳テーブル
    tables: HashMap<String, TranslationTable>,
    /// フォールバック先のロケール（必ず `tables` に存在する）
    default_locale: String,
}

impl Catalog {
    /// Builds a catalog from prepared tables.
    ///
    /// # Errors
    /// `CatalogError::MissingDefaultLocale` when `default_locale` has no table.
    pub fn from_tables(
        tables: HashMap<String, TranslationTable>,
        default_locale: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let default_locale = default_locale.into();
        if !tables.contains_key(&default_locale) {
            return Err(CatalogError::MissingDefaultLocale(default_locale));
        }
        Ok(Self { tables, default_locale })
    }

    /// The catalog compiled into the crate (`en` and `es`, default `en`).
    ///
    /// # Errors
    /// Only if an embedded locale file is not a JSON object.
    pub fn embedded() -> Result<Self, CatalogError> {
        let mut tables = HashMap::new();
        for (locale, json) in EMBEDDED_LOCALES {
            let table = loader::parse_translation_json(json, ".").map_err(|error| {
                error.with_path(Path::new(&format!("<embedded>/locales/{locale}.json")))
            })?;
            tables.insert((*locale).to_string(), table);
        }
        Self::from_tables(tables, EMBEDDED_DEFAULT_LOCALE)
    }

    /// ワークスペースの翻訳ファイルからカタログを作る
    ///
    /// `translationFiles` に一致し、かつ `supportedLocales` のいずれかと
    /// 判定できたファイルだけを読み込む。
    ///
    /// # Errors
    /// - 翻訳ファイルが 1 つも見つからない
    /// - ファイルの読み込み・パースエラー
    /// - 同一ロケール内のキー重複
    /// - デフォルトロケールのファイルがない
    pub fn load(root: &Path, settings: &I18nSettings) -> Result<Self, CatalogError> {
        tracing::debug!(root = %root.display(), "Loading translation catalog");

        let files = loader::find_translation_files(root, settings)?;
        if files.is_empty() {
            return Err(CatalogError::NoTranslationFiles { root: root.to_path_buf() });
        }

        let tables = loader::load_tables(root, &files, settings)?;
        let catalog = Self::from_tables(tables, settings.default_locale.as_str())?;
        tracing::info!(
            files = files.len(),
            locales = ?catalog.locales(),
            "Translation catalog loaded"
        );

        Ok(catalog)
    }

    /// フォールバック先のロケール
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// 読み込まれているロケール（ソート済み）
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// The table of `locale` itself, without fallback.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&TranslationTable> {
        self.tables.get(locale)
    }

    /// The table of `locale`, or the default locale's table.
    #[must_use]
    pub fn table(&self, locale: &str) -> &TranslationTable {
        self.tables.get(locale).unwrap_or_else(|| self.default_table())
    }

    /// デフォルトロケールのテーブル
    fn default_table(&self) -> &TranslationTable {
        // `from_tables` で存在を保証しているので EMPTY には到達しない
        static EMPTY: LazyLock<TranslationTable> = LazyLock::new(HashMap::new);
        self.tables.get(&self.default_locale).unwrap_or(&EMPTY)
    }

    /// Looks `key` up in `locale`, then in the default locale, then returns the key.
    #[must_use]
    pub fn translate<'a>(&'a self, locale: &str, key: &'a str) -> &'a str {
        if let Some(value) = self.tables.get(locale).and_then(|table| table.get(key)) {
            return value;
        }
        if let Some(value) = self.default_table().get(key) {
            tracing::trace!(locale, key, "Falling back to default locale");
            return value;
        }
        tracing::trace!(locale, key, "Translation missing, rendering key");
        key
    }

    /// [`Self::translate`] followed by `{{name}}` interpolation.
    #[must_use]
    pub fn t(&self, locale: &str, key: &str, params: &[(&str, &str)]) -> String {
        interpolate(self.translate(locale, key), params)
    }

    /// A translator bound to `locale` (or to the default locale when unknown).
    #[must_use]
    pub fn localizer(&self, locale: &str) -> Localizer<'_> {
        Localizer::new(self, locale)
    }
}
