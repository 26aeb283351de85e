//! 翻訳ファイルの探索と読み込み

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use serde_json::Value;

use super::{
    CatalogError,
    TranslationTable,
    flatten_json,
};
use crate::config::{
    FileMatcher,
    I18nSettings,
};
use crate::locale::detect_locale_from_path;

/// 翻訳ファイルを検索
///
/// `.gitignore` を尊重しつつ `root` 以下を走査し、
/// `translationFiles` のパターンに一致するファイルを返す。
/// 結果はパス順にソートされる。
pub(super) fn find_translation_files(
    root: &Path,
    settings: &I18nSettings,
) -> Result<Vec<PathBuf>, CatalogError> {
    let matcher = FileMatcher::new(root.to_path_buf(), settings)?;
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        // ファイルのみを対象
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if matcher.is_translation_file(entry.path()) {
            found_files.push(entry.path().to_path_buf());
        }
    }

    found_files.sort();
    Ok(found_files)
}

/// 翻訳ファイルを読み込み、ロケールごとのテーブルにまとめる
///
/// ロケールは `root` からの相対パスだけで判定する。判定できないファイルはスキップする。
/// 同じロケールの複数ファイルはマージされ、キーの重複はエラーになる。
pub(super) fn load_tables(
    root: &Path,
    files: &[PathBuf],
    settings: &I18nSettings,
) -> Result<HashMap<String, TranslationTable>, CatalogError> {
    let mut tables: HashMap<String, TranslationTable> = HashMap::new();

    for path in files {
        let relative_path = path.strip_prefix(root).unwrap_or(path);
        let Some(locale) = detect_locale_from_path(relative_path, &settings.supported_locales)
        else {
            tracing::debug!(path = %path.display(), "Skipping file without a supported locale");
            continue;
        };

        let keys = read_translation_file(path, &settings.key_separator)?;
        tracing::debug!(path = %path.display(), %locale, keys = keys.len(), "Loaded translation file");

        let table = tables.entry(locale.clone()).or_default();
        for (key, value) in keys {
            if table.contains_key(&key) {
                return Err(CatalogError::DuplicateKey { locale, key, path: path.clone() });
            }
            table.insert(key, value);
        }
    }

    Ok(tables)
}

/// 1 ファイルを読み込んでフラットなキーマップにする
fn read_translation_file(path: &Path, separator: &str) -> Result<TranslationTable, CatalogError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
    parse_translation_json(&content, separator).map_err(|error| error.with_path(path))
}

/// JSON テキストをフラットなキーマップにする
///
/// ルートはオブジェクトでなければならない。
pub(super) fn parse_translation_json(
    content: &str,
    separator: &str,
) -> Result<TranslationTable, ParseFailure> {
    let json: Value = serde_json::from_str(content).map_err(ParseFailure::Json)?;
    if !json.is_object() {
        return Err(ParseFailure::NotAnObject);
    }
    Ok(flatten_json(&json, separator))
}

/// パスを持たない段階のパース失敗
#[derive(Debug)]
pub(super) enum ParseFailure {
    /// JSON として不正
    Json(serde_json::Error),
    /// ルートがオブジェクトではない
    NotAnObject,
}

impl ParseFailure {
    /// ファイルパスを付けて [`CatalogError`] にする
    pub(super) fn with_path(self, path: &Path) -> CatalogError {
        let path = path.to_path_buf();
        match self {
            Self::Json(source) => CatalogError::Parse { path, source },
            Self::NotAnObject => CatalogError::NotAnObject { path },
        }
    }
}
