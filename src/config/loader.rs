//! 設定ファイルの探索と読み込み

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    I18nSettings,
};

/// ワークスペース直下の設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".page-i18n.json";

/// ワークスペース直下の設定ファイルを探す
///
/// ファイルがなければ `None`（デフォルト設定を使う）
pub(super) fn find_config_file(workspace_root: &Path) -> Option<PathBuf> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);
    if config_path.is_file() {
        Some(config_path)
    } else {
        tracing::debug!(path = %config_path.display(), "Configuration file not found");
        None
    }
}

/// 設定ファイルを読み込む。バリデーションは呼び出し側で行う。
pub(super) fn read_settings(config_path: &Path) -> Result<I18nSettings, ConfigError> {
    tracing::debug!(path = %config_path.display(), "Reading configuration");
    let content = std::fs::read_to_string(config_path)?;
    Ok(serde_json::from_str(&content)?)
}
