//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    I18nSettings,
    loader,
};

/// 検証済みの設定と、その読み込み元
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定（常にバリデーション済み）
    current_settings: I18nSettings,

    /// 読み込んだ設定ファイル。デフォルト設定なら `None`
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// デフォルト設定で作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ワークスペースの `.page-i18n.json` を読み込む
    ///
    /// 設定ファイルがなければデフォルト設定を使う。
    /// エラーの場合は現在の設定を保持する。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: &Path) -> Result<(), ConfigError> {
        let source = loader::find_config_file(workspace_root);
        let settings = match &source {
            Some(path) => loader::read_settings(path)?,
            None => I18nSettings::default(),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(?source, ?settings, "Settings loaded");
        self.current_settings = settings;
        self.source = source;

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &I18nSettings {
        &self.current_settings
    }

    /// 設定の読み込み元ファイル
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
