//! `.page-i18n.json` の読み込みとバリデーション
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Translation file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    CookieConfig,
    DiagnosticsConfig,
    I18nSettings,
    TranslationFilesConfig,
    ValidationError,
};
