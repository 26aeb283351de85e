//! page-i18n
//!
//! サーバーレンダリングされたページ向けの翻訳カタログ、`{{name}}` 補間、ロケール判定

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod interpolate;
pub mod locale;

pub use catalog::{
    Catalog,
    CatalogError,
    Localizer,
    Translate,
    TranslationTable,
};
pub use interpolate::resolve;
pub use locale::negotiate_locale;
