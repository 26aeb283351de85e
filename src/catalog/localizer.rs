//! 1 つのロケールに束縛された翻訳ビュー

use super::{
    Catalog,
    TranslationTable,
};

/// Something that turns a message key into display text.
///
/// Page rendering code takes `&impl Translate` so that it does not need to
/// know about locales or catalogs.
pub trait Translate {
    /// Resolves `key` and substitutes `params`. Never fails.
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// [`Catalog`] のビュー（リクエストのロケールに固定）
#[derive(Debug, Clone, Copy)]
pub struct Localizer<'a> {
    /// 参照元のカタログ
    catalog: &'a Catalog,
    /// カタログに存在するロケール（なければデフォルトロケール）
    locale: &'a str,
}

impl<'a> Localizer<'a> {
    /// `locale` がカタログになければデフォルトロケールに束縛する
    pub(super) fn new(catalog: &'a Catalog, locale: &str) -> Self {
        let locale = catalog
            .tables
            .get_key_value(locale)
            .map_or(catalog.default_locale.as_str(), |(name, _)| name.as_str());
        Self { catalog, locale }
    }

    /// 束縛されているロケール
    #[must_use]
    pub const fn locale(&self) -> &'a str {
        self.locale
    }

    /// 束縛されているロケールの翻訳テーブル
    #[must_use]
    pub fn table(&self) -> &'a TranslationTable {
        self.catalog.table(self.locale)
    }
}

impl Translate for Localizer<'_> {
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.catalog.t(self.locale, key, params)
    }
}

impl Translate for TranslationTable {
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        crate::interpolate::resolve(self, key, Some(params))
    }
}
