//! ワークスペースからカタログを読み込み、ロケール判定と翻訳までを通しで確認するテスト

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use googletest::prelude::*;
use page_i18n::config::{
    CONFIG_FILE_NAME,
    ConfigManager,
};
use page_i18n::diagnostics::{
    CatalogDiagnostic,
    DiagnosticKind,
    check_catalog,
};
use page_i18n::{
    Catalog,
    CatalogError,
    Translate,
    negotiate_locale,
    resolve,
};
use rstest::*;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// `en` と `es` の翻訳ファイルを持つワークスペース
#[fixture]
fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "web/locales/en.json",
        r#"{
            "nav": { "login": "Log in", "logout": "Log out" },
            "home.greeting": "Welcome back, {{email}}!",
            "profile.joined": "Joined {{date}}"
        }"#,
    );
    write(
        root,
        "web/locales/es.json",
        r#"{
            "nav": { "login": "Iniciar sesión" },
            "home.greeting": "¡Bienvenido de nuevo, {{email}}!",
            "profile.joined": "Se unió el {{fecha}}"
        }"#,
    );
    temp_dir
}

fn load(root: &Path) -> Catalog {
    let mut manager = ConfigManager::new();
    manager.load_settings(root).unwrap();
    Catalog::load(root, manager.get_settings()).unwrap()
}

#[rstest]
fn workspace_catalog_resolves_with_fallback(workspace: TempDir) {
    let catalog = load(workspace.path());

    assert_that!(catalog.locales(), elements_are![eq(&"en"), eq(&"es")]);
    assert_eq!(catalog.t("es", "nav.login", &[]), "Iniciar sesión");
    assert_eq!(catalog.t("es", "nav.logout", &[]), "Log out");
    assert_eq!(catalog.t("es", "nav.unknown", &[]), "nav.unknown");
    assert_eq!(
        catalog.t("es", "home.greeting", &[("email", "ana@example.com")]),
        "¡Bienvenido de nuevo, ana@example.com!"
    );
}

#[rstest]
#[case(Some("es"), Some("en-US,en;q=0.9"), "es")]
#[case(Some("fr"), Some("fr-FR, es;q=0.5"), "es")]
#[case(None, Some("de-DE,de;q=0.9"), "en")]
#[case(None, None, "en")]
fn negotiated_locale_drives_translation(
    workspace: TempDir,
    #[case] cookie: Option<&str>,
    #[case] accept_language: Option<&str>,
    #[case] expected: &str,
) {
    let catalog = load(workspace.path());
    let locales = catalog.locales();

    let locale = negotiate_locale(cookie, accept_language, &locales, catalog.default_locale());

    assert_eq!(locale, expected);
    assert_eq!(catalog.localizer(locale).locale(), expected);
}

#[rstest]
fn workspace_config_changes_locales_and_pattern(workspace: TempDir) {
    let root = workspace.path();
    write(
        root,
        CONFIG_FILE_NAME,
        r#"{
            "supportedLocales": ["es", "en"],
            "defaultLocale": "es",
            "translationFiles": { "filePattern": "web/locales/*.json" }
        }"#,
    );
    write(root, "other/locales/en.json", r#"{ "nav.login": "Ignored" }"#);

    let catalog = load(root);

    assert_eq!(catalog.default_locale(), "es");
    assert_eq!(catalog.t("en", "nav.login", &[]), "Log in");
    assert_eq!(catalog.t("fr", "nav.login", &[]), "Iniciar sesión");
}

#[rstest]
#[case("pt-BR,pt;q=0.9", "pt-BR")]
#[case("pt-br", "pt-BR")]
#[case("pt-PT", "en")]
fn region_locale_is_loaded_and_negotiated(#[case] accept_language: &str, #[case] expected: &str) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, CONFIG_FILE_NAME, r#"{ "supportedLocales": ["en", "pt-BR"] }"#);
    write(root, "locales/en.json", r#"{ "nav.login": "Log in" }"#);
    write(root, "locales/pt_BR.json", r#"{ "nav.login": "Entrar" }"#);
    let catalog = load(root);
    let locales = catalog.locales();

    let locale =
        negotiate_locale(None, Some(accept_language), &locales, catalog.default_locale());

    assert_eq!(locale, expected);
    assert_eq!(
        catalog.localizer(locale).t("nav.login", &[]),
        catalog.t(expected, "nav.login", &[])
    );
    assert_eq!(catalog.t("pt-BR", "nav.login", &[]), "Entrar");
}

#[rstest]
fn diagnostics_compare_against_default_locale(workspace: TempDir) {
    let catalog = load(workspace.path());
    let settings = ConfigManager::new().get_settings().clone();

    let diagnostics = check_catalog(&catalog, &settings.diagnostics);

    assert_that!(
        diagnostics,
        elements_are![
            all![
                field!(CatalogDiagnostic.key, eq("nav.logout")),
                field!(CatalogDiagnostic.kind, eq(&DiagnosticKind::MissingKey))
            ],
            field!(CatalogDiagnostic.key, eq("profile.joined"))
        ]
    );
    assert!(matches!(
        diagnostics.last().map(|d| &d.kind),
        Some(DiagnosticKind::PlaceholderMismatch { .. })
    ));
}

#[googletest::test]
fn empty_workspace_has_no_translation_files() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = ConfigManager::new();
    manager.load_settings(temp_dir.path()).unwrap();

    let result = Catalog::load(temp_dir.path(), manager.get_settings());

    assert!(matches!(result, Err(CatalogError::NoTranslationFiles { .. })));
}

#[googletest::test]
fn invalid_workspace_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), CONFIG_FILE_NAME, r#"{ "defaultLocale": "fr" }"#);
    let mut manager = ConfigManager::new();

    let error = manager.load_settings(temp_dir.path()).unwrap_err();

    expect_that!(error.to_string(), contains_substring("defaultLocale"));
}

/// ページ側が直接テーブルを渡すときの挙動
mod plain_table {
    use super::*;

    fn table() -> HashMap<String, String> {
        HashMap::from([
            ("home.greeting".to_string(), "Welcome back, {{email}}!".to_string()),
            ("nav.login".to_string(), "Log in".to_string()),
            ("pair".to_string(), "{{a}} and {{b}}".to_string()),
        ])
    }

    #[rstest]
    #[case("home.greeting", &[("email", "a@b.com")], "Welcome back, a@b.com!")]
    #[case("home.greeting", &[("name", "x")], "Welcome back, {{email}}!")]
    #[case("pair", &[("a", "1"), ("b", "2")], "1 and 2")]
    fn resolve_page_strings(
        #[case] key: &str,
        #[case] params: &[(&str, &str)],
        #[case] expected: &str,
    ) {
        assert_eq!(resolve(&table(), key, Some(params)), expected);
    }

    #[rstest]
    #[case("home.greeting", "Welcome back, {{email}}!")]
    #[case("nav.login", "Log in")]
    #[case("missing.key", "missing.key")]
    fn resolve_page_strings_without_params(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(resolve(&table(), key, None), expected);
        assert_eq!(resolve(&table(), key, None), resolve(&table(), key, Some(&[])));
    }

    #[rstest]
    fn table_and_catalog_agree() {
        let table = table();
        let catalog = Catalog::from_tables(HashMap::from([("en".to_string(), table.clone())]), "en")
            .unwrap();

        for key in ["home.greeting", "nav.login", "missing.key"] {
            let params = [("email", "a@b.com")];
            assert_eq!(table.t(key, &params), catalog.t("en", key, &params));
        }
    }
}
