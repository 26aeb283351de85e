//! Command line entry point for inspecting translation catalogs.

use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use page_i18n::catalog::{
    Catalog,
    CatalogError,
};
use page_i18n::config::{
    ConfigError,
    ConfigManager,
    I18nSettings,
};
use page_i18n::diagnostics::{
    Severity,
    check_catalog,
};
use page_i18n::locale::{
    LocaleCookie,
    negotiate_locale,
    sanitize_locale,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "page-i18n")]
#[command(version)]
#[command(about = "Resolve, negotiate and check page translations")]
struct Args {
    /// Directory holding `.page-i18n.json` and the locale files
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the text for a key
    Resolve {
        key: String,

        /// Locale to resolve in (defaults to the default locale)
        #[arg(short, long)]
        locale: Option<String>,

        /// Placeholder value as `name=value`, may be repeated
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Print the locale chosen for a request
    Negotiate {
        /// Value of the language cookie
        #[arg(long)]
        cookie: Option<String>,

        /// Value of the `Accept-Language` header
        #[arg(long)]
        accept_language: Option<String>,
    },

    /// Print the `Set-Cookie` value for a language switch
    SetLang { lang: String },

    /// Compare every locale against the default locale
    Check,

    /// List the loaded locales
    Locales,
}

/// Failures surfaced by the command line tool.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _guard = init_logging(args.log_file.as_deref());

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(%err, "page-i18n failed");
            // ログをファイルに出している場合でも利用者に見えるようにする
            let _ = writeln!(io::stderr().lock(), "error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Sets up the global subscriber. The guard must live until exit.
fn init_logging(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(path) = log_file {
        let directory =
            path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let file_name =
            path.file_name().map_or_else(|| "page-i18n.log".into(), ToOwned::to_owned);
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer))
            .with(filter)
            .init();
        return Some(guard);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
    None
}

fn run(args: &Args) -> Result<ExitCode, AppError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(&args.workspace)?;
    tracing::info!(source = ?config_manager.source(), "Using settings");
    let settings = config_manager.get_settings();
    let catalog = load_catalog(&args.workspace, settings)?;

    let mut out = io::stdout().lock();
    match &args.command {
        Command::Resolve { key, locale, params } => {
            let locale = locale.as_deref().unwrap_or_else(|| catalog.default_locale());
            let params: Vec<(&str, &str)> =
                params.iter().map(|(name, value)| (name.as_str(), value.as_str())).collect();
            writeln!(out, "{}", catalog.t(locale, key, &params))?;
        }
        Command::Negotiate { cookie, accept_language } => {
            let locales = catalog.locales();
            let locale = negotiate_locale(
                cookie.as_deref(),
                accept_language.as_deref(),
                &locales,
                catalog.default_locale(),
            );
            writeln!(out, "{locale}")?;
        }
        Command::SetLang { lang } => {
            let locales = catalog.locales();
            let locale = sanitize_locale(lang, &locales, catalog.default_locale());
            writeln!(out, "{}", LocaleCookie::new(&settings.cookie, locale))?;
        }
        Command::Check => {
            let diagnostics = check_catalog(&catalog, &settings.diagnostics);
            for diagnostic in &diagnostics {
                writeln!(out, "{diagnostic}")?;
            }
            let errors = diagnostics.iter().filter(|d| d.severity == Severity::Error).count();
            writeln!(out, "{} problem(s), {errors} error(s)", diagnostics.len())?;
            if errors > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Locales => {
            for locale in catalog.locales() {
                let marker = if locale == catalog.default_locale() { " (default)" } else { "" };
                writeln!(out, "{locale}{marker}")?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Loads the workspace catalog, or the embedded one when the workspace has no locale files.
fn load_catalog(workspace: &Path, settings: &I18nSettings) -> Result<Catalog, CatalogError> {
    match Catalog::load(workspace, settings) {
        Err(CatalogError::NoTranslationFiles { root }) => {
            tracing::info!(root = %root.display(), "No translation files, using embedded catalog");
            Catalog::embedded()
        }
        result => result,
    }
}

/// Parses a `name=value` pair.
fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}
