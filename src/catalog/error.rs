use std::path::PathBuf;

use thiserror::Error;

use crate::config::MatcherError;

/// Errors raised while building a [`Catalog`](super::Catalog).
///
/// Lookups never fail; only loading does.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read translation file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Translation file {} must contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("Duplicate key '{key}' for locale '{locale}' in {}", path.display())]
    DuplicateKey { locale: String, key: String, path: PathBuf },

    #[error("Default locale '{0}' has no translations")]
    MissingDefaultLocale(String),

    #[error("No translation files found under {}", root.display())]
    NoTranslationFiles { root: PathBuf },

    #[error(transparent)]
    Matcher(#[from] MatcherError),
}
