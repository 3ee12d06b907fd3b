use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the navigator library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog file could not be located at the resolved path.
    #[error("catalog not found at {path}")]
    CatalogNotFound { path: PathBuf },

    /// Raised when the catalog document cannot be parsed.
    #[error("failed to parse catalog document: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// Raised when duplicate system names are encountered during catalog load.
    #[error("duplicate system name encountered: {name}")]
    DuplicateSystem { name: String },

    /// Raised when a system name could not be found in the catalog.
    #[error("unknown system name: {name}{}", format_suggestions(.suggestions))]
    UnknownSystem {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a jump level label is not one of the five known tiers.
    #[error("unknown jump level: {value}")]
    UnknownJumpLevel { value: String },

    /// Raised when no route could be found between two systems.
    #[error("no route found between {origin} and {destination}")]
    RouteNotFound { origin: String, destination: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
