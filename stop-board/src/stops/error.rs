//! Stop catalogue error types.

use std::path::PathBuf;

/// Errors that can occur when loading the stop catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    /// The catalogue file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalogue file is not a JSON list of stops
    #[error("failed to parse {}: {message}", path.display())]
    Json { path: PathBuf, message: String },
}
