use std::path::PathBuf;

/// Errors produced while loading values or rendering manifests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A chart or values file could not be read.
    #[error("Read error for {}: {source}", .path.display())]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// YAML could not be parsed or produced.
    #[error("Yaml error: {source}")]
    Yaml {
        /// Underlying error
        #[from]
        source: serde_yaml::Error,
    },
}

/// Result type of the renderer library.
pub type Result<T, E = Error> = std::result::Result<T, E>;
