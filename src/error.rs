/// Error types for the localization pipeline
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No consumption target was supplied, or the input stream produced no files
    #[error("Missing files")]
    MissingFiles,
    /// Options are incomplete or point at something unusable
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Reading a source file or writing an output failed
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for localization operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_message() {
        assert_eq!(Error::MissingFiles.to_string(), "Missing files");
    }

    #[test]
    fn test_io_error_names_path() {
        let err = Error::io(
            "out/fr/index.html",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("out/fr/index.html"));
        assert!(msg.contains("denied"));
    }
}
