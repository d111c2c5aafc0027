use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NetplayError>;

/// Coarse classification of failures, used by callers that only care about
/// which step class went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    NotFound,
    Io,
    UnsupportedPlatform,
}

#[derive(Error, Debug)]
pub enum NetplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request to {url} failed with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Download of {url} failed: {message}")]
    DownloadError { url: String, message: String },

    #[error("No release asset found for platform '{platform}'")]
    AssetNotFound { platform: String },

    #[error("Unsupported OS: {platform}")]
    UnsupportedPlatform { platform: String },

    #[error("Extraction failed for {path}: {message}")]
    ExtractionError { path: PathBuf, message: String },

    #[error("Install failed: {message}")]
    InstallError { message: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Credential error: {message}")]
    CredentialError { message: String },

    #[error("Application data directory not found")]
    DataDirectoryNotFound,
}

impl NetplayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetplayError::Network(_)
            | NetplayError::HttpStatus { .. }
            | NetplayError::DownloadError { .. } => ErrorKind::Network,
            NetplayError::AssetNotFound { .. } => ErrorKind::NotFound,
            NetplayError::UnsupportedPlatform { .. } => ErrorKind::UnsupportedPlatform,
            NetplayError::Io(_)
            | NetplayError::Json(_)
            | NetplayError::ExtractionError { .. }
            | NetplayError::InstallError { .. }
            | NetplayError::PermissionDenied { .. }
            | NetplayError::ConfigError { .. }
            | NetplayError::CredentialError { .. }
            | NetplayError::DataDirectoryNotFound => ErrorKind::Io,
        }
    }

    pub fn config_error<S: Into<String>>(message: S) -> Self {
        NetplayError::ConfigError {
            message: message.into(),
        }
    }

    pub fn install_error<S: Into<String>>(message: S) -> Self {
        NetplayError::InstallError {
            message: message.into(),
        }
    }

    pub fn credential_error<S: Into<String>>(message: S) -> Self {
        NetplayError::CredentialError {
            message: message.into(),
        }
    }

    pub fn extraction_error<S: Into<String>>(path: &std::path::Path, message: S) -> Self {
        NetplayError::ExtractionError {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
