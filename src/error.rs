use std::fmt;
use std::path::PathBuf;

use reqwest::StatusCode;

#[derive(Debug)]
pub enum Error {
    /// The token endpoint rejected the credentials or the refresh token.
    Authentication(String),
    /// The access token is no longer accepted and must be refreshed.
    TokenExpired,
    /// No token has been persisted at the given location yet.
    TokenNotFound(PathBuf),
    Decode(String),
    Http { status: StatusCode, body: String },
    Network(reqwest::Error),
    Config(String),
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Authentication(msg) => write!(f, "Authentication error: {}", msg),
            Error::TokenExpired => write!(f, "Access token expired"),
            Error::TokenNotFound(path) => {
                write!(f, "No token stored at {}", path.display())
            }
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::Http { status, body } => write!(f, "HTTP error {}: {}", status, body),
            Error::Network(err) => write!(f, "Network error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Yaml(err) => write!(f, "YAML parsing error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Network(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Yaml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
