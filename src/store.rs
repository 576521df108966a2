use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::token::Token;

/// File name of the default token slot inside the system temp directory.
pub const TOKEN_FILE_NAME: &str = "LANDROID_TOKEN_FILE";

/// Single-slot token file.
///
/// The default location is shared by every process on the machine, so
/// applications juggling more than one account should give each
/// [`TokenManager`](crate::auth::TokenManager) its own path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStore {
    path: PathBuf,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new(default_token_path())
    }
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted token, or `Error::TokenNotFound` if nothing was saved yet.
    pub fn load(&self) -> Result<Token> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::TokenNotFound(self.path.clone()));
            }
            Err(err) => return Err(Error::Io(err)),
        };

        let token = serde_json::from_str::<Token>(&content).map_err(|e| {
            Error::Decode(format!(
                "Failed to parse token file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!("Loaded token from {}", self.path.display());
        Ok(token)
    }

    /// Overwrite the slot with `token`.
    pub fn save(&self, token: &Token) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string(token)?;
        fs::write(&self.path, content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        debug!("Saved token to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Token file {} cleared", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Token file {} does not exist, nothing to clear",
                    self.path.display()
                );
                Ok(())
            }
            Err(err) => Err(Error::Io(err)),
        }
    }
}

pub fn default_token_path() -> PathBuf {
    std::env::temp_dir().join(TOKEN_FILE_NAME)
}
