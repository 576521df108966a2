use log::{debug, error, warn};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;

use crate::auth::{Credentials, TokenManager};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Mower, MowerStatus};
use crate::mower::MowerState;
use crate::ratelimit::RateLimiter;
use crate::store::{default_token_path, TokenStore};

pub const BASE_URL: &str = "https://api.worxlandroid.com/api/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`LandroidClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub token_file: PathBuf,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            token_file: default_token_path(),
        }
    }
}

/// Authenticated client for the Landroid cloud API.
pub struct LandroidClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    auth: TokenManager,
}

impl LandroidClient {
    /// Connect with the default endpoint, timeout and token file.
    pub async fn connect(credentials: Credentials) -> Result<Self> {
        Self::connect_with_options(credentials, ClientOptions::default()).await
    }

    pub async fn connect_with_options(
        credentials: Credentials,
        options: ClientOptions,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()?;
        let base_url = options.base_url.trim_end_matches('/').to_string();
        let token_url = format!("{}/oauth/token", base_url);

        let auth = TokenManager::new(
            client.clone(),
            token_url,
            credentials,
            TokenStore::new(options.token_file),
        )
        .await?;

        Ok(Self {
            client,
            base_url,
            timeout: options.timeout,
            auth,
        })
    }

    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::connect_with_options(config.credentials(), config.client_options()).await
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.auth
    }

    pub fn token_manager_mut(&mut self) -> &mut TokenManager {
        &mut self.auth
    }

    /// Authenticated GET of `base_url + path`.
    ///
    /// An expired token is refreshed once and the request retried once; a
    /// second expiry is returned to the caller as `Error::TokenExpired`. The
    /// response status is not checked beyond that.
    pub async fn get(&mut self, path: &str) -> Result<Response> {
        match self.send_get(path).await {
            Err(Error::TokenExpired) => {
                warn!("Access token expired, refreshing before retrying {}", path);
                self.auth.refresh().await?;
                self.send_get(path).await
            }
            result => result,
        }
    }

    async fn send_get(&self, path: &str) -> Result<Response> {
        let token = self.auth.token();
        if token.is_expired() {
            return Err(Error::TokenExpired);
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&token.access_token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::TokenExpired);
        }
        Ok(response)
    }

    /// GET `path` and decode a successful JSON body into `T`.
    pub async fn get_json<T: DeserializeOwned>(&mut self, path: &str) -> Result<T> {
        let text = self.get_text(path).await?;
        serde_json::from_str::<T>(&text).map_err(|e| {
            error!("Failed to parse response from {}: {}", path, e);
            Error::Decode(format!("Failed to parse response from {}: {}", path, e))
        })
    }

    pub(crate) async fn get_text(&mut self, path: &str) -> Result<String> {
        let response = self.get(path).await?;

        let status = response.status();
        let response_text = response.text().await?;
        if !status.is_success() {
            error!("Request to {} failed with {}: {}", path, status, response_text);
            return Err(Error::Http {
                status,
                body: response_text,
            });
        }

        debug!("{} response: {}", path, response_text);
        Ok(response_text)
    }

    /// All mowers registered to the account.
    pub async fn list_mowers(&mut self) -> Result<Vec<Mower>> {
        let mowers: Vec<Mower> = self.get_json("/product-items").await?;
        debug!("Found {} mowers", mowers.len());
        Ok(mowers)
    }

    pub async fn get_mower(&mut self, serial_number: &str) -> Result<Mower> {
        self.get_json(&format!("/product-items/{}", serial_number))
            .await
    }

    /// One unthrottled status request.
    pub async fn fetch_status(&mut self, serial_number: &str) -> Result<MowerStatus> {
        let text = self
            .get_text(&format!("/product-items/{}/status", serial_number))
            .await?;
        MowerStatus::from_json(&text)
    }

    /// Status poller for one mower with its own rate limit.
    ///
    /// Every call starts a fresh budget, so polling several mowers this way
    /// is not throttled across them. Use
    /// [`get_mower_status_with_limiter`](Self::get_mower_status_with_limiter)
    /// to draw all pollers from one budget.
    pub async fn get_mower_status(
        &mut self,
        serial_number: &str,
        update_on_init: bool,
    ) -> Result<MowerState> {
        MowerState::new(self, serial_number, update_on_init).await
    }

    /// Status poller for one mower drawing from `limiter`, which may be a
    /// clone shared with other pollers.
    pub async fn get_mower_status_with_limiter(
        &mut self,
        serial_number: &str,
        limiter: RateLimiter,
        update_on_init: bool,
    ) -> Result<MowerState> {
        MowerState::new_with_limiter(self, serial_number, limiter, update_on_init).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ClientOptions::default();
        assert_eq!(options.base_url, "https://api.worxlandroid.com/api/v2");
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.token_file, default_token_path());
    }
}
