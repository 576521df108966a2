use log::{debug, info};
use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};
use crate::store::TokenStore;
use crate::token::Token;

/// Account and application credentials for the password grant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    grant_type: &'static str,
    username: &'a str,
    password: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// Owns the OAuth2 token for one set of credentials.
///
/// Every token obtained from the server is written through to the
/// [`TokenStore`] before it replaces the one held in memory.
pub struct TokenManager {
    client: reqwest::Client,
    token_url: String,
    credentials: Credentials,
    store: TokenStore,
    token: Token,
}

impl TokenManager {
    /// Reuse the persisted token, or run the password grant if none was stored.
    pub async fn new(
        client: reqwest::Client,
        token_url: String,
        credentials: Credentials,
        store: TokenStore,
    ) -> Result<Self> {
        let token = match store.load() {
            Ok(token) => token,
            Err(Error::TokenNotFound(path)) => {
                debug!(
                    "Token file {} does not exist, fetching new token",
                    path.display()
                );
                let token = password_grant(&client, &token_url, &credentials).await?;
                store.save(&token)?;
                token
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            client,
            token_url,
            credentials,
            store,
            token,
        })
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Exchange username and password for a brand new token.
    pub async fn fetch(&mut self) -> Result<()> {
        let token = password_grant(&self.client, &self.token_url, &self.credentials).await?;
        self.store.save(&token)?;
        self.token = token;
        Ok(())
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// A rejected refresh token surfaces as `Error::Authentication`; callers
    /// decide whether to fall back to [`fetch`](Self::fetch). When the
    /// response carries no refresh token, the current one stays in use.
    pub async fn refresh(&mut self) -> Result<()> {
        let refresh_token = self.token.refresh_token.clone().ok_or_else(|| {
            Error::Authentication("Token has no refresh token".to_string())
        })?;

        debug!("Refreshing access token");
        let grant = RefreshGrant {
            grant_type: "refresh_token",
            refresh_token: &refresh_token,
            client_id: &self.credentials.client_id,
            client_secret: &self.credentials.client_secret,
        };
        let mut token = request_token(&self.client, &self.token_url, &grant).await?;
        if token.refresh_token.is_none() {
            debug!("Refresh response has no refresh token, keeping the current one");
            token.refresh_token = Some(refresh_token);
        }

        self.store.save(&token)?;
        self.token = token;
        info!("Access token refreshed");
        Ok(())
    }
}

async fn password_grant(
    client: &reqwest::Client,
    token_url: &str,
    credentials: &Credentials,
) -> Result<Token> {
    debug!("Authenticating user: {}", credentials.username);
    let grant = PasswordGrant {
        grant_type: "password",
        username: &credentials.username,
        password: &credentials.password,
        client_id: &credentials.client_id,
        client_secret: &credentials.client_secret,
    };
    let token = request_token(client, token_url, &grant).await?;
    info!("Authentication successful for user: {}", credentials.username);
    Ok(token)
}

async fn request_token<G: Serialize>(
    client: &reqwest::Client,
    token_url: &str,
    grant: &G,
) -> Result<Token> {
    let response = client.post(token_url).form(grant).send().await?;

    let status = response.status();
    let response_text = response.text().await?;

    if status.is_success() {
        match serde_json::from_str::<Token>(&response_text) {
            Ok(token) => Ok(token.stamp_expiry()),
            Err(e) => {
                debug!("Failed to parse token response: {}", e);
                Err(Error::Decode(format!(
                    "Failed to parse token response: {}",
                    e
                )))
            }
        }
    } else {
        debug!("Token request failed with status: {}", status);
        Err(Error::Authentication(format!(
            "Token request rejected ({}): {}",
            status, response_text
        )))
    }
}
