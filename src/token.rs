use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

/// OAuth2 token as returned by the Landroid token endpoint.
///
/// Fields other than the ones named here are kept verbatim in `extra`, so a
/// token written to disk reads back exactly as it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_in: Option<i64>,
    /// Unix timestamp (seconds) after which the access token is rejected.
    #[serde(
        default,
        deserialize_with = "seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Token {
    /// Fill in `expires_at` from `expires_in` for a freshly issued token.
    pub(crate) fn stamp_expiry(mut self) -> Self {
        if self.expires_at.is_none() {
            if let Some(expires_in) = self.expires_in {
                self.expires_at = Some(Utc::now().timestamp().saturating_add(expires_in));
            }
        }
        self
    }

    /// Tokens without an expiry are treated as valid until the server says otherwise.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires_at| Utc::now().timestamp() >= expires_at)
            .unwrap_or(false)
    }
}

/// Whole seconds from an integer or fractional JSON number. Fractions are
/// truncated.
fn seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Whole(i64),
        Fractional(f64),
    }

    Ok(
        Option::<Seconds>::deserialize(deserializer)?.map(|value| match value {
            Seconds::Whole(seconds) => seconds,
            Seconds::Fractional(seconds) => seconds as i64,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_at: Option<i64>) -> Token {
        Token {
            access_token: "access123".to_string(),
            refresh_token: Some("refresh456".to_string()),
            token_type: Some("Bearer".to_string()),
            expires_in: Some(3600),
            expires_at,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_token_response_parsing() {
        let json = r#"{
            "token_type": "Bearer",
            "expires_in": 3600,
            "access_token": "access123",
            "refresh_token": "refresh456",
            "scope": "*"
        }"#;

        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "access123");
        assert_eq!(token.refresh_token.as_deref(), Some("refresh456"));
        assert_eq!(token.expires_in, Some(3600));
        assert_eq!(token.expires_at, None);
        assert_eq!(token.extra["scope"], "*");
    }

    #[test]
    fn test_stamp_expiry() {
        let before = Utc::now().timestamp();
        let stamped = token(None).stamp_expiry();
        let expires_at = stamped.expires_at.unwrap();
        assert!(expires_at >= before + 3600);
        assert!(!stamped.is_expired());

        // An explicit expiry from the server is left alone
        let kept = token(Some(42)).stamp_expiry();
        assert_eq!(kept.expires_at, Some(42));
    }

    #[test]
    fn test_fractional_expiry_fields() {
        let json = r#"{
            "access_token": "access123",
            "expires_in": 3600.0,
            "expires_at": 4102444800.5
        }"#;

        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.expires_in, Some(3600));
        assert_eq!(token.expires_at, Some(4102444800));
        assert!(!token.is_expired());

        let json = r#"{"access_token": "access123", "expires_at": null}"#;
        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.expires_at, None);

        let json = r#"{"access_token": "access123", "expires_at": "soon"}"#;
        assert!(serde_json::from_str::<Token>(json).is_err());
    }

    #[test]
    fn test_stamp_expiry_saturates() {
        let mut huge = token(None);
        huge.expires_in = Some(i64::MAX);
        let stamped = huge.stamp_expiry();
        assert_eq!(stamped.expires_at, Some(i64::MAX));
        assert!(!stamped.is_expired());
    }

    #[test]
    fn test_is_expired() {
        let past = Utc::now().timestamp() - 10;
        assert!(token(Some(past)).is_expired());

        let future = Utc::now().timestamp() + 600;
        assert!(!token(Some(future)).is_expired());

        assert!(!token(None).is_expired());
    }
}
