use crate::error::{Error, MissingField, Result};
use chrono::{DateTime, Utc};
use oidc_common::{Persistable, Restorer};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const MISSING_ACCESS_TOKEN_ERROR: &str = "access_token is missing";
pub const MISSING_TOKEN_TYPE_ERROR: &str = "token_type is missing";
pub const MISSING_EXPIRES_IN_ERROR: &str = "expires_in is missing";

/// Storage key shared by [`TokenResponse`] and [`TokenResponse::RESTORE`].
pub const TOKEN_RESPONSE_KEY: &str = "TokenResponse";

const MILLIS_PER_SECOND: i64 = 1000;

// https://datatracker.ietf.org/doc/html/rfc6749#section-5.1
// https://openid.net/specs/openid-connect-core-1_0.html#TokenResponse
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TokenResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token_type: Option<String>,
    // Some servers send a number here, others a string. Numbers keep their JSON
    // text, so a non-integer fails later in `expires_at` rather than here.
    #[serde(
        default,
        deserialize_with = "deserialize_expires_in",
        skip_serializing_if = "Option::is_none"
    )]
    expires_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_token: Option<String>,
    // Only present in the persisted form. Older blobs use -1 for "not stamped".
    #[serde(
        rename = "expiresAt",
        default,
        deserialize_with = "deserialize_expires_at",
        skip_serializing_if = "Option::is_none"
    )]
    expires_at: Option<i64>,
}

impl TokenResponse {
    /// Registry object that rebuilds a [`TokenResponse`] from its persisted form.
    pub const RESTORE: Restorer<TokenResponse> = Restorer::new(TOKEN_RESPONSE_KEY);

    pub fn new() -> Self {
        Self::default()
    }
    /// Parses a token endpoint response body.
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }
    pub fn expires_in(&self) -> Option<&str> {
        self.expires_in.as_deref()
    }
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
    /// The individual granted scopes.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.as_deref().unwrap_or_default().split_whitespace()
    }
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }
    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_deref()
    }
    /// Records when the token was issued, in milliseconds since the Unix epoch.
    ///
    /// Only the first call with a non-negative time has an effect, so a response
    /// object that is handed around after the exchange keeps its original issue
    /// time. Negative times mean "not stamped" and are ignored.
    pub fn set_creation_time(&mut self, now_millis: i64) {
        if self.expires_at.is_none() && now_millis >= 0 {
            self.expires_at = Some(now_millis);
        }
    }
    /// Same as [`set_creation_time`](Self::set_creation_time) with the current wall clock.
    pub fn stamp_creation_time(&mut self) {
        self.set_creation_time(Utc::now().timestamp_millis());
    }
    /// Absolute expiry in milliseconds since the Unix epoch, or `None` if the
    /// creation time was never set.
    ///
    /// Fails if `expires_in` is not an integer.
    pub fn expires_at(&self) -> Result<Option<i64>> {
        match self.expires_at {
            Some(base) => Ok(Some(base.saturating_add(self.expiry_window_millis()?))),
            None => Ok(None),
        }
    }
    /// Adds another `expires_in` window to the stored timestamp and returns it.
    ///
    /// Every call moves the stored value forward again, so two calls on a
    /// token stamped at `T` with `expires_in = "3600"` return `T + 3_600_000`
    /// and then `T + 7_200_000`. Kept for callers that depend on the stored
    /// value advancing; use [`expires_at`](Self::expires_at) otherwise.
    pub fn advance_expires_at(&mut self) -> Result<Option<i64>> {
        if let Some(base) = self.expires_at {
            self.expires_at = Some(base.saturating_add(self.expiry_window_millis()?));
        }
        Ok(self.expires_at)
    }
    pub fn expires_at_datetime(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.expires_at()?.and_then(DateTime::from_timestamp_millis))
    }
    /// Whether the token has expired at `now_millis`. An unstamped token never expires.
    pub fn is_expired_at(&self, now_millis: i64) -> Result<bool> {
        Ok(self.expires_at()?.is_some_and(|expires_at| expires_at <= now_millis))
    }
    /// Checks that the fields every token response must carry are present,
    /// reporting the first one that is missing or empty.
    pub fn validate(&self) -> Result<()> {
        for (value, field) in [
            (&self.access_token, MissingField::AccessToken),
            (&self.token_type, MissingField::TokenType),
            (&self.expires_in, MissingField::ExpiresIn),
        ] {
            if value.as_deref().map_or(true, str::is_empty) {
                return Err(Error::MissingField(field));
            }
        }
        Ok(())
    }
    fn expiry_window_millis(&self) -> Result<i64> {
        let seconds = self.expires_in.as_deref().unwrap_or_default().parse::<i64>()?;
        Ok(seconds.saturating_mul(MILLIS_PER_SECOND))
    }
}

impl Persistable for TokenResponse {
    fn key(&self) -> &'static str {
        TOKEN_RESPONSE_KEY
    }
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redacted(value: &Option<String>) -> Option<&'static str> {
            value.as_ref().map(|_| "[redacted]")
        }
        f.debug_struct("TokenResponse")
            .field("access_token", &redacted(&self.access_token))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("refresh_token", &redacted(&self.refresh_token))
            .field("id_token", &redacted(&self.id_token))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

fn deserialize_expires_in<'de, D>(
    deserializer: D,
) -> core::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    }))
}

fn deserialize_expires_at<'de, D>(deserializer: D) -> core::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.filter(|expires_at| *expires_at >= 0))
}
