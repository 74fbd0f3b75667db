//! Bearer-token acquisition against the upstream identity endpoint.
//!
//! The manager holds one process-wide cached credential. Concurrent
//! callers that both see a stale cache may race and perform duplicate
//! exchanges; the exchange is idempotent on the upstream side, so the
//! cache is a plain `RwLock` with no cross-request deduplication.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use farelink_core::{ProxyError, ProxyResult};

/// Tokens expiring within this margin count as already expired.
const EXPIRY_MARGIN_SECONDS: i64 = 30;

#[derive(Debug, Clone)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now > Duration::seconds(EXPIRY_MARGIN_SECONDS)
    }
}

/// Injectable time source so tests can pin the expiry window.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: i64,
}

pub struct TokenManager {
    http: reqwest::Client,
    token_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    clock: Arc<dyn Clock>,
    cached: RwLock<Option<Credential>>,
}

impl TokenManager {
    pub fn new(
        http: reqwest::Client,
        host: &str,
        client_id: Option<String>,
        client_secret: Option<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        TokenManager {
            http,
            token_url: format!("{}/v1/security/oauth2/token", host.trim_end_matches('/')),
            client_id,
            client_secret,
            clock,
            cached: RwLock::new(None),
        }
    }

    /// Return a credential whose expiry is safely in the future, reusing
    /// the cached one when possible so repeated searches skip the token
    /// round trip.
    pub async fn acquire(&self) -> ProxyResult<Credential> {
        let now = self.clock.now();

        if let Ok(guard) = self.cached.read() {
            if let Some(cred) = guard.as_ref() {
                if cred.is_fresh(now) {
                    return Ok(cred.clone());
                }
            }
        }

        let (id, secret) = match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => (id.clone(), secret.clone()),
            _ => {
                return Err(ProxyError::AuthConfig(
                    "upstream client id or client secret is missing".to_string(),
                ))
            }
        };

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", id.as_str()),
            ("client_secret", secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(ProxyError::UpstreamAuth { status, body });
        }

        let parsed: TokenResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) => return Err(ProxyError::UpstreamAuth { status, body }),
        };
        let Some(token) = parsed.access_token else {
            return Err(ProxyError::UpstreamAuth { status, body });
        };

        let credential = Credential {
            token,
            expires_at: now + Duration::seconds(parsed.expires_in),
        };

        if let Ok(mut guard) = self.cached.write() {
            *guard = Some(credential.clone());
        }
        tracing::debug!("refreshed upstream bearer token, ttl {}s", parsed.expires_in);

        Ok(credential)
    }
}
