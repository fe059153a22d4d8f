//! Service-account authentication for the Sheets API.
//!
//! Auth flow:
//!   1. Read the service account JSON key file provisioned for the time clock.
//!   2. Sign a JWT with RS256 (`ring`) and exchange it for an access token.
//!   3. Cache the token until shortly before it expires.

use crate::errors::{AppError, AppResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use ring::signature::{self, RsaKeyPair};
use serde::Deserialize;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Seconds of validity a cached token must still have to be reused.
const REFRESH_MARGIN_SECS: i64 = 120;

/// Parsed service account key.
#[derive(Clone)]
pub struct ServiceAccount {
    pub client_email: String,
    pub token_uri: String,
    private_key_der: Vec<u8>,
}

/// Raw JSON structure of a GCP service account key file.
#[derive(Deserialize)]
struct ServiceAccountJson {
    client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccount {
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            AppError::Auth(format!(
                "cannot read service account key {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> AppResult<Self> {
        let sa: ServiceAccountJson = serde_json::from_str(data)
            .map_err(|e| AppError::Auth(format!("invalid service account JSON: {e}")))?;

        Ok(Self {
            client_email: sa.client_email,
            token_uri: sa.token_uri,
            private_key_der: pem_to_der(&sa.private_key)?,
        })
    }
}

struct CachedToken {
    token: String,
    expires_at: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires")]
    expires_in: u64,
}

fn default_expires() -> u64 {
    3600
}

/// Hands out bearer tokens for one service account, refreshing on demand.
pub struct TokenProvider {
    client: reqwest::blocking::Client,
    account: ServiceAccount,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(client: reqwest::blocking::Client, account: ServiceAccount) -> Self {
        Self {
            client,
            account,
            scope: SHEETS_SCOPE.to_string(),
            cached: Mutex::new(None),
        }
    }

    /// Return a valid access token, exchanging a fresh JWT when needed.
    pub fn access_token(&self) -> AppResult<String> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| AppError::Other("token cache poisoned".into()))?;

        let now = chrono::Utc::now().timestamp();
        if let Some(c) = cached.as_ref()
            && now + REFRESH_MARGIN_SECS < c.expires_at
        {
            return Ok(c.token.clone());
        }

        info!(account = %self.account.client_email, "exchanging service account JWT for access token");
        let fresh = self.exchange_jwt()?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    fn exchange_jwt(&self) -> AppResult<CachedToken> {
        let now = chrono::Utc::now().timestamp();
        let jwt = self.signed_jwt(now)?;

        let resp = self
            .client
            .post(&self.account.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", jwt.as_str()),
            ])
            .send()?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().unwrap_or_default();
            return Err(AppError::Auth(format!(
                "token exchange failed ({status}): {text}"
            )));
        }

        let token: TokenResponse = resp
            .json()
            .map_err(|e| AppError::Auth(format!("invalid token response: {e}")))?;

        debug!(expires_in = token.expires_in, "access token obtained");

        Ok(CachedToken {
            token: token.access_token,
            expires_at: now + token.expires_in as i64,
        })
    }

    fn signed_jwt(&self, now: i64) -> AppResult<String> {
        let header = serde_json::json!({ "alg": "RS256", "typ": "JWT" });
        let claims = serde_json::json!({
            "iss": self.account.client_email,
            "scope": self.scope,
            "aud": self.account.token_uri,
            "iat": now,
            "exp": now + 3600
        });

        let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string().as_bytes());
        let claims_b64 = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        let message = format!("{header_b64}.{claims_b64}");

        let key_pair = RsaKeyPair::from_pkcs8(&self.account.private_key_der)
            .map_err(|e| AppError::Auth(format!("invalid RSA private key: {e}")))?;
        let mut sig = vec![0u8; key_pair.public().modulus_len()];
        key_pair
            .sign(
                &signature::RSA_PKCS1_SHA256,
                &ring::rand::SystemRandom::new(),
                message.as_bytes(),
                &mut sig,
            )
            .map_err(|e| AppError::Auth(format!("RSA signing failed: {e}")))?;

        Ok(format!("{message}.{}", URL_SAFE_NO_PAD.encode(&sig)))
    }
}

/// Strip PEM armour and decode the base64 body.
fn pem_to_der(pem: &str) -> AppResult<Vec<u8>> {
    use base64::engine::general_purpose::STANDARD;

    let b64: String = pem
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("-----"))
        .collect();

    STANDARD
        .decode(&b64)
        .map_err(|e| AppError::Auth(format!("invalid PEM base64: {e}")))
}
