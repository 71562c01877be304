//! Credential service - issues and verifies the admin credential.
//!
//! This service handles:
//! - Checking a submitted password against the configured admin password
//! - Issuing signed, 24-hour admin tokens (HS256 JWT)
//! - Verifying presented tokens (signature, role, expiry)
//! - Reading the token from and writing it to the `admin_token` cookie
//!
//! # Password Comparison
//!
//! Both the submitted and the configured password are run through
//! HMAC-SHA256 keyed with the signing secret, and the tags are compared with
//! `Mac::verify_slice`, which runs in constant time.

use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::Sha256;

use crate::models::credential::{ADMIN_COOKIE, ADMIN_ROLE, Claims};

type HmacSha256 = Hmac<Sha256>;

/// How long an issued credential stays valid.
pub const CREDENTIAL_TTL_HOURS: i64 = 24;

/// Result of checking a presented credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Authorized,
    Unauthorized,
}

/// Outcome of a password check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Match,
    Mismatch,
    /// No admin password is configured.
    Unconfigured,
}

/// Issues and verifies admin credentials.
#[derive(Clone)]
pub struct CredentialService {
    secret: Vec<u8>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    admin_password: Option<String>,
}

impl CredentialService {
    pub fn new(secret: &[u8], admin_password: Option<String>) -> Self {
        Self {
            secret: secret.to_vec(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            admin_password: admin_password.filter(|p| !p.is_empty()),
        }
    }

    pub fn has_admin_password(&self) -> bool {
        self.admin_password.is_some()
    }

    /// Compare a submitted password with the configured one.
    pub fn check_password(&self, supplied: &str) -> PasswordCheck {
        let Some(expected) = self.admin_password.as_deref() else {
            return PasswordCheck::Unconfigured;
        };

        let expected_tag = self.password_tag(expected);
        let mut mac = self.mac();
        mac.update(supplied.as_bytes());
        match mac.verify_slice(&expected_tag) {
            Ok(()) => PasswordCheck::Match,
            Err(_) => PasswordCheck::Mismatch,
        }
    }

    /// Issue a credential valid for 24 hours from now.
    pub fn issue(&self) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(Utc::now())
    }

    /// Issue a credential as if the current time were `now`.
    pub fn issue_at(&self, now: DateTime<Utc>) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            role: ADMIN_ROLE.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(CREDENTIAL_TTL_HOURS)).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    pub fn verify(&self, token: Option<&str>) -> Verdict {
        self.verify_at(token, Utc::now())
    }

    /// Check a presented token against the signing secret and `now`.
    ///
    /// Absent, malformed, tampered, non-admin and expired tokens are all
    /// `Unauthorized`; there is no partial trust.
    pub fn verify_at(&self, token: Option<&str>, now: DateTime<Utc>) -> Verdict {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Verdict::Unauthorized;
        };

        // Expiry is checked below against the supplied clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(error = %e, "rejected admin credential");
                return Verdict::Unauthorized;
            }
        };

        if claims.is_admin() && now.timestamp() < claims.exp {
            Verdict::Authorized
        } else {
            Verdict::Unauthorized
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts keys of any length")
    }

    fn password_tag(&self, password: &str) -> Vec<u8> {
        let mut mac = self.mac();
        mac.update(password.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Extract the `admin_token` value from the request's `Cookie` headers.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all("cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == ADMIN_COOKIE)
        .map(|(_, value)| value.trim().to_string())
}

/// Best-effort caller identity for rate limiting.
///
/// Uses the first `X-Forwarded-For` hop, which is caller-controlled unless a
/// trusted proxy overwrites it.
pub fn caller_identity(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Whether the effective transport (as reported by the proxy) is HTTPS.
pub fn is_https(headers: &HeaderMap) -> bool {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    header("x-forwarded-proto").is_some_and(|v| v.eq_ignore_ascii_case("https"))
        || header("x-forwarded-ssl").is_some_and(|v| v.eq_ignore_ascii_case("on"))
}

/// `Set-Cookie` value carrying a freshly issued credential.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let max_age = CREDENTIAL_TTL_HOURS * 60 * 60;
    let mut cookie =
        format!("{ADMIN_COOKIE}={token}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the credential from the browser.
pub fn cleared_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{ADMIN_COOKIE}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
