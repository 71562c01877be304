//! Admin credential claims.

use serde::{Deserialize, Serialize};

/// The only role a credential can carry.
pub const ADMIN_ROLE: &str = "admin";

/// Name of the cookie carrying the credential.
pub const ADMIN_COOKIE: &str = "admin_token";

/// Claims encoded in the signed admin token.
///
/// `iat` and `exp` are Unix timestamps in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}
