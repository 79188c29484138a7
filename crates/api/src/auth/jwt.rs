//! Verification of identity-provider tokens.
//!
//! Tokens are HS256-signed JWTs issued outside this service. Only the
//! subject and email claims are used; the email is what the administrator
//! allow-list matches on.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use vitrine_core::auth::Identity;

/// Claims read from a verified token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the identity provider's user id.
    pub sub: String,
    /// Verified email address, if the provider asserts one.
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            subject: claims.sub,
            email: claims.email,
        }
    }
}

/// Token verification settings and the administrator allow-list.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// The single email address granted write access.
    pub admin_email: String,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var        | Required |
    /// |----------------|----------|
    /// | `JWT_SECRET`   | **yes**  |
    /// | `ADMIN_EMAIL`  | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if either variable is unset or empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let admin_email =
            std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be set in the environment");
        assert!(!admin_email.trim().is_empty(), "ADMIN_EMAIL must not be empty");

        Self {
            secret,
            admin_email,
        }
    }
}

/// Validate a token and return its [`Claims`].
///
/// Checks the signature and expiry (HS256, default leeway).
pub fn validate_token(
    token: &str,
    config: &AuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Sign a token the way the identity provider does.
///
/// Used by the `vitrine-mint-token` dev tool and by tests; production
/// tokens come from the provider.
pub fn generate_token(
    subject: &str,
    email: Option<&str>,
    ttl_mins: i64,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        email: email.map(str::to_string),
        exp: now + ttl_mins * 60,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}
