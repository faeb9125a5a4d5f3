//! Security tokens binding builder callbacks to the acting user.
//!
//! The document builder service calls back without a browser session, so every callback URL
//! carries a token naming the user the request is performed as.

use jsonwebtoken::{
    decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};

use crate::server::{config::Config, error::auth::AuthError, error::Error};

#[derive(Debug, Serialize, Deserialize)]
struct SecurityClaims {
    id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<u64>,
}

/// Issues & verifies HS256 security tokens
pub struct SecurityTokenMediator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Option<u64>,
}

impl SecurityTokenMediator {
    /// Tokens never expire when `ttl` is `None`
    pub fn new(secret: &str, ttl: Option<u64>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.internal_jwt_secret, config.security_token_ttl)
    }

    pub fn issue(&self, user_id: i32) -> Result<String, Error> {
        let claims = SecurityClaims {
            id: user_id,
            exp: self.ttl.map(|ttl| get_current_timestamp() + ttl),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Returns the user ID the token was issued for
    ///
    /// # Returns
    /// - `Ok(i32)` - ID of the acting user
    /// - `Err(AuthError::TokenMissing)` - No token, or an empty one, was provided
    /// - `Err(AuthError::TokenInvalid)` - Bad signature, malformed or expired token
    pub fn verify(&self, token: Option<&str>) -> Result<i32, AuthError> {
        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::TokenMissing),
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        let data = decode::<SecurityClaims>(token, &self.decoding_key, &validation)
            .map_err(AuthError::TokenInvalid)?;

        Ok(data.claims.id)
    }
}
