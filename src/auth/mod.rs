use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SecurityConfig;

/// Access token payload issued by the identity service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Caller's user id; becomes the owner of created tasks
    pub id: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(id: Uuid, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            id,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,
    #[error("Invalid Authorization header format")]
    InvalidHeader,
    #[error("Empty JWT token")]
    EmptyToken,
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}

/// Signing and verification keys derived from the shared secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: u64,
}

impl JwtKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, AuthError> {
        Self::new(&security.jwt_secret, security.jwt_expiry_hours)
    }

    /// Mint a token for `user_id` with the configured lifetime
    pub fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.sign(&Claims::new(user_id, self.expiry_hours))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Validate signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Ok(token_data.claims)
    }
}

/// Extract the token from an Authorization header value. The `Bearer `
/// prefix is optional; some clients send the bare token.
pub fn token_from_header(value: Option<&str>) -> Result<&str, AuthError> {
    let value = value.ok_or(AuthError::MissingHeader)?.trim();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    if token.is_empty() || token == "Bearer" {
        return Err(AuthError::EmptyToken);
    }
    if token.contains(char::is_whitespace) {
        return Err(AuthError::InvalidHeader);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_verify() {
        let keys = JwtKeys::new("secret", 1).unwrap();
        let user = Uuid::new_v4();
        let token = keys.issue(user).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.id, user);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_tokens_signed_with_another_secret() {
        let token = JwtKeys::new("one", 1).unwrap().issue(Uuid::new_v4()).unwrap();
        let err = JwtKeys::new("two", 1).unwrap().verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn rejects_expired_tokens() {
        let keys = JwtKeys::new("secret", 1).unwrap();
        let now = Utc::now().timestamp();
        let claims = Claims {
            id: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = keys.sign(&claims).unwrap();
        assert!(matches!(keys.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(JwtKeys::new("", 1), Err(AuthError::InvalidSecret)));
    }

    #[test]
    fn extracts_bearer_and_bare_tokens() {
        assert_eq!(token_from_header(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(token_from_header(Some("abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert!(matches!(token_from_header(None), Err(AuthError::MissingHeader)));
        assert!(matches!(token_from_header(Some("Bearer ")), Err(AuthError::EmptyToken)));
        assert!(matches!(token_from_header(Some("Basic a b")), Err(AuthError::InvalidHeader)));
    }
}
