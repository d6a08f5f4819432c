/**
 * Session Tokens
 *
 * This module issues and verifies the signed identity tokens that stand in
 * for server-side sessions. A token carries the identity id and email and
 * is valid for one hour from issue.
 */
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Token lifetime in seconds
pub const TOKEN_TTL_SECS: i64 = 3600;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identity ID
    pub sub: String,
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Identity proven by a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub identity_id: Uuid,
    pub email: String,
}

/// Reasons a token is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is malformed: {0}")]
    Malformed(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

/// Issues and verifies HS256 identity tokens with a shared secret
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Reject the second `exp` passes.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::seconds(TOKEN_TTL_SECS),
        }
    }

    /// Create a token for an identity, valid for one hour from now
    pub fn issue(&self, identity_id: Uuid, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(identity_id, email, Utc::now())
    }

    /// Create a token as if issued at `now`
    pub fn issue_at(
        &self,
        identity_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: identity_id.to_string(),
            email: email.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verify signature and expiry, and decode the identity
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        let identity_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|e| TokenError::Malformed(format!("invalid subject: {}", e)))?;

        Ok(VerifiedToken {
            identity_id,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret")
    }

    #[test]
    fn test_issue_and_verify() {
        let identity_id = Uuid::new_v4();
        let token = service().issue(identity_id, "test@example.com").unwrap();
        assert!(!token.is_empty());

        let verified = service().verify(&token).unwrap();
        assert_eq!(verified.identity_id, identity_id);
        assert_eq!(verified.email, "test@example.com");
    }

    #[test]
    fn test_token_expires_after_an_hour() {
        let issued = Utc::now() - Duration::seconds(TOKEN_TTL_SECS + 5);
        let token = service().issue_at(Uuid::new_v4(), "a@x.com", issued).unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_still_valid_just_before_expiry() {
        let issued = Utc::now() - Duration::seconds(TOKEN_TTL_SECS - 60);
        let token = service().issue_at(Uuid::new_v4(), "a@x.com", issued).unwrap();

        assert!(service().verify(&token).is_ok());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = TokenService::new("other-secret")
            .issue(Uuid::new_v4(), "a@x.com")
            .unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let result = service().verify("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_non_uuid_subject_is_malformed() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            email: "a@x.com".to_string(),
            exp: (Utc::now() + Duration::seconds(60)).timestamp(),
            iat: Utc::now().timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(service().verify(&token), Err(TokenError::Malformed(_))));
    }
}
