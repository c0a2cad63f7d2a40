/// Token issuance and validation
///
/// Tokens are HS256 JWTs carrying the caller's identity with a fixed
/// 1-hour expiry. Expiry is the only invalidation mechanism; there is no
/// refresh flow and no revocation list.
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Identity, Role};

const TOKEN_EXPIRY_HOURS: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    pub username: String,
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    secret: String,
}

impl TokenService {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.id.to_string(),
            username: identity.username.clone(),
            role: identity.role,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(TOKEN_EXPIRY_HOURS)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|_| AppError::Internal("Failed to generate token".to_string()))
    }

    /// Validate signature and expiry, then reconstruct the identity.
    pub fn decode(&self, token: &str) -> Result<Identity, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )?;

        let id = token_data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| AppError::Authorization("Invalid token subject".to_string()))?;

        Ok(Identity {
            id,
            username: token_data.claims.username,
            role: token_data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret".to_string())
    }

    fn admin_identity() -> Identity {
        Identity {
            id: 1,
            username: "admin".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn issue_then_decode_round_trips() {
        let tokens = service();
        let token = tokens.issue(&admin_identity()).unwrap();
        assert_eq!(token.matches('.').count(), 2);

        let identity = tokens.decode(&token).unwrap();
        assert_eq!(identity.id, 1);
        assert_eq!(identity.username, "admin");
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let tokens = service();
        let result = tokens.decode("invalid.token.here");
        assert!(matches!(result, Err(AppError::Authorization(_))));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = service().issue(&admin_identity()).unwrap();
        let other = TokenService::new("different-secret".to_string());
        assert!(other.decode(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = service();
        let now = Utc::now();
        let claims = Claims {
            sub: "1".to_string(),
            username: "admin".to_string(),
            role: Role::Admin,
            iat: (now - chrono::Duration::hours(2)).timestamp(),
            exp: (now - chrono::Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            tokens.decode(&token),
            Err(AppError::Authorization(_))
        ));
    }

    #[test]
    fn role_survives_the_round_trip() {
        let tokens = service();
        let limited = Identity {
            id: 3,
            username: "limited".to_string(),
            role: Role::Limited,
        };
        let token = tokens.issue(&limited).unwrap();
        assert_eq!(tokens.decode(&token).unwrap().role, Role::Limited);
    }
}
