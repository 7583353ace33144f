//! Verification of identity-provider access tokens.
//!
//! The identity provider signs HS256 JWTs with a secret shared with this
//! backend (`AUTH_JWT_SECRET`). The backend verifies signature and expiry
//! and trusts the `sub` claim as the user id; it never issues tokens of its
//! own.

use fleetlog_core::types::UserId;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// The claims this backend reads from a provider-issued access token.
/// Provider tokens carry more; everything else is ignored.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the provider's user id.
    pub sub: UserId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Verify and decode an access token, returning the embedded [`Claims`].
///
/// Validates the HS256 signature and the expiration claim.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn valid_token_round_trips() {
        let sub = Uuid::new_v4();
        let claims = Claims {
            sub,
            exp: chrono::Utc::now().timestamp() + 600,
        };
        let token = sign(&claims, SECRET);

        let decoded = verify_token(&token, SECRET).expect("verification should succeed");
        assert_eq!(decoded.sub, sub);
    }

    #[test]
    fn expired_token_fails() {
        // Expired well beyond the default 60-second leeway.
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: chrono::Utc::now().timestamp() - 300,
        };
        let token = sign(&claims, SECRET);

        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn wrong_secret_fails() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: chrono::Utc::now().timestamp() + 600,
        };
        let token = sign(&claims, "secret-alpha");

        assert!(verify_token(&token, "secret-bravo").is_err());
    }

    #[test]
    fn garbage_token_fails() {
        assert!(verify_token("not-a-jwt", SECRET).is_err());
    }
}
