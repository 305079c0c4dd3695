use std::time::Duration;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Claims};

/// Verifies HS256 bearer tokens issued by the auth subsystem.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str, leeway: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway.as_secs();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token validation failed: {}", e);
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        Ok(data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Role;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &str = "test-secret";

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test]
    fn valid_token_yields_user() {
        let verifier = TokenVerifier::new(SECRET, Duration::from_secs(60));
        let token = sign(
            &Claims {
                sub: 42,
                username: "alice".into(),
                role: Role::Moderator,
                exp: now() + 3600,
            },
            SECRET,
        );

        let user = verifier.verify(&token).unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::Moderator);
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = TokenVerifier::new(SECRET, Duration::from_secs(0));
        let token = sign(
            &Claims {
                sub: 1,
                username: "bob".into(),
                role: Role::Member,
                exp: now() - 3600,
            },
            SECRET,
        );

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let verifier = TokenVerifier::new(SECRET, Duration::from_secs(60));
        let token = sign(
            &Claims {
                sub: 1,
                username: "bob".into(),
                role: Role::Member,
                exp: now() + 3600,
            },
            "other-secret",
        );

        assert!(verifier.verify(&token).is_err());
    }
}
