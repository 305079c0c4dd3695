use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Access level carried by a user record and by bearer-token claims.
///
/// Kept as an enum so every permission check goes through one type instead
/// of string comparisons scattered across handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum Role {
    Member,
    Moderator,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Member
    }
}

impl Role {
    /// Moderators and admins may mutate other users' ads.
    pub fn can_moderate(self) -> bool {
        matches!(self, Role::Moderator | Role::Admin)
    }
}

/// Requester identity decoded from a bearer token by the auth middleware.
///
/// The user lifecycle itself lives in the external auth subsystem; this
/// service only consumes the identity it signs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn can_moderate(&self) -> bool {
        self.role.can_moderate()
    }
}

/// Claims layout of the tokens issued by the auth subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub username: String,
    pub role: Role,
    pub exp: u64,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Member).unwrap(), "\"member\"");
        assert_eq!(
            serde_json::to_string(&Role::Moderator).unwrap(),
            "\"moderator\""
        );
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn role_defaults_to_member() {
        assert_eq!(Role::default(), Role::Member);
    }

    #[test]
    fn only_moderator_and_admin_can_moderate() {
        assert!(!Role::Member.can_moderate());
        assert!(Role::Moderator.can_moderate());
        assert!(Role::Admin.can_moderate());
    }
}
