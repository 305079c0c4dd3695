//! Permission gate for ad and selection mutations.
//!
//! Pure predicates, evaluated per request after the target row is loaded.
//! Every mutation handler goes through these instead of doing its own role
//! comparison.

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;

/// An ad may be updated or deleted by its author, or by a moderator/admin.
pub fn ensure_can_mutate_ad(user: &AuthenticatedUser, author_id: i64) -> Result<()> {
    if user.id == author_id || user.can_moderate() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only the author or a moderator may modify this ad".to_string(),
        ))
    }
}

/// A selection may be mutated only by its owner; moderator/admin roles get
/// no escalation here.
pub fn ensure_selection_owner(user: &AuthenticatedUser, owner_id: i64) -> Result<()> {
    if user.id == owner_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only the owner may modify this selection".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Role;
    use crate::shared::test_helpers::test_user as user;

    #[test]
    fn author_may_mutate_own_ad() {
        assert!(ensure_can_mutate_ad(&user(1, Role::Member), 1).is_ok());
    }

    #[test]
    fn member_may_not_mutate_foreign_ad() {
        assert!(matches!(
            ensure_can_mutate_ad(&user(1, Role::Member), 2),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn moderator_and_admin_may_mutate_any_ad() {
        assert!(ensure_can_mutate_ad(&user(1, Role::Moderator), 2).is_ok());
        assert!(ensure_can_mutate_ad(&user(1, Role::Admin), 2).is_ok());
    }

    #[test]
    fn owner_may_mutate_own_selection() {
        assert!(ensure_selection_owner(&user(5, Role::Member), 5).is_ok());
    }

    #[test]
    fn roles_do_not_escalate_on_selections() {
        assert!(ensure_selection_owner(&user(1, Role::Moderator), 2).is_err());
        assert!(ensure_selection_owner(&user(1, Role::Admin), 2).is_err());
    }
}
