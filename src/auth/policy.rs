//! Access policy shared by every resource handler.

use super::claims::SessionUser;
use crate::error::AppError;

/// What a handler demands of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Only administrators.
    Admin,
    /// Administrators, or the user whose id owns the record.
    AdminOrOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Decides whether `caller` may act on a record owned by `owner_id`.
///
/// An absent caller is always denied. A record without an owner can only be
/// reached by administrators.
pub fn evaluate(
    caller: Option<&SessionUser>,
    owner_id: Option<i64>,
    required: Requirement,
) -> Decision {
    let Some(caller) = caller else {
        return Decision::Deny;
    };
    if caller.is_admin {
        return Decision::Allow;
    }
    match required {
        Requirement::Admin => Decision::Deny,
        Requirement::AdminOrOwner => match owner_id {
            Some(owner) if owner == caller.id => Decision::Allow,
            _ => Decision::Deny,
        },
    }
}

/// [`evaluate`] as a handler guard: `Deny` becomes 403.
pub fn authorize(
    caller: Option<&SessionUser>,
    owner_id: Option<i64>,
    required: Requirement,
) -> Result<(), AppError> {
    match evaluate(caller, owner_id, required) {
        Decision::Allow => Ok(()),
        Decision::Deny => Err(AppError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, is_admin: bool) -> SessionUser {
        SessionUser {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            is_admin,
        }
    }

    #[test]
    fn anonymous_is_always_denied() {
        for req in [Requirement::Admin, Requirement::AdminOrOwner] {
            assert_eq!(evaluate(None, Some(1), req), Decision::Deny);
            assert_eq!(evaluate(None, None, req), Decision::Deny);
        }
    }

    #[test]
    fn admin_is_always_allowed() {
        let admin = user(1, true);
        for req in [Requirement::Admin, Requirement::AdminOrOwner] {
            assert_eq!(evaluate(Some(&admin), Some(99), req), Decision::Allow);
            assert_eq!(evaluate(Some(&admin), None, req), Decision::Allow);
        }
    }

    #[test]
    fn non_admin_denied_admin_requirement_even_on_own_record() {
        let bob = user(5, false);
        assert_eq!(evaluate(Some(&bob), Some(5), Requirement::Admin), Decision::Deny);
    }

    #[test]
    fn owner_allowed_only_on_own_record() {
        let bob = user(5, false);
        assert_eq!(
            evaluate(Some(&bob), Some(5), Requirement::AdminOrOwner),
            Decision::Allow
        );
        assert_eq!(
            evaluate(Some(&bob), Some(6), Requirement::AdminOrOwner),
            Decision::Deny
        );
        assert_eq!(
            evaluate(Some(&bob), None, Requirement::AdminOrOwner),
            Decision::Deny
        );
    }

    #[test]
    fn authorize_maps_deny_to_forbidden() {
        let bob = user(5, false);
        assert!(authorize(Some(&bob), Some(5), Requirement::AdminOrOwner).is_ok());
        assert!(matches!(
            authorize(Some(&bob), None, Requirement::Admin),
            Err(AppError::Forbidden)
        ));
    }
}
