//! Booking lifecycle
//!
//! State machine over booking status plus the authorization rules for each
//! transition. `cancelled` is terminal; deletion is a privileged removal of
//! the record, not a state.

use shared::models::{BookingStatus, UserRole};
use thiserror::Error;

/// Where a booking enters the system. Self-service bookings start pending;
/// the hotel-detail quick flow books confirmed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOrigin {
    SelfService,
    QuickBook,
}

impl BookingOrigin {
    pub fn initial_status(&self) -> BookingStatus {
        match self {
            BookingOrigin::SelfService => BookingStatus::Pending,
            BookingOrigin::QuickBook => BookingStatus::Confirmed,
        }
    }
}

/// Actions an actor can request on an existing booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Confirm,
    Cancel,
    Delete,
}

/// Who is acting on a booking
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: i64,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: i64, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Invalid transition: {from} booking cannot be {action}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error("Not permitted: {0}")]
    NotPermitted(&'static str),
}

fn action_name(action: BookingAction) -> &'static str {
    match action {
        BookingAction::Confirm => "confirmed",
        BookingAction::Cancel => "cancelled",
        BookingAction::Delete => "deleted",
    }
}

/// Next status for a transition, or an error when the transition table has
/// no such row. Delete is allowed from any state (the record is removed, so
/// there is no next status).
pub fn transition(
    from: BookingStatus,
    action: BookingAction,
) -> Result<Option<BookingStatus>, LifecycleError> {
    match (from, action) {
        (BookingStatus::Pending, BookingAction::Confirm) => Ok(Some(BookingStatus::Confirmed)),
        (BookingStatus::Pending, BookingAction::Cancel)
        | (BookingStatus::Confirmed, BookingAction::Cancel) => Ok(Some(BookingStatus::Cancelled)),
        (_, BookingAction::Delete) => Ok(None),
        (from, action) => Err(LifecycleError::InvalidTransition {
            from: from.as_str(),
            action: action_name(action),
        }),
    }
}

/// Authorization for a transition: confirm and delete are admin actions;
/// cancel is open to the booking owner as well.
pub fn authorize(
    actor: &Actor,
    booking_owner: i64,
    action: BookingAction,
) -> Result<(), LifecycleError> {
    match action {
        BookingAction::Confirm => {
            if actor.is_admin() {
                Ok(())
            } else {
                Err(LifecycleError::NotPermitted(
                    "only staff can confirm a booking",
                ))
            }
        }
        BookingAction::Cancel => {
            if actor.is_admin() || actor.user_id == booking_owner {
                Ok(())
            } else {
                Err(LifecycleError::NotPermitted(
                    "only the booking owner or staff can cancel",
                ))
            }
        }
        BookingAction::Delete => {
            if actor.is_admin() {
                Ok(())
            } else {
                Err(LifecycleError::NotPermitted(
                    "only staff can delete a booking",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingAction::*;
    use BookingStatus::*;

    fn admin() -> Actor {
        Actor::new(1, UserRole::Admin)
    }

    fn owner() -> Actor {
        Actor::new(42, UserRole::User)
    }

    fn stranger() -> Actor {
        Actor::new(99, UserRole::User)
    }

    #[test]
    fn transition_table_is_exhaustive() {
        // Listed transitions
        assert_eq!(transition(Pending, Confirm), Ok(Some(Confirmed)));
        assert_eq!(transition(Pending, Cancel), Ok(Some(Cancelled)));
        assert_eq!(transition(Confirmed, Cancel), Ok(Some(Cancelled)));
        assert_eq!(transition(Pending, Delete), Ok(None));
        assert_eq!(transition(Confirmed, Delete), Ok(None));
        assert_eq!(transition(Cancelled, Delete), Ok(None));

        // Everything else is rejected
        assert!(transition(Confirmed, Confirm).is_err());
        assert!(transition(Cancelled, Confirm).is_err());
        assert!(transition(Cancelled, Cancel).is_err());
    }

    #[test]
    fn cancelled_is_terminal() {
        for action in [Confirm, Cancel] {
            assert!(transition(Cancelled, action).is_err());
        }
    }

    #[test]
    fn confirm_requires_admin() {
        assert!(authorize(&admin(), 42, Confirm).is_ok());
        assert!(authorize(&owner(), 42, Confirm).is_err());
    }

    #[test]
    fn cancel_allows_owner_and_admin() {
        assert!(authorize(&owner(), 42, Cancel).is_ok());
        assert!(authorize(&admin(), 42, Cancel).is_ok());
        assert!(authorize(&stranger(), 42, Cancel).is_err());
    }

    #[test]
    fn delete_requires_admin() {
        assert!(authorize(&admin(), 42, Delete).is_ok());
        assert!(authorize(&owner(), 42, Delete).is_err());
    }

    #[test]
    fn origins_map_to_initial_states() {
        assert_eq!(
            BookingOrigin::SelfService.initial_status(),
            BookingStatus::Pending
        );
        assert_eq!(
            BookingOrigin::QuickBook.initial_status(),
            BookingStatus::Confirmed
        );
    }
}
