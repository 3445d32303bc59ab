//! State machine trait for status enums.
//!
//! Gives every lifecycle status (orders today) the same validated
//! transition API.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define the transition table; `transition_to` and
/// `is_terminal` come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for OrderStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Created, Paid))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Created => vec![Paid],
///             Paid => vec![],
///         }
///     }
/// }
///
/// let next = order.status.transition_to(OrderStatus::Paid)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
