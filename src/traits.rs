//! Traits for pluggable validation of group membership and expenses

use crate::types::*;

/// Trait for implementing custom rules applied when a group admits
/// participants and expenses
pub trait GroupValidator: Send + Sync {
    /// Validate a participant before it joins the group
    fn validate_participant(&self, participant: &Participant) -> SettlementResult<()>;

    /// Validate an expense before it is added to the group
    fn validate_expense(&self, expense: &Expense) -> SettlementResult<()>;
}

/// Default validator: the minimum the settlement computation relies on
pub struct DefaultGroupValidator;

impl GroupValidator for DefaultGroupValidator {
    fn validate_participant(&self, participant: &Participant) -> SettlementResult<()> {
        if participant.id.trim().is_empty() {
            return Err(SettlementError::Validation(
                "Participant ID cannot be empty".to_string(),
            ));
        }

        if participant.name.trim().is_empty() {
            return Err(SettlementError::Validation(
                "Participant name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_expense(&self, expense: &Expense) -> SettlementResult<()> {
        if expense.id.trim().is_empty() {
            return Err(SettlementError::Validation(
                "Expense ID cannot be empty".to_string(),
            ));
        }

        expense.validate()
    }
}
