//! Stricter admission rules for groups that want tidy identifiers and text

use crate::traits::*;
use crate::types::*;

/// Validator that adds format and length limits on top of
/// [`DefaultGroupValidator`].
///
/// Identifiers may only contain alphanumerics, `-` and `_` (generated ids
/// are UUIDs). Expenses must carry a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrictGroupValidator {
    pub max_id_chars: usize,
    pub max_name_chars: usize,
    pub max_description_chars: usize,
}

impl Default for StrictGroupValidator {
    fn default() -> Self {
        Self {
            max_id_chars: 64,
            max_name_chars: 100,
            max_description_chars: 500,
        }
    }
}

impl StrictGroupValidator {
    fn check_id(&self, participant_id: &str) -> SettlementResult<()> {
        if participant_id.chars().count() > self.max_id_chars {
            return Err(SettlementError::Validation(format!(
                "identifier '{}' is longer than {} characters",
                participant_id, self.max_id_chars
            )));
        }

        if let Some(bad) = participant_id
            .chars()
            .find(|c| !(c.is_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(SettlementError::Validation(format!(
                "identifier '{}' contains '{}'",
                participant_id, bad
            )));
        }

        Ok(())
    }

    fn check_text(&self, field: &str, value: &str, max_chars: usize) -> SettlementResult<()> {
        if value.trim().is_empty() {
            return Err(SettlementError::Validation(format!("{} is required", field)));
        }
        if value.chars().count() > max_chars {
            return Err(SettlementError::Validation(format!(
                "{} is longer than {} characters",
                field, max_chars
            )));
        }
        Ok(())
    }
}

impl GroupValidator for StrictGroupValidator {
    fn validate_participant(&self, participant: &Participant) -> SettlementResult<()> {
        DefaultGroupValidator.validate_participant(participant)?;
        self.check_id(&participant.id)?;
        self.check_text("participant name", &participant.name, self.max_name_chars)
    }

    fn validate_expense(&self, expense: &Expense) -> SettlementResult<()> {
        DefaultGroupValidator.validate_expense(expense)?;
        self.check_text(
            "expense description",
            &expense.description,
            self.max_description_chars,
        )?;

        expense
            .referenced_participants()
            .try_for_each(|participant_id| self.check_id(participant_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn participant(id: &str, name: &str) -> Participant {
        Participant::new(id.to_string(), name.to_string(), None)
    }

    #[test]
    fn test_participant_rules() {
        let strict = StrictGroupValidator::default();

        assert!(strict.validate_participant(&participant("alice_01", "Alice")).is_ok());
        assert!(strict
            .validate_participant(&Participant::with_generated_id("Alice".to_string(), None))
            .is_ok());
        assert!(strict.validate_participant(&participant("  ", "Alice")).is_err());
        assert!(strict.validate_participant(&participant("alice smith", "Alice")).is_err());
        assert!(strict.validate_participant(&participant(&"x".repeat(65), "Alice")).is_err());
        assert!(strict.validate_participant(&participant("alice", &"n".repeat(101))).is_err());
    }

    #[test]
    fn test_limits_are_adjustable() {
        let short_ids = StrictGroupValidator {
            max_id_chars: 3,
            ..StrictGroupValidator::default()
        };
        assert!(short_ids.validate_participant(&participant("amy", "Amy")).is_ok());
        assert_eq!(
            short_ids.validate_participant(&participant("alice", "Alice")),
            Err(SettlementError::Validation(
                "identifier 'alice' is longer than 3 characters".to_string()
            ))
        );
    }

    #[test]
    fn test_strict_validator_requires_description() {
        let expense = Expense::new(
            "e1".to_string(),
            "   ".to_string(),
            BigDecimal::from(10),
            "alice".to_string(),
            vec!["bob".to_string()],
        );

        assert!(DefaultGroupValidator.validate_expense(&expense).is_ok());
        assert_eq!(
            StrictGroupValidator::default().validate_expense(&expense),
            Err(SettlementError::Validation(
                "expense description is required".to_string()
            ))
        );
    }

    #[test]
    fn test_strict_validator_checks_referenced_ids() {
        let expense = Expense::new(
            "e1".to_string(),
            "Taxi".to_string(),
            BigDecimal::from(10),
            "alice".to_string(),
            vec!["bob smith".to_string()],
        );

        assert_eq!(
            StrictGroupValidator::default().validate_expense(&expense),
            Err(SettlementError::Validation(
                "identifier 'bob smith' contains ' '".to_string()
            ))
        );
    }
}
