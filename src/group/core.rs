//! Expense group that keeps participants and expenses consistent

use crate::config::SettlementConfig;
use crate::group::summary::SettlementSummary;
use crate::settlement::{Balances, SettlementCalculator};
use crate::traits::*;
use crate::types::*;

/// In-memory group of participants and the expenses they share.
///
/// Participants and expenses are kept in insertion order, which is also the
/// order transfers are produced in.
pub struct ExpenseGroup {
    participants: Vec<Participant>,
    expenses: Vec<Expense>,
    calculator: SettlementCalculator,
    validator: Box<dyn GroupValidator>,
}

impl Default for ExpenseGroup {
    fn default() -> Self {
        Self::new(SettlementConfig::default())
    }
}

impl ExpenseGroup {
    /// Create an empty group
    pub fn new(config: SettlementConfig) -> Self {
        Self::with_validator(config, Box::new(DefaultGroupValidator))
    }

    /// Create an empty group with a custom validator
    pub fn with_validator(config: SettlementConfig, validator: Box<dyn GroupValidator>) -> Self {
        Self {
            participants: Vec::new(),
            expenses: Vec::new(),
            calculator: SettlementCalculator::new(config),
            validator,
        }
    }

    pub fn config(&self) -> &SettlementConfig {
        self.calculator.config()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Get a participant by ID
    pub fn participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == participant_id)
    }

    /// Get an expense by ID
    pub fn expense(&self, expense_id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == expense_id)
    }

    /// Add a new participant with a generated identifier
    pub fn add_participant(
        &mut self,
        name: String,
        avatar: Option<String>,
    ) -> SettlementResult<Participant> {
        let participant = Participant::with_generated_id(name.trim().to_string(), avatar);
        self.insert_participant(participant.clone())?;
        Ok(participant)
    }

    /// Add a participant with a caller-chosen identifier
    pub fn insert_participant(&mut self, participant: Participant) -> SettlementResult<()> {
        self.validator.validate_participant(&participant)?;

        if self.participant(&participant.id).is_some() {
            return Err(SettlementError::DuplicateParticipant(participant.id));
        }

        tracing::debug!(participant_id = %participant.id, "participant joined group");
        self.participants.push(participant);
        Ok(())
    }

    /// Remove a participant together with every expense that references them.
    ///
    /// Returns the removed participant and the expenses dropped with them.
    pub fn remove_participant(
        &mut self,
        participant_id: &str,
    ) -> SettlementResult<(Participant, Vec<Expense>)> {
        let position = self
            .participants
            .iter()
            .position(|p| p.id == participant_id)
            .ok_or_else(|| SettlementError::ParticipantNotFound(participant_id.to_string()))?;
        let participant = self.participants.remove(position);

        let (dropped, kept): (Vec<Expense>, Vec<Expense>) = std::mem::take(&mut self.expenses)
            .into_iter()
            .partition(|e| e.involves(participant_id));
        self.expenses = kept;

        tracing::debug!(
            participant_id = %participant_id,
            dropped_expenses = dropped.len(),
            "participant left group"
        );

        Ok((participant, dropped))
    }

    /// Add an expense; all referenced participants must be group members and
    /// the amount must be at least one minor unit at the group's currency scale
    pub fn add_expense(&mut self, expense: Expense) -> SettlementResult<()> {
        self.validator.validate_expense(&expense)?;
        expense.amount_in_minor_units(self.config().currency_scale)?;

        if self.expense(&expense.id).is_some() {
            return Err(SettlementError::DuplicateExpense(expense.id));
        }

        if let Some(missing) = expense
            .referenced_participants()
            .find(|id| self.participant(id).is_none())
        {
            return Err(SettlementError::UnknownParticipant {
                expense_id: expense.id.clone(),
                participant_id: missing.to_string(),
            });
        }

        self.expenses.push(expense);
        Ok(())
    }

    /// Remove an expense by ID
    pub fn remove_expense(&mut self, expense_id: &str) -> SettlementResult<Expense> {
        let position = self
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| SettlementError::ExpenseNotFound(expense_id.to_string()))?;
        Ok(self.expenses.remove(position))
    }

    /// Net balance per participant
    pub fn balances(&self) -> SettlementResult<Balances> {
        self.calculator.compute_balances(&self.participants, &self.expenses)
    }

    /// Transfers that settle the group
    pub fn settle(&self) -> SettlementResult<Vec<Transfer>> {
        self.calculator.compute(&self.participants, &self.expenses)
    }

    /// Totals and rendered statements for the current state
    pub fn summary(&self) -> SettlementResult<SettlementSummary> {
        let transfers = self.settle()?;
        SettlementSummary::build(
            &self.participants,
            &self.expenses,
            &transfers,
            self.config(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::expense::{patterns, ExpenseBuilder};
    use crate::utils::validation::StrictGroupValidator;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    #[test]
    fn test_group_basic_operations() {
        let mut group = ExpenseGroup::default();
        let alice = group.add_participant("  Alice ".to_string(), None).unwrap();
        let bob = group
            .add_participant("Bob".to_string(), Some("bob.png".to_string()))
            .unwrap();
        assert_eq!(alice.name, "Alice");
        assert_eq!(group.participant(&bob.id).unwrap().avatar.as_deref(), Some("bob.png"));

        let dinner = patterns::shared_by_everyone(
            "Dinner".to_string(),
            BigDecimal::from(100),
            alice.id.clone(),
            group.participants(),
        )
        .unwrap();
        group.add_expense(dinner).unwrap();

        let transfers = group.settle().unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].from, bob.id);
        assert_eq!(transfers[0].to, alice.id);
        assert_eq!(transfers[0].amount, BigDecimal::from(50));

        let summary = group.summary().unwrap();
        assert_eq!(summary.lines(), vec!["Bob owes Alice 50.00"]);
    }

    #[test]
    fn test_membership_rules() {
        let mut group = ExpenseGroup::default();
        assert!(matches!(
            group.add_participant("   ".to_string(), None),
            Err(SettlementError::Validation(_))
        ));

        group
            .insert_participant(Participant::new("a".to_string(), "A".to_string(), None))
            .unwrap();
        assert_eq!(
            group.insert_participant(Participant::new("a".to_string(), "Again".to_string(), None)),
            Err(SettlementError::DuplicateParticipant("a".to_string()))
        );

        let stranger = patterns::paid_on_behalf(
            "Loan".to_string(),
            BigDecimal::from(5),
            "a".to_string(),
            "z".to_string(),
        )
        .unwrap();
        assert!(matches!(
            group.add_expense(stranger),
            Err(SettlementError::UnknownParticipant { participant_id, .. }) if participant_id == "z"
        ));

        let lunch = patterns::personal("Lunch".to_string(), BigDecimal::from(12), "a".to_string())
            .unwrap();
        let lunch_id = lunch.id.clone();
        group.add_expense(lunch.clone()).unwrap();
        assert_eq!(
            group.add_expense(lunch),
            Err(SettlementError::DuplicateExpense(lunch_id.clone()))
        );

        assert_eq!(group.remove_expense(&lunch_id).unwrap().id, lunch_id);
        assert_eq!(
            group.remove_expense(&lunch_id),
            Err(SettlementError::ExpenseNotFound(lunch_id))
        );
        assert!(matches!(
            group.remove_participant("nobody"),
            Err(SettlementError::ParticipantNotFound(_))
        ));
    }

    #[test]
    fn test_sub_unit_expense_refused_at_admission() {
        let mut group = ExpenseGroup::default();
        for id in ["a", "b"] {
            group
                .insert_participant(Participant::new(id.to_string(), id.to_uppercase(), None))
                .unwrap();
        }

        let dust = ExpenseBuilder::new("Dust".to_string(), BigDecimal::from_str("0.001").unwrap())
            .id("dust".to_string())
            .paid_by("a".to_string())
            .shared_with("b".to_string())
            .build()
            .unwrap();

        assert_eq!(
            group.add_expense(dust.clone()),
            Err(SettlementError::NonPositiveAmount {
                expense_id: "dust".to_string(),
                amount: "0.001".to_string(),
            })
        );
        assert!(group.expenses().is_empty());
        assert!(group.settle().unwrap().is_empty());

        // The same amount is a whole minor unit at a finer scale
        let mut fine = ExpenseGroup::new(SettlementConfig {
            currency_scale: 3,
            ..SettlementConfig::default()
        });
        for id in ["a", "b"] {
            fine.insert_participant(Participant::new(id.to_string(), id.to_uppercase(), None))
                .unwrap();
        }
        fine.add_expense(dust).unwrap();
        assert_eq!(fine.settle().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_participant_cascades() {
        let mut group = ExpenseGroup::default();
        for id in ["a", "b", "c"] {
            group
                .insert_participant(Participant::new(id.to_string(), id.to_uppercase(), None))
                .unwrap();
        }

        let everyone = patterns::shared_by_everyone(
            "Cabin".to_string(),
            BigDecimal::from(300),
            "a".to_string(),
            group.participants(),
        )
        .unwrap();
        let for_b = patterns::paid_on_behalf(
            "Ticket".to_string(),
            BigDecimal::from(20),
            "a".to_string(),
            "b".to_string(),
        )
        .unwrap();
        let by_c = patterns::personal("Book".to_string(), BigDecimal::from(8), "c".to_string())
            .unwrap();
        group.add_expense(everyone).unwrap();
        group.add_expense(for_b.clone()).unwrap();
        group.add_expense(by_c).unwrap();

        let (removed, dropped) = group.remove_participant("c").unwrap();
        assert_eq!(removed.id, "c");
        assert_eq!(dropped.len(), 2);
        assert_eq!(group.expenses(), &[for_b]);

        let balances = group.balances().unwrap();
        assert_eq!(balances.get("a"), Some(Money::from_minor_units(2000)));
        assert_eq!(balances.get("b"), Some(Money::from_minor_units(-2000)));
        assert_eq!(balances.get("c"), None);
    }

    #[test]
    fn test_strict_validator() {
        let mut group = ExpenseGroup::with_validator(
            SettlementConfig::default(),
            Box::new(StrictGroupValidator::default()),
        );
        assert!(group
            .insert_participant(Participant::new("a b".to_string(), "A".to_string(), None))
            .is_err());
        assert!(group.add_participant("Alice".to_string(), None).is_ok());
    }
}
