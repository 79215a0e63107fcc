//! Expense construction helpers

use bigdecimal::BigDecimal;

use crate::types::*;

/// Expense builder for assembling an expense step by step
#[derive(Debug)]
pub struct ExpenseBuilder {
    id: Option<String>,
    description: String,
    amount: BigDecimal,
    paid_by: Option<String>,
    split_among: Vec<String>,
}

impl ExpenseBuilder {
    /// Create a new expense builder
    pub fn new(description: String, amount: BigDecimal) -> Self {
        Self {
            id: None,
            description,
            amount,
            paid_by: None,
            split_among: Vec::new(),
        }
    }

    /// Use an explicit identifier instead of a generated one
    pub fn id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the participant who paid
    pub fn paid_by(mut self, participant_id: String) -> Self {
        self.paid_by = Some(participant_id);
        self
    }

    /// Add a participant to the share set
    pub fn shared_with(mut self, participant_id: String) -> Self {
        self.split_among.push(participant_id);
        self
    }

    /// Add several participants to the share set
    pub fn shared_with_all<I>(mut self, participant_ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.split_among.extend(participant_ids);
        self
    }

    /// Build the expense
    pub fn build(self) -> SettlementResult<Expense> {
        let id = self
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let paid_by = self.paid_by.ok_or_else(|| {
            SettlementError::Validation(format!("Expense '{}' has no payer", id))
        })?;

        let expense = Expense::new(id, self.description, self.amount, paid_by, self.split_among);
        expense.validate()?;
        Ok(expense)
    }
}

/// Common expense patterns
pub mod patterns {
    use super::*;

    /// Expense shared evenly by every participant, payer included
    pub fn shared_by_everyone(
        description: String,
        amount: BigDecimal,
        paid_by: String,
        participants: &[Participant],
    ) -> SettlementResult<Expense> {
        ExpenseBuilder::new(description, amount)
            .paid_by(paid_by)
            .shared_with_all(participants.iter().map(|p| p.id.clone()))
            .build()
    }

    /// Expense the payer covered entirely for someone else
    pub fn paid_on_behalf(
        description: String,
        amount: BigDecimal,
        paid_by: String,
        beneficiary: String,
    ) -> SettlementResult<Expense> {
        ExpenseBuilder::new(description, amount)
            .paid_by(paid_by)
            .shared_with(beneficiary)
            .build()
    }

    /// Expense that only concerns the payer and nets to zero
    pub fn personal(
        description: String,
        amount: BigDecimal,
        paid_by: String,
    ) -> SettlementResult<Expense> {
        ExpenseBuilder::new(description, amount)
            .paid_by(paid_by.clone())
            .shared_with(paid_by)
            .build()
    }
}
