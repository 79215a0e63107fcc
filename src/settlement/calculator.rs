//! Greedy settlement of net balances into pairwise transfers

use crate::config::SettlementConfig;
use crate::settlement::balance::{accumulate_balances, Balances};
use crate::types::*;

/// Settlement calculator bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct SettlementCalculator {
    config: SettlementConfig,
}

impl SettlementCalculator {
    /// Create a new calculator
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Net balance per participant, before any settlement
    pub fn compute_balances(
        &self,
        participants: &[Participant],
        expenses: &[Expense],
    ) -> SettlementResult<Balances> {
        accumulate_balances(participants, expenses, &self.config)
    }

    /// Ordered list of transfers that brings every balance to zero
    pub fn compute(
        &self,
        participants: &[Participant],
        expenses: &[Expense],
    ) -> SettlementResult<Vec<Transfer>> {
        let balances = self.compute_balances(participants, expenses)?;
        let transfers = self.settle(&balances);

        tracing::debug!(
            participants = participants.len(),
            expenses = expenses.len(),
            transfers = transfers.len(),
            "computed settlement"
        );

        Ok(transfers)
    }

    /// Match debtors against creditors, both in participant order.
    ///
    /// Each step exhausts the current debtor or the current creditor, so the
    /// result holds at most `debtors + creditors - 1` transfers.
    pub fn settle(&self, balances: &Balances) -> Vec<Transfer> {
        let mut creditors: Vec<(&str, Money)> = balances.creditors().collect();
        let mut transfers = Vec::new();
        let mut next_creditor = 0;

        for (debtor, balance) in balances.debtors() {
            // Accumulation never lets a balance reach i64::MIN
            let mut debt = balance.abs();

            while debt.is_positive() && next_creditor < creditors.len() {
                let (creditor, credit) = &mut creditors[next_creditor];
                let amount = debt.min(*credit);

                if amount.is_positive() {
                    transfers.push(Transfer::new(
                        debtor.to_string(),
                        creditor.to_string(),
                        amount.to_decimal(self.config.currency_scale),
                    ));
                    debt -= amount;
                    *credit -= amount;
                }

                if !credit.is_positive() {
                    next_creditor += 1;
                }
            }
        }

        transfers
    }
}

/// Compute the settlement for a group with the default configuration
pub fn compute_settlement(
    participants: &[Participant],
    expenses: &[Expense],
) -> SettlementResult<Vec<Transfer>> {
    SettlementCalculator::default().compute(participants, expenses)
}

/// Compute net balances for a group with the default configuration
pub fn compute_balances(
    participants: &[Participant],
    expenses: &[Expense],
) -> SettlementResult<Balances> {
    SettlementCalculator::default().compute_balances(participants, expenses)
}
