//! Human-readable settlement summary for a presentation layer

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::config::SettlementConfig;
use crate::types::*;

/// One transfer resolved to display names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementStatement {
    pub debtor_id: String,
    pub debtor_name: String,
    pub creditor_id: String,
    pub creditor_name: String,
    pub amount: BigDecimal,
}

impl fmt::Display for SettlementStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} owes {} {}",
            self.debtor_name, self.creditor_name, self.amount
        )
    }
}

/// Amount a participant has paid across all expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidTotal {
    pub participant_id: String,
    pub amount: BigDecimal,
}

/// Group totals plus the statements that settle the group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    /// Sum of all expense amounts
    pub total_spent: BigDecimal,
    /// Amount paid per participant, in participant order
    pub paid: Vec<PaidTotal>,
    /// One statement per transfer, in transfer order
    pub statements: Vec<SettlementStatement>,
}

impl SettlementSummary {
    /// Build a summary from a group snapshot and its computed transfers
    pub fn build(
        participants: &[Participant],
        expenses: &[Expense],
        transfers: &[Transfer],
        config: &SettlementConfig,
    ) -> SettlementResult<Self> {
        let scale = config.currency_scale;
        let names: HashMap<&str, &str> = participants
            .iter()
            .map(|p| (p.id.as_str(), p.name.as_str()))
            .collect();

        let mut total_spent = Money::ZERO;
        let mut paid_by: HashMap<&str, Money> = HashMap::new();
        for expense in expenses {
            let amount = expense.amount_in_minor_units(scale)?;
            total_spent = total_spent.checked_add(amount).ok_or_else(|| {
                SettlementError::AmountOutOfRange {
                    expense_id: expense.id.clone(),
                    amount: expense.amount.to_string(),
                }
            })?;
            *paid_by.entry(expense.paid_by.as_str()).or_default() += amount;
        }

        let paid = participants
            .iter()
            .map(|p| PaidTotal {
                participant_id: p.id.clone(),
                amount: paid_by
                    .get(p.id.as_str())
                    .copied()
                    .unwrap_or_default()
                    .to_decimal(scale),
            })
            .collect();

        let display_name = |id: &str| names.get(id).copied().unwrap_or(id).to_string();
        let statements = transfers
            .iter()
            .map(|t| SettlementStatement {
                debtor_id: t.from.clone(),
                debtor_name: display_name(&t.from),
                creditor_id: t.to.clone(),
                creditor_name: display_name(&t.to),
                amount: t.amount.with_scale(i64::from(scale)),
            })
            .collect();

        Ok(Self {
            total_spent: total_spent.to_decimal(scale),
            paid,
            statements,
        })
    }

    /// Whether nobody owes anybody anything
    pub fn is_settled(&self) -> bool {
        self.statements.is_empty()
    }

    /// Rendered statements, one line each
    pub fn lines(&self) -> Vec<String> {
        self.statements.iter().map(ToString::to_string).collect()
    }
}
