//! Net balance accumulation from a set of shared expenses

use std::collections::HashMap;

use crate::config::{DanglingReferences, SettlementConfig};
use crate::types::*;

/// Net balance per participant, iterated in the participant input order.
///
/// Positive balances are owed by the group, negative balances owe the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balances {
    entries: Vec<(String, Money)>,
    index: HashMap<String, usize>,
}

impl Balances {
    /// Zero balances for every participant; duplicate ids are rejected
    pub fn for_participants(participants: &[Participant]) -> SettlementResult<Self> {
        let mut entries = Vec::with_capacity(participants.len());
        let mut index = HashMap::with_capacity(participants.len());

        for participant in participants {
            if index.insert(participant.id.clone(), entries.len()).is_some() {
                return Err(SettlementError::DuplicateParticipant(participant.id.clone()));
            }
            entries.push((participant.id.clone(), Money::ZERO));
        }

        Ok(Self { entries, index })
    }

    pub fn contains(&self, participant_id: &str) -> bool {
        self.index.contains_key(participant_id)
    }

    /// Balance of a participant, `None` if they are not part of the group
    pub fn get(&self, participant_id: &str) -> Option<Money> {
        self.index
            .get(participant_id)
            .map(|&position| self.entries[position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.entries.iter().map(|(id, money)| (id.as_str(), *money))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances; `Some(Money::ZERO)` for any accumulated expense set.
    ///
    /// Summed in `i128` so intermediate totals cannot overflow. Returns `None`
    /// only if the final sum does not fit in a [`Money`].
    pub fn total(&self) -> Option<Money> {
        let sum: i128 = self
            .entries
            .iter()
            .map(|(_, money)| i128::from(money.minor_units()))
            .sum();
        i64::try_from(sum).ok().map(Money::from_minor_units)
    }

    /// Participants with a strictly negative balance, in input order
    pub fn debtors(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.iter().filter(|(_, money)| money.is_negative())
    }

    /// Participants with a strictly positive balance, in input order
    pub fn creditors(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.iter().filter(|(_, money)| money.is_positive())
    }

    fn adjust(
        &mut self,
        participant_id: &str,
        delta: Money,
        expense: &Expense,
    ) -> SettlementResult<()> {
        let position = *self.index.get(participant_id).ok_or_else(|| {
            SettlementError::UnknownParticipant {
                expense_id: expense.id.clone(),
                participant_id: participant_id.to_string(),
            }
        })?;

        // Every balance must keep a representable magnitude, so i64::MIN is out
        let slot = &mut self.entries[position].1;
        *slot = slot
            .checked_add(delta)
            .filter(|balance| balance.checked_abs().is_some())
            .ok_or_else(|| SettlementError::AmountOutOfRange {
                expense_id: expense.id.clone(),
                amount: expense.amount.to_string(),
            })?;
        Ok(())
    }

    /// Credit the payer and debit every sharer for one expense
    fn apply_expense(&mut self, expense: &Expense, amount: Money) -> SettlementResult<()> {
        self.adjust(&expense.paid_by, amount, expense)?;
        for (member, share) in split_shares(amount, &expense.split_among) {
            self.adjust(member, -share, expense)?;
        }
        Ok(())
    }
}

/// Split an amount evenly in minor units.
///
/// Leftover units from the integer division go one each to the first
/// members, so the shares always add up to `amount`.
pub fn split_shares(amount: Money, members: &[String]) -> Vec<(&str, Money)> {
    if members.is_empty() {
        return Vec::new();
    }

    let count = members.len() as i64;
    let total = amount.minor_units();
    let base = total / count;
    let remainder = (total % count).unsigned_abs() as usize;

    members
        .iter()
        .enumerate()
        .map(|(idx, member)| {
            let mut share = base;
            if idx < remainder {
                share += total.signum();
            }
            (member.as_str(), Money::from_minor_units(share))
        })
        .collect()
}

/// Accumulate net balances for every participant across all expenses.
///
/// Structural problems (empty share set, duplicate sharer, non-positive
/// amount) always abort. References to unknown participants abort under
/// [`DanglingReferences::Reject`] and skip the expense under
/// [`DanglingReferences::Ignore`].
pub fn accumulate_balances(
    participants: &[Participant],
    expenses: &[Expense],
    config: &SettlementConfig,
) -> SettlementResult<Balances> {
    config.validate()?;
    let mut balances = Balances::for_participants(participants)?;

    for expense in expenses {
        expense.validate()?;

        if let Some(missing) = expense
            .referenced_participants()
            .find(|id| !balances.contains(id))
        {
            match config.dangling_references {
                DanglingReferences::Reject => {
                    return Err(SettlementError::UnknownParticipant {
                        expense_id: expense.id.clone(),
                        participant_id: missing.to_string(),
                    });
                }
                DanglingReferences::Ignore => {
                    tracing::warn!(
                        expense_id = %expense.id,
                        participant_id = %missing,
                        "skipping expense that references an unknown participant"
                    );
                    continue;
                }
            }
        }

        let amount = expense.amount_in_minor_units(config.currency_scale)?;
        balances.apply_expense(expense, amount)?;
    }

    Ok(balances)
}
