//! Core types and data structures for the settlement engine

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A member of the group who can pay for or share in expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Opaque identifier, unique within the active group
    pub id: String,
    /// Human-readable display name
    pub name: String,
    /// Optional avatar reference (URL, file key, ...)
    pub avatar: Option<String>,
}

impl Participant {
    /// Create a new participant with an explicit identifier
    pub fn new(id: String, name: String, avatar: Option<String>) -> Self {
        Self { id, name, avatar }
    }

    /// Create a new participant with a generated identifier
    pub fn with_generated_id(name: String, avatar: Option<String>) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), name, avatar)
    }
}

/// A shared expense paid by one participant and split evenly among others
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for the expense
    pub id: String,
    /// Free-text description
    pub description: String,
    /// Total amount paid, in major currency units
    pub amount: BigDecimal,
    /// Participant who paid
    pub paid_by: String,
    /// Participants sharing the cost, in the order they were selected
    pub split_among: Vec<String>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        id: String,
        description: String,
        amount: BigDecimal,
        paid_by: String,
        split_among: Vec<String>,
    ) -> Self {
        Self {
            id,
            description,
            amount,
            paid_by,
            split_among,
        }
    }

    /// Whether the participant pays for or shares in this expense
    pub fn involves(&self, participant_id: &str) -> bool {
        self.paid_by == participant_id || self.split_among.iter().any(|id| id == participant_id)
    }

    /// All participant ids referenced by this expense, payer first
    pub fn referenced_participants(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.paid_by.as_str()).chain(self.split_among.iter().map(String::as_str))
    }

    /// Structural validation that does not depend on the group membership
    pub fn validate(&self) -> SettlementResult<()> {
        if self.amount <= BigDecimal::from(0) {
            return Err(SettlementError::NonPositiveAmount {
                expense_id: self.id.clone(),
                amount: self.amount.to_string(),
            });
        }

        if self.split_among.is_empty() {
            return Err(SettlementError::EmptyShareSet {
                expense_id: self.id.clone(),
            });
        }

        let mut seen = HashSet::with_capacity(self.split_among.len());
        for member in &self.split_among {
            if !seen.insert(member.as_str()) {
                return Err(SettlementError::DuplicateShareMember {
                    expense_id: self.id.clone(),
                    participant_id: member.clone(),
                });
            }
        }

        Ok(())
    }

    /// Amount converted to minor units at the given currency scale
    pub fn amount_in_minor_units(&self, scale: u32) -> SettlementResult<Money> {
        let money = Money::from_decimal(&self.amount, scale).ok_or_else(|| {
            SettlementError::AmountOutOfRange {
                expense_id: self.id.clone(),
                amount: self.amount.to_string(),
            }
        })?;

        // Amounts up to half a minor unit round to nothing
        if !money.is_positive() {
            return Err(SettlementError::NonPositiveAmount {
                expense_id: self.id.clone(),
                amount: self.amount.to_string(),
            });
        }

        Ok(money)
    }
}

/// A single recommended payment from a debtor to a creditor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Participant who pays
    pub from: String,
    /// Participant who receives
    pub to: String,
    /// Amount at the currency scale, always positive
    pub amount: BigDecimal,
}

impl Transfer {
    /// Create a new transfer
    pub fn new(from: String, to: String, amount: BigDecimal) -> Self {
        Self { from, to, amount }
    }
}

/// Signed amount of money counted in the currency's minor unit (cents at scale 2)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor_units(units: i64) -> Self {
        Self(units)
    }

    pub fn minor_units(self) -> i64 {
        self.0
    }

    /// Convert a decimal amount, rounding to the nearest minor unit.
    ///
    /// Ties round half to even, so `0.445` becomes 44 cents and `0.455`
    /// becomes 46. Returns `None` when the result does not fit in an `i64`.
    pub fn from_decimal(amount: &BigDecimal, scale: u32) -> Option<Self> {
        let factor = BigDecimal::from(10_i64.checked_pow(scale)?);
        (amount * factor).round(0).to_i64().map(Self)
    }

    /// Decimal representation with exactly `scale` fractional digits
    pub fn to_decimal(self, scale: u32) -> BigDecimal {
        BigDecimal::new(BigInt::from(self.0), i64::from(scale))
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Absolute value, `None` for `i64::MIN`
    pub fn checked_abs(self) -> Option<Self> {
        self.0.checked_abs().map(Self)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Errors that can occur while building a group or computing a settlement
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettlementError {
    #[error("Expense '{expense_id}' has an empty share set")]
    EmptyShareSet { expense_id: String },
    #[error("Expense '{expense_id}' references unknown participant '{participant_id}'")]
    UnknownParticipant {
        expense_id: String,
        participant_id: String,
    },
    #[error("Expense '{expense_id}' lists participant '{participant_id}' more than once")]
    DuplicateShareMember {
        expense_id: String,
        participant_id: String,
    },
    #[error("Expense '{expense_id}' amount must be positive, got {amount}")]
    NonPositiveAmount { expense_id: String, amount: String },
    #[error("Expense '{expense_id}' amount {amount} is out of range")]
    AmountOutOfRange { expense_id: String, amount: String },
    #[error("Duplicate participant: {0}")]
    DuplicateParticipant(String),
    #[error("Duplicate expense: {0}")]
    DuplicateExpense(String),
    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for settlement operations
pub type SettlementResult<T> = Result<T, SettlementError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(&dec("12.34"), 2), Some(Money(1234)));
        assert_eq!(Money::from_decimal(&dec("100"), 2), Some(Money(10000)));
        assert_eq!(Money::from_decimal(&dec("0.456"), 2), Some(Money(46)));
        assert_eq!(Money::from_decimal(&dec("7"), 0), Some(Money(7)));
        assert_eq!(Money::from_decimal(&dec("1e30"), 2), None);
    }

    #[test]
    fn test_money_from_decimal_rounds_ties_to_even() {
        assert_eq!(Money::from_decimal(&dec("0.445"), 2), Some(Money(44)));
        assert_eq!(Money::from_decimal(&dec("0.455"), 2), Some(Money(46)));
        assert_eq!(Money::from_decimal(&dec("0.125"), 2), Some(Money(12)));
        assert_eq!(Money::from_decimal(&dec("0.005"), 2), Some(Money(0)));
        assert_eq!(Money::from_decimal(&dec("2.5"), 0), Some(Money(2)));
    }

    #[test]
    fn test_money_to_decimal_keeps_scale() {
        let amount = Money::from_minor_units(5000).to_decimal(2);
        assert_eq!(amount, dec("50"));
        assert_eq!(amount.to_string(), "50.00");
        assert_eq!(Money::from_minor_units(-1).to_decimal(2).to_string(), "-0.01");
    }

    #[test]
    fn test_expense_validation() {
        let valid = Expense::new(
            "e1".to_string(),
            "Dinner".to_string(),
            dec("90"),
            "alice".to_string(),
            vec!["alice".to_string(), "bob".to_string()],
        );
        assert!(valid.validate().is_ok());
        assert!(valid.involves("bob"));
        assert!(!valid.involves("carol"));

        let mut empty = valid.clone();
        empty.split_among.clear();
        assert_eq!(
            empty.validate(),
            Err(SettlementError::EmptyShareSet {
                expense_id: "e1".to_string()
            })
        );

        let mut negative = valid.clone();
        negative.amount = dec("-5");
        assert!(matches!(
            negative.validate(),
            Err(SettlementError::NonPositiveAmount { .. })
        ));

        let mut duplicated = valid;
        duplicated.split_among.push("bob".to_string());
        assert!(matches!(
            duplicated.validate(),
            Err(SettlementError::DuplicateShareMember { participant_id, .. }) if participant_id == "bob"
        ));
    }

    #[test]
    fn test_sub_unit_amount_is_rejected() {
        let expense = Expense::new(
            "tiny".to_string(),
            "Rounding dust".to_string(),
            dec("0.001"),
            "alice".to_string(),
            vec!["alice".to_string()],
        );
        assert!(expense.validate().is_ok());
        assert!(matches!(
            expense.amount_in_minor_units(2),
            Err(SettlementError::NonPositiveAmount { .. })
        ));
    }

    #[test]
    fn test_generated_participant_ids_are_unique() {
        let a = Participant::with_generated_id("Alice".to_string(), None);
        let b = Participant::with_generated_id("Alice".to_string(), None);
        assert_ne!(a.id, b.id);
    }
}
