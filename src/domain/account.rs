use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Opaque, comparable key identifying a customer account.
pub type CustomerId = u32;

/// Represents a signed monetary value.
///
/// This is a wrapper around `rust_decimal::Decimal` so that balances cannot be
/// confused with other numeric values flowing through the ledger. Balances may
/// go negative through an administrative update.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Balance(pub Decimal);

/// Represents a strictly positive monetary amount read from external input.
///
/// The ledger itself accepts any `Balance`; this type is used where operations
/// enter the system (CSV scripts, generated workloads) to reject zero and
/// negative amounts before they reach it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::ValidationError(format!(
                "Amount must be positive, got {value}"
            )))
        }
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl From<Decimal> for Balance {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Balance {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// `None` when the result does not fit in a `Decimal`.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Sums balances, or `None` if any partial sum overflows.
    pub fn checked_sum<I>(balances: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        balances
            .into_iter()
            .try_fold(Self::ZERO, |total, balance| total.checked_add(balance))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.normalize().fmt(f)
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// A balance-holding entity keyed by its customer identifier.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Account {
    /// The unique identifier for the customer.
    #[serde(rename = "account")]
    pub id: CustomerId,
    /// Current balance. Only ledger operations may change it.
    pub balance: Balance,
}

impl Account {
    pub fn new(id: CustomerId, balance: Balance) -> Self {
        Self { id, balance }
    }
}
