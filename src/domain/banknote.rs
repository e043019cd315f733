use super::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single physical note of a fixed face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Banknote {
    currency: Currency,
    value: u32,
}

impl Banknote {
    pub fn new(currency: Currency, value: u32) -> Self {
        Self { currency, value }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

impl fmt::Display for Banknote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency, self.value)
    }
}

/// The notes handed to the customer after a successful withdrawal.
///
/// Notes are kept in dispensing order, largest value first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    notes: Vec<Banknote>,
}

impl Payment {
    pub(crate) fn new(notes: Vec<Banknote>) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &[Banknote] {
        &self.notes
    }

    pub fn into_notes(self) -> Vec<Banknote> {
        self.notes
    }

    /// Sum of all note values.
    pub fn total(&self) -> i64 {
        self.notes.iter().map(|note| i64::from(note.value)).sum()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns true when the notes add up to exactly `money`.
    pub fn covers(&self, money: &Money) -> bool {
        self.total() == money.amount()
            && self
                .notes
                .iter()
                .all(|note| note.currency == money.currency())
    }
}
