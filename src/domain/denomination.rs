use super::banknote::Banknote;
use super::money::{Currency, Money};
use crate::error::{AtmError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::trace;

/// Most notes a single withdrawal may be paid out in.
pub const DEFAULT_MAX_NOTES: usize = 200;

/// Banknote face values available per currency.
///
/// Values are kept deduplicated and sorted from largest to smallest. The table
/// is configuration: the ATM only ever dispenses notes listed here, and never
/// more than `max_notes` of them in one withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Currency, Vec<u32>>",
    into = "BTreeMap<Currency, Vec<u32>>"
)]
pub struct DenominationTable {
    values: BTreeMap<Currency, Vec<u32>>,
    max_notes: usize,
}

impl DenominationTable {
    /// Builds a table, rejecting zero values and currencies without notes.
    pub fn new(values: BTreeMap<Currency, Vec<u32>>) -> Result<Self> {
        values
            .into_iter()
            .try_fold(Self::empty(), |table, (currency, notes)| {
                table.with_currency(currency, notes)
            })
    }

    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
            max_notes: DEFAULT_MAX_NOTES,
        }
    }

    /// Caps how many notes one breakdown may contain.
    pub fn with_max_notes(mut self, max_notes: usize) -> Self {
        self.max_notes = max_notes;
        self
    }

    pub fn max_notes(&self) -> usize {
        self.max_notes
    }

    /// Adds or replaces the note values for `currency`.
    pub fn with_currency(mut self, currency: Currency, mut notes: Vec<u32>) -> Result<Self> {
        if notes.is_empty() {
            return Err(AtmError::ConfigurationError(format!(
                "no banknote values configured for {currency}"
            )));
        }
        if notes.contains(&0) {
            return Err(AtmError::ConfigurationError(format!(
                "banknote values for {currency} must be positive"
            )));
        }
        notes.sort_unstable_by(|a, b| b.cmp(a));
        notes.dedup();
        self.values.insert(currency, notes);
        Ok(self)
    }

    /// Note values for `currency`, largest first.
    pub fn values(&self, currency: Currency) -> Option<&[u32]> {
        self.values.get(&currency).map(Vec::as_slice)
    }

    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.values.keys().copied()
    }

    /// Splits `money` into banknotes whose values add up to exactly its amount.
    ///
    /// Notes are chosen greedily, largest first. If greedy selection strands a
    /// remainder, the search backtracks in the same largest-first order and
    /// returns the first exact combination it reaches, so greedy output is
    /// kept whenever greedy works on its own.
    ///
    /// # Errors
    ///
    /// [`AtmError::WrongMoneyAmount`] if the amount is negative, the currency
    /// has no configured notes, no combination of notes matches exactly, or the
    /// combination found needs more than `max_notes` notes.
    pub fn break_down(&self, money: &Money) -> Result<Vec<Banknote>> {
        let amount = u64::try_from(money.amount())
            .map_err(|_| AtmError::wrong_amount(*money, "amount must not be negative"))?;

        let currency = money.currency();
        let values = self.values(currency).ok_or_else(|| {
            AtmError::wrong_amount(*money, format!("no banknotes available for {currency}"))
        })?;

        let counts = select_counts(values, amount).ok_or_else(|| {
            AtmError::wrong_amount(*money, "amount cannot be paid out with available banknotes")
        })?;
        trace!(?counts, "banknote counts selected");

        let total = counts.iter().fold(0u64, |acc, &count| acc.saturating_add(count));
        if total > self.max_notes as u64 {
            return Err(AtmError::wrong_amount(
                *money,
                format!(
                    "amount needs {total} banknotes, more than the limit of {}",
                    self.max_notes
                ),
            ));
        }

        let mut notes = Vec::with_capacity(total as usize);
        for (&value, &count) in values.iter().zip(&counts) {
            let note = Banknote::new(currency, value);
            notes.extend(std::iter::repeat_n(note, count as usize));
        }
        Ok(notes)
    }
}

impl Default for DenominationTable {
    fn default() -> Self {
        let values = BTreeMap::from([
            (Currency::Pl, vec![500, 200, 100, 50, 20, 10]),
            (Currency::Eur, vec![500, 200, 100, 50, 20, 10, 5]),
            (Currency::Usd, vec![100, 50, 20, 10, 5, 2, 1]),
        ]);
        Self {
            values,
            max_notes: DEFAULT_MAX_NOTES,
        }
    }
}

impl TryFrom<BTreeMap<Currency, Vec<u32>>> for DenominationTable {
    type Error = AtmError;

    fn try_from(values: BTreeMap<Currency, Vec<u32>>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<DenominationTable> for BTreeMap<Currency, Vec<u32>> {
    fn from(table: DenominationTable) -> Self {
        table.values
    }
}

/// Per-denomination note counts summing to `amount`, or `None`.
///
/// `values` must be positive and sorted descending.
fn select_counts(values: &[u32], amount: u64) -> Option<Vec<u64>> {
    let mut search = Search {
        values,
        suffix_gcd: suffix_gcd(values),
        counts: vec![0; values.len()],
        dead_ends: HashSet::new(),
    };
    search.fill(0, amount).then_some(search.counts)
}

struct Search<'a> {
    values: &'a [u32],
    // suffix_gcd[i] is the gcd of values[i..]
    suffix_gcd: Vec<u64>,
    counts: Vec<u64>,
    dead_ends: HashSet<(usize, u64)>,
}

impl Search<'_> {
    fn fill(&mut self, index: usize, remainder: u64) -> bool {
        if remainder == 0 {
            return true;
        }
        if index == self.values.len()
            || remainder % self.suffix_gcd[index] != 0
            || self.dead_ends.contains(&(index, remainder))
        {
            return false;
        }

        let value = u64::from(self.values[index]);
        for count in (0..=remainder / value).rev() {
            self.counts[index] = count;
            if self.fill(index + 1, remainder - count * value) {
                return true;
            }
        }

        self.counts[index] = 0;
        self.dead_ends.insert((index, remainder));
        false
    }
}

fn suffix_gcd(values: &[u32]) -> Vec<u64> {
    let mut out = vec![0; values.len() + 1];
    for (i, &value) in values.iter().enumerate().rev() {
        out[i] = gcd(u64::from(value), out[i + 1]);
    }
    out
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
