//! Subject price table and fee calculation.
//!
//! # Responsibility
//! - Hold the immutable subject -> price mapping used for every submission.
//! - Sum prices for a selected subject list.
//!
//! # Invariants
//! - Keys are trimmed and lower-cased; prices are strictly positive.
//! - The table is built once at start-up and never mutated afterwards.
//! - Fee calculation never fails: unknown subjects cost nothing.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Monetary amount in whole currency units.
pub type Fee = u64;

const STANDARD_FEES: &[(&str, Fee)] = &[
    ("bengali", 500),
    ("history", 400),
    ("geography", 450),
    ("sanskrit", 350),
    ("english", 600),
    ("computer", 700),
];

/// Rejected fee table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeTableError {
    /// Subject name is blank after trimming.
    EmptySubject,
    /// Price must be greater than zero.
    NonPositivePrice(String),
    /// Override text is not in `NAME=PRICE` form.
    Malformed(String),
}

impl Display for FeeTableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySubject => write!(f, "subject name cannot be empty"),
            Self::NonPositivePrice(subject) => {
                write!(f, "price for subject `{subject}` must be positive")
            }
            Self::Malformed(value) => {
                write!(f, "invalid subject fee `{value}`; expected NAME=PRICE")
            }
        }
    }
}

impl Error for FeeTableError {}

/// Immutable price list keyed by normalized subject name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectFeeTable {
    prices: BTreeMap<String, Fee>,
}

impl SubjectFeeTable {
    /// Returns the table used when no overrides are configured.
    pub fn standard() -> Self {
        Self {
            prices: STANDARD_FEES
                .iter()
                .map(|(name, price)| ((*name).to_string(), *price))
                .collect(),
        }
    }

    /// Adds or replaces one subject price, consuming the table.
    ///
    /// Only meant for start-up configuration.
    pub fn with_price(mut self, subject: &str, price: Fee) -> Result<Self, FeeTableError> {
        let key = normalize_subject(subject);
        if key.is_empty() {
            return Err(FeeTableError::EmptySubject);
        }
        if price == 0 {
            return Err(FeeTableError::NonPositivePrice(key));
        }
        self.prices.insert(key, price);
        Ok(self)
    }

    /// Looks up one subject using the same normalization as [`Self::calculate`].
    pub fn price_of(&self, subject: &str) -> Option<Fee> {
        self.prices.get(&normalize_subject(subject)).copied()
    }

    /// Sums prices for `subjects`; duplicates are charged every time.
    pub fn calculate<S: AsRef<str>>(&self, subjects: &[S]) -> Fee {
        subjects.iter().fold(0, |total: Fee, subject| {
            total.saturating_add(self.price_of(subject.as_ref()).unwrap_or(0))
        })
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for SubjectFeeTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Computes the total fee for the selected subjects.
pub fn calculate_fees<S: AsRef<str>>(table: &SubjectFeeTable, subjects: &[S]) -> Fee {
    table.calculate(subjects)
}

/// Parses a `NAME=PRICE` override as accepted on the command line.
pub fn parse_fee_override(value: &str) -> Result<(String, Fee), FeeTableError> {
    let (name, price) = value
        .split_once('=')
        .ok_or_else(|| FeeTableError::Malformed(value.to_string()))?;
    let name = normalize_subject(name);
    if name.is_empty() {
        return Err(FeeTableError::EmptySubject);
    }
    let price = price
        .trim()
        .parse::<Fee>()
        .map_err(|_| FeeTableError::Malformed(value.to_string()))?;
    if price == 0 {
        return Err(FeeTableError::NonPositivePrice(name));
    }
    Ok((name, price))
}

fn normalize_subject(subject: &str) -> String {
    subject.trim().to_lowercase()
}
