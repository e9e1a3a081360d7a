//! Defines the core data model for expenses: the transaction record, its ID and type.

use std::fmt::Display;

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::ValidationError;

/// The format used for dates in forms and in the rendered list, e.g. "2024-01-31".
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// An expense, i.e. an event where money was spent, or refunded if the amount is negative.
///
/// Transactions are created through [crate::TransactionStore::add] and are never
/// modified once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction, unique within the store.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent. Negative amounts are refunds or credits.
    pub amount: f64,
    /// When the transaction happened.
    pub date: TransactionDate,
    /// The kind of transaction.
    pub type_: TransactionType,
}

/// The opaque identifier for a [Transaction].
///
/// IDs are always strings, including IDs loaded from storage that were
/// written as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap an existing ID, e.g. one taken from a request path.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The date of a [Transaction].
///
/// Transactions created by the store always have a valid date. A stored date
/// that cannot be parsed is kept as text so that it is saved back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionDate {
    /// A calendar date.
    Valid(Date),
    /// Stored text that is not a date.
    Invalid(String),
}

impl TransactionDate {
    /// The calendar date, or `None` if the stored text was not a date.
    pub fn as_date(&self) -> Option<Date> {
        match self {
            TransactionDate::Valid(date) => Some(*date),
            TransactionDate::Invalid(_) => None,
        }
    }
}

impl From<Date> for TransactionDate {
    fn from(date: Date) -> Self {
        TransactionDate::Valid(date)
    }
}

/// The kind of a transaction.
///
/// Only expenses are created at the moment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money spent, or refunded when the amount is negative.
    #[default]
    Expense,
}

const BASE36_DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_SUFFIX_LENGTH: usize = 11;

/// Generates transaction IDs from the current time in milliseconds followed by
/// a random base-36 suffix.
///
/// The time component never goes backwards within one generator, even if the
/// system clock does.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_millis: i128,
}

impl IdGenerator {
    pub fn next_id(&mut self) -> TransactionId {
        let now_millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        self.last_millis = self.last_millis.max(now_millis);

        let mut rng = rand::thread_rng();
        let suffix: String = (0..RANDOM_SUFFIX_LENGTH)
            .map(|_| BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())] as char)
            .collect();

        TransactionId(format!("{}{suffix}", self.last_millis))
    }
}

/// Parse a calendar date in the form "YYYY-MM-DD".
///
/// # Errors
/// Returns [ValidationError::InvalidDate] if `text` is not a valid date.
pub fn parse_date(text: &str) -> Result<Date, ValidationError> {
    Date::parse(text.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(text.to_owned()))
}
