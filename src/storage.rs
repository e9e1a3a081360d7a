//! Persistence for the transaction collection.
//!
//! The whole collection is serialized to a single named slot as a JSON array
//! and overwritten on every save. Dates are written as UTC timestamps at
//! midnight, e.g. `2024-01-31T00:00:00.000Z`.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use serde::{Deserialize, Deserializer, Serialize};
use time::{
    OffsetDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::{
    Error,
    transaction::{Transaction, TransactionDate, TransactionId, TransactionType, parse_date},
};

/// The name of the storage slot holding the transactions.
pub const SLOT_NAME: &str = "transactions";

const TIMESTAMP_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// A durable home for the transaction collection.
pub trait TransactionStorage: Send {
    /// Read the stored transactions in the order they were saved.
    ///
    /// Returns an empty list if nothing has been saved yet.
    ///
    /// # Errors
    /// Returns an [Error::Storage] if the slot cannot be read, or an
    /// [Error::CorruptStorage] if the stored payload is malformed.
    fn load(&self) -> Result<Vec<Transaction>, Error>;

    /// Replace the stored transactions with `transactions`.
    ///
    /// # Errors
    /// Returns an [Error::Storage] if the slot cannot be written.
    fn save(&mut self, transactions: &[Transaction]) -> Result<(), Error>;
}

/// The persisted form of a [Transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TransactionRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: TransactionId,
    pub description: String,
    pub amount: f64,
    pub date: String,
    #[serde(rename = "type", default)]
    pub type_: TransactionType,
}

impl TransactionRecord {
    pub(crate) fn from_transaction(transaction: &Transaction) -> Result<Self, Error> {
        let date = match &transaction.date {
            TransactionDate::Valid(date) => {
                date.midnight().format(TIMESTAMP_FORMAT).map_err(|error| {
                    Error::Storage(format!(
                        "could not format the date {date} of transaction {}: {error}",
                        transaction.id
                    ))
                })?
            }
            TransactionDate::Invalid(text) => text.clone(),
        };

        Ok(Self {
            id: transaction.id.clone(),
            description: transaction.description.clone(),
            amount: transaction.amount,
            date,
            type_: transaction.type_,
        })
    }

    fn into_transaction(self) -> Transaction {
        let date = match OffsetDateTime::parse(&self.date, &Rfc3339) {
            Ok(timestamp) => TransactionDate::Valid(timestamp.to_offset(UtcOffset::UTC).date()),
            Err(_) => match parse_date(&self.date) {
                Ok(date) => TransactionDate::Valid(date),
                Err(_) => {
                    tracing::warn!(
                        "Transaction {} has an invalid date \"{}\", it will be shown without a date",
                        self.id,
                        self.date
                    );
                    TransactionDate::Invalid(self.date)
                }
            },
        };

        Transaction {
            id: self.id,
            description: self.description,
            amount: self.amount,
            date,
            type_: self.type_,
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<TransactionId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => TransactionId::new(text),
        RawId::Number(number) => TransactionId::new(number.to_string()),
    })
}

/// Serialize `transactions` to the JSON payload stored in the slot.
///
/// # Errors
/// Returns an [Error::Storage] if a transaction cannot be serialized.
pub fn serialize_transactions(transactions: &[Transaction]) -> Result<String, Error> {
    let records = transactions
        .iter()
        .map(TransactionRecord::from_transaction)
        .collect::<Result<Vec<_>, _>>()?;

    serde_json::to_string(&records)
        .map_err(|error| Error::Storage(format!("could not serialize transactions: {error}")))
}

/// Parse a JSON payload produced by [serialize_transactions].
///
/// An empty payload or JSON `null` is treated as an empty collection.
///
/// # Errors
/// Returns an [Error::CorruptStorage] if the payload is not a list of
/// transactions. A record whose date text cannot be parsed is still loaded,
/// with a [TransactionDate::Invalid] date.
pub fn deserialize_transactions(payload: &str) -> Result<Vec<Transaction>, Error> {
    if payload.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Option<Vec<TransactionRecord>> = serde_json::from_str(payload)
        .map_err(|error| Error::CorruptStorage(error.to_string()))?;

    Ok(records
        .unwrap_or_default()
        .into_iter()
        .map(TransactionRecord::into_transaction)
        .collect())
}

/// Stores transactions in a JSON file named after [SLOT_NAME] inside a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage that keeps its slot in `data_dir`.
    ///
    /// The directory is created on the first save if it does not exist.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{SLOT_NAME}.json")),
        }
    }

    /// The path of the file backing the slot.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<Transaction>, Error> {
        let payload = match fs::read_to_string(&self.path) {
            Ok(payload) => payload,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No saved transactions found at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(error) => {
                return Err(Error::Storage(format!(
                    "could not read {}: {error}",
                    self.path.display()
                )));
            }
        };

        deserialize_transactions(&payload)
    }

    fn save(&mut self, transactions: &[Transaction]) -> Result<(), Error> {
        let payload = serialize_transactions(transactions)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|error| {
                Error::Storage(format!("could not create {}: {error}", parent.display()))
            })?;
        }

        fs::write(&self.path, payload).map_err(|error| {
            Error::Storage(format!("could not write {}: {error}", self.path.display()))
        })
    }
}

/// Stores the serialized transactions in memory.
///
/// Clones share the same slot, so a clone kept outside the store sees every
/// save made through the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    /// Create a storage whose slot already holds `payload`.
    pub fn with_payload(payload: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(payload.to_owned()))),
        }
    }

    /// The raw payload currently in the slot, `None` if nothing has been saved.
    ///
    /// # Errors
    /// Returns an [Error::Storage] if the slot's lock is poisoned.
    pub fn payload(&self) -> Result<Option<String>, Error> {
        let slot = self.lock_slot()?;

        Ok(slot.clone())
    }

    fn lock_slot(&self) -> Result<MutexGuard<'_, Option<String>>, Error> {
        self.slot.lock().map_err(|error| {
            tracing::error!("Could not lock memory slot: {error}");
            Error::Storage(format!("could not lock memory slot: {error}"))
        })
    }
}

impl TransactionStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<Transaction>, Error> {
        let slot = self.lock_slot()?;

        match slot.as_deref() {
            Some(payload) => deserialize_transactions(payload),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, transactions: &[Transaction]) -> Result<(), Error> {
        let payload = serialize_transactions(transactions)?;

        let mut slot = self.lock_slot()?;
        *slot = Some(payload);

        Ok(())
    }
}
