//! The authoritative in-memory collection of transactions.

use std::fmt::Debug;

use crate::{
    Error, ValidationError,
    storage::TransactionStorage,
    transaction::{IdGenerator, Transaction, TransactionId, TransactionType, parse_date},
};

/// Owns the ordered collection of transactions and is the only writer of the
/// storage slot.
///
/// Every mutation is saved before the method returns. If saving fails the
/// collection is left exactly as it was before the call.
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    storage: Box<dyn TransactionStorage>,
    ids: IdGenerator,
}

impl Debug for TransactionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionStore")
            .field("transactions", &self.transactions)
            .finish_non_exhaustive()
    }
}

impl TransactionStore {
    /// Create a store seeded with the transactions saved in `storage`.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read or holds a malformed payload.
    pub fn load(storage: Box<dyn TransactionStorage>) -> Result<Self, Error> {
        let transactions = storage.load()?;

        let store = Self {
            transactions,
            storage,
            ids: IdGenerator::default(),
        };

        for transaction in &store.transactions {
            store.warn_if_duplicated(&transaction.id);
        }

        tracing::info!("Loaded {} transactions", store.transactions.len());

        Ok(store)
    }

    /// Create a new expense and append it to the end of the collection.
    ///
    /// `date` must be in the form "YYYY-MM-DD".
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if `description` is empty, `amount` is not a finite
    ///   number or `date` is not a valid date,
    /// - or [Error::Storage] if the updated collection could not be saved.
    pub fn add(&mut self, description: &str, amount: f64, date: &str) -> Result<Transaction, Error> {
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription.into());
        }

        if !amount.is_finite() {
            return Err(ValidationError::NonFiniteAmount.into());
        }

        let date = parse_date(date)?;

        let transaction = Transaction {
            id: self.new_id(),
            description: description.to_owned(),
            amount,
            date: date.into(),
            type_: TransactionType::Expense,
        };

        let mut transactions = self.transactions.clone();
        transactions.push(transaction.clone());
        self.commit(transactions)?;

        tracing::debug!("Created transaction {}", transaction.id);

        Ok(transaction)
    }

    /// Remove the transaction with the ID `id`.
    ///
    /// If the ID appears more than once only the first match is removed.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::TransactionNotFound] if no transaction has the ID `id`,
    /// - or [Error::Storage] if the updated collection could not be saved.
    pub fn remove(&mut self, id: &TransactionId) -> Result<Transaction, Error> {
        let index = self
            .transactions
            .iter()
            .position(|transaction| &transaction.id == id)
            .ok_or_else(|| Error::TransactionNotFound(id.clone()))?;

        self.warn_if_duplicated(id);

        let mut transactions = self.transactions.clone();
        let removed = transactions.remove(index);
        self.commit(transactions)?;

        tracing::debug!("Deleted transaction {id}");

        Ok(removed)
    }

    /// The transactions in the order they were added.
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The sum of the amounts of all transactions, zero if there are none.
    pub fn total(&self) -> f64 {
        self.transactions
            .iter()
            .map(|transaction| transaction.amount)
            .sum()
    }

    /// The number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether there are no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn new_id(&mut self) -> TransactionId {
        loop {
            let id = self.ids.next_id();

            if !self.transactions.iter().any(|transaction| transaction.id == id) {
                return id;
            }

            tracing::warn!("Generated transaction ID {id} is already in use, trying again");
        }
    }

    /// Save `transactions` and only then make them the current collection.
    fn commit(&mut self, transactions: Vec<Transaction>) -> Result<(), Error> {
        self.storage
            .save(&transactions)
            .inspect_err(|error| tracing::error!("Could not save transactions: {error}"))?;
        self.transactions = transactions;

        Ok(())
    }

    fn warn_if_duplicated(&self, id: &TransactionId) {
        let count = self
            .transactions
            .iter()
            .filter(|transaction| &transaction.id == id)
            .count();

        if count > 1 {
            tracing::warn!("Found {count} transactions with the ID {id}, IDs should be unique");
        }
    }
}
