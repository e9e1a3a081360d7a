//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use crate::{
    Error, currency::CurrencyFormatter, storage::TransactionStorage, store::TransactionStore,
    timezone::get_local_offset,
};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transactions, shared between request handlers.
    ///
    /// The lock is held for the whole of a request so that a mutation, the
    /// save and the render that follows it happen as one event.
    pub store: Arc<Mutex<TransactionStore>>,

    /// The local timezone as a canonical timezone name, e.g. "Africa/Cairo".
    pub local_timezone: String,

    /// Formats amounts for display.
    pub currency: CurrencyFormatter,
}

impl AppState {
    /// Create a new [AppState], loading the saved transactions from `storage`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Africa/Cairo".
    ///
    /// # Errors
    /// Returns an error if the timezone or currency code is invalid, or if the
    /// saved transactions cannot be loaded.
    pub fn new(
        storage: Box<dyn TransactionStorage>,
        local_timezone: &str,
        currency_code: &str,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezone(local_timezone.to_owned()));
        }

        let currency = CurrencyFormatter::new(currency_code)?;
        let store = TransactionStore::load(storage)?;

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            local_timezone: local_timezone.to_owned(),
            currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, storage::MemoryStorage};

    use super::AppState;

    #[test]
    fn rejects_invalid_timezone() {
        let result = AppState::new(Box::new(MemoryStorage::default()), "Not/AZone", "EGP");

        assert_eq!(
            result.map(|_| ()),
            Err(Error::InvalidTimezone("Not/AZone".to_owned()))
        );
    }

    #[test]
    fn refuses_to_start_with_malformed_storage() {
        let storage = MemoryStorage::with_payload("{not json");

        let result = AppState::new(Box::new(storage), "Etc/UTC", "EGP");

        assert!(matches!(result, Err(Error::CorruptStorage(_))));
    }
}
