//! Formats amounts of money for display.

use numfmt::{Formatter, Precision};

use crate::Error;

/// Formats amounts as currency with the currency code as a prefix, e.g. "EGP 1,234.50".
///
/// Negative amounts are prefixed with a minus sign, e.g. "-EGP 3.50". Zero is
/// always formatted without a sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    prefix: String,
    negative_prefix: String,
}

impl CurrencyFormatter {
    /// Create a formatter for the currency `code`, e.g. "EGP" or "NZD".
    ///
    /// # Errors
    /// Returns an [Error::InvalidCurrency] if `code` is empty or too long to
    /// be used as a prefix.
    pub fn new(code: &str) -> Result<Self, Error> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::InvalidCurrency(code.to_owned()));
        }

        let formatter = Self {
            prefix: format!("{code} "),
            negative_prefix: format!("-{code} "),
        };

        // The negative prefix is the longest one, so it is enough to check that.
        Formatter::currency(&formatter.negative_prefix)
            .map_err(|_| Error::InvalidCurrency(code.to_owned()))?;

        Ok(formatter)
    }

    /// Format `amount` rounded to the nearest cent.
    pub fn format(&self, amount: f64) -> String {
        let cents = (amount * 100.0).round();

        // Checked after rounding so that sums like 0.1 + 0.2 - 0.3 and -0.0
        // are shown without a sign.
        let prefix = if cents < 0.0 {
            &self.negative_prefix
        } else {
            &self.prefix
        };

        // Saturates for amounts too large for a u128, which only happens for
        // values far outside any real total.
        let cents = cents.abs() as u128;
        let whole = cents / 100;
        let fraction = cents % 100;

        format!("{}.{fraction:02}", format_whole(prefix, whole))
    }
}

/// Format the whole part of an amount with `prefix` and thousands separators.
///
/// numfmt handles the common range. It drops the prefix for zero and switches
/// to scientific notation for very large numbers, so those are grouped by hand.
fn format_whole(prefix: &str, whole: u128) -> String {
    if (1..MAX_NUMFMT_WHOLE).contains(&whole) {
        if let Ok(formatter) = Formatter::currency(prefix) {
            return formatter
                .precision(Precision::Decimals(0))
                .fmt_string(whole as f64);
        }

        tracing::warn!("Could not create currency formatter for prefix {prefix:?}");
    }

    format!("{prefix}{}", group_thousands(whole))
}

/// numfmt prints whole numbers below this without scientific notation.
const MAX_NUMFMT_WHOLE: u128 = 1_000_000_000_000;

fn group_thousands(number: u128) -> String {
    let digits = number.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self {
            prefix: "EGP ".to_owned(),
            negative_prefix: "-EGP ".to_owned(),
        }
    }
}
