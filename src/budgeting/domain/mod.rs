pub mod budgets;
pub mod categories;
mod entry_type;
pub mod transactions;

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::ValidationError;

pub use entry_type::{EntryType, Frequency, UnknownVariant};

/// Largest magnitude, exclusive, that fits the `NUMERIC(14, 2)` amount columns.
const AMOUNT_LIMIT: i64 = 1_000_000_000_000;
const AMOUNT_SCALE: u32 = 2;

/// Amounts are always positive; direction is given by the [`EntryType`].
/// They must also fit the storage precision without rounding.
pub(crate) fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(amount_error("range", "Amount may not be negative."));
    }

    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(amount_error(
            "precision",
            "Amount may have at most two decimal places.",
        ));
    }

    if amount.abs() >= Decimal::from(AMOUNT_LIMIT) {
        return Err(amount_error("range", "Amount is too large."));
    }

    Ok(())
}

fn amount_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));

    error
}
