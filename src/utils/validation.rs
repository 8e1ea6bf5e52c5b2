use regex::Regex;
use thiserror::Error;

use crate::models::cart::MAX_QUANTITY;
use crate::services::Selection;

lazy_static::lazy_static! {
    static ref SELECTION_REGEX: Regex =
        Regex::new(r"^\s*(?P<name>\S.*?)\s*=\s*(?P<quantity>[+-]?\d+)\s*$").unwrap();
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionParseError {
    #[error("Expected NAME=QUANTITY, got '{0}'")]
    Malformed(String),

    #[error("Quantity '{0}' is not a whole number")]
    BadQuantity(String),
}

/// Parses a `NAME=QUANTITY` argument such as `Rosa Inglesa=4`.
///
/// Range checks are left to the cart so that out-of-range values produce
/// the same error everywhere.
pub fn parse_selection(input: &str) -> Result<Selection, SelectionParseError> {
    let captures = SELECTION_REGEX
        .captures(input)
        .ok_or_else(|| SelectionParseError::Malformed(input.to_string()))?;

    let name = &captures["name"];
    let raw_quantity = &captures["quantity"];
    let quantity = raw_quantity
        .parse::<i64>()
        .map_err(|_| SelectionParseError::BadQuantity(raw_quantity.to_string()))?;

    Ok(Selection::new(name, quantity))
}

/// Prompt-side bound check, mirrors the cart's own limit.
pub fn validate_quantity_input(quantity: &i64) -> Result<(), String> {
    if (0..=MAX_QUANTITY).contains(quantity) {
        Ok(())
    } else {
        Err(format!("Quantity must be between 0 and {}", MAX_QUANTITY))
    }
}
