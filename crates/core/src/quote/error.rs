//! Quote error types.

use fiado_shared::{AppError, QuoteCode};
use thiserror::Error;

/// Errors that can occur while building or editing a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// A quote needs at least one item.
    #[error("Quote must have at least one item")]
    EmptyItems,

    /// Item quantity must be positive.
    #[error("Item {0:?} has a non-positive quantity")]
    NonPositiveQuantity(String),

    /// Item prices cannot be negative.
    #[error("Item {0:?} has a negative price")]
    NegativePrice(String),

    /// Item names cannot be blank.
    #[error("Quote items must have a name")]
    BlankItemName,

    /// The delivery fee cannot be negative.
    #[error("Delivery fee cannot be negative")]
    NegativeDeliveryFee,

    /// BCV and dual quotes need a locked rate to compute the bolivar total.
    #[error("A locked rate is required unless the pricing mode is divisa")]
    MissingRate,

    /// The locked rate must be positive.
    #[error("The locked rate must be positive")]
    NonPositiveRate,

    /// Quote not found.
    #[error("Quote not found: {0}")]
    NotFound(QuoteCode),
}

impl QuoteError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyItems => "EMPTY_ITEMS",
            Self::NonPositiveQuantity(_) => "NON_POSITIVE_QUANTITY",
            Self::NegativePrice(_) => "NEGATIVE_PRICE",
            Self::BlankItemName => "BLANK_ITEM_NAME",
            Self::NegativeDeliveryFee => "NEGATIVE_DELIVERY_FEE",
            Self::MissingRate => "MISSING_RATE",
            Self::NonPositiveRate => "NON_POSITIVE_RATE",
            Self::NotFound(_) => "QUOTE_NOT_FOUND",
        }
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        match &err {
            QuoteError::NotFound(_) => Self::NotFound(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
