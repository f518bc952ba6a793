use thiserror::Error;

/// A single validation failure on a product field.
///
/// The variants are the whole vocabulary the store's validator can produce.
/// The `Display` text is internal log wording only; user-facing output goes
/// through [`crate::messages::user_message`], which maps every variant to a
/// fixed, user-safe message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidField {
    #[error("product name is missing")]
    NameMissing,

    #[error("product name is blank")]
    NameBlank,

    #[error("product name exceeds {limit} characters")]
    NameTooLong {
        /// Maximum accepted name length, in characters
        limit: usize,
    },

    #[error("product price is missing")]
    PriceMissing,

    #[error("product price is not a finite number")]
    PriceNotFinite,

    #[error("product price is negative")]
    PriceNegative,

    #[error("product price is zero")]
    PriceZero,
}

impl InvalidField {
    /// Name of the field the failure is about.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NameMissing | Self::NameBlank | Self::NameTooLong { .. } => "name",
            Self::PriceMissing | Self::PriceNotFinite | Self::PriceNegative | Self::PriceZero => {
                "price"
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid product: {0}")]
    Validation(#[from] InvalidField),

    #[error("store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
