//! Product entity - a mutable record with identity, name, and price.
//!
//! A product starts detached (no id) and receives its identifier from the
//! store on first save. Field presence is modeled with `Option` so the
//! validator can tell "missing" apart from "present but invalid".

use serde::{Deserialize, Serialize};

use crate::errors::InvalidField;

/// A catalog product.
///
/// The price setter blocks negative values at assignment time; every other
/// semantic rule (missing, non-finite, zero) is enforced by
/// [`crate::store::ProductStore::validate`] when the product is persisted.
/// The two layers are deliberately asymmetric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier assigned by the store; `None` while unsaved
    pub id: Option<i64>,
    /// Product name as submitted, untrimmed
    #[serde(rename = "nome")]
    pub name: Option<String>,
    /// Unit price
    #[serde(rename = "preco")]
    pub price: Option<f64>,
}

impl Product {
    /// Creates a detached product with the given name and price.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            price: Some(price),
        }
    }

    /// Creates a product that already carries an identifier.
    #[must_use]
    pub fn with_id(id: i64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            price: Some(price),
        }
    }

    /// Sets the price, rejecting negative values immediately.
    ///
    /// NaN and infinities pass here on purpose; they are caught by store
    /// validation instead.
    pub fn set_price(&mut self, price: f64) -> Result<(), InvalidField> {
        if price < 0.0 {
            return Err(InvalidField::PriceNegative);
        }
        self.price = Some(price);
        Ok(())
    }
}
