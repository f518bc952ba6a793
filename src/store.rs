//! In-memory product store.
//!
//! Holds the catalog as an insertion-ordered sequence behind a coarse mutex,
//! allocates identifiers from a monotonic counter that never reuses a value,
//! and validates products before any mutation (validate-then-mutate, so a
//! rejected save leaves the store untouched). Three demo rows are seeded at
//! construction so the UI has something to show.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, instrument, warn};

use crate::errors::{Error, InvalidField, Result};
use crate::model::Product;

/// Maximum accepted product name length, in characters.
pub const NAME_MAX_CHARS: usize = 255;

/// Demo rows inserted at construction, in insertion order.
const SEED_PRODUCTS: [(&str, f64); 3] = [
    ("Notebook", 3000.0),
    ("Mouse", 50.0),
    ("Teclado", 150.0),
];

#[derive(Debug)]
struct Catalog {
    products: Vec<Product>,
    next_id: i64,
}

impl Catalog {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Shared, mutex-guarded product catalog.
///
/// All handlers of the hosting HTTP server operate on one instance; the
/// mutex covers both the sequence and the id counter, which keeps id
/// allocation strictly monotonic under concurrent saves and gives readers a
/// consistent snapshot.
#[derive(Debug)]
pub struct ProductStore {
    catalog: Mutex<Catalog>,
}

impl ProductStore {
    /// Creates a store seeded with the three demo products (ids 1..=3);
    /// the id counter starts at 4.
    #[must_use]
    pub fn new() -> Self {
        let mut catalog = Catalog {
            products: Vec::with_capacity(SEED_PRODUCTS.len()),
            next_id: 1,
        };
        for (name, price) in SEED_PRODUCTS {
            let id = catalog.allocate_id();
            catalog.products.push(Product::with_id(id, name, price));
        }
        Self {
            catalog: Mutex::new(catalog),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Catalog>> {
        self.catalog
            .lock()
            .map_err(|_| Error::Store("product store mutex poisoned".to_string()))
    }

    /// Returns a defensive copy of the catalog, in insertion order.
    ///
    /// Mutating the returned sequence does not affect store state.
    pub fn list_all(&self) -> Result<Vec<Product>> {
        let catalog = self.lock()?;
        debug!("listing {} products", catalog.products.len());
        Ok(catalog.products.clone())
    }

    /// Finds a product by id, returning a copy if present.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let catalog = self.lock()?;
        let found = catalog.products.iter().find(|p| p.id == Some(id)).cloned();
        debug!(id, found = found.is_some(), "product lookup");
        Ok(found)
    }

    /// Saves a product: validates it, then either appends it with a freshly
    /// allocated id (no id on the input) or copies name and price into the
    /// existing entry with the same id.
    ///
    /// A rejected product leaves the store unchanged. An id unknown to the
    /// store is a no-op: nothing is inserted and no error is raised, which
    /// preserves the legacy upsert contract.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` when the product fails a validation rule,
    /// `Error::Store` when the catalog lock is unavailable.
    #[instrument(skip(self, product), fields(id = ?product.id))]
    pub fn save(&self, mut product: Product) -> Result<Product> {
        Self::validate(&product)?;
        let mut catalog = self.lock()?;
        match product.id {
            None => {
                let id = catalog.allocate_id();
                product.id = Some(id);
                catalog.products.push(product.clone());
                info!(id, "product created");
            }
            Some(id) => {
                if let Some(existing) = catalog.products.iter_mut().find(|p| p.id == Some(id)) {
                    existing.name.clone_from(&product.name);
                    existing.price = product.price;
                    info!(id, "product updated");
                } else {
                    warn!(id, "update target not found, store left unchanged");
                }
            }
        }
        Ok(product)
    }

    /// Removes the product with the given id.
    ///
    /// Returns `true` if an entry was removed, `false` if the id was not
    /// present. The freed id is never reallocated.
    #[instrument(skip(self))]
    pub fn delete(&self, id: i64) -> Result<bool> {
        let mut catalog = self.lock()?;
        let before = catalog.products.len();
        catalog.products.retain(|p| p.id != Some(id));
        let removed = catalog.products.len() < before;
        if removed {
            info!(id, "product removed");
        } else {
            debug!(id, "delete target not found");
        }
        Ok(removed)
    }

    /// Validates a product against the catalog rules, first failure wins:
    /// name present, name non-blank after trimming, name at most
    /// [`NAME_MAX_CHARS`] characters, price present, price finite,
    /// price strictly positive (negative and zero reported separately).
    pub fn validate(product: &Product) -> std::result::Result<(), InvalidField> {
        let name = product.name.as_deref().ok_or(InvalidField::NameMissing)?;
        if name.trim().is_empty() {
            return Err(InvalidField::NameBlank);
        }
        if name.chars().count() > NAME_MAX_CHARS {
            return Err(InvalidField::NameTooLong {
                limit: NAME_MAX_CHARS,
            });
        }
        let price = product.price.ok_or(InvalidField::PriceMissing)?;
        if !price.is_finite() {
            return Err(InvalidField::PriceNotFinite);
        }
        if price < 0.0 {
            return Err(InvalidField::PriceNegative);
        }
        if price == 0.0 {
            return Err(InvalidField::PriceZero);
        }
        Ok(())
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}
