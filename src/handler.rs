//! Request handler - adapts HTTP-style requests to store operations.
//!
//! The handler is host-agnostic: each operation receives opaque key-value
//! sinks (a model sink for rendered views, a flash sink for attributes that
//! survive one redirect) and returns a [`Disposition`] telling the host
//! which view to render or where to redirect. Validation failures become
//! messages from the closed set in [`crate::messages`]; anything unexpected
//! is logged and replaced by a generic message, so no internal error text
//! ever reaches a sink.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error};

use crate::errors::{Error, Result};
use crate::messages;
use crate::model::Product;
use crate::store::ProductStore;

/// View rendered for the product list.
pub const VIEW_LIST: &str = "listar";
/// View rendered for the registration/edit form.
pub const VIEW_FORM: &str = "form";
/// Redirect target for the product list.
pub const REDIRECT_LIST: &str = "/produtos/listar";
/// Redirect target for the registration form.
pub const REDIRECT_REGISTER: &str = "/produtos/cadastrar";

/// Model key for a single product.
pub const MODEL_PRODUCT: &str = "produto";
/// Model key for the product list.
pub const MODEL_PRODUCTS: &str = "produtos";
/// Flash key for success notices.
pub const FLASH_SUCCESS: &str = "sucesso";
/// Flash key for error notices.
pub const FLASH_ERROR: &str = "erro";
/// Flash key echoing the submitted product back to the form.
pub const FLASH_PRODUCT: &str = "produto";

/// What the host should do after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Render the named view with the model sink's contents.
    View(&'static str),
    /// Answer with a 302 to the given path; the flash sink travels along.
    Redirect(&'static str),
}

impl Disposition {
    /// The redirect target, if this is a redirect.
    #[must_use]
    pub const fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Self::Redirect(path) => Some(path),
            Self::View(_) => None,
        }
    }
}

/// A value placed into a model or flash sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A message from the closed user-visible set
    Text(&'static str),
    /// A single product (form model or submission echo)
    Product(Product),
    /// The product list
    Products(Vec<Product>),
}

/// An opaque key-value sink, filled by the handler and read by the host.
#[derive(Debug, Default)]
pub struct Attributes {
    entries: HashMap<&'static str, Value>,
}

impl Attributes {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous one under the same key.
    pub fn insert(&mut self, key: &'static str, value: Value) {
        self.entries.insert(key, value);
    }

    /// Raw lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// The text under `key`, if any.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&'static str> {
        match self.entries.get(key) {
            Some(Value::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// The product under `key`, if any.
    #[must_use]
    pub fn product(&self, key: &str) -> Option<&Product> {
        match self.entries.get(key) {
            Some(Value::Product(product)) => Some(product),
            _ => None,
        }
    }

    /// The product list under `key`, if any.
    #[must_use]
    pub fn products(&self, key: &str) -> Option<&[Product]> {
        match self.entries.get(key) {
            Some(Value::Products(products)) => Some(products),
            _ => None,
        }
    }

    /// True when nothing was inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Adapts list/new/save/edit/delete requests to the product store.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    store: Arc<ProductStore>,
}

impl RequestHandler {
    /// Creates a handler over a shared store.
    #[must_use]
    pub fn new(store: Arc<ProductStore>) -> Self {
        Self { store }
    }

    /// Shows the product list: fills `produtos` and renders `listar`.
    ///
    /// This is the one operation without an internal catch; a store failure
    /// propagates to the host, matching the legacy endpoint's behavior.
    pub fn list(&self, model: &mut Attributes) -> Result<Disposition> {
        let products = self.store.list_all()?;
        model.insert(MODEL_PRODUCTS, Value::Products(products));
        Ok(Disposition::View(VIEW_LIST))
    }

    /// Shows the registration form with an empty product.
    pub fn new_form(&self, model: &mut Attributes) -> Disposition {
        model.insert(MODEL_PRODUCT, Value::Product(Product::default()));
        Disposition::View(VIEW_FORM)
    }

    /// Saves a new product or updates an existing one, then redirects.
    ///
    /// Success redirects to the list with a success flash. An absent
    /// submission, a validation failure, or an unexpected error redirect
    /// back to the form with a message from the closed set; failed
    /// submissions are echoed under `produto` so the form can repopulate.
    pub fn save(&self, submission: Option<Product>, flash: &mut Attributes) -> Disposition {
        let Some(product) = submission else {
            flash.insert(FLASH_ERROR, Value::Text(messages::SUBMISSION_MISSING));
            return Disposition::Redirect(REDIRECT_REGISTER);
        };

        match self.store.save(product.clone()) {
            Ok(saved) => {
                debug!(id = ?saved.id, "product saved");
                flash.insert(FLASH_SUCCESS, Value::Text(messages::SAVED));
                Disposition::Redirect(REDIRECT_LIST)
            }
            Err(Error::Validation(invalid)) => {
                debug!(%invalid, "product submission rejected");
                flash.insert(FLASH_ERROR, Value::Text(messages::user_message(&invalid)));
                flash.insert(FLASH_PRODUCT, Value::Product(product));
                Disposition::Redirect(REDIRECT_REGISTER)
            }
            Err(err) => {
                error!(%err, "unexpected failure while saving a product");
                flash.insert(FLASH_ERROR, Value::Text(messages::SAVE_FAILED));
                flash.insert(FLASH_PRODUCT, Value::Product(product));
                Disposition::Redirect(REDIRECT_REGISTER)
            }
        }
    }

    /// Shows the edit form for the product with the given id.
    ///
    /// An absent or non-positive id, a missing product, or an unexpected
    /// failure redirect to the list with the matching error flash.
    pub fn edit_form(
        &self,
        id: Option<i64>,
        model: &mut Attributes,
        flash: &mut Attributes,
    ) -> Disposition {
        let Some(id) = id.filter(|id| *id > 0) else {
            flash.insert(FLASH_ERROR, Value::Text(messages::INVALID_ID));
            return Disposition::Redirect(REDIRECT_LIST);
        };

        match self.store.find_by_id(id) {
            Ok(Some(product)) => {
                model.insert(MODEL_PRODUCT, Value::Product(product));
                Disposition::View(VIEW_FORM)
            }
            Ok(None) => {
                flash.insert(FLASH_ERROR, Value::Text(messages::EDIT_NOT_FOUND));
                Disposition::Redirect(REDIRECT_LIST)
            }
            Err(err) => {
                error!(%err, id, "unexpected failure while loading a product");
                flash.insert(FLASH_ERROR, Value::Text(messages::EDIT_FAILED));
                Disposition::Redirect(REDIRECT_LIST)
            }
        }
    }

    /// Deletes the product with the given id, then redirects to the list.
    pub fn delete(&self, id: Option<i64>, flash: &mut Attributes) -> Disposition {
        let Some(id) = id.filter(|id| *id > 0) else {
            flash.insert(FLASH_ERROR, Value::Text(messages::INVALID_ID));
            return Disposition::Redirect(REDIRECT_LIST);
        };

        match self.store.delete(id) {
            Ok(true) => {
                flash.insert(FLASH_SUCCESS, Value::Text(messages::REMOVED));
            }
            Ok(false) => {
                flash.insert(FLASH_ERROR, Value::Text(messages::DELETE_NOT_FOUND));
            }
            Err(err) => {
                error!(%err, id, "unexpected failure while deleting a product");
                flash.insert(FLASH_ERROR, Value::Text(messages::DELETE_FAILED));
            }
        }
        Disposition::Redirect(REDIRECT_LIST)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::{init_test_tracing, seeded_handler};

    #[test]
    fn list_fills_the_model_and_renders_listar() {
        init_test_tracing();
        let handler = seeded_handler();
        let mut model = Attributes::new();

        let disposition = handler.list(&mut model).unwrap();
        assert_eq!(disposition, Disposition::View(VIEW_LIST));

        let products = model.products(MODEL_PRODUCTS).unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].name.as_deref(), Some("Notebook"));
    }

    #[test]
    fn new_form_renders_form_with_an_empty_product() {
        init_test_tracing();
        let handler = seeded_handler();
        let mut model = Attributes::new();

        let disposition = handler.new_form(&mut model);
        assert_eq!(disposition, Disposition::View(VIEW_FORM));
        assert_eq!(model.product(MODEL_PRODUCT), Some(&Product::default()));
    }

    #[test]
    fn save_success_flashes_and_redirects_to_the_list() {
        init_test_tracing();
        let handler = seeded_handler();
        let mut flash = Attributes::new();

        let disposition = handler.save(Some(Product::new("Monitor", 899.90)), &mut flash);
        assert_eq!(disposition, Disposition::Redirect(REDIRECT_LIST));
        assert_eq!(flash.text(FLASH_SUCCESS), Some(messages::SAVED));
        assert!(flash.text(FLASH_ERROR).is_none());
    }

    #[test]
    fn save_without_a_submission_redirects_back_to_the_form() {
        init_test_tracing();
        let handler = seeded_handler();
        let mut flash = Attributes::new();

        let disposition = handler.save(None, &mut flash);
        assert_eq!(disposition, Disposition::Redirect(REDIRECT_REGISTER));
        assert_eq!(flash.text(FLASH_ERROR), Some(messages::SUBMISSION_MISSING));
        assert!(flash.product(FLASH_PRODUCT).is_none());
    }

    #[test]
    fn save_validation_failure_echoes_the_submission() {
        init_test_tracing();
        let handler = seeded_handler();
        let mut flash = Attributes::new();

        let submitted = Product::new("", 100.0);
        let disposition = handler.save(Some(submitted.clone()), &mut flash);
        assert_eq!(disposition, Disposition::Redirect(REDIRECT_REGISTER));
        assert_eq!(flash.text(FLASH_ERROR), Some(messages::NAME_BLANK));
        assert_eq!(flash.product(FLASH_PRODUCT), Some(&submitted));
    }

    #[test]
    fn save_maps_each_validation_failure_to_its_message() {
        init_test_tracing();
        let handler = seeded_handler();
        let cases: &[(Option<&str>, Option<f64>, &str)] = &[
            (Some(""), Some(100.0), messages::NAME_BLANK),
            (Some("   "), Some(100.0), messages::NAME_BLANK),
            (None, Some(100.0), messages::NAME_MISSING),
            (Some("Produto"), Some(-50.0), messages::PRICE_NEGATIVE),
            (Some("Produto"), Some(-0.01), messages::PRICE_NEGATIVE),
            (Some("Produto"), Some(0.0), messages::PRICE_ZERO),
            (Some("Produto"), None, messages::PRICE_MISSING),
            (Some("Produto"), Some(f64::NAN), messages::INVALID_DATA),
        ];

        for (name, price, expected) in cases {
            let mut flash = Attributes::new();
            let product = Product {
                id: None,
                name: name.map(str::to_string),
                price: *price,
            };
            let disposition = handler.save(Some(product), &mut flash);
            assert_eq!(
                disposition,
                Disposition::Redirect(REDIRECT_REGISTER),
                "case {name:?}/{price:?}"
            );
            assert_eq!(
                flash.text(FLASH_ERROR),
                Some(*expected),
                "case {name:?}/{price:?}"
            );
        }
    }

    #[test]
    fn save_over_the_name_limit_mentions_the_limit() {
        init_test_tracing();
        let handler = seeded_handler();
        let mut flash = Attributes::new();

        handler.save(Some(Product::new("A".repeat(256), 10.0)), &mut flash);
        let message = flash.text(FLASH_ERROR).unwrap();
        assert!(message.contains("255"));
    }

    #[test]
    fn edit_form_loads_the_product_into_the_model() {
        init_test_tracing();
        let handler = seeded_handler();
        let mut model = Attributes::new();
        let mut flash = Attributes::new();

        let disposition = handler.edit_form(Some(1), &mut model, &mut flash);
        assert_eq!(disposition, Disposition::View(VIEW_FORM));
        let product = model.product(MODEL_PRODUCT).unwrap();
        assert_eq!(product.name.as_deref(), Some("Notebook"));
        assert!(flash.is_empty());
    }

    #[test]
    fn edit_form_rejects_absent_and_non_positive_ids() {
        init_test_tracing();
        let handler = seeded_handler();
        for id in [None, Some(0), Some(-3)] {
            let mut model = Attributes::new();
            let mut flash = Attributes::new();
            let disposition = handler.edit_form(id, &mut model, &mut flash);
            assert_eq!(disposition, Disposition::Redirect(REDIRECT_LIST));
            assert_eq!(flash.text(FLASH_ERROR), Some(messages::INVALID_ID));
            assert!(model.is_empty());
        }
    }

    #[test]
    fn edit_form_reports_a_missing_product() {
        init_test_tracing();
        let handler = seeded_handler();
        let mut model = Attributes::new();
        let mut flash = Attributes::new();

        let disposition = handler.edit_form(Some(99_999), &mut model, &mut flash);
        assert_eq!(disposition, Disposition::Redirect(REDIRECT_LIST));
        assert_eq!(flash.text(FLASH_ERROR), Some(messages::EDIT_NOT_FOUND));
    }

    #[test]
    fn delete_success_flashes_and_redirects() {
        init_test_tracing();
        let handler = seeded_handler();
        let mut flash = Attributes::new();

        let disposition = handler.delete(Some(2), &mut flash);
        assert_eq!(disposition, Disposition::Redirect(REDIRECT_LIST));
        assert_eq!(flash.text(FLASH_SUCCESS), Some(messages::REMOVED));
    }

    #[test]
    fn delete_reports_invalid_and_unknown_ids() {
        init_test_tracing();
        let handler = seeded_handler();

        for id in [None, Some(0), Some(-1)] {
            let mut flash = Attributes::new();
            let disposition = handler.delete(id, &mut flash);
            assert_eq!(disposition, Disposition::Redirect(REDIRECT_LIST));
            assert_eq!(flash.text(FLASH_ERROR), Some(messages::INVALID_ID));
        }

        let mut flash = Attributes::new();
        handler.delete(Some(99_999), &mut flash);
        assert_eq!(flash.text(FLASH_ERROR), Some(messages::DELETE_NOT_FOUND));
    }

    #[test]
    fn delete_twice_reports_not_found_the_second_time() {
        init_test_tracing();
        let handler = seeded_handler();

        let mut flash = Attributes::new();
        handler.delete(Some(3), &mut flash);
        assert_eq!(flash.text(FLASH_SUCCESS), Some(messages::REMOVED));

        let mut flash = Attributes::new();
        handler.delete(Some(3), &mut flash);
        assert_eq!(flash.text(FLASH_ERROR), Some(messages::DELETE_NOT_FOUND));
    }

    proptest! {
        // Whatever the submission, save answers with one of its two redirect
        // targets and exactly one of the success/error flashes, never empty.
        #[test]
        fn save_always_answers_from_the_closed_contract(
            name in proptest::option::of(".{0,300}"),
            price in proptest::option::of(proptest::num::f64::ANY),
            absent in proptest::bool::ANY,
        ) {
            let handler = seeded_handler();
            let mut flash = Attributes::new();
            let submission =
                (!absent).then(|| Product { id: None, name, price });

            let disposition = handler.save(submission, &mut flash);
            let target = disposition.redirect_target();
            prop_assert!(
                target == Some(REDIRECT_LIST) || target == Some(REDIRECT_REGISTER)
            );

            let success = flash.text(FLASH_SUCCESS);
            let error = flash.text(FLASH_ERROR);
            prop_assert!(success.is_some() != error.is_some());
            if let Some(message) = success.or(error) {
                prop_assert!(!message.is_empty());
            }
        }
    }
}
