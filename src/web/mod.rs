//! HTTP layer - routes, binding, and the redirect/flash contract.
//!
//! A thin axum host over [`crate::handler::RequestHandler`]. Binding is
//! deliberately lenient: form fields and path ids arrive as optional raw
//! strings and parse leniently, so malformed input lands on the core
//! handler's message contract instead of a framework error page. Redirects
//! are plain 302s; flash attributes ride a one-shot server-side store keyed
//! by an HttpOnly cookie.

/// One-shot flash attribute storage
pub mod flash;
/// Minimal HTML page rendering
pub mod render;

use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use tracing::{debug, error};

use crate::handler::{
    Attributes, Disposition, FLASH_ERROR, FLASH_PRODUCT, FLASH_SUCCESS, MODEL_PRODUCT,
    MODEL_PRODUCTS, REDIRECT_LIST, RequestHandler,
};
use crate::model::Product;

use self::flash::{FLASH_COOKIE, FlashStore};

/// Shared state for all route handlers.
#[derive(Clone)]
pub struct AppState {
    handler: RequestHandler,
    flash: Arc<FlashStore>,
}

impl AppState {
    /// Creates the state for a router.
    #[must_use]
    pub fn new(handler: RequestHandler) -> Self {
        Self {
            handler,
            flash: Arc::new(FlashStore::new()),
        }
    }
}

/// Builds the application router with the five catalog routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/produtos/listar", get(list_products))
        .route("/produtos/cadastrar", get(register_form))
        .route("/produtos/salvar", post(save_product))
        .route("/produtos/editar/{id}", get(edit_product_form))
        .route("/produtos/excluir/{id}", get(delete_product))
        .with_state(state)
}

/// The save form as submitted by the browser. Everything is an optional raw
/// string; parsing happens in [`SaveForm::into_product`].
#[derive(Debug, Deserialize)]
struct SaveForm {
    id: Option<String>,
    nome: Option<String>,
    preco: Option<String>,
}

impl SaveForm {
    fn into_product(self) -> Product {
        Product {
            id: parse_number(self.id.as_deref()),
            name: self.nome,
            price: parse_number(self.preco.as_deref()),
        }
    }
}

/// Lenient numeric field parsing: empty, whitespace-only, or unparsable
/// values read as absent.
fn parse_number<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

async fn list_products(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, flash) = consume_flash(&state, jar);
    let mut model = Attributes::new();
    match state.handler.list(&mut model) {
        Ok(_) => {
            let products = model.products(MODEL_PRODUCTS).unwrap_or(&[]);
            let body = render::list_page(
                products,
                flash.text(FLASH_SUCCESS),
                flash.text(FLASH_ERROR),
            );
            (jar, Html(body)).into_response()
        }
        Err(err) => {
            error!(%err, "failed to list products");
            (jar, StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
    }
}

async fn register_form(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, flash) = consume_flash(&state, jar);
    let mut model = Attributes::new();
    state.handler.new_form(&mut model);

    // A flashed submission wins over the empty form model so the user sees
    // what they typed alongside the error banner.
    let empty = Product::default();
    let product = flash
        .product(FLASH_PRODUCT)
        .or_else(|| model.product(MODEL_PRODUCT))
        .unwrap_or(&empty);
    let body = render::form_page(product, flash.text(FLASH_ERROR));
    (jar, Html(body)).into_response()
}

async fn save_product(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<SaveForm>, FormRejection>,
) -> Response {
    let (jar, _stale) = consume_flash(&state, jar);
    let submission = match form {
        Ok(Form(form)) => Some(form.into_product()),
        Err(rejection) => {
            debug!(%rejection, "unreadable save submission");
            None
        }
    };

    let mut flash = Attributes::new();
    let disposition = state.handler.save(submission, &mut flash);
    redirect_with_flash(&state, jar, &disposition, flash)
}

async fn edit_product_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    jar: CookieJar,
) -> Response {
    let (jar, _stale) = consume_flash(&state, jar);
    let mut model = Attributes::new();
    let mut flash = Attributes::new();
    let disposition = state
        .handler
        .edit_form(parse_number(Some(raw_id.as_str())), &mut model, &mut flash);

    match disposition {
        Disposition::View(_) => {
            let fallback = Product::default();
            let product = model.product(MODEL_PRODUCT).unwrap_or(&fallback);
            let body = render::form_page(product, None);
            (jar, Html(body)).into_response()
        }
        Disposition::Redirect(_) => redirect_with_flash(&state, jar, &disposition, flash),
    }
}

async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    jar: CookieJar,
) -> Response {
    let (jar, _stale) = consume_flash(&state, jar);
    let mut flash = Attributes::new();
    let disposition = state
        .handler
        .delete(parse_number(Some(raw_id.as_str())), &mut flash);
    redirect_with_flash(&state, jar, &disposition, flash)
}

/// Consumes any pending flash attributes referenced by the request's cookie
/// and drops the cookie from the jar.
fn consume_flash(state: &AppState, jar: CookieJar) -> (CookieJar, Attributes) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, Attributes::new());
    };
    let token = cookie.value().parse::<u64>().ok();

    let mut removal = Cookie::from(FLASH_COOKIE);
    removal.set_path("/");
    let jar = jar.remove(removal);

    let attributes = token
        .and_then(|token| match state.flash.take(token) {
            Ok(attributes) => attributes,
            Err(err) => {
                error!(%err, "failed to consume flash attributes");
                None
            }
        })
        .unwrap_or_default();
    (jar, attributes)
}

/// Answers with a 302 to the disposition's target, stashing any flash
/// attributes and pointing the cookie at them.
fn redirect_with_flash(
    state: &AppState,
    jar: CookieJar,
    disposition: &Disposition,
    attributes: Attributes,
) -> Response {
    let target = disposition.redirect_target().unwrap_or(REDIRECT_LIST);
    let jar = if attributes.is_empty() {
        jar
    } else {
        match state.flash.stash(attributes) {
            Ok(token) => {
                let mut cookie = Cookie::new(FLASH_COOKIE, token.to_string());
                cookie.set_path("/");
                cookie.set_http_only(true);
                jar.add(cookie)
            }
            Err(err) => {
                error!(%err, "failed to stash flash attributes");
                jar
            }
        }
    };
    (StatusCode::FOUND, jar, [(header::LOCATION, target)], ()).into_response()
}
