//! The closed set of user-visible messages.
//!
//! Everything the application ever says to a user lives here, and
//! [`user_message`] is the only path from a validation failure to a flash
//! message. Internal error text (the `Display` impls in
//! [`crate::errors`]) goes to the log, never to a sink.

use crate::errors::InvalidField;

/// Success flash after a save.
pub const SAVED: &str = "Produto salvo com sucesso!";
/// Success flash after a delete.
pub const REMOVED: &str = "Produto removido do estoque com sucesso!";

/// The submission carried no product data at all.
pub const SUBMISSION_MISSING: &str =
    "Dados do produto inválidos. Por favor, preencha todos os campos.";
/// A path id that is absent, non-numeric, or not positive.
pub const INVALID_ID: &str = "ID do produto inválido.";
/// Edit target no longer exists.
pub const EDIT_NOT_FOUND: &str = "Produto não encontrado. Ele pode ter sido removido.";
/// Delete target no longer exists.
pub const DELETE_NOT_FOUND: &str =
    "Produto não encontrado. Ele pode ter sido removido anteriormente.";

/// Unexpected failure while saving.
pub const SAVE_FAILED: &str = "Erro ao processar a solicitação. Por favor, tente novamente.";
/// Unexpected failure while loading the edit form.
pub const EDIT_FAILED: &str = "Erro ao carregar o produto. Tente novamente.";
/// Unexpected failure while deleting.
pub const DELETE_FAILED: &str = "Erro ao remover o produto. Tente novamente.";

/// Blank or whitespace-only name.
pub const NAME_BLANK: &str =
    "Nome do produto é obrigatório. Por favor, insira um nome válido.";
/// Name absent from the submission.
pub const NAME_MISSING: &str = "Nome do produto é obrigatório.";
/// Name over the length limit.
pub const NAME_TOO_LONG: &str = "Nome do produto muito longo. Use no máximo 255 caracteres.";
/// Negative price.
pub const PRICE_NEGATIVE: &str =
    "Preço deve ser um valor positivo. Por favor, insira um preço maior que zero.";
/// Zero price.
pub const PRICE_ZERO: &str = "Preço deve ser maior que zero.";
/// Price absent from the submission.
pub const PRICE_MISSING: &str = "Preço é obrigatório. Por favor, insira um valor.";
/// Fallback for validation failures without a dedicated row.
pub const INVALID_DATA: &str = "Dados inválidos. Por favor, verifique e tente novamente.";

/// Maps a validation failure to its user-safe message.
///
/// Total over [`InvalidField`]: every variant yields a fixed, non-empty
/// string, and the raw internal error text is never exposed. Reasons without
/// a dedicated row (a non-finite price) fall back to [`INVALID_DATA`].
#[must_use]
pub const fn user_message(invalid: &InvalidField) -> &'static str {
    match invalid {
        InvalidField::NameMissing => NAME_MISSING,
        InvalidField::NameBlank => NAME_BLANK,
        InvalidField::NameTooLong { .. } => NAME_TOO_LONG,
        InvalidField::PriceMissing => PRICE_MISSING,
        InvalidField::PriceNegative => PRICE_NEGATIVE,
        InvalidField::PriceZero => PRICE_ZERO,
        InvalidField::PriceNotFinite => INVALID_DATA,
    }
}
