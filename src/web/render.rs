//! Minimal server-side HTML rendering.
//!
//! The pages are deliberately plain (the views are peripheral to this demo);
//! what matters is that every piece of user-originated data is escaped
//! before it is interpolated into markup.

use std::fmt::Write as _;

use crate::model::Product;

/// Escapes text for safe interpolation into HTML element and attribute
/// content.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn flash_banners(success: Option<&str>, error: Option<&str>) -> String {
    let mut banners = String::new();
    if let Some(message) = success {
        let _ = write!(
            banners,
            r#"<div class="alerta sucesso">{}</div>"#,
            escape_html(message)
        );
    }
    if let Some(message) = error {
        let _ = write!(
            banners,
            r#"<div class="alerta erro">{}</div>"#,
            escape_html(message)
        );
    }
    banners
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

/// Renders the product list view (`listar`).
#[must_use]
pub fn list_page(products: &[Product], success: Option<&str>, error: Option<&str>) -> String {
    let mut rows = String::new();
    for product in products {
        let id = product.id.unwrap_or_default();
        let name = escape_html(product.name.as_deref().unwrap_or(""));
        let price = product.price.unwrap_or_default();
        let _ = write!(
            rows,
            "<tr><td>{id}</td><td>{name}</td><td>R$ {price:.2}</td>\
             <td><a href=\"/produtos/editar/{id}\">Editar</a> \
             <a href=\"/produtos/excluir/{id}\">Excluir</a></td></tr>\n"
        );
    }

    let body = format!(
        "<h1>Lista de Produtos</h1>\n{banners}\
         <table>\n<thead><tr><th>ID</th><th>Nome</th><th>Pre\u{e7}o</th><th>A\u{e7}\u{f5}es</th></tr></thead>\n\
         <tbody>\n{rows}</tbody>\n</table>\n\
         <p><a href=\"/produtos/cadastrar\">Cadastrar Novo Produto</a></p>",
        banners = flash_banners(success, error),
    );
    page("Lista de Produtos", &body)
}

/// Renders the registration/edit form view (`form`).
#[must_use]
pub fn form_page(product: &Product, error: Option<&str>) -> String {
    let id_field = product.id.map_or(String::new(), |id| {
        format!("<input type=\"hidden\" name=\"id\" value=\"{id}\">\n")
    });
    let name = escape_html(product.name.as_deref().unwrap_or(""));
    let price = product
        .price
        .map_or(String::new(), |price| price.to_string());

    let body = format!(
        "<h1>Cadastro de Produto</h1>\n{banners}\
         <form action=\"/produtos/salvar\" method=\"post\">\n{id_field}\
         <label>Nome: <input type=\"text\" name=\"nome\" value=\"{name}\"></label>\n\
         <label>Pre\u{e7}o: <input type=\"text\" name=\"preco\" value=\"{price}\"></label>\n\
         <button type=\"submit\">Salvar</button>\n</form>\n\
         <p><a href=\"/produtos/listar\">Voltar</a></p>",
        banners = flash_banners(None, error),
    );
    page("Cadastro de Produto", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html("<script>alert('XSS')</script>"),
            "&lt;script&gt;alert(&#39;XSS&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html(r#"a"b&c"#), "a&quot;b&amp;c");
        assert_eq!(escape_html("Teclado"), "Teclado");
    }

    #[test]
    fn list_page_escapes_product_names() {
        let products = vec![Product::with_id(1, "<b>Notebook</b>", 3000.0)];
        let html = list_page(&products, None, None);
        assert!(html.contains("&lt;b&gt;Notebook&lt;/b&gt;"));
        assert!(!html.contains("<b>Notebook</b>"));
        assert!(html.contains("/produtos/editar/1"));
        assert!(html.contains("/produtos/excluir/1"));
    }

    #[test]
    fn list_page_shows_flash_banners() {
        let html = list_page(&[], Some("Produto salvo com sucesso!"), None);
        assert!(html.contains("Produto salvo com sucesso!"));
    }

    #[test]
    fn form_page_repopulates_submitted_values() {
        let product = Product::new("Monitor \"4K\"", 899.90);
        let html = form_page(&product, Some("mensagem"));
        assert!(html.contains("Monitor &quot;4K&quot;"));
        assert!(html.contains("899.9"));
        assert!(html.contains("mensagem"));
        // Detached product renders no hidden id field
        assert!(!html.contains("name=\"id\""));
    }

    #[test]
    fn form_page_carries_the_id_for_updates() {
        let product = Product::with_id(2, "Mouse", 50.0);
        let html = form_page(&product, None);
        assert!(html.contains("<input type=\"hidden\" name=\"id\" value=\"2\">"));
    }
}
