use axum::response::Html;

const FORM_PAGE: &str = include_str!("form.html");

/// The single-page form: client name, video title, amount and one submit button.
pub async fn invoice_form() -> Html<&'static str> {
    Html(FORM_PAGE)
}
