use crate::{
    download::{download_filename, ChunkedFile},
    errors::ServiceError,
    handlers::extract::FormBody,
    models::{InvoiceForm, InvoiceRequest},
    AppState,
};
use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;

/// Generates an invoice from the submitted form and streams the PDF back.
///
/// The download name is stamped when the response is built, which can be a
/// second or more after the invoice number was taken.
pub async fn generate_invoice(
    State(state): State<AppState>,
    FormBody(form): FormBody<InvoiceForm>,
) -> Result<Response, ServiceError> {
    let request = InvoiceRequest::try_from(form)?;
    let generated = state.invoices.generate(request).await?;

    let file = ChunkedFile::new(&generated.document.path, state.config.download_chunk_size);
    let chunks = file.open().await?;
    let filename = download_filename(state.invoices.clock().now());

    info!(
        invoice_number = %generated.record.invoice_number,
        filename = %filename,
        "streaming invoice download"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from_stream(chunks),
    )
        .into_response())
}
