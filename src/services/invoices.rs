use crate::{
    clock::Clock,
    entities::invoice,
    errors::ServiceError,
    models::InvoiceRequest,
    rendering::{InvoiceRenderer, RenderedInvoice},
    services::records::{InvoiceRecordStore, NewInvoiceRecord},
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Result of one generation: the stored row plus where the document lives.
#[derive(Debug, Clone)]
pub struct GeneratedInvoice {
    pub record: invoice::Model,
    pub document: RenderedInvoice,
}

/// Renders an invoice, then records it.
///
/// The file write and the row insert are not transactional: a failed insert
/// leaves the freshly written document on disk without a row.
#[derive(Clone)]
pub struct InvoiceService {
    renderer: InvoiceRenderer,
    records: InvoiceRecordStore,
    clock: Arc<dyn Clock>,
}

impl InvoiceService {
    pub fn new(renderer: InvoiceRenderer, records: InvoiceRecordStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            renderer,
            records,
            clock,
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    #[instrument(skip(self, request))]
    pub async fn generate(&self, request: InvoiceRequest) -> Result<GeneratedInvoice, ServiceError> {
        let generated_at = self.clock.now();
        let document = self.renderer.render(&request, generated_at).await?;

        let record = self
            .records
            .append(NewInvoiceRecord {
                client_name: request.client_name,
                video_title: request.video_title,
                invoice_amount: request.invoice_amount,
                invoice_number: document.invoice_number.clone(),
                date: document.date.clone(),
            })
            .await?;

        info!(
            id = record.id,
            invoice_number = %record.invoice_number,
            "invoice generated"
        );

        Ok(GeneratedInvoice { record, document })
    }
}
