//! Invoice renderer: lays out the fixed one-page invoice and writes it to disk.

pub mod fonts;
pub mod layout;

use crate::clock::{compact_timestamp, display_timestamp};
use crate::errors::ServiceError;
use crate::models::InvoiceRequest;
use chrono::NaiveDateTime;
use layout::{Cell, PageWriter};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Name of the single output file; every generation overwrites it.
pub const INVOICE_FILE_NAME: &str = "invoice.pdf";

pub const ISSUER: &str = "Majestic Coding Consultations LLC";
pub const PAYMENT_TERMS_DAYS: u32 = 60;

const FULL_WIDTH: f64 = 200.0;
const DESCRIPTION_WIDTH: f64 = 100.0;
const AMOUNT_WIDTH: f64 = 50.0;
const ROW_HEIGHT: f64 = 10.0;
const BODY_FONT_SIZE: f64 = 12.0;
const TABLE_FONT_SIZE: f64 = 10.0;

/// Everything printed on the page, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceContent {
    pub invoice_number: String,
    pub date: String,
    pub client_name: String,
    pub item_title: String,
    pub amount: String,
}

impl InvoiceContent {
    /// Derives the invoice number and date from a single instant.
    pub fn new(request: &InvoiceRequest, generated_at: NaiveDateTime) -> Self {
        Self {
            invoice_number: compact_timestamp(generated_at),
            date: display_timestamp(generated_at),
            client_name: request.client_name.clone(),
            item_title: request.video_title.clone(),
            amount: format_amount(request),
        }
    }

    pub fn header(&self) -> String {
        format!("Invoice from {}", ISSUER)
    }

    pub fn payment_terms(&self) -> String {
        format!(
            "Invoice is to be paid to {} within {} days.",
            ISSUER, PAYMENT_TERMS_DAYS
        )
    }

    fn lay_out(&self) -> PageWriter {
        let mut page = PageWriter::new();
        page.set_font_size(BODY_FONT_SIZE);

        let header = self.header();
        page.cell(Cell::new(FULL_WIDTH, ROW_HEIGHT, &header).centered().line_break());

        let number = format!("Invoice Number: {}", self.invoice_number);
        let date = format!("Date: {}", self.date);
        let client = format!("Client Name: {}", self.client_name);
        for line in [&number, &date, &client] {
            page.cell(Cell::new(FULL_WIDTH, ROW_HEIGHT, line).line_break());
        }

        page.ln(ROW_HEIGHT);

        page.set_font_size(TABLE_FONT_SIZE);
        page.cell(Cell::new(DESCRIPTION_WIDTH, ROW_HEIGHT, "Video Title").bordered());
        page.cell(
            Cell::new(AMOUNT_WIDTH, ROW_HEIGHT, "Invoice Amount")
                .bordered()
                .line_break(),
        );
        page.cell(Cell::new(DESCRIPTION_WIDTH, ROW_HEIGHT, &self.item_title).bordered());
        page.cell(
            Cell::new(AMOUNT_WIDTH, ROW_HEIGHT, &self.amount)
                .bordered()
                .line_break(),
        );

        page.ln(ROW_HEIGHT);

        page.set_font_size(BODY_FONT_SIZE);
        page.cell(Cell::new(DESCRIPTION_WIDTH, ROW_HEIGHT, "Total").bordered());
        page.cell(
            Cell::new(AMOUNT_WIDTH, ROW_HEIGHT, &self.amount)
                .bordered()
                .line_break(),
        );

        page.ln(ROW_HEIGHT);

        let terms = self.payment_terms();
        page.cell(Cell::new(FULL_WIDTH, ROW_HEIGHT, &terms).line_break());

        page
    }

    /// Produces the complete PDF file in memory.
    pub fn to_pdf(&self) -> Result<Vec<u8>, ServiceError> {
        Ok(layout::build_document(self.lay_out())?)
    }
}

/// `$` followed by the amount exactly as entered, e.g. `$150`, `$0`, `$12.50`.
pub fn format_amount(request: &InvoiceRequest) -> String {
    format!("${}", request.invoice_amount)
}

/// What a render hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedInvoice {
    pub path: PathBuf,
    pub invoice_number: String,
    pub date: String,
}

/// Writes invoices to one fixed path.
#[derive(Debug, Clone)]
pub struct InvoiceRenderer {
    output_path: PathBuf,
}

impl InvoiceRenderer {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    /// Renders the invoice and overwrites the output file with it.
    #[instrument(skip(self, request), fields(path = %self.output_path.display()))]
    pub async fn render(
        &self,
        request: &InvoiceRequest,
        generated_at: NaiveDateTime,
    ) -> Result<RenderedInvoice, ServiceError> {
        let content = InvoiceContent::new(request, generated_at);
        let bytes = content.to_pdf()?;

        tokio::fs::write(&self.output_path, &bytes).await?;
        debug!(
            invoice_number = %content.invoice_number,
            bytes = bytes.len(),
            "invoice written"
        );

        Ok(RenderedInvoice {
            path: self.output_path.clone(),
            invoice_number: content.invoice_number,
            date: content.date,
        })
    }
}
