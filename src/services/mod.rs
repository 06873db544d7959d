pub mod invoices;
pub mod records;

pub use invoices::{GeneratedInvoice, InvoiceService};
pub use records::{InvoiceRecordStore, NewInvoiceRecord};
