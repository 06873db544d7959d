use crate::{db::DbPool, entities::invoice, errors::ServiceError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Fields of a new invoice row; the id is assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoiceRecord {
    pub client_name: String,
    pub video_title: String,
    pub invoice_amount: Decimal,
    pub invoice_number: String,
    pub date: String,
}

/// Append-only store backing the `invoices` table.
#[derive(Clone)]
pub struct InvoiceRecordStore {
    db_pool: Arc<DbPool>,
}

impl InvoiceRecordStore {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Inserts one row and returns it with its assigned id.
    #[instrument(skip(self, record), fields(invoice_number = %record.invoice_number))]
    pub async fn append(&self, record: NewInvoiceRecord) -> Result<invoice::Model, ServiceError> {
        let amount = record.invoice_amount.to_f64().ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "Invoice amount {} cannot be stored",
                record.invoice_amount
            ))
        })?;

        let model = invoice::ActiveModel {
            client_name: Set(record.client_name),
            video_title: Set(record.video_title),
            invoice_amount: Set(amount),
            invoice_number: Set(record.invoice_number),
            date: Set(record.date),
            ..Default::default()
        };

        let saved = model.insert(&*self.db_pool).await.map_err(|e| {
            error!("Failed to insert invoice record: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        info!(id = saved.id, "invoice record stored");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{establish_connection_with_config, run_migrations, DbConfig};
    use rust_decimal_macros::dec;
    use sea_orm::{EntityTrait, PaginatorTrait};

    async fn store() -> (InvoiceRecordStore, Arc<DbPool>) {
        let pool = establish_connection_with_config(&DbConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        })
        .await
        .unwrap();
        run_migrations(&pool).await.unwrap();
        let pool = Arc::new(pool);
        (InvoiceRecordStore::new(pool.clone()), pool)
    }

    fn record(number: &str) -> NewInvoiceRecord {
        NewInvoiceRecord {
            client_name: "Acme Co".into(),
            video_title: "Intro Video".into(),
            invoice_amount: dec!(150),
            invoice_number: number.into(),
            date: "2024-05-17 14:30:05".into(),
        }
    }

    #[tokio::test]
    async fn append_assigns_increasing_ids() {
        let (store, pool) = store().await;

        let first = store.append(record("20240517143005")).await.unwrap();
        let second = store.append(record("20240517143006")).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.invoice_amount, 150.0);
        assert_eq!(first.video_title, "Intro Video");
        assert_eq!(invoice::Entity::find().count(&*pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn duplicate_invoice_numbers_are_allowed() {
        let (store, pool) = store().await;

        store.append(record("20240517143005")).await.unwrap();
        store.append(record("20240517143005")).await.unwrap();

        let rows = invoice::Entity::find().all(&*pool).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].invoice_number, rows[1].invoice_number);
    }
}
