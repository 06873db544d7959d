use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_invoices_table::Migration)]
    }
}

#[allow(elided_lifetimes_in_paths)]
mod m20240101_000001_create_invoices_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_invoices_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::invoice Model; ids are never reused
            manager
                .create_table(
                    Table::create()
                        .table(Invoices::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Invoices::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Invoices::ClientName).text().not_null())
                        .col(ColumnDef::new(Invoices::VideoTitle).text().not_null())
                        .col(ColumnDef::new(Invoices::InvoiceAmount).double().not_null())
                        .col(ColumnDef::new(Invoices::InvoiceNumber).text().not_null())
                        .col(ColumnDef::new(Invoices::Date).text().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Invoices::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Invoices {
        Table,
        Id,
        ClientName,
        VideoTitle,
        InvoiceAmount,
        InvoiceNumber,
        Date,
    }
}
