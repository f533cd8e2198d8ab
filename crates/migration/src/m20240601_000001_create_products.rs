//! Create `products` table.
//!
//! Identifier is assigned by the database; the remaining columns are replaced
//! wholesale on update.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(table())
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Products::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Products { Table, Id, Name, Price, Description, Category }

pub(crate) fn table() -> TableCreateStatement {
    Table::create()
        .table(Products::Table)
        .if_not_exists()
        .col(pk_auto(Products::Id))
        .col(string(Products::Name).not_null())
        .col(double(Products::Price).not_null())
        .col(text(Products::Description).not_null())
        .col(string(Products::Category).not_null())
        .to_owned()
}
