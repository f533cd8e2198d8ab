//! Create `users` table.
//!
//! Local mirror of identities issued by the identity provider; the primary key
//! is the provider's uid, never generated here.
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
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users { Table, Id, Name, Email, Role }

pub(crate) fn table() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(string_len(Users::Id, 128).primary_key())
        .col(string(Users::Name).not_null())
        .col(string(Users::Email).not_null())
        .col(string(Users::Role).not_null())
        .to_owned()
}
