use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Investors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Investors::Id)
                            .integer() // Corresponds to i32
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // Dedup key of the ledger
                    .col(ColumnDef::new(Investors::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Investors::Type).string().not_null())
                    .col(ColumnDef::new(Investors::Country).string().not_null())
                    .col(ColumnDef::new(Investors::DateAdded).string().not_null())
                    .col(ColumnDef::new(Investors::LastUpdated).string().not_null())
                    // Money is kept as decimal text so it reads back exactly
                    .col(
                        ColumnDef::new(Investors::TotalCommitment)
                            .text()
                            .not_null()
                            .default("0"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Investors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Investors {
    Table,
    Id,
    Name,
    Type,
    Country,
    DateAdded,
    LastUpdated,
    TotalCommitment,
}
