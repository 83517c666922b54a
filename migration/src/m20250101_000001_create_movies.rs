use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(string(Movies::Id).primary_key())
                    .col(string(Movies::Title))
                    .col(integer(Movies::Year))
                    .col(double(Movies::Rating))
                    // JSON array of genre names
                    .col(text(Movies::Genre))
                    .col(string(Movies::Director))
                    .col(string(Movies::Duration))
                    .col(text(Movies::Poster))
                    .col(text(Movies::Backdrop))
                    .col(text(Movies::Plot))
                    // JSON array of cast names
                    .col(text(Movies::Cast))
                    .col(boolean(Movies::Featured).default(false))
                    .col(big_integer(Movies::CreatedAt))
                    .col(big_integer(Movies::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    Year,
    Rating,
    Genre,
    Director,
    Duration,
    Poster,
    Backdrop,
    Plot,
    Cast,
    Featured,
    CreatedAt,
    UpdatedAt,
}
