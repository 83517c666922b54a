use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: [(&str, Movies); 4] = [
    ("idx_movies_title", Movies::Title),
    ("idx_movies_year", Movies::Year),
    ("idx_movies_rating", Movies::Rating),
    ("idx_movies_featured", Movies::Featured),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, col) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Movies::Table)
                        .col(col)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in INDEXES {
            manager
                .drop_index(Index::drop().name(name).table(Movies::Table).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Clone, Copy, DeriveIden)]
enum Movies {
    Table,
    Title,
    Year,
    Rating,
    Featured,
}
