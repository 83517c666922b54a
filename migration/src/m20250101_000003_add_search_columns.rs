use sea_orm_migration::{
    prelude::*,
    schema::*,
    sea_orm::{ConnectionTrait, Statement},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite takes one column per ALTER TABLE
        for col in [Movies::TitleFolded, Movies::DirectorFolded] {
            manager
                .alter_table(
                    Table::alter()
                        .table(Movies::Table)
                        .add_column(string(col).default(""))
                        .to_owned(),
                )
                .await?;
        }

        // SQLite lower() only folds ASCII, so existing rows are folded here
        let db = manager.get_connection();
        let backend = manager.get_database_backend();
        let rows = db
            .query_all(Statement::from_string(
                backend,
                r#"SELECT "id", "title", "director" FROM "movies""#,
            ))
            .await?;

        for row in rows {
            let id: String = row.try_get("", "id")?;
            let title: String = row.try_get("", "title")?;
            let director: String = row.try_get("", "director")?;
            db.execute(Statement::from_sql_and_values(
                backend,
                r#"UPDATE "movies" SET "title_folded" = ?, "director_folded" = ? WHERE "id" = ?"#,
                [title.to_lowercase().into(), director.to_lowercase().into(), id.into()],
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for col in [Movies::TitleFolded, Movies::DirectorFolded] {
            manager
                .alter_table(Table::alter().table(Movies::Table).drop_column(col).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Clone, Copy, DeriveIden)]
enum Movies {
    Table,
    TitleFolded,
    DirectorFolded,
}
