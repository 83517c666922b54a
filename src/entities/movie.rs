use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    #[sea_orm(column_type = "Text")]
    pub genre: String, // JSON array of genre names
    pub director: String,
    pub duration: String,
    #[sea_orm(column_type = "Text")]
    pub poster: String,
    #[sea_orm(column_type = "Text")]
    pub backdrop: String,
    #[sea_orm(column_type = "Text")]
    pub plot: String,
    #[sea_orm(column_type = "Text")]
    pub cast: String, // JSON array of cast names
    pub featured: bool,
    pub created_at: i64,
    pub updated_at: i64,
    // lowercased copies of title and director, matched by search
    pub title_folded: String,
    pub director_folded: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
