use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Biography,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Family,
    Fantasy,
    History,
    Horror,
    Music,
    Mystery,
    Romance,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Sport,
    Thriller,
    War,
    Western,
}

impl Genre {
    pub const ALL: [Genre; 20] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Biography,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Family,
        Genre::Fantasy,
        Genre::History,
        Genre::Horror,
        Genre::Music,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::Sport,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Biography => "Biography",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Family => "Family",
            Genre::Fantasy => "Fantasy",
            Genre::History => "History",
            Genre::Horror => "Horror",
            Genre::Music => "Music",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Sport => "Sport",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Invalid genre: {s}")))
    }
}

/// Fields a listing can be ordered by. Anything else is rejected rather
/// than forwarded to the store.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortField {
    #[default]
    Rating,
    Year,
    Title,
    Featured,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortField {
    /// Titles read alphabetically; everything else ranks high-to-low.
    pub fn natural_order(self) -> SortOrder {
        match self {
            SortField::Title => SortOrder::Ascending,
            SortField::Rating | SortField::Year | SortField::Featured => SortOrder::Descending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Rating => "rating",
            SortField::Year => "year",
            SortField::Title => "title",
            SortField::Featured => "featured",
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rating" => Ok(SortField::Rating),
            "year" => Ok(SortField::Year),
            "title" => Ok(SortField::Title),
            "featured" => Ok(SortField::Featured),
            other => Err(AppError::validation(format!(
                "Invalid sortBy: {other} (expected rating, year, title or featured)"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub genre: Vec<Genre>,
    pub director: String,
    pub duration: String,
    pub poster: String,
    pub backdrop: String,
    pub plot: String,
    pub cast: Vec<String>,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<movie::Model> for Movie {
    type Error = AppError;

    fn try_from(row: movie::Model) -> AppResult<Self> {
        Ok(Self {
            genre: serde_json::from_str(&row.genre)?,
            cast: serde_json::from_str(&row.cast)?,
            created_at: Timestamp::from_millisecond(row.created_at)?,
            updated_at: Timestamp::from_millisecond(row.updated_at)?,
            id: row.id,
            title: row.title,
            year: row.year,
            rating: row.rating,
            director: row.director,
            duration: row.duration,
            poster: row.poster,
            backdrop: row.backdrop,
            plot: row.plot,
            featured: row.featured,
        })
    }
}

/// Payload for creating a movie. The id and timestamps are assigned by the
/// store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub genre: Vec<Genre>,
    pub director: String,
    pub duration: String,
    pub poster: String,
    pub backdrop: String,
    pub plot: String,
    pub cast: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

impl NewMovie {
    pub fn validate(&self) -> AppResult<()> {
        check_title(&self.title)?;
        check_year(self.year)?;
        check_rating(self.rating)?;
        check_genre(&self.genre)?;
        check_director(&self.director)?;
        check_duration(&self.duration)?;
        check_len("poster", &self.poster, 1, None)?;
        check_len("backdrop", &self.backdrop, 1, None)?;
        check_plot(&self.plot)?;
        check_cast(&self.cast)?;
        Ok(())
    }
}

/// Partial update. Only the fields present are changed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre: Option<Vec<Genre>>,
    pub director: Option<String>,
    pub duration: Option<String>,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub plot: Option<String>,
    pub cast: Option<Vec<String>>,
    pub featured: Option<bool>,
}

impl MoviePatch {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(year) = self.year {
            check_year(year)?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
        }
        if let Some(genre) = &self.genre {
            check_genre(genre)?;
        }
        if let Some(director) = &self.director {
            check_director(director)?;
        }
        if let Some(duration) = &self.duration {
            check_duration(duration)?;
        }
        if let Some(poster) = &self.poster {
            check_len("poster", poster, 1, None)?;
        }
        if let Some(backdrop) = &self.backdrop {
            check_len("backdrop", backdrop, 1, None)?;
        }
        if let Some(plot) = &self.plot {
            check_plot(plot)?;
        }
        if let Some(cast) = &self.cast {
            check_cast(cast)?;
        }
        Ok(())
    }
}

fn check_len(field: &str, value: &str, min: usize, max: Option<usize>) -> AppResult<()> {
    let len = value.chars().count();
    if len < min {
        return Err(AppError::validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if let Some(max) = max.filter(|max| len > *max) {
        return Err(AppError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn check_title(title: &str) -> AppResult<()> {
    check_len("title", title, 1, Some(200))
}

fn check_director(director: &str) -> AppResult<()> {
    check_len("director", director, 1, Some(100))
}

fn check_duration(duration: &str) -> AppResult<()> {
    check_len("duration", duration, 1, Some(20))
}

fn check_plot(plot: &str) -> AppResult<()> {
    check_len("plot", plot, 10, Some(1000))
}

fn check_year(year: i32) -> AppResult<()> {
    if !(1800..=2030).contains(&year) {
        return Err(AppError::validation("year must be between 1800 and 2030"));
    }
    Ok(())
}

fn check_rating(rating: f64) -> AppResult<()> {
    if !(0.0..=10.0).contains(&rating) {
        return Err(AppError::validation("rating must be between 0.0 and 10.0"));
    }
    Ok(())
}

fn check_genre(genre: &[Genre]) -> AppResult<()> {
    if genre.is_empty() {
        return Err(AppError::validation("genre must contain at least one entry"));
    }
    Ok(())
}

fn check_cast(cast: &[String]) -> AppResult<()> {
    if cast.is_empty() {
        return Err(AppError::validation("cast must contain at least one entry"));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub genre: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopRatedParams {
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub movies: Vec<Movie>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub movies: Vec<Movie>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub movies: Vec<Movie>,
}

#[derive(Debug, Serialize)]
pub struct GenresResponse {
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewMovie {
        NewMovie {
            title: "Heat".to_string(),
            year: 1995,
            rating: 8.3,
            genre: vec![Genre::Action, Genre::Crime],
            director: "Michael Mann".to_string(),
            duration: "170 min".to_string(),
            poster: "https://example.com/heat.jpg".to_string(),
            backdrop: "https://example.com/heat-wide.jpg".to_string(),
            plot: "A group of professional bank robbers start to feel the heat from police.".to_string(),
            cast: vec!["Al Pacino".to_string(), "Robert De Niro".to_string()],
            featured: false,
        }
    }

    #[test]
    fn genre_round_trips_through_its_display_name() {
        for genre in Genre::ALL {
            assert_eq!(genre.as_str().parse::<Genre>().unwrap(), genre);
        }
        assert_eq!(serde_json::to_string(&Genre::SciFi).unwrap(), "\"Sci-Fi\"");
        assert!("Noir".parse::<Genre>().is_err());
    }

    #[test]
    fn unknown_genre_fails_to_deserialize() {
        let err = serde_json::from_str::<Vec<Genre>>(r#"["Drama","Noir"]"#).unwrap_err();
        assert!(err.to_string().contains("Noir"));
    }

    #[test]
    fn sort_field_direction() {
        assert_eq!(SortField::Title.natural_order(), SortOrder::Ascending);
        for field in [SortField::Rating, SortField::Year, SortField::Featured] {
            assert_eq!(field.natural_order(), SortOrder::Descending);
        }
    }

    #[test]
    fn sort_field_rejects_unlisted_columns() {
        assert_eq!("year".parse::<SortField>().unwrap(), SortField::Year);
        assert!(matches!("plot".parse::<SortField>(), Err(AppError::Validation(_))));
        assert!("Rating".parse::<SortField>().is_err());
    }

    #[test]
    fn valid_movie_passes() {
        assert!(sample().validate().is_ok());
    }

    fn assert_rejected(field: &str, mutate: impl FnOnce(&mut NewMovie)) {
        let mut movie = sample();
        mutate(&mut movie);
        match movie.validate() {
            Err(AppError::Validation(msg)) => assert!(msg.starts_with(field), "{msg}"),
            other => panic!("expected {field} validation error, got {other:?}"),
        }
    }

    #[test]
    fn movie_bounds_are_enforced() {
        assert_rejected("title", |m| m.title = String::new());
        assert_rejected("title", |m| m.title = "x".repeat(201));
        assert_rejected("year", |m| m.year = 1799);
        assert_rejected("year", |m| m.year = 2031);
        assert_rejected("rating", |m| m.rating = 10.5);
        assert_rejected("rating", |m| m.rating = -0.1);
        assert_rejected("genre", |m| m.genre.clear());
        assert_rejected("director", |m| m.director = "d".repeat(101));
        assert_rejected("duration", |m| m.duration = "9".repeat(21));
        assert_rejected("poster", |m| m.poster.clear());
        assert_rejected("plot", |m| m.plot = "too short".to_string());
        assert_rejected("cast", |m| m.cast.clear());
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let mut movie = sample();
        movie.title = "é".repeat(200);
        assert!(movie.validate().is_ok());
    }

    #[test]
    fn patch_only_checks_present_fields() {
        assert!(MoviePatch::default().validate().is_ok());

        let patch = MoviePatch { rating: Some(11.0), ..Default::default() };
        assert!(matches!(patch.validate(), Err(AppError::Validation(_))));

        let patch = MoviePatch { plot: Some("short".to_string()), ..Default::default() };
        assert!(patch.validate().is_err());
    }
}
