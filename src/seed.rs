use tracing::info;

use crate::{
    error::AppResult,
    models::{Genre, NewMovie},
    store::{MovieFilter, MovieStore},
};

/// Inserts the starter catalog when the collection is empty. Returns a
/// human-readable summary of what happened.
pub async fn seed_if_empty(store: &MovieStore) -> AppResult<String> {
    let existing = store.count(&MovieFilter::default()).await?;
    if existing > 0 {
        info!(existing = existing, "skipping seed");
        return Ok(format!("Database already contains {existing} movies"));
    }

    let inserted = store.insert_many(starter_movies()).await?;
    info!(inserted = inserted, "seeded movie catalog");
    Ok(format!("Successfully seeded database with {inserted} movies"))
}

pub fn starter_movies() -> Vec<(String, NewMovie)> {
    use Genre::*;

    vec![
        entry(
            "1",
            "The Shawshank Redemption",
            1994,
            9.3,
            &[Drama],
            "Frank Darabont",
            "142 min",
            "photo-1489599833883-0a2c073c5fd4",
            "photo-1574375927938-d5a98e8ffe85",
            "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.",
            &["Tim Robbins", "Morgan Freeman", "Bob Gunton", "William Sadler"],
            true,
        ),
        entry(
            "2",
            "The Godfather",
            1972,
            9.2,
            &[Crime, Drama],
            "Francis Ford Coppola",
            "175 min",
            "photo-1440404653325-ab127d49abc1",
            "photo-1507003211169-0a1dd7228f2d",
            "The aging patriarch of an organized crime dynasty transfers control of his clandestine empire to his reluctant son.",
            &["Marlon Brando", "Al Pacino", "James Caan", "Robert Duvall"],
            true,
        ),
        entry(
            "3",
            "The Dark Knight",
            2008,
            9.0,
            &[Action, Crime, Drama],
            "Christopher Nolan",
            "152 min",
            "photo-1626814026160-2237a95fc5a0",
            "photo-1518709268805-4e9042af2176",
            "When the menace known as the Joker wreaks havoc and chaos on the people of Gotham, Batman must accept one of the greatest psychological and physical tests.",
            &["Christian Bale", "Heath Ledger", "Aaron Eckhart", "Michael Caine"],
            true,
        ),
        entry(
            "4",
            "Pulp Fiction",
            1994,
            8.9,
            &[Crime, Drama],
            "Quentin Tarantino",
            "154 min",
            "photo-1489599833883-0a2c073c5fd4",
            "photo-1485846234645-a62644f84728",
            "The lives of two mob hitmen, a boxer, a gangster and his wife intertwine in four tales of violence and redemption.",
            &["John Travolta", "Uma Thurman", "Samuel L. Jackson", "Bruce Willis"],
            false,
        ),
        entry(
            "5",
            "Forrest Gump",
            1994,
            8.8,
            &[Drama, Romance],
            "Robert Zemeckis",
            "142 min",
            "photo-1489599833883-0a2c073c5fd4",
            "photo-1506905925346-21bda4d32df4",
            "The presidencies of Kennedy and Johnson, the Vietnam War, the Watergate scandal and other historical events unfold from the perspective of an Alabama man.",
            &["Tom Hanks", "Robin Wright", "Gary Sinise", "Sally Field"],
            false,
        ),
        entry(
            "6",
            "Inception",
            2010,
            8.8,
            &[Action, SciFi, Thriller],
            "Christopher Nolan",
            "148 min",
            "photo-1626814026160-2237a95fc5a0",
            "photo-1518709268805-4e9042af2176",
            "A thief who steals corporate secrets through the use of dream-sharing technology is given the inverse task of planting an idea into the mind of a C.E.O.",
            &["Leonardo DiCaprio", "Marion Cotillard", "Tom Hardy", "Ellen Page"],
            false,
        ),
        entry(
            "7",
            "The Matrix",
            1999,
            8.7,
            &[Action, SciFi],
            "Lana Wachowski, Lilly Wachowski",
            "136 min",
            "photo-1626814026160-2237a95fc5a0",
            "photo-1518709268805-4e9042af2176",
            "A computer programmer is led to fight an underground war against powerful computers who have constructed his entire reality with a system called the Matrix.",
            &["Keanu Reeves", "Laurence Fishburne", "Carrie-Anne Moss", "Hugo Weaving"],
            false,
        ),
        entry(
            "8",
            "Goodfellas",
            1990,
            8.7,
            &[Biography, Crime, Drama],
            "Martin Scorsese",
            "146 min",
            "photo-1440404653325-ab127d49abc1",
            "photo-1507003211169-0a1dd7228f2d",
            "The story of Henry Hill and his life in the mob, covering his relationship with his wife Karen Hill and his mob partners.",
            &["Robert De Niro", "Ray Liotta", "Joe Pesci", "Lorraine Bracco"],
            false,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    title: &str,
    year: i32,
    rating: f64,
    genre: &[Genre],
    director: &str,
    duration: &str,
    poster: &str,
    backdrop: &str,
    plot: &str,
    cast: &[&str],
    featured: bool,
) -> (String, NewMovie) {
    let movie = NewMovie {
        title: title.to_string(),
        year,
        rating,
        genre: genre.to_vec(),
        director: director.to_string(),
        duration: duration.to_string(),
        poster: unsplash(poster, 400, 600),
        backdrop: unsplash(backdrop, 1200, 600),
        plot: plot.to_string(),
        cast: cast.iter().map(|c| c.to_string()).collect(),
        featured,
    };
    (id.to_string(), movie)
}

fn unsplash(photo: &str, w: u32, h: u32) -> String {
    format!("https://images.unsplash.com/{photo}?w={w}&h={h}&fit=crop")
}
