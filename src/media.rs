use serde::Deserialize;

pub type MovieId = u64;
pub type GenreId = u64;

const MOVIE_GENRE_LABELS: [(GenreId, &str); 19] = [
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Sci-Fi"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub genre_ids: Vec<GenreId>,
    pub vote_average: f32,
}

impl Movie {
    /// Backdrop first, poster as fallback. Used for list cards and the detail header.
    pub fn image_path(&self) -> Option<&str> {
        self.backdrop_path
            .as_deref()
            .or(self.poster_path.as_deref())
    }

    pub fn genre_label(&self) -> &'static str {
        self.genre_ids
            .first()
            .and_then(|first| {
                MOVIE_GENRE_LABELS
                    .iter()
                    .find(|(id, _)| id == first)
                    .map(|(_, label)| *label)
            })
            .unwrap_or("Movie")
    }

    pub fn release_year(&self) -> Option<u32> {
        self.release_date
            .as_ref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub movie: Movie,
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    pub production_companies: Vec<ProductionCompany>,
}

impl MovieDetails {
    pub fn runtime_label(&self) -> Option<String> {
        match self.runtime? {
            0 => None,
            minutes if minutes < 60 => Some(format!("{}m", minutes)),
            minutes => Some(format!("{}h {}m", minutes / 60, minutes % 60)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.video_type == "Trailer" && self.site == "YouTube"
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }
}

/// A genre card on the category grid, with the backdrop of a sampled movie.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub genre_id: GenreId,
    pub name: String,
    pub image_url: Option<String>,
}

impl Category {
    /// First movie carrying a backdrop wins, else the first movie at all.
    /// Only a backdrop ever becomes the image.
    pub fn from_sample(
        genre: &Genre,
        movies: &[Movie],
        image_url: impl Fn(&str) -> String,
    ) -> Self {
        let representative = movies
            .iter()
            .find(|m| m.backdrop_path.is_some())
            .or_else(|| movies.first());
        Self {
            genre_id: genre.id,
            name: genre.name.clone(),
            image_url: representative
                .and_then(|m| m.backdrop_path.as_deref())
                .map(image_url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("rate limited by TMDB")]
    RateLimit,
    #[error("access token rejected by TMDB")]
    Unauthorized,
    #[error("resource not found")]
    NotFound,
    #[error("HTTP error: {0}")]
    Status(u16),
}

/// Outcome of a catalog call. Failures are already logged by the time one of these exists.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Ready(T),
    Empty,
    Failed(ApiError),
}

impl<T> Fetched<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, Fetched::Failed(_))
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Fetched::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Fetched::Ready(value) => Some(value),
            Fetched::Empty | Fetched::Failed(_) => None,
        }
    }
}

impl<T> Fetched<Vec<T>> {
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Fetched::Empty
        } else {
            Fetched::Ready(items)
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.into_option().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieResult {
    pub id: MovieId,
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    #[serde(default)]
    pub vote_average: f32,
}

impl From<TmdbMovieResult> for Movie {
    fn from(result: TmdbMovieResult) -> Self {
        Self {
            id: result.id,
            title: result.title.unwrap_or_default(),
            overview: result.overview.unwrap_or_default(),
            poster_path: result.poster_path.filter(|p| !p.is_empty()),
            backdrop_path: result.backdrop_path.filter(|p| !p.is_empty()),
            release_date: result.release_date.filter(|d| !d.is_empty()),
            genre_ids: result.genre_ids,
            vote_average: result.vote_average,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(flatten)]
    pub base: TmdbMovieResult,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
}

impl From<TmdbMovieDetails> for MovieDetails {
    fn from(details: TmdbMovieDetails) -> Self {
        let mut movie = Movie::from(details.base);
        if movie.genre_ids.is_empty() {
            movie.genre_ids = details.genres.iter().map(|g| g.id).collect();
        }
        Self {
            movie,
            genres: details.genres,
            runtime: details.runtime,
            production_companies: details.production_companies,
        }
    }
}

#[derive(Deserialize)]
pub struct TmdbPagedResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovieResult>,
}

#[derive(Deserialize)]
pub struct TmdbVideosResponse {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Deserialize)]
pub struct TmdbGenreListResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}
