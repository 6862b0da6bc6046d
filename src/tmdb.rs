use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::media::{
    ApiError, Category, Fetched, Genre, GenreId, Movie, MovieDetails, MovieId,
    TmdbGenreListResponse, TmdbMovieDetails, TmdbPagedResponse, TmdbVideosResponse, Video,
};
use crate::settings::{AppSettings, DEFAULT_API_BASE_URL, DEFAULT_IMAGE_BASE_URL};

/// What the screens need from the movie catalog.
///
/// Every call settles: transport and parse failures come back as
/// [`Fetched::Failed`] after being logged here, never as a panic or an `Err`.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn list_upcoming(&self) -> Fetched<Vec<Movie>>;

    async fn movie_details(&self, id: MovieId) -> Fetched<MovieDetails>;

    async fn list_videos(&self, id: MovieId) -> Fetched<Vec<Video>>;

    /// Callers must not pass a blank query; one is answered with `Empty` and no request.
    async fn search(&self, query: &str) -> Fetched<Vec<Movie>>;

    async fn list_genres(&self) -> Fetched<Vec<Genre>>;

    async fn list_by_genre(&self, genre_id: GenreId) -> Fetched<Vec<Movie>>;

    fn image_url(&self, path: &str) -> String;
}

#[derive(Clone)]
pub struct TmdbClient {
    access_token: String,
    base_url: String,
    image_base_url: String,
    language: String,
    http_client: Arc<reqwest::Client>,
}

impl TmdbClient {
    pub fn new(access_token: String, language: String) -> Self {
        Self {
            access_token,
            base_url: String::from(DEFAULT_API_BASE_URL),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            language,
            http_client: Arc::new(reqwest::Client::new()),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        let language = if settings.language.is_empty() {
            String::from("en-US")
        } else {
            settings.language.clone()
        };
        Self::new(settings.access_token.clone(), language)
            .with_base_urls(&settings.api_base_url, &settings.image_base_url)
    }

    pub fn with_base_urls(mut self, api_base_url: &str, image_base_url: &str) -> Self {
        self.base_url = api_base_url.trim_end_matches('/').to_string();
        self.image_base_url = image_base_url.to_string();
        self
    }

    /// Plain concatenation onto the CDN base; `path` is not validated.
    pub fn image_url(&self, path: &str) -> String {
        format!("{}{}", self.image_base_url, path)
    }

    async fn fetch_response(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::Response, ApiError> {
        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, endpoint))
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("language", self.language.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match response.status().as_u16() {
            401 => Err(ApiError::Unauthorized),
            404 => Err(ApiError::NotFound),
            429 => Err(ApiError::RateLimit),
            s if s >= 400 => Err(ApiError::Status(s)),
            _ => Ok(response),
        }
    }

    async fn fetch_json<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!(endpoint, "tmdb request");
        self.fetch_response(endpoint, params)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn fetch_movie_list(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<Movie>, ApiError> {
        let response: TmdbPagedResponse = self.fetch_json(endpoint, params).await?;
        Ok(response.results.into_iter().map(Movie::from).collect())
    }

    pub async fn fetch_upcoming(&self) -> Result<Vec<Movie>, ApiError> {
        self.fetch_movie_list("/movie/upcoming", &[]).await
    }

    pub async fn fetch_movie_details(&self, id: MovieId) -> Result<MovieDetails, ApiError> {
        let details: TmdbMovieDetails = self.fetch_json(&format!("/movie/{}", id), &[]).await?;
        Ok(MovieDetails::from(details))
    }

    pub async fn fetch_videos(&self, id: MovieId) -> Result<Vec<Video>, ApiError> {
        let response: TmdbVideosResponse = self
            .fetch_json(&format!("/movie/{}/videos", id), &[])
            .await?;
        Ok(response.results)
    }

    pub async fn fetch_search_results(&self, query: &str) -> Result<Vec<Movie>, ApiError> {
        self.fetch_movie_list("/search/movie", &[("query", query.to_string())])
            .await
    }

    pub async fn fetch_genres(&self) -> Result<Vec<Genre>, ApiError> {
        let response: TmdbGenreListResponse = self.fetch_json("/genre/movie/list", &[]).await?;
        Ok(response.genres)
    }

    pub async fn fetch_by_genre(&self, genre_id: GenreId) -> Result<Vec<Movie>, ApiError> {
        self.fetch_movie_list("/discover/movie", &[("with_genres", genre_id.to_string())])
            .await
    }
}

fn settle_list<T>(operation: &str, result: Result<Vec<T>, ApiError>) -> Fetched<Vec<T>> {
    match result {
        Ok(items) => Fetched::from_items(items),
        Err(error) => {
            warn!(operation, %error, "catalog request failed");
            Fetched::Failed(error)
        }
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn list_upcoming(&self) -> Fetched<Vec<Movie>> {
        settle_list("upcoming", self.fetch_upcoming().await)
    }

    async fn movie_details(&self, id: MovieId) -> Fetched<MovieDetails> {
        match self.fetch_movie_details(id).await {
            Ok(details) => Fetched::Ready(details),
            Err(error) => {
                warn!(operation = "details", movie_id = id, %error, "catalog request failed");
                Fetched::Failed(error)
            }
        }
    }

    async fn list_videos(&self, id: MovieId) -> Fetched<Vec<Video>> {
        settle_list("videos", self.fetch_videos(id).await)
    }

    async fn search(&self, query: &str) -> Fetched<Vec<Movie>> {
        if query.trim().is_empty() {
            debug!("refusing to search for a blank query");
            return Fetched::Empty;
        }
        settle_list("search", self.fetch_search_results(query).await)
    }

    async fn list_genres(&self) -> Fetched<Vec<Genre>> {
        settle_list("genres", self.fetch_genres().await)
    }

    async fn list_by_genre(&self, genre_id: GenreId) -> Fetched<Vec<Movie>> {
        settle_list("discover", self.fetch_by_genre(genre_id).await)
    }

    fn image_url(&self, path: &str) -> String {
        TmdbClient::image_url(self, path)
    }
}

pub async fn load_upcoming(catalog: Arc<dyn Catalog>) -> Fetched<Vec<Movie>> {
    catalog.list_upcoming().await
}

/// Builds the category grid: the first `limit` genres, each paired with a
/// backdrop sampled from that genre's movie list.
///
/// The per-genre lookups run concurrently and are joined before anything is
/// returned. A failed lookup only costs that category its image.
pub async fn load_categories(catalog: Arc<dyn Catalog>, limit: usize) -> Fetched<Vec<Category>> {
    let genres = match catalog.list_genres().await {
        Fetched::Ready(genres) => genres,
        Fetched::Empty => return Fetched::Empty,
        Fetched::Failed(error) => return Fetched::Failed(error),
    };

    let lookups = genres.iter().take(limit).map(|genre| {
        let catalog = Arc::clone(&catalog);
        async move {
            let movies = catalog.list_by_genre(genre.id).await.into_items();
            Category::from_sample(genre, &movies, |path| catalog.image_url(path))
        }
    });

    Fetched::from_items(join_all(lookups).await)
}
