//! Scripted [`Catalog`] double shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::media::{ApiError, Fetched, Genre, GenreId, Movie, MovieDetails, MovieId, Video};
use crate::tmdb::Catalog;

pub struct FakeCatalog {
    upcoming: Fetched<Vec<Movie>>,
    genres: Fetched<Vec<Genre>>,
    by_genre: HashMap<GenreId, Fetched<Vec<Movie>>>,
    search_results: HashMap<String, Vec<Movie>>,
    search_delays: HashMap<String, Duration>,
    genre_delay: Option<Duration>,
    details: HashMap<MovieId, MovieDetails>,
    videos: HashMap<MovieId, Vec<Video>>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            upcoming: Fetched::Empty,
            genres: Fetched::Empty,
            by_genre: HashMap::new(),
            search_results: HashMap::new(),
            search_delays: HashMap::new(),
            genre_delay: None,
            details: HashMap::new(),
            videos: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_upcoming(mut self, movies: Vec<Movie>) -> Self {
        self.upcoming = Fetched::from_items(movies);
        self
    }

    pub fn with_upcoming_failure(mut self, error: ApiError) -> Self {
        self.upcoming = Fetched::Failed(error);
        self
    }

    pub fn with_genres(mut self, genres: Vec<Genre>) -> Self {
        self.genres = Fetched::from_items(genres);
        self
    }

    pub fn with_genres_failure(mut self, error: ApiError) -> Self {
        self.genres = Fetched::Failed(error);
        self
    }

    pub fn with_genre_movies(mut self, genre_id: GenreId, movies: Vec<Movie>) -> Self {
        self.by_genre.insert(genre_id, Fetched::from_items(movies));
        self
    }

    pub fn with_genre_failure(mut self, genre_id: GenreId, error: ApiError) -> Self {
        self.by_genre.insert(genre_id, Fetched::Failed(error));
        self
    }

    pub fn with_search(mut self, query: &str, movies: Vec<Movie>) -> Self {
        self.search_results.insert(query.to_string(), movies);
        self
    }

    pub fn with_search_delay(mut self, query: &str, delay: Duration) -> Self {
        self.search_delays.insert(query.to_string(), delay);
        self
    }

    /// Every `list_by_genre` call sleeps for `delay` before answering.
    pub fn with_genre_delay(mut self, delay: Duration) -> Self {
        self.genre_delay = Some(delay);
        self
    }

    pub fn with_details(mut self, details: MovieDetails) -> Self {
        self.details.insert(details.movie.id, details);
        self
    }

    pub fn with_videos(mut self, id: MovieId, videos: Vec<Video>) -> Self {
        self.videos.insert(id, videos);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("search:").map(String::from))
            .collect()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn list_upcoming(&self) -> Fetched<Vec<Movie>> {
        self.record(String::from("upcoming"));
        self.upcoming.clone()
    }

    async fn movie_details(&self, id: MovieId) -> Fetched<MovieDetails> {
        self.record(format!("details:{}", id));
        match self.details.get(&id) {
            Some(details) => Fetched::Ready(details.clone()),
            None => Fetched::Failed(ApiError::NotFound),
        }
    }

    async fn list_videos(&self, id: MovieId) -> Fetched<Vec<Video>> {
        self.record(format!("videos:{}", id));
        Fetched::from_items(self.videos.get(&id).cloned().unwrap_or_default())
    }

    async fn search(&self, query: &str) -> Fetched<Vec<Movie>> {
        self.record(format!("search:{}", query));
        if let Some(delay) = self.search_delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        Fetched::from_items(self.search_results.get(query).cloned().unwrap_or_default())
    }

    async fn list_genres(&self) -> Fetched<Vec<Genre>> {
        self.record(String::from("genres"));
        self.genres.clone()
    }

    async fn list_by_genre(&self, genre_id: GenreId) -> Fetched<Vec<Movie>> {
        self.record(format!("discover:{}", genre_id));
        if let Some(delay) = self.genre_delay {
            tokio::time::sleep(delay).await;
        }
        self.by_genre.get(&genre_id).cloned().unwrap_or(Fetched::Empty)
    }

    fn image_url(&self, path: &str) -> String {
        format!("cdn:{}", path)
    }
}
