use tracing::debug;

use crate::media::{ApiError, Fetched, Genre, MovieDetails, MovieId, Video};
use crate::routes::Route;
use crate::tmdb::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreTone {
    Success,
    Pink,
    Purple,
    Yellow,
}

const GENRE_TONES: [GenreTone; 4] = [
    GenreTone::Success,
    GenreTone::Pink,
    GenreTone::Purple,
    GenreTone::Yellow,
];

pub fn genre_tone(name: &str) -> GenreTone {
    GENRE_TONES[name.chars().count() % GENRE_TONES.len()]
}

#[derive(Debug, Clone)]
pub struct DetailScreen {
    pub movie_id: MovieId,
    pub details: Option<MovieDetails>,
    pub videos: Vec<Video>,
    pub loading: bool,
    pub player_open: bool,
    pub error: Option<ApiError>,
}

impl DetailScreen {
    pub fn new(movie_id: MovieId) -> Self {
        Self {
            movie_id,
            details: None,
            videos: Vec::new(),
            loading: true,
            player_open: false,
            error: None,
        }
    }

    /// Details and videos are requested together; loading ends once both settle.
    pub async fn load(&mut self, catalog: &dyn Catalog) {
        let (details, videos) = tokio::join!(
            catalog.movie_details(self.movie_id),
            catalog.list_videos(self.movie_id)
        );
        self.apply(details, videos);
    }

    pub fn apply(&mut self, details: Fetched<MovieDetails>, videos: Fetched<Vec<Video>>) {
        self.error = details.error().or(videos.error()).cloned();
        self.details = details.into_option();
        self.videos = videos.into_items();
        self.loading = false;
    }

    pub fn is_ready(&self) -> bool {
        !self.loading && self.details.is_some()
    }

    pub fn trailer(&self) -> Option<&Video> {
        self.videos.iter().find(|v| v.is_youtube_trailer())
    }

    /// Opens the player when a trailer exists and returns its watch URL.
    pub fn watch_trailer(&mut self) -> Option<String> {
        let url = self.trailer().map(Video::watch_url)?;
        debug!(movie_id = self.movie_id, %url, "opening trailer");
        self.player_open = true;
        Some(url)
    }

    pub fn close_player(&mut self) {
        self.player_open = false;
    }

    pub fn header_image_url(&self, catalog: &dyn Catalog) -> Option<String> {
        let path = self.details.as_ref()?.movie.image_path()?;
        Some(catalog.image_url(path))
    }

    pub fn genre_chips(&self) -> Vec<(&Genre, GenreTone)> {
        self.details
            .iter()
            .flat_map(|d| d.genres.iter())
            .map(|g| (g, genre_tone(&g.name)))
            .collect()
    }

    pub fn get_tickets(&self) -> Route {
        Route::Booking(self.movie_id)
    }
}
