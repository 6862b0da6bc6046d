pub mod booking;
pub mod browse;
pub mod detail;
pub mod handlers;
pub mod logging;
pub mod media;
pub mod routes;
pub mod runtime;
pub mod seats;
pub mod settings;
pub mod tmdb;

#[cfg(test)]
mod testing;

pub use browse::{BrowseState, View};
pub use handlers::{Effect, Message};
pub use media::{ApiError, Category, Fetched, Genre, Movie, MovieDetails, MovieId, Video};
pub use routes::{Route, Screen};
pub use runtime::BrowseRuntime;
pub use settings::AppSettings;
pub use tmdb::{Catalog, TmdbClient};
