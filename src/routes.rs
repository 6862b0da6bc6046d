use std::fmt;

use rand::Rng;

use crate::booking::BookingScreen;
use crate::detail::DetailScreen;
use crate::media::MovieId;
use crate::seats::SeatScreen;
use crate::tmdb::Catalog;

/// Screens reachable by pushing a movie id. None of them return a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Detail(MovieId),
    Booking(MovieId),
    Seats(MovieId),
}

impl Route {
    pub fn movie_id(&self) -> MovieId {
        match self {
            Route::Detail(id) | Route::Booking(id) | Route::Seats(id) => *id,
        }
    }

    /// Parses `/movie/{id}`, `/booking/{id}` or `/seats/{id}`.
    /// A non-numeric id yields `None`, so a screen never opens for a malformed id.
    pub fn parse(path: &str) -> Option<Self> {
        let mut parts = path.trim_matches('/').split('/');
        let kind = parts.next()?;
        let id: MovieId = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        match kind {
            "movie" => Some(Route::Detail(id)),
            "booking" => Some(Route::Booking(id)),
            "seats" => Some(Route::Seats(id)),
            _ => None,
        }
    }

    /// Builds the screen this route points at and loads its data.
    pub async fn open<R: Rng + ?Sized>(self, catalog: &dyn Catalog, rng: &mut R) -> Screen {
        let id = self.movie_id();
        let mut screen = match self {
            Route::Detail(_) => Screen::Detail(DetailScreen::new(id)),
            Route::Booking(_) => Screen::Booking(BookingScreen::new(id, rng)),
            Route::Seats(_) => Screen::Seats(SeatScreen::new(id, rng)),
        };
        match &mut screen {
            Screen::Detail(detail) => detail.load(catalog).await,
            Screen::Booking(booking) => booking.load(catalog).await,
            Screen::Seats(seats) => seats.load(catalog).await,
        }
        screen
    }
}

#[derive(Debug, Clone)]
pub enum Screen {
    Detail(DetailScreen),
    Booking(BookingScreen),
    Seats(SeatScreen),
}

impl Screen {
    pub fn is_ready(&self) -> bool {
        match self {
            Screen::Detail(detail) => detail.is_ready(),
            Screen::Booking(booking) => booking.is_ready(),
            Screen::Seats(seats) => seats.is_ready(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Detail(id) => write!(f, "/movie/{}", id),
            Route::Booking(id) => write!(f, "/booking/{}", id),
            Route::Seats(id) => write!(f, "/seats/{}", id),
        }
    }
}
