use rand::Rng;

use crate::media::{Fetched, MovieDetails, MovieId};
use crate::routes::Route;
use crate::tmdb::Catalog;

pub const PREVIEW_ROWS: usize = 10;
pub const PREVIEW_SEATS_PER_ROW: usize = 16;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowTime {
    pub time: &'static str,
    pub cinema: &'static str,
    pub hall: &'static str,
    pub price: u32,
    pub bonus: u32,
}

pub const SHOWTIMES: [ShowTime; 4] = [
    ShowTime {
        time: "12:30",
        cinema: "Cinetech",
        hall: "Hall 1",
        price: 50,
        bonus: 2500,
    },
    ShowTime {
        time: "13:30",
        cinema: "Cinetech",
        hall: "Hall 2",
        price: 75,
        bonus: 3000,
    },
    ShowTime {
        time: "15:30",
        cinema: "Cinetech",
        hall: "Hall 1",
        price: 60,
        bonus: 2800,
    },
    ShowTime {
        time: "18:00",
        cinema: "Cinetech",
        hall: "Hall 3",
        price: 80,
        bonus: 3200,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingDate {
    pub day: u8,
    pub month: &'static str,
}

pub const BOOKING_DATES: [BookingDate; 5] = [
    BookingDate { day: 5, month: "Mar" },
    BookingDate { day: 6, month: "Mar" },
    BookingDate { day: 7, month: "Mar" },
    BookingDate { day: 8, month: "Mar" },
    BookingDate { day: 9, month: "Mar" },
];

/// Cosmetic seat tones for the miniature hall shown under each showtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewSeat {
    Regular,
    Pink,
    Green,
    Unavailable,
}

impl PreviewSeat {
    fn from_roll(roll: f64) -> Self {
        if roll > 0.9 {
            PreviewSeat::Pink
        } else if roll > 0.85 {
            PreviewSeat::Green
        } else if roll > 0.75 {
            PreviewSeat::Unavailable
        } else {
            PreviewSeat::Regular
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowTimePreview {
    pub showtime: ShowTime,
    pub rows: Vec<Vec<PreviewSeat>>,
}

impl ShowTimePreview {
    fn generate<R: Rng + ?Sized>(showtime: ShowTime, rng: &mut R) -> Self {
        let rows = (0..PREVIEW_ROWS)
            .map(|_| {
                (0..PREVIEW_SEATS_PER_ROW)
                    .map(|_| PreviewSeat::from_roll(rng.gen()))
                    .collect()
            })
            .collect();
        Self { showtime, rows }
    }

    pub fn price_label(&self) -> String {
        format!(
            "From {}$ or {} bonus",
            self.showtime.price, self.showtime.bonus
        )
    }
}

#[derive(Debug, Clone)]
pub struct BookingScreen {
    pub movie_id: MovieId,
    pub details: Option<MovieDetails>,
    pub loading: bool,
    pub selected_date: usize,
    pub previews: Vec<ShowTimePreview>,
}

impl BookingScreen {
    pub fn new<R: Rng + ?Sized>(movie_id: MovieId, rng: &mut R) -> Self {
        Self {
            movie_id,
            details: None,
            loading: true,
            selected_date: 0,
            previews: SHOWTIMES
                .iter()
                .map(|showtime| ShowTimePreview::generate(*showtime, &mut *rng))
                .collect(),
        }
    }

    pub async fn load(&mut self, catalog: &dyn Catalog) {
        let details = catalog.movie_details(self.movie_id).await;
        self.apply_details(details);
    }

    pub fn apply_details(&mut self, details: Fetched<MovieDetails>) {
        self.details = details.into_option();
        self.loading = false;
    }

    pub fn is_ready(&self) -> bool {
        !self.loading && self.details.is_some()
    }

    pub fn dates(&self) -> &'static [BookingDate] {
        &BOOKING_DATES
    }

    /// Out-of-range indices are ignored.
    pub fn select_date(&mut self, index: usize) -> bool {
        if index < BOOKING_DATES.len() {
            self.selected_date = index;
            true
        } else {
            false
        }
    }

    pub fn release_label(&self) -> Option<String> {
        let date = self.details.as_ref()?.movie.release_date.as_deref()?;
        format_long_date(date).map(|d| format!("In Theaters {}", d))
    }

    pub fn select_seats(&self) -> Route {
        Route::Seats(self.movie_id)
    }
}

/// `2021-03-05` -> `March 5, 2021`.
fn format_long_date(date: &str) -> Option<String> {
    let mut parts = date.splitn(3, '-');
    let year: u32 = parts.next()?.parse().ok()?;
    let month: usize = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let name = MONTHS.get(month.checked_sub(1)?)?;
    Some(format!("{} {}, {}", name, day, year))
}
