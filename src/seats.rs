use rand::Rng;
use tracing::debug;

use crate::media::{Fetched, MovieDetails, MovieId};
use crate::tmdb::Catalog;

pub const ROWS: u8 = 10;
pub const SEATS_PER_ROW: u8 = 20;
pub const VIP_ROW: u8 = 10;
pub const REGULAR_PRICE: u32 = 50;
pub const VIP_PRICE: u32 = 150;

/// A roll above this marks a seat unavailable (roughly 15% of seats).
const UNAVAILABLE_ROLL: f64 = 0.85;

/// Demo seat that starts out selected, as `(row, number)`.
pub const SEED_SELECTION: (u8, u8) = (4, 4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatCategory {
    Regular,
    Vip,
    Unavailable,
}

impl SeatCategory {
    pub fn price(self) -> Option<u32> {
        match self {
            SeatCategory::Regular => Some(REGULAR_PRICE),
            SeatCategory::Vip => Some(VIP_PRICE),
            SeatCategory::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub row: u8,
    pub number: u8,
    pub category: SeatCategory,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeatMap {
    seats: Vec<Seat>,
}

impl SeatMap {
    /// Lays out the hall row by row. The last row is VIP; the unavailable
    /// roll happens afterwards, so it can override VIP too.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut seats = Vec::with_capacity(usize::from(ROWS) * usize::from(SEATS_PER_ROW));
        for row in 1..=ROWS {
            for number in 1..=SEATS_PER_ROW {
                let mut category = if row == VIP_ROW {
                    SeatCategory::Vip
                } else {
                    SeatCategory::Regular
                };
                if rng.gen::<f64>() > UNAVAILABLE_ROLL {
                    category = SeatCategory::Unavailable;
                }
                let selected = (row, number) == SEED_SELECTION
                    && category != SeatCategory::Unavailable;
                seats.push(Seat {
                    row,
                    number,
                    category,
                    selected,
                });
            }
        }
        Self { seats }
    }

    /// Seats are kept in the given order. Selection on unavailable seats is dropped.
    pub fn from_seats(seats: Vec<Seat>) -> Self {
        let seats = seats
            .into_iter()
            .map(|seat| Seat {
                selected: seat.selected && seat.category != SeatCategory::Unavailable,
                ..seat
            })
            .collect();
        Self { seats }
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn row(&self, row: u8) -> impl Iterator<Item = &Seat> + '_ {
        self.seats.iter().filter(move |s| s.row == row)
    }

    pub fn seat(&self, row: u8, number: u8) -> Option<&Seat> {
        self.seats
            .iter()
            .find(|s| s.row == row && s.number == number)
    }

    /// Flips one seat's selection. Returns false (and changes nothing) for
    /// unavailable or unknown seats.
    pub fn toggle(&mut self, row: u8, number: u8) -> bool {
        match self
            .seats
            .iter_mut()
            .find(|s| s.row == row && s.number == number)
        {
            Some(seat) if seat.category != SeatCategory::Unavailable => {
                seat.selected = !seat.selected;
                debug!(row, number, selected = seat.selected, "seat toggled");
                true
            }
            _ => false,
        }
    }

    pub fn deselect(&mut self, row: u8, number: u8) -> bool {
        match self.seat(row, number) {
            Some(seat) if seat.selected => self.toggle(row, number),
            _ => false,
        }
    }

    /// Selected seats in row-major order.
    pub fn selected_seats(&self) -> Vec<&Seat> {
        let mut selected: Vec<&Seat> = self.seats.iter().filter(|s| s.selected).collect();
        selected.sort_by_key(|s| (s.row, s.number));
        selected
    }

    pub fn first_selected(&self) -> Option<&Seat> {
        self.selected_seats().into_iter().next()
    }

    pub fn total_price(&self) -> u32 {
        self.selected_seats()
            .iter()
            .filter_map(|s| s.category.price())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentNotice {
    pub title: &'static str,
    pub message: &'static str,
}

/// Seat selection for one movie. Lives exactly as long as the screen.
#[derive(Debug, Clone)]
pub struct SeatScreen {
    pub movie_id: MovieId,
    pub details: Option<MovieDetails>,
    pub loading: bool,
    pub map: SeatMap,
}

impl SeatScreen {
    pub fn new<R: Rng + ?Sized>(movie_id: MovieId, rng: &mut R) -> Self {
        Self {
            movie_id,
            details: None,
            loading: true,
            map: SeatMap::generate(rng),
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

    /// Shows the loading placeholder until details arrive.
    pub fn is_ready(&self) -> bool {
        !self.loading && self.details.is_some()
    }

    pub fn title(&self) -> Option<&str> {
        self.details.as_ref().map(|d| d.movie.title.as_str())
    }

    pub fn proceed_to_pay(&self) -> PaymentNotice {
        debug!(
            movie_id = self.movie_id,
            seats = self.map.selected_seats().len(),
            total = self.map.total_price(),
            "payment requested"
        );
        PaymentNotice {
            title: "Proceed to pay",
            message: "Payment screen coming soon!",
        }
    }
}
