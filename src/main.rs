use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};

use marquee::{logging, AppSettings, BrowseRuntime, Message, Route, Screen, TmdbClient};

/// `marquee` browses upcoming movies and categories.
/// `marquee /movie/603` (or `/booking/..`, `/seats/..`) opens one screen.
/// `marquee init-config` writes the effective settings to the config file.
#[tokio::main]
async fn main() -> ExitCode {
    let settings = match AppSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            logging::init("marquee=info");
            error!(error = %e, "failed to load settings");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&settings.log_filter);

    let client = TmdbClient::from_settings(&settings);
    match std::env::args().nth(1).as_deref() {
        None => browse(client, &settings).await,
        Some("init-config") => match settings.save() {
            Ok(()) => {
                info!(path = ?AppSettings::config_path(), "settings saved");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "failed to save settings");
                ExitCode::FAILURE
            }
        },
        Some(path) => match Route::parse(path) {
            Some(route) => open(route, &client).await,
            None => {
                error!(path, "unknown route");
                ExitCode::FAILURE
            }
        },
    }
}

async fn browse(client: TmdbClient, settings: &AppSettings) -> ExitCode {
    let mut runtime = BrowseRuntime::new(Arc::new(client), settings);

    runtime.dispatch(Message::Mount);
    for _ in 0..2 {
        if !runtime.next().await {
            break;
        }
    }

    let state = runtime.state();
    if let Some(e) = &state.upcoming_error {
        error!(error = %e, "upcoming movies unavailable");
    }
    for movie in &state.upcoming {
        info!(id = movie.id, release = ?movie.release_date, "{}", movie.title);
    }
    if let Some(e) = &state.categories_error {
        error!(error = %e, "categories unavailable");
    }
    for category in &state.categories {
        info!(
            genre_id = category.genre_id,
            image = category.image_url.as_deref().unwrap_or("-"),
            "{}",
            category.name
        );
    }

    ExitCode::SUCCESS
}

async fn open(route: Route, client: &TmdbClient) -> ExitCode {
    let screen = route.open(client, &mut rand::thread_rng()).await;
    if !screen.is_ready() {
        warn!(%route, movie_id = route.movie_id(), "movie unavailable");
        return ExitCode::FAILURE;
    }

    match screen {
        Screen::Detail(detail) => {
            if let Some(details) = &detail.details {
                info!(runtime = ?details.runtime_label(), "{}", details.movie.title);
            }
            for (genre, tone) in detail.genre_chips() {
                info!(?tone, "{}", genre.name);
            }
            match detail.trailer() {
                Some(trailer) => info!(url = %trailer.watch_url(), "trailer"),
                None => info!("no trailer"),
            }
            info!(next = %detail.get_tickets(), "get tickets");
        }
        Screen::Booking(booking) => {
            if let Some(label) = booking.release_label() {
                info!("{}", label);
            }
            for preview in &booking.previews {
                info!(time = preview.showtime.time, "{}", preview.price_label());
            }
            info!(next = %booking.select_seats(), "select seats");
        }
        Screen::Seats(seats) => {
            info!(
                title = seats.title().unwrap_or("-"),
                selected = seats.map.selected_seats().len(),
                total = seats.map.total_price(),
                "seat map"
            );
        }
    }

    ExitCode::SUCCESS
}
