use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::browse::BrowseState;
use crate::handlers::{handle_message, Effect, Message};
use crate::routes::Route;
use crate::settings::AppSettings;
use crate::tmdb::{load_categories, load_upcoming, Catalog};

/// Drives the browse screen: feeds messages through the reducer and runs the
/// resulting effects on tokio, routing their outcomes back as messages.
///
/// Must be used from within a tokio runtime.
pub struct BrowseRuntime {
    state: BrowseState,
    catalog: Arc<dyn Catalog>,
    debounce: Duration,
    category_limit: usize,
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
    debounce_timer: Option<JoinHandle<()>>,
    navigation: Vec<Route>,
}

impl BrowseRuntime {
    pub fn new(catalog: Arc<dyn Catalog>, settings: &AppSettings) -> Self {
        Self::with_options(catalog, settings.search_debounce(), settings.category_limit)
    }

    pub fn with_options(
        catalog: Arc<dyn Catalog>,
        debounce: Duration,
        category_limit: usize,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            state: BrowseState::new(),
            catalog,
            debounce,
            category_limit,
            sender,
            receiver,
            debounce_timer: None,
            navigation: Vec::new(),
        }
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    pub fn dispatch(&mut self, message: Message) {
        trace!(?message, "dispatch");
        for effect in handle_message(&mut self.state, message) {
            self.execute(effect);
        }
    }

    /// Waits for the next message produced by an effect and dispatches it.
    pub async fn next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(message) => {
                self.dispatch(message);
                true
            }
            None => false,
        }
    }

    pub fn take_navigation(&mut self) -> Vec<Route> {
        std::mem::take(&mut self.navigation)
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::LoadUpcoming => {
                let catalog = Arc::clone(&self.catalog);
                self.perform(async move { Message::UpcomingLoaded(load_upcoming(catalog).await) });
            }
            Effect::LoadCategories => {
                let catalog = Arc::clone(&self.catalog);
                let limit = self.category_limit;
                self.perform(async move {
                    Message::CategoriesLoaded(load_categories(catalog, limit).await)
                });
            }
            Effect::ScheduleSearch(token) => {
                self.cancel_debounce();
                let sender = self.sender.clone();
                let debounce = self.debounce;
                self.debounce_timer = Some(tokio::spawn(async move {
                    tokio::time::sleep(debounce).await;
                    let _ = sender.send(Message::SearchDebounceElapsed(token));
                }));
            }
            Effect::CancelPendingSearch => self.cancel_debounce(),
            Effect::Search { token, query } => {
                let catalog = Arc::clone(&self.catalog);
                self.perform(async move {
                    let result = catalog.search(&query).await;
                    Message::SearchResultsLoaded(token, result)
                });
            }
            Effect::LoadGenreMovies { token, genre_id } => {
                let catalog = Arc::clone(&self.catalog);
                self.perform(async move {
                    Message::GenreMoviesLoaded(token, catalog.list_by_genre(genre_id).await)
                });
            }
            Effect::Navigate(route) => {
                debug!(%route, "navigate");
                self.navigation.push(route);
            }
        }
    }

    fn perform<F>(&self, future: F)
    where
        F: std::future::Future<Output = Message> + Send + 'static,
    {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let _ = sender.send(future.await);
        });
    }

    fn cancel_debounce(&mut self) {
        if let Some(timer) = self.debounce_timer.take() {
            timer.abort();
        }
    }
}

impl Drop for BrowseRuntime {
    fn drop(&mut self) {
        self.cancel_debounce();
    }
}
