use tracing::{debug, info};

use crate::browse::{BrowseState, GenreBrowse, RequestToken, SearchPhase};
use crate::media::{Category, Fetched, GenreId, Movie, MovieId};
use crate::routes::Route;

#[derive(Debug, Clone)]
pub enum Message {
    Mount,
    UpcomingLoaded(Fetched<Vec<Movie>>),
    CategoriesLoaded(Fetched<Vec<Category>>),
    OpenSearch,
    CloseSearch,
    SearchQueryChanged(String),
    SearchDebounceElapsed(RequestToken),
    SearchResultsLoaded(RequestToken, Fetched<Vec<Movie>>),
    SelectGenre(Category),
    GenreMoviesLoaded(RequestToken, Fetched<Vec<Movie>>),
    BackFromGenre,
    OpenMovie(MovieId),
}

/// Work the runtime performs on behalf of the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadUpcoming,
    LoadCategories,
    /// (Re)start the single debounce timer; any earlier timer is superseded.
    ScheduleSearch(RequestToken),
    CancelPendingSearch,
    Search { token: RequestToken, query: String },
    LoadGenreMovies { token: RequestToken, genre_id: GenreId },
    Navigate(Route),
}

pub fn handle_message(state: &mut BrowseState, message: Message) -> Vec<Effect> {
    match message {
        Message::Mount => vec![Effect::LoadUpcoming, Effect::LoadCategories],
        Message::UpcomingLoaded(result) => handle_upcoming_loaded(state, result),
        Message::CategoriesLoaded(result) => handle_categories_loaded(state, result),
        Message::OpenSearch => {
            state.session_mut();
            Vec::new()
        }
        Message::CloseSearch => handle_close_search(state),
        Message::SearchQueryChanged(query) => handle_search_query_changed(state, query),
        Message::SearchDebounceElapsed(token) => handle_search_debounce_elapsed(state, token),
        Message::SearchResultsLoaded(token, result) => handle_search_results(state, token, result),
        Message::SelectGenre(category) => handle_select_genre(state, category),
        Message::GenreMoviesLoaded(token, result) => handle_genre_movies(state, token, result),
        Message::BackFromGenre => {
            if let Some(session) = state.search.as_mut() {
                session.genre = None;
            }
            Vec::new()
        }
        Message::OpenMovie(id) => vec![Effect::Navigate(Route::Detail(id))],
    }
}

fn handle_upcoming_loaded(state: &mut BrowseState, result: Fetched<Vec<Movie>>) -> Vec<Effect> {
    state.upcoming_error = result.error().cloned();
    state.upcoming = result.into_items();
    info!(count = state.upcoming.len(), "upcoming movies loaded");
    Vec::new()
}

fn handle_categories_loaded(
    state: &mut BrowseState,
    result: Fetched<Vec<Category>>,
) -> Vec<Effect> {
    state.categories_error = result.error().cloned();
    state.categories = result.into_items();
    info!(count = state.categories.len(), "categories loaded");
    Vec::new()
}

fn handle_close_search(state: &mut BrowseState) -> Vec<Effect> {
    state.search = None;
    vec![Effect::CancelPendingSearch]
}

fn handle_search_query_changed(state: &mut BrowseState, query: String) -> Vec<Effect> {
    if query.trim().is_empty() {
        let session = state.session_mut();
        session.query = query;
        session.phase = SearchPhase::Idle;
        return vec![Effect::CancelPendingSearch];
    }

    let token = state.issue_token();
    let session = state.session_mut();
    session.query = query;
    session.phase = SearchPhase::Pending {
        token,
        dispatched: false,
    };
    vec![Effect::ScheduleSearch(token)]
}

fn handle_search_debounce_elapsed(state: &mut BrowseState, token: RequestToken) -> Vec<Effect> {
    let Some(session) = state.search.as_mut() else {
        return Vec::new();
    };
    match &mut session.phase {
        SearchPhase::Pending {
            token: current,
            dispatched,
        } if *current == token && !*dispatched => {
            *dispatched = true;
            debug!(query = %session.query, "debounce settled, searching");
            vec![Effect::Search {
                token,
                query: session.query.clone(),
            }]
        }
        _ => {
            debug!(?token, "ignoring superseded debounce");
            Vec::new()
        }
    }
}

fn handle_search_results(
    state: &mut BrowseState,
    token: RequestToken,
    result: Fetched<Vec<Movie>>,
) -> Vec<Effect> {
    let Some(session) = state.search.as_mut() else {
        return Vec::new();
    };
    match session.phase {
        SearchPhase::Pending { token: current, .. } if current == token => {
            session.phase = SearchPhase::Results {
                error: result.error().cloned(),
                movies: result.into_items(),
            };
        }
        _ => debug!(?token, "discarding stale search response"),
    }
    Vec::new()
}

fn handle_select_genre(state: &mut BrowseState, category: Category) -> Vec<Effect> {
    let token = state.issue_token();
    let genre_id = category.genre_id;
    state.session_mut().genre = Some(GenreBrowse {
        category,
        token,
        movies: Vec::new(),
        loading: true,
        error: None,
    });
    vec![Effect::LoadGenreMovies { token, genre_id }]
}

fn handle_genre_movies(
    state: &mut BrowseState,
    token: RequestToken,
    result: Fetched<Vec<Movie>>,
) -> Vec<Effect> {
    match state
        .search
        .as_mut()
        .and_then(|s| s.genre.as_mut())
        .filter(|g| g.token == token)
    {
        Some(genre) => {
            genre.error = result.error().cloned();
            genre.movies = result.into_items();
            genre.loading = false;
        }
        None => debug!(?token, "discarding stale genre response"),
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::View;
    use crate::media::fixtures::movie;
    use crate::media::ApiError;

    fn drama() -> Category {
        Category {
            genre_id: 18,
            name: String::from("Drama"),
            image_url: None,
        }
    }

    fn type_query(state: &mut BrowseState, query: &str) -> RequestToken {
        match handle_message(state, Message::SearchQueryChanged(query.to_string())).as_slice() {
            [Effect::ScheduleSearch(token)] => *token,
            other => panic!("expected a scheduled search, got {:?}", other),
        }
    }

    #[test]
    fn mount_loads_upcoming_and_categories() {
        let mut state = BrowseState::new();
        assert_eq!(
            handle_message(&mut state, Message::Mount),
            vec![Effect::LoadUpcoming, Effect::LoadCategories]
        );
    }

    #[test]
    fn only_latest_debounce_triggers_a_search() {
        let mut state = BrowseState::new();
        let first = type_query(&mut state, "a");
        let second = type_query(&mut state, "ab");
        let third = type_query(&mut state, "abc");

        assert!(handle_message(&mut state, Message::SearchDebounceElapsed(first)).is_empty());
        assert!(handle_message(&mut state, Message::SearchDebounceElapsed(second)).is_empty());
        assert_eq!(
            handle_message(&mut state, Message::SearchDebounceElapsed(third)),
            vec![Effect::Search {
                token: third,
                query: String::from("abc")
            }]
        );
        assert!(handle_message(&mut state, Message::SearchDebounceElapsed(third)).is_empty());
    }

    #[test]
    fn clearing_query_cancels_and_clears_results() {
        let mut state = BrowseState::new();
        let token = type_query(&mut state, "dune");
        handle_message(&mut state, Message::SearchDebounceElapsed(token));
        handle_message(
            &mut state,
            Message::SearchResultsLoaded(token, Fetched::Ready(vec![movie(1, "Dune")])),
        );
        assert!(matches!(state.view(), View::SearchResults(_)));

        let effects = handle_message(&mut state, Message::SearchQueryChanged(String::new()));
        assert_eq!(effects, vec![Effect::CancelPendingSearch]);
        let session = state.search.as_ref().unwrap();
        assert_eq!(session.phase, SearchPhase::Idle);
        assert!(!session.is_typing());
        assert!(matches!(state.view(), View::CategoryGrid(_)));
    }

    #[test]
    fn whitespace_query_never_schedules_a_search() {
        let mut state = BrowseState::new();
        let effects = handle_message(&mut state, Message::SearchQueryChanged(String::from("   ")));
        assert_eq!(effects, vec![Effect::CancelPendingSearch]);
        assert!(!state.header().is_typing);
    }

    #[test]
    fn late_response_for_superseded_query_is_dropped() {
        let mut state = BrowseState::new();
        let old = type_query(&mut state, "star");
        handle_message(&mut state, Message::SearchDebounceElapsed(old));
        let new = type_query(&mut state, "star wars");
        handle_message(&mut state, Message::SearchDebounceElapsed(new));

        handle_message(
            &mut state,
            Message::SearchResultsLoaded(new, Fetched::Ready(vec![movie(11, "Star Wars")])),
        );
        handle_message(
            &mut state,
            Message::SearchResultsLoaded(old, Fetched::Ready(vec![movie(99, "Star Trek")])),
        );

        match state.view() {
            View::SearchResults(movies) => assert_eq!(movies[0].id, 11),
            other => panic!("expected search results, got {:?}", other),
        }
    }

    #[test]
    fn typing_hides_previous_results_until_the_next_response() {
        let mut state = BrowseState::new();
        let token = type_query(&mut state, "heat");
        handle_message(&mut state, Message::SearchDebounceElapsed(token));
        handle_message(
            &mut state,
            Message::SearchResultsLoaded(token, Fetched::Ready(vec![movie(1, "Heat")])),
        );
        type_query(&mut state, "heath");
        assert!(matches!(state.view(), View::CategoryGrid(_)));
        assert!(state.header().is_typing);
    }

    #[test]
    fn failed_search_is_distinguishable_from_no_matches() {
        let mut state = BrowseState::new();
        let token = type_query(&mut state, "zzz");
        handle_message(&mut state, Message::SearchDebounceElapsed(token));
        handle_message(
            &mut state,
            Message::SearchResultsLoaded(token, Fetched::Failed(ApiError::RateLimit)),
        );
        match &state.search.as_ref().unwrap().phase {
            SearchPhase::Results { movies, error } => {
                assert!(movies.is_empty());
                assert_eq!(error, &Some(ApiError::RateLimit));
            }
            other => panic!("unexpected phase {:?}", other),
        }
    }

    #[test]
    fn back_from_genre_restores_prior_search_without_refetch() {
        let mut state = BrowseState::new();
        let token = type_query(&mut state, "love");
        handle_message(&mut state, Message::SearchDebounceElapsed(token));
        handle_message(
            &mut state,
            Message::SearchResultsLoaded(token, Fetched::Ready(vec![movie(5, "Love Actually")])),
        );

        let effects = handle_message(&mut state, Message::SelectGenre(drama()));
        let genre_token = match effects.as_slice() {
            [Effect::LoadGenreMovies { token, genre_id: 18 }] => *token,
            other => panic!("unexpected effects {:?}", other),
        };
        assert!(matches!(state.view(), View::GenreResults { loading: true, .. }));

        handle_message(
            &mut state,
            Message::GenreMoviesLoaded(genre_token, Fetched::Ready(vec![movie(6, "Heat")])),
        );
        assert_eq!(state.header().genre_movie_count, Some(1));

        let effects = handle_message(&mut state, Message::BackFromGenre);
        assert!(effects.is_empty());
        match state.view() {
            View::SearchResults(movies) => assert_eq!(movies[0].title, "Love Actually"),
            other => panic!("expected the prior search, got {:?}", other),
        }
    }

    #[test]
    fn stale_genre_response_is_ignored() {
        let mut state = BrowseState::new();
        let first = match handle_message(&mut state, Message::SelectGenre(drama())).as_slice() {
            [Effect::LoadGenreMovies { token, .. }] => *token,
            other => panic!("unexpected effects {:?}", other),
        };
        handle_message(&mut state, Message::BackFromGenre);
        handle_message(&mut state, Message::SelectGenre(drama()));
        handle_message(
            &mut state,
            Message::GenreMoviesLoaded(first, Fetched::Ready(vec![movie(1, "Old")])),
        );
        let genre = state.search.as_ref().and_then(|s| s.genre.as_ref()).unwrap();
        assert!(genre.loading);
        assert!(genre.movies.is_empty());
    }

    #[test]
    fn close_search_resets_to_upcoming() {
        let mut state = BrowseState::new();
        type_query(&mut state, "alien");
        handle_message(&mut state, Message::SelectGenre(drama()));

        let effects = handle_message(&mut state, Message::CloseSearch);
        assert_eq!(effects, vec![Effect::CancelPendingSearch]);
        assert!(state.search.is_none());
        assert!(matches!(state.view(), View::Upcoming(_)));
    }

    #[test]
    fn opening_a_movie_navigates_to_its_detail() {
        let mut state = BrowseState::new();
        assert_eq!(
            handle_message(&mut state, Message::OpenMovie(42)),
            vec![Effect::Navigate(Route::Detail(42))]
        );
    }
}
