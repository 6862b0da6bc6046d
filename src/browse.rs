use crate::media::{ApiError, Category, Movie};

/// Issued in increasing order; only the latest one for a slot is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase {
    /// Empty query: the category grid is shown.
    Idle,
    /// Waiting out the debounce, or waiting on the request it started.
    Pending {
        token: RequestToken,
        dispatched: bool,
    },
    Results {
        movies: Vec<Movie>,
        error: Option<ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreBrowse {
    pub category: Category,
    pub token: RequestToken,
    pub movies: Vec<Movie>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    pub query: String,
    pub phase: SearchPhase,
    /// Sits on top of the search underneath it; dropping it reveals that search untouched.
    pub genre: Option<GenreBrowse>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            phase: SearchPhase::Idle,
            genre: None,
        }
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.phase, SearchPhase::Pending { .. })
    }

    pub fn visible_results(&self) -> Option<&[Movie]> {
        match &self.phase {
            SearchPhase::Results { movies, .. } => Some(movies),
            _ => None,
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

/// What the browse screen should draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Upcoming(&'a [Movie]),
    CategoryGrid(&'a [Category]),
    SearchResults(&'a [Movie]),
    GenreResults {
        genre: &'a Category,
        movies: &'a [Movie],
        loading: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHeader<'a> {
    pub is_searching: bool,
    pub query: &'a str,
    pub result_count: usize,
    pub is_typing: bool,
    pub show_back: bool,
    pub genre_title: Option<&'a str>,
    pub genre_movie_count: Option<usize>,
}

impl SearchHeader<'_> {
    pub fn results_label(&self) -> Option<String> {
        if self.result_count > 0 && !self.is_typing && !self.query.is_empty() {
            Some(format!("{} Results Found", self.result_count))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    pub upcoming: Vec<Movie>,
    pub upcoming_error: Option<ApiError>,
    pub categories: Vec<Category>,
    pub categories_error: Option<ApiError>,
    pub search: Option<SearchSession>,
    last_token: u64,
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue_token(&mut self) -> RequestToken {
        self.last_token += 1;
        RequestToken(self.last_token)
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    pub fn session_mut(&mut self) -> &mut SearchSession {
        self.search.get_or_insert_with(SearchSession::new)
    }

    /// Genre results win over search results, which win over the category
    /// grid; outside a search session the upcoming list is shown.
    pub fn view(&self) -> View<'_> {
        let Some(session) = &self.search else {
            return View::Upcoming(&self.upcoming);
        };
        if let Some(genre) = &session.genre {
            return View::GenreResults {
                genre: &genre.category,
                movies: &genre.movies,
                loading: genre.loading,
            };
        }
        match session.visible_results() {
            Some(movies) => View::SearchResults(movies),
            None => View::CategoryGrid(&self.categories),
        }
    }

    pub fn header(&self) -> SearchHeader<'_> {
        match &self.search {
            None => SearchHeader {
                is_searching: false,
                query: "",
                result_count: 0,
                is_typing: false,
                show_back: false,
                genre_title: None,
                genre_movie_count: None,
            },
            Some(session) => SearchHeader {
                is_searching: true,
                query: &session.query,
                result_count: session.visible_results().map_or(0, <[Movie]>::len),
                is_typing: session.is_typing(),
                show_back: session.genre.is_some(),
                genre_title: session.genre.as_ref().map(|g| g.category.name.as_str()),
                genre_movie_count: session.genre.as_ref().map(|g| g.movies.len()),
            },
        }
    }
}
