//! Form handlers for the HTML pages.
//!
//! Input checks happen here, before the catalog is touched: a book needs a
//! title and an author, and remove/toggle need a title. Each POST answers
//! with the re-rendered page and a notice describing what happened.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use shelf_types::{BookDraft, SearchField, TypeError, DEFAULT_YEAR, MAX_YEAR, MIN_YEAR};

use crate::error::ServerResult;
use crate::render::{AddFormValues, Notice, View};
use crate::state::AppState;

/// Fields posted by the add form. The read checkbox is only sent when ticked.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddForm {
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    pub read: Option<String>,
}

impl AddForm {
    fn values(&self) -> AddFormValues {
        AddFormValues {
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year.clone(),
            genre: self.genre.clone(),
            read: self.read.is_some(),
        }
    }

    fn draft(&self) -> Result<BookDraft, String> {
        let year = match self.year.trim() {
            "" => None,
            y => Some(
                y.parse::<i32>()
                    .map_err(|_| format!("Publication year must be a number between {MIN_YEAR} and {MAX_YEAR}."))?,
            ),
        };
        Ok(BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            year,
            genre: self.genre.clone(),
            read: self.read.is_some(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TitleForm {
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub field: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenreQuery {
    pub genre: Option<String>,
}

fn html(status: StatusCode, body: String) -> Response {
    (status, Html(body)).into_response()
}

/// "Display All Books".
pub async fn library_page(State(state): State<AppState>) -> ServerResult<Html<String>> {
    let catalog = state.catalog()?;
    Ok(Html(state.pages().library(catalog.books(), None)?))
}

pub async fn add_page(State(state): State<AppState>) -> ServerResult<Html<String>> {
    let values = AddFormValues {
        year: DEFAULT_YEAR.to_string(),
        genre: shelf_types::SUGGESTED_GENRES[0].to_string(),
        ..Default::default()
    };
    Ok(Html(state.pages().add_form(&values, None)?))
}

pub async fn add_submit(State(state): State<AppState>, Form(form): Form<AddForm>) -> ServerResult<Response> {
    let pages = state.pages();
    let values = form.values();

    let book = match form.draft().and_then(|draft| draft.validate().map_err(|e| describe(&e))) {
        Ok(book) => book,
        Err(message) => {
            let body = pages.add_form(&values, Some(&Notice::error(message)))?;
            return Ok(html(StatusCode::UNPROCESSABLE_ENTITY, body));
        }
    };

    state.catalog()?.add(book)?;
    let blank = AddFormValues {
        year: DEFAULT_YEAR.to_string(),
        genre: values.genre,
        ..Default::default()
    };
    let body = pages.add_form(&blank, Some(&Notice::success("Book added successfully!")))?;
    Ok(html(StatusCode::OK, body))
}

fn describe(err: &TypeError) -> String {
    match err {
        TypeError::MissingField(_) => "Title and Author are required!".to_string(),
        other => format!("{other}"),
    }
}

pub async fn remove_page(State(state): State<AppState>) -> ServerResult<Html<String>> {
    Ok(Html(state.pages().title_form(View::Remove, "", None)?))
}

pub async fn remove_submit(State(state): State<AppState>, Form(form): Form<TitleForm>) -> ServerResult<Response> {
    let pages = state.pages();
    let title = form.title.trim();
    if title.is_empty() {
        let body = pages.title_form(View::Remove, "", Some(&Notice::warning("Please enter a book title.")))?;
        return Ok(html(StatusCode::UNPROCESSABLE_ENTITY, body));
    }

    let removed = state.catalog()?.remove(title)?;
    let notice = match removed {
        0 => Notice::info(format!("No book titled \"{title}\" was found.")),
        1 => Notice::success("Book removed successfully!"),
        n => Notice::success(format!("{n} books removed successfully!")),
    };
    Ok(html(StatusCode::OK, pages.title_form(View::Remove, "", Some(&notice))?))
}

pub async fn toggle_page(State(state): State<AppState>) -> ServerResult<Html<String>> {
    Ok(Html(state.pages().title_form(View::Toggle, "", None)?))
}

pub async fn toggle_submit(State(state): State<AppState>, Form(form): Form<TitleForm>) -> ServerResult<Response> {
    let pages = state.pages();
    let title = form.title.trim();
    if title.is_empty() {
        let body = pages.title_form(View::Toggle, "", Some(&Notice::warning("Please enter a book title.")))?;
        return Ok(html(StatusCode::UNPROCESSABLE_ENTITY, body));
    }

    let notice = match state.catalog()?.toggle_read(title)? {
        Some(true) => Notice::success("Marked as Read"),
        Some(false) => Notice::success("Marked as Unread"),
        None => Notice::info(format!("No book titled \"{title}\" was found.")),
    };
    Ok(html(StatusCode::OK, pages.title_form(View::Toggle, title, Some(&notice))?))
}

/// Search form; runs the search once a keyword (possibly empty) is submitted.
pub async fn search_page(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ServerResult<Response> {
    let pages = state.pages();
    let field = match query.field.as_deref().map(str::parse::<SearchField>) {
        None => SearchField::Title,
        Some(Ok(field)) => field,
        Some(Err(e)) => {
            let body = pages.search(SearchField::Title, "", None, Some(&Notice::error(e.to_string())))?;
            return Ok(html(StatusCode::BAD_REQUEST, body));
        }
    };

    let Some(keyword) = query.keyword else {
        return Ok(html(StatusCode::OK, pages.search(field, "", None, None)?));
    };

    let results = state.catalog()?.search(&keyword, field);
    let notice = results.is_empty().then(|| Notice::warning("No matching books found."));
    let body = pages.search(field, &keyword, Some(results.books()), notice.as_ref())?;
    Ok(html(StatusCode::OK, body))
}

/// Genre selector over the genres present; defaults to the first one.
pub async fn genre_page(
    State(state): State<AppState>,
    Query(query): Query<GenreQuery>,
) -> ServerResult<Html<String>> {
    let catalog = state.catalog()?;
    let genres = catalog.genres();
    let selected = query
        .genre
        .or_else(|| genres.first().cloned())
        .unwrap_or_default();

    let results = catalog.filter_by_genre(&selected);
    let notice = results.is_empty().then(|| Notice::info("No books found for this genre."));
    Ok(Html(state.pages().genre(&genres, &selected, results.books(), notice.as_ref())?))
}

pub async fn stats_page(State(state): State<AppState>) -> ServerResult<Html<String>> {
    let stats = state.catalog()?.statistics();
    Ok(Html(state.pages().statistics(&stats)?))
}

/// Empty the library and persist it. There is no undo.
pub async fn reset_submit(State(state): State<AppState>) -> ServerResult<Html<String>> {
    let mut catalog = state.catalog()?;
    catalog.reset()?;
    let notice = Notice::warning("Library data reset!");
    Ok(Html(state.pages().library(catalog.books(), Some(&notice))?))
}
