//! HTML rendering for the form-based pages.
//!
//! Templates live in `templates/` and are compiled once into [`Pages`]. Every
//! value is HTML-escaped by default; only fragments this module rendered
//! itself are spliced in unescaped through the `raw` formatter.

use serde::Serialize;
use shelf_types::{Book, SearchField, Statistics, MAX_YEAR, MIN_YEAR};
use upon::{fmt as upon_fmt, Engine, Template, Value};

use crate::error::ServerResult;

const LAYOUT: &str = include_str!("../templates/layout.html");
const BOOKS: &str = include_str!("../templates/books.html");
const ADD: &str = include_str!("../templates/add.html");
const TITLE: &str = include_str!("../templates/title.html");
const SEARCH: &str = include_str!("../templates/search.html");
const GENRE: &str = include_str!("../templates/genre.html");
const STATS: &str = include_str!("../templates/stats.html");

/// A page reachable from the sidebar menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Add,
    Remove,
    Search,
    Library,
    Statistics,
    Toggle,
    Genre,
}

impl View {
    /// Sidebar order.
    pub const MENU: [View; 7] = [
        View::Add,
        View::Remove,
        View::Search,
        View::Library,
        View::Statistics,
        View::Toggle,
        View::Genre,
    ];

    pub fn href(self) -> &'static str {
        match self {
            Self::Add => "/add",
            Self::Remove => "/remove",
            Self::Search => "/search",
            Self::Library => "/",
            Self::Statistics => "/stats",
            Self::Toggle => "/toggle",
            Self::Genre => "/genre",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Add a Book",
            Self::Remove => "Remove a Book",
            Self::Search => "Search for a Book",
            Self::Library => "Display All Books",
            Self::Statistics => "Display Statistics",
            Self::Toggle => "Mark Book as Read/Unread",
            Self::Genre => "Filter by Genre",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::Add => "Add a New Book",
            Self::Remove => "Remove a Book",
            Self::Search => "Search for a Book",
            Self::Library => "Your Library",
            Self::Statistics => "Library Statistics",
            Self::Toggle => "Update Book Read Status",
            Self::Genre => "Filter Books by Genre",
        }
    }
}

/// Severity of a user-facing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

/// A message shown above the page body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warning, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }
}

/// Values echoed back into the add form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddFormValues {
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    pub read: bool,
}

#[derive(Serialize)]
struct MenuItem {
    href: &'static str,
    label: &'static str,
    active: bool,
}

#[derive(Serialize)]
struct SelectOption<'a> {
    name: &'a str,
    selected: bool,
}

fn options<'a>(names: impl IntoIterator<Item = &'a str>, selected: &str) -> Vec<SelectOption<'a>> {
    names
        .into_iter()
        .map(|name| SelectOption { name, selected: name == selected })
        .collect()
}

#[derive(Serialize)]
struct LayoutContext<'a> {
    heading: &'static str,
    menu: Vec<MenuItem>,
    notice: Option<&'a Notice>,
    body: &'a str,
}

#[derive(Serialize)]
struct CardsContext<'a> {
    books: &'a [Book],
}

#[derive(Serialize)]
struct AddContext<'a> {
    title: &'a str,
    author: &'a str,
    year: &'a str,
    genres: Vec<SelectOption<'a>>,
    read: bool,
    min_year: i32,
    max_year: i32,
}

#[derive(Serialize)]
struct TitleContext<'a> {
    action: &'static str,
    prompt: &'static str,
    button: &'static str,
    title: &'a str,
}

#[derive(Serialize)]
struct SearchContext<'a> {
    by_title: bool,
    keyword: &'a str,
    results: String,
}

#[derive(Serialize)]
struct GenreContext<'a> {
    genres: Vec<SelectOption<'a>>,
    results: String,
}

#[derive(Serialize)]
struct StatsContext {
    total: usize,
    percent: String,
    bar_width: u8,
}

/// Compiled page templates.
pub struct Pages {
    engine: Engine<'static>,
    layout: Template<'static>,
    books: Template<'static>,
    add: Template<'static>,
    title: Template<'static>,
    search: Template<'static>,
    genre: Template<'static>,
    stats: Template<'static>,
}

impl std::fmt::Debug for Pages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pages").finish_non_exhaustive()
    }
}

impl Pages {
    /// Compile all page templates.
    pub fn new() -> ServerResult<Self> {
        let mut engine = Engine::new();
        engine.set_default_formatter(&escape_html_formatter);
        engine.add_formatter("raw", raw_formatter);

        let layout = engine.compile(LAYOUT)?;
        let books = engine.compile(BOOKS)?;
        let add = engine.compile(ADD)?;
        let title = engine.compile(TITLE)?;
        let search = engine.compile(SEARCH)?;
        let genre = engine.compile(GENRE)?;
        let stats = engine.compile(STATS)?;

        Ok(Self { engine, layout, books, add, title, search, genre, stats })
    }

    /// Wrap a rendered body in the page layout.
    fn page(&self, view: View, notice: Option<&Notice>, body: &str) -> ServerResult<String> {
        let menu = View::MENU
            .iter()
            .map(|&item| MenuItem { href: item.href(), label: item.label(), active: item == view })
            .collect();
        let ctx = LayoutContext { heading: view.heading(), menu, notice, body };
        Ok(self.layout.render(&self.engine, &ctx).to_string()?)
    }

    /// Book cards for the given books.
    fn cards(&self, books: &[Book]) -> ServerResult<String> {
        Ok(self
            .books
            .render(&self.engine, &CardsContext { books })
            .to_string()?)
    }

    /// "Display All Books", also used after a reset.
    pub fn library(&self, books: &[Book], notice: Option<&Notice>) -> ServerResult<String> {
        let empty = Notice::info("Your library is empty!");
        let notice = match notice {
            Some(notice) => Some(notice),
            None if books.is_empty() => Some(&empty),
            None => None,
        };
        self.page(View::Library, notice, &self.cards(books)?)
    }

    pub fn add_form(&self, values: &AddFormValues, notice: Option<&Notice>) -> ServerResult<String> {
        let genres = options(shelf_types::SUGGESTED_GENRES, &values.genre);
        let body = self
            .add
            .render(
                &self.engine,
                &AddContext {
                    title: &values.title,
                    author: &values.author,
                    year: &values.year,
                    genres,
                    read: values.read,
                    min_year: MIN_YEAR,
                    max_year: MAX_YEAR,
                },
            )
            .to_string()?;
        self.page(View::Add, notice, &body)
    }

    /// Title prompt shared by the remove and toggle pages.
    pub fn title_form(&self, view: View, title: &str, notice: Option<&Notice>) -> ServerResult<String> {
        let (action, prompt, button) = match view {
            View::Toggle => ("/toggle", "Enter the title of the book to toggle status", "Toggle Read/Unread"),
            _ => ("/remove", "Enter the title of the book to remove", "Remove Book"),
        };
        let body = self
            .title
            .render(&self.engine, &TitleContext { action, prompt, button, title })
            .to_string()?;
        self.page(view, notice, &body)
    }

    /// Search form, plus result cards when a search was run.
    pub fn search(
        &self,
        field: SearchField,
        keyword: &str,
        results: Option<&[Book]>,
        notice: Option<&Notice>,
    ) -> ServerResult<String> {
        let results = match results {
            Some(books) => self.cards(books)?,
            None => String::new(),
        };
        let body = self
            .search
            .render(
                &self.engine,
                &SearchContext {
                    by_title: field == SearchField::Title,
                    keyword,
                    results,
                },
            )
            .to_string()?;
        self.page(View::Search, notice, &body)
    }

    /// Genre selector over the genres present, plus the filtered cards.
    pub fn genre(
        &self,
        genres: &[String],
        selected: &str,
        results: &[Book],
        notice: Option<&Notice>,
    ) -> ServerResult<String> {
        let ctx = GenreContext {
            genres: options(genres.iter().map(String::as_str), selected),
            results: self.cards(results)?,
        };
        let body = self.genre.render(&self.engine, &ctx).to_string()?;
        self.page(View::Genre, notice, &body)
    }

    pub fn statistics(&self, stats: &Statistics) -> ServerResult<String> {
        let bar_width = (stats.read_fraction() * 100.0).round().clamp(0.0, 100.0) as u8;
        let body = self
            .stats
            .render(
                &self.engine,
                &StatsContext {
                    total: stats.total,
                    percent: format!("{:.2}", stats.percent_read),
                    bar_width,
                },
            )
            .to_string()?;
        self.page(View::Statistics, None, &body)
    }
}

/// Default formatter: strings are HTML-escaped, other values use upon's
/// default rendering.
fn escape_html_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
    use std::fmt::Write;

    match value {
        Value::String(s) => write!(f, "{}", escape_html(s))?,
        v => upon_fmt::default(f, v)?,
    };
    Ok(())
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Writes strings verbatim. Only used for fragments rendered by [`Pages`].
fn raw_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
    use std::fmt::Write;

    match value {
        Value::String(s) => write!(f, "{s}")?,
        v => upon_fmt::default(f, v)?,
    };
    Ok(())
}
