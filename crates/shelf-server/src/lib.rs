//! HTTP front end for Shelf.
//!
//! Serves the form-based pages (add, remove, search, list, statistics,
//! read/unread toggle, genre filter, reset) over a single [`Catalog`]
//! session, plus a small JSON API under `/v1`.
//!
//! [`Catalog`]: shelf_store::Catalog

pub mod config;
pub mod error;
pub mod handler;
pub mod pages;
pub mod render;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use render::{Notice, NoticeKind, Pages, View};
pub use server::ShelfServer;
pub use state::AppState;
