use std::sync::{Arc, Mutex, MutexGuard};

use shelf_store::Catalog;

use crate::error::{ServerError, ServerResult};
use crate::render::Pages;

/// Shared handler state.
///
/// The catalog sits behind a mutex so each request runs its catalog call to
/// completion before the next one starts.
#[derive(Clone, Debug)]
pub struct AppState {
    catalog: Arc<Mutex<Catalog>>,
    pages: Arc<Pages>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> ServerResult<Self> {
        Ok(Self {
            catalog: Arc::new(Mutex::new(catalog)),
            pages: Arc::new(Pages::new()?),
        })
    }

    pub fn catalog(&self) -> ServerResult<MutexGuard<'_, Catalog>> {
        self.catalog
            .lock()
            .map_err(|_| ServerError::Internal("catalog lock poisoned".into()))
    }

    pub fn pages(&self) -> &Pages {
        &self.pages
    }
}
