//! Shared application state handed to every handler.

use crate::{config::Config, db::DbPool};

/// Cloned cheaply per request; the pool is internally reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
}
