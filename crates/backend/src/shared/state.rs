use contracts::shared::format::CurrencyFormat;
use std::path::PathBuf;
use std::sync::Arc;

use crate::system::session::SessionStore;

/// Shared handler state; sessions are the only mutable part
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub dataset_path: PathBuf,
    pub currency: CurrencyFormat,
}

impl AppState {
    pub fn new(dataset_path: PathBuf, currency: CurrencyFormat) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new()),
            dataset_path,
            currency,
        }
    }
}
