// src/state.rs
use std::sync::Arc;

use crate::services::leads::{InMemoryLeadStore, LeadStore};
use crate::services::llm::ChatModel;
use crate::services::rate_table::RateTable;

/// Shared handles every handler receives.
#[derive(Clone)]
pub struct AppState {
    pub rates: Arc<RateTable>,
    pub leads: Arc<dyn LeadStore>,
    pub chat: Arc<dyn ChatModel>,
}

impl AppState {
    pub fn new(rates: RateTable, chat: Arc<dyn ChatModel>) -> Self {
        AppState {
            rates: Arc::new(rates),
            leads: Arc::new(InMemoryLeadStore::new()),
            chat,
        }
    }
}
