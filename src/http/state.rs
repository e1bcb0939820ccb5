use std::sync::Arc;

use crate::coach::CoachClient;
use crate::drill::DrillSession;
use crate::prompts::Corpus;
use crate::store::Store;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub corpus: Arc<Corpus>,
    pub drill: Arc<DrillSession>,
}

impl AppState {
    pub fn new(store: Arc<Store>, corpus: Arc<Corpus>, coach: Arc<dyn CoachClient>) -> Self {
        let drill = Arc::new(DrillSession::new(
            Arc::clone(&store),
            Arc::clone(&corpus),
            coach,
        ));
        Self {
            store,
            corpus,
            drill,
        }
    }
}
