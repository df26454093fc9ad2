use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::booking::email::EmailClient;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::engine::swipe::SwipeSession;
use crate::models::booking::BookingSelection;
use crate::observability::metrics::Metrics;
use crate::store::{MemoryStore, Store};

/// One swipe deck, pinned to the selection whose quiz produced it.
pub struct SwipeEntry {
    pub selection_id: Uuid,
    pub session: SwipeSession,
}

pub struct AppState {
    pub catalog: Catalog,
    pub selections: DashMap<Uuid, BookingSelection>,
    pub swipes: DashMap<Uuid, SwipeEntry>,
    pub store: Arc<dyn Store>,
    pub email: EmailClient,
    pub metrics: Metrics,
    pub swipe_settle: Duration,
    variety_seed: Option<u64>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            catalog: Catalog::builtin(),
            selections: DashMap::new(),
            swipes: DashMap::new(),
            store: Arc::new(MemoryStore::new(config.event_buffer_size)),
            email: EmailClient::from_config(config),
            metrics: Metrics::new(),
            swipe_settle: Duration::from_millis(config.swipe_settle_ms),
            variety_seed: config.variety_seed,
        }
    }

    /// Rng for the buddy variety bonus. Seeded deterministically when the
    /// config pins a seed, otherwise from entropy.
    pub fn variety_rng(&self) -> StdRng {
        match self.variety_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
