//! Time-based view cache with explicit invalidation

use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

pub const DASHBOARD_KEY: &str = "/";

pub fn dashboard_key() -> String {
    DASHBOARD_KEY.to_string()
}

pub fn analysis_key(symbol: &str) -> String {
    format!("/analysis/{}", symbol)
}

pub fn chart_key(symbol: &str, variant: &str) -> String {
    format!("/analysis/{}/chart?variant={}", symbol, variant)
}

/// Generation of a cache scope, taken before the store is read.
///
/// A scope is a symbol for analysis and chart views, or [`DASHBOARD_KEY`].
/// Invalidating a scope bumps its generation, so a view built from reads
/// that started earlier is refused by [`ViewCache::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    scope: String,
    generation: u64,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, (Instant, Value)>,
    generations: HashMap<String, u64>,
}

impl CacheState {
    fn generation(&self, scope: &str) -> u64 {
        self.generations.get(scope).copied().unwrap_or(0)
    }

    fn bump(&mut self, scope: &str) {
        *self.generations.entry(scope.to_string()).or_insert(0) += 1;
    }
}

pub struct ViewCache {
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl ViewCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Expired entries read as misses and are left for the next insert.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let state = self.state.read().await;
        state
            .entries
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    pub async fn stamp(&self, scope: &str) -> Stamp {
        let generation = self.state.read().await.generation(scope);
        Stamp {
            scope: scope.to_string(),
            generation,
        }
    }

    /// Stores the view unless its scope was invalidated after `stamp` was taken.
    pub async fn insert(&self, key: impl Into<String>, value: Value, stamp: &Stamp) -> bool {
        let key = key.into();
        let mut state = self.state.write().await;
        if state.generation(&stamp.scope) != stamp.generation {
            debug!(key = %key, scope = %stamp.scope, "Stale view not cached");
            return false;
        }

        let ttl = self.ttl;
        state
            .entries
            .retain(|_, (stored_at, _)| stored_at.elapsed() < ttl);
        state.entries.insert(key, (Instant::now(), value));
        true
    }

    pub async fn invalidate_dashboard(&self) -> bool {
        let mut state = self.state.write().await;
        state.bump(DASHBOARD_KEY);
        let removed = state.entries.remove(DASHBOARD_KEY).is_some();
        debug!(removed, "Dashboard view invalidated");
        removed
    }

    /// Drops the analysis view of a symbol and every chart view under it.
    pub async fn invalidate_symbol(&self, symbol: &str) -> usize {
        let base = analysis_key(symbol);
        let nested = format!("{}/", base);
        let mut state = self.state.write().await;
        state.bump(symbol);
        let before = state.entries.len();
        state
            .entries
            .retain(|key, _| key != &base && !key.starts_with(&nested));
        let removed = before - state.entries.len();
        debug!(symbol = %symbol, removed, "View cache invalidated for symbol");
        removed
    }
}
