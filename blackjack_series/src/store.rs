use crate::error::UserError;
use blackjack_lib::SeriesState;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

pub type MatchId = String;

/// Default number of matches kept before the least recently used one is evicted.
pub const DEFAULT_CAPACITY: usize = 10_000;
/// Default time a match may sit untouched before it is discarded.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

/// A stored match along with the bookkeeping needed to evict it.
struct StoredMatch {
    state: SeriesState,
    last_touched: Instant,
    /// Monotonic use counter, the smallest value is the least recently used match.
    sequence: u64,
}

struct Matches {
    entries: HashMap<MatchId, StoredMatch>,
    next_sequence: u64,
}

impl Matches {
    fn touch(&mut self) -> u64 {
        self.next_sequence += 1;
        self.next_sequence
    }
}

/// Server side storage for every live match, keyed by match id.
/// Each action runs with the store locked, so actions against a match are applied one at a time and in order.
/// Matches untouched for longer than the idle ttl are dropped, and once `capacity` matches are stored the least
/// recently used one makes room for a new one.
pub struct MatchStore {
    matches: Mutex<Matches>,
    capacity: usize,
    idle_ttl: Duration,
}

impl Default for MatchStore {
    fn default() -> Self {
        MatchStore::new()
    }
}

impl MatchStore {
    /// Creates a store with `DEFAULT_CAPACITY` and `DEFAULT_IDLE_TTL`.
    pub fn new() -> Self {
        MatchStore::with_limits(DEFAULT_CAPACITY, DEFAULT_IDLE_TTL)
    }

    /// Creates a store holding at most `capacity` matches, each discarded after `idle_ttl` without activity.
    /// A capacity of zero is treated as one.
    pub fn with_limits(capacity: usize, idle_ttl: Duration) -> Self {
        MatchStore {
            matches: Mutex::new(Matches {
                entries: HashMap::new(),
                next_sequence: 0,
            }),
            capacity: capacity.max(1),
            idle_ttl,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Matches>, UserError> {
        let mut guard = self.matches.lock().map_err(|_| {
            log::error!("match store lock is poisoned");
            UserError::InternalError
        })?;
        self.evict_idle(&mut guard);
        Ok(guard)
    }

    fn evict_idle(&self, matches: &mut Matches) {
        let ttl = self.idle_ttl;
        let before = matches.entries.len();
        matches
            .entries
            .retain(|_, stored| stored.last_touched.elapsed() < ttl);
        let evicted = before - matches.entries.len();
        if evicted > 0 {
            log::debug!("evicted {evicted} idle matches");
        }
    }

    /// Stores `state` under a newly generated id and returns the id. When `replacing` names a match it is
    /// discarded first, so a player restarting never leaves their previous match behind.
    pub fn create(
        &self,
        state: SeriesState,
        replacing: Option<&str>,
    ) -> Result<MatchId, UserError> {
        let mut guard = self.lock()?;
        if let Some(old) = replacing {
            if guard.entries.remove(old).is_some() {
                log::info!("match {old} replaced by a new match");
            }
        }

        while guard.entries.len() >= self.capacity {
            let oldest = guard
                .entries
                .iter()
                .min_by_key(|(_, stored)| stored.sequence)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    log::warn!("match store full, evicting match {id}");
                    guard.entries.remove(&id);
                }
                None => break,
            }
        }

        let id = loop {
            let candidate = format!("{:016x}", rand::random::<u64>());
            if !guard.entries.contains_key(&candidate) {
                break candidate;
            }
        };
        let sequence = guard.touch();
        guard.entries.insert(
            id.clone(),
            StoredMatch {
                state,
                last_touched: Instant::now(),
                sequence,
            },
        );
        Ok(id)
    }

    /// Returns a copy of the match stored under `id`, refreshing its idle timer.
    pub fn get(&self, id: &str) -> Result<SeriesState, UserError> {
        let mut guard = self.lock()?;
        let sequence = guard.touch();
        let stored = guard
            .entries
            .get_mut(id)
            .ok_or_else(|| UserError::MatchNotFound(id.to_string()))?;
        stored.last_touched = Instant::now();
        stored.sequence = sequence;
        Ok(stored.state.clone())
    }

    /// Runs `action` against a copy of the match and writes the copy back only if `action` succeeds.
    pub fn update<T, F>(&self, id: &str, action: F) -> Result<T, UserError>
    where
        F: FnOnce(&mut SeriesState) -> Result<T, UserError>,
    {
        let mut guard = self.lock()?;
        let sequence = guard.touch();
        let stored = guard
            .entries
            .get_mut(id)
            .ok_or_else(|| UserError::MatchNotFound(id.to_string()))?;
        let mut state = stored.state.clone();
        let out = action(&mut state)?;
        stored.state = state;
        stored.last_touched = Instant::now();
        stored.sequence = sequence;
        Ok(out)
    }

    /// Discards a match. Returns false if there was nothing to discard.
    pub fn remove(&self, id: &str) -> Result<bool, UserError> {
        Ok(self.lock()?.entries.remove(id).is_some())
    }

    /// Number of live matches, idle ones are dropped before counting.
    pub fn len(&self) -> Result<usize, UserError> {
        Ok(self.lock()?.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, UserError> {
        Ok(self.lock()?.entries.is_empty())
    }
}
