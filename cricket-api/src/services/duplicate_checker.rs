//! Duplicate detection against stored matches
//!
//! The dedup key is (tournament name, match identifier). Every check goes
//! to the store; nothing is cached between files or batches.

use cricket_common::Result;

use crate::db::MatchStore;

/// Asks the store whether a dedup key is already taken
pub struct DuplicateChecker<'a> {
    store: &'a dyn MatchStore,
}

impl<'a> DuplicateChecker<'a> {
    pub fn new(store: &'a dyn MatchStore) -> Self {
        Self { store }
    }

    /// True when a match with this key was accepted earlier
    pub async fn is_duplicate(&self, tournament_name: &str, match_id: &str) -> Result<bool> {
        self.store.match_exists(tournament_name, match_id).await
    }
}
