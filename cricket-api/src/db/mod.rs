//! Match record storage
//!
//! The batch processor and the query service talk to storage only through
//! [`MatchStore`]. The process entry point builds one [`SqliteMatchStore`],
//! shares it through `AppState`, and closes it on shutdown.
//!
//! The contract is append-only: there is no update or delete.

use async_trait::async_trait;
use cricket_common::db::{MatchRecord, MatchSummary, NewMatch, Tournament};
use cricket_common::Result;

pub mod matches;

pub use matches::SqliteMatchStore;

/// Storage operations used by ingestion and queries
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Persist a new match, returning the store-assigned id
    async fn insert_match(&self, new_match: NewMatch<'_>) -> Result<i64>;

    /// Whether a match with this dedup key has already been stored
    async fn match_exists(&self, tournament_name: &str, match_id: &str) -> Result<bool>;

    /// Distinct tournament names
    async fn tournaments(&self) -> Result<Vec<Tournament>>;

    /// Distinct years stored for a tournament, descending (string order)
    async fn years(&self, tournament_name: &str) -> Result<Vec<String>>;

    /// Matches of one tournament year
    async fn matches_for_year(&self, tournament_name: &str, year: &str)
        -> Result<Vec<MatchSummary>>;

    /// Every stored match of a tournament
    async fn all_matches(&self, tournament_name: &str) -> Result<Vec<MatchRecord>>;

    /// Single match by store id
    async fn match_by_id(&self, id: i64) -> Result<Option<MatchRecord>>;
}
