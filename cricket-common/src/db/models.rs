//! Database models

use serde::{Deserialize, Serialize};

/// A stored match, one row of the Matches table
///
/// Serialized with the table's column names, which is the shape the
/// "all matches for a tournament" listing returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchRecord {
    pub id: i64,
    pub tournament_name: String,
    pub year: String,
    /// Uploaded file name; with `tournament_name` forms the dedup key
    pub match_id: String,
    /// Document text exactly as uploaded
    pub json_data: String,
}

/// Values for a new Matches row (the store assigns `Id`)
#[derive(Debug, Clone, Copy)]
pub struct NewMatch<'a> {
    pub tournament_name: &'a str,
    pub year: &'a str,
    pub match_id: &'a str,
    pub json_data: &'a str,
}

/// Row returned when listing the matches of one tournament year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub id: i64,
    pub match_id: String,
    pub json_data: String,
}

/// Tournament listing entry; `id` and `name` are both the tournament name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: String,
    pub name: String,
}

impl Tournament {
    pub fn new(name: String) -> Self {
        Self {
            id: name.clone(),
            name,
        }
    }
}
