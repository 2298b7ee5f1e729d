//! Per-file outcomes and the batch summary built from them

use serde::{Deserialize, Serialize};

/// Terminal state of one uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Stored under the given store id
    Inserted { id: i64 },
    /// Not UTF-8 JSON text
    ParseFailed { reason: String },
    /// Dedup key already stored
    Duplicate,
    /// Existence check or insert failed in storage
    StoreFailed { reason: String },
}

impl FileOutcome {
    /// Parse and storage failures are both reported as "failed"
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            FileOutcome::ParseFailed { .. } | FileOutcome::StoreFailed { .. }
        )
    }
}

/// Upload summary returned to the caller
///
/// Field names are part of the wire contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    #[serde(rename = "Uploaded")]
    pub uploaded: usize,

    #[serde(rename = "Failed")]
    pub failed: usize,

    #[serde(rename = "Duplicates")]
    pub duplicates: usize,

    /// Names of failed files, in upload order
    #[serde(rename = "FailedFiles")]
    pub failed_files: Vec<String>,

    /// Names of duplicate files, in upload order
    #[serde(rename = "DuplicateFiles")]
    pub duplicate_files: Vec<String>,
}

impl BatchResult {
    /// Fold per-file outcomes (in upload order) into a summary
    pub fn from_outcomes<I, S>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (S, FileOutcome)>,
        S: Into<String>,
    {
        outcomes
            .into_iter()
            .fold(Self::default(), |mut result, (name, outcome)| {
                result.record(name.into(), &outcome);
                result
            })
    }

    fn record(&mut self, name: String, outcome: &FileOutcome) {
        if outcome.is_failure() {
            self.failed += 1;
            self.failed_files.push(name);
        } else if let FileOutcome::Duplicate = outcome {
            self.duplicates += 1;
            self.duplicate_files.push(name);
        } else {
            self.uploaded += 1;
        }
    }

    /// Number of files accounted for
    pub fn total(&self) -> usize {
        self.uploaded + self.failed + self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_counts_and_preserves_order() {
        let outcomes = vec![
            ("a.json", FileOutcome::Inserted { id: 1 }),
            ("b.json", FileOutcome::ParseFailed { reason: "eof".to_string() }),
            ("c.json", FileOutcome::Duplicate),
            ("d.json", FileOutcome::StoreFailed { reason: "locked".to_string() }),
            ("e.json", FileOutcome::Duplicate),
            ("f.json", FileOutcome::Inserted { id: 2 }),
        ];

        let result = BatchResult::from_outcomes(outcomes);

        assert_eq!(result.uploaded, 2);
        assert_eq!(result.failed, 2);
        assert_eq!(result.duplicates, 2);
        assert_eq!(result.failed_files, vec!["b.json", "d.json"]);
        assert_eq!(result.duplicate_files, vec!["c.json", "e.json"]);
        assert_eq!(result.total(), 6);
    }

    #[test]
    fn test_empty_batch() {
        let result = BatchResult::from_outcomes(Vec::<(String, FileOutcome)>::new());
        assert_eq!(result, BatchResult::default());
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_wire_field_names() {
        let result = BatchResult::from_outcomes(vec![
            ("x.json", FileOutcome::Inserted { id: 7 }),
            ("y.json", FileOutcome::Duplicate),
        ]);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "Uploaded": 1,
                "Failed": 0,
                "Duplicates": 1,
                "FailedFiles": [],
                "DuplicateFiles": ["y.json"],
            })
        );
    }

    #[test]
    fn test_failure_classification() {
        assert!(FileOutcome::ParseFailed { reason: String::new() }.is_failure());
        assert!(FileOutcome::StoreFailed { reason: String::new() }.is_failure());
        assert!(!FileOutcome::Duplicate.is_failure());
        assert!(!FileOutcome::Inserted { id: 1 }.is_failure());
    }
}
