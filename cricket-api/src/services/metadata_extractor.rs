//! Tournament and year extraction from a parsed match document
//!
//! Extraction never fails: a missing or wrong-shaped field falls back to
//! a sentinel value.

use serde_json::Value;

/// Tournament used when `info.event.name` is missing or not a string
pub const UNKNOWN_TOURNAMENT: &str = "UnknownTournament";

/// Year used when `info.season` is missing or has no leading integer
pub const UNKNOWN_YEAR: &str = "0";

/// Identifying metadata of one match document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchMetadata {
    pub tournament_name: String,
    pub year: String,
}

/// Extract `(tournament, year)` from a parsed document
pub fn extract_metadata(document: &Value) -> MatchMetadata {
    MatchMetadata {
        tournament_name: extract_tournament_name(document),
        year: extract_year(document),
    }
}

/// `info.event.name`, or [`UNKNOWN_TOURNAMENT`]
pub fn extract_tournament_name(document: &Value) -> String {
    lookup(document, &["info", "event", "name"])
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_TOURNAMENT)
        .to_string()
}

/// `info.season` normalized to an integer string, or [`UNKNOWN_YEAR`]
pub fn extract_year(document: &Value) -> String {
    lookup(document, &["info", "season"])
        .and_then(coerce_to_text)
        .and_then(|text| parse_leading_integer(&text))
        .map(|year| year.to_string())
        .unwrap_or_else(|| UNKNOWN_YEAR.to_string())
}

/// Walk nested objects; `None` as soon as a segment is missing or the
/// current value is not an object
fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, segment| current.as_object()?.get(*segment))
}

/// Text form of a season value
///
/// Arrays join their elements with `,`. Null, booleans and objects have
/// no numeric text and yield `None`.
fn coerce_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| coerce_to_text(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Null | Value::Bool(_) | Value::Object(_) => None,
    }
}

/// Parse the integer at the start of `text`
///
/// Leading whitespace is skipped, one optional sign is accepted, then the
/// longest run of ASCII digits is taken: `"23abc"` is 23, `"2023/24"` is
/// 2023, `"2023.7"` is 2023. `None` when there are no digits or the value
/// overflows i64.
pub fn parse_leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digit_count].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_metadata() {
        let doc = json!({"info": {"event": {"name": "Indian Premier League"}, "season": 2023}});
        assert_eq!(
            extract_metadata(&doc),
            MatchMetadata {
                tournament_name: "Indian Premier League".to_string(),
                year: "2023".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_tournament_path() {
        assert_eq!(extract_tournament_name(&json!({})), UNKNOWN_TOURNAMENT);
        assert_eq!(extract_tournament_name(&json!({"info": {}})), UNKNOWN_TOURNAMENT);
        assert_eq!(
            extract_tournament_name(&json!({"info": {"event": {}}})),
            UNKNOWN_TOURNAMENT
        );
        assert_eq!(extract_tournament_name(&json!([1, 2, 3])), UNKNOWN_TOURNAMENT);
        assert_eq!(extract_tournament_name(&Value::Null), UNKNOWN_TOURNAMENT);
    }

    #[test]
    fn test_wrong_shaped_tournament_segments() {
        assert_eq!(
            extract_tournament_name(&json!({"info": "IPL"})),
            UNKNOWN_TOURNAMENT
        );
        assert_eq!(
            extract_tournament_name(&json!({"info": {"event": "IPL"}})),
            UNKNOWN_TOURNAMENT
        );
        assert_eq!(
            extract_tournament_name(&json!({"info": {"event": {"name": 42}}})),
            UNKNOWN_TOURNAMENT
        );
        assert_eq!(
            extract_tournament_name(&json!({"info": {"event": {"name": ""}}})),
            UNKNOWN_TOURNAMENT
        );
    }

    #[test]
    fn test_season_missing_or_unusable() {
        assert_eq!(extract_year(&json!({"info": {}})), "0");
        assert_eq!(extract_year(&json!({"info": {"season": null}})), "0");
        assert_eq!(extract_year(&json!({"info": {"season": true}})), "0");
        assert_eq!(extract_year(&json!({"info": {"season": {"from": 2023}}})), "0");
        assert_eq!(extract_year(&json!({"info": {"season": "abc"}})), "0");
        assert_eq!(extract_year(&json!({"info": {"season": ""}})), "0");
    }

    #[test]
    fn test_season_numbers() {
        assert_eq!(extract_year(&json!({"info": {"season": 2023}})), "2023");
        assert_eq!(extract_year(&json!({"info": {"season": 2023.7}})), "2023");
        assert_eq!(extract_year(&json!({"info": {"season": 0}})), "0");
    }

    #[test]
    fn test_season_strings_use_leading_integer() {
        assert_eq!(extract_year(&json!({"info": {"season": "2023"}})), "2023");
        assert_eq!(extract_year(&json!({"info": {"season": "2023/24"}})), "2023");
        assert_eq!(extract_year(&json!({"info": {"season": "23abc"}})), "23");
        assert_eq!(extract_year(&json!({"info": {"season": "  2019 "}})), "2019");
        assert_eq!(extract_year(&json!({"info": {"season": "007"}})), "7");
    }

    #[test]
    fn test_season_array_joins_elements() {
        assert_eq!(extract_year(&json!({"info": {"season": ["2021/22"]}})), "2021");
        assert_eq!(extract_year(&json!({"info": {"season": [2020, 2021]}})), "2020");
        assert_eq!(extract_year(&json!({"info": {"season": []}})), "0");
    }

    #[test]
    fn test_parse_leading_integer_boundaries() {
        assert_eq!(parse_leading_integer("-12x"), Some(-12));
        assert_eq!(parse_leading_integer("+5"), Some(5));
        assert_eq!(parse_leading_integer("-0"), Some(0));
        assert_eq!(parse_leading_integer("-"), None);
        assert_eq!(parse_leading_integer("x12"), None);
        assert_eq!(parse_leading_integer("1 2"), Some(1));
        assert_eq!(parse_leading_integer("99999999999999999999"), None);
    }
}
