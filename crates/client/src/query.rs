use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A span filter, passed to the server as an opaque JSON object.
///
/// The default query selects every span.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanQuery(Map<String, Value>);

impl SpanQuery {
    pub fn from_dict(dict: Map<String, Value>) -> Self {
        SpanQuery(dict)
    }

    pub fn to_dict(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueryParseError {
    #[error("invalid query JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("query must be a JSON object")]
    NotAnObject,
}

impl FromStr for SpanQuery {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match serde_json::from_str(s)? {
            Value::Object(dict) => Ok(SpanQuery(dict)),
            _ => Err(QueryParseError::NotAnObject),
        }
    }
}

/// Substitute the default query when none were given.
pub fn normalize_queries(queries: impl IntoIterator<Item = SpanQuery>) -> Vec<SpanQuery> {
    let mut queries: Vec<_> = queries.into_iter().collect();
    if queries.is_empty() {
        queries.push(SpanQuery::default());
    }
    queries
}

/// Bounds on span start times. Either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<DateTime<Utc>>,
    pub stop: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn new(start: Option<DateTime<Utc>>, stop: Option<DateTime<Utc>>) -> Self {
        TimeRange { start, stop }
    }
}

/// ISO-8601 text with an explicit `+00:00` offset, at most microsecond precision.
pub fn to_iso_format(dt: &DateTime<Utc>) -> String {
    dt.trunc_subsecs(6)
        .to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Options for [`Client::query_spans`](crate::Client::query_spans).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub time_range: TimeRange,
    pub root_spans_only: Option<bool>,
    pub project_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_parse_query() {
        let q: SpanQuery = r#"{"filter": {"condition": "span_kind == 'LLM'"}}"#.parse().unwrap();
        assert_eq!(q.to_dict()["filter"]["condition"], "span_kind == 'LLM'");
        assert_matches!("[1]".parse::<SpanQuery>(), Err(QueryParseError::NotAnObject));
        assert_matches!("{".parse::<SpanQuery>(), Err(QueryParseError::Json(_)));
    }

    #[test]
    fn test_default_query_serializes_empty() {
        assert_eq!(serde_json::to_value(SpanQuery::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_normalize_queries() {
        assert_eq!(normalize_queries(vec![]), vec![SpanQuery::default()]);

        let q = SpanQuery::from_dict(json!({"limit": 5}).as_object().cloned().unwrap());
        assert_eq!(normalize_queries(vec![q.clone()]), vec![q]);
    }

    #[test]
    fn test_to_iso_format() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(to_iso_format(&dt), "2024-03-01T12:30:00+00:00");
    }

    #[test]
    fn test_to_iso_format_truncates_to_micros() {
        let dt = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        assert_eq!(to_iso_format(&dt), "2023-11-14T22:13:20.123456+00:00");

        let dt = Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
        assert_eq!(to_iso_format(&dt), "2023-11-14T22:13:20.500+00:00");
    }
}
