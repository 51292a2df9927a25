//! Builds the outgoing request for each server operation.

use http::header::{HeaderValue, CONTENT_ENCODING, CONTENT_TYPE};
use http::{HeaderMap, Method};
use serde_json::{Map, Value};
use url::Url;

use crate::query::{to_iso_format, SpanQuery, TimeRange};
use crate::transport::{HttpRequest, RequestBody};

pub const SPANS_PATH: &str = "/v1/spans";
pub const EVALUATIONS_PATH: &str = "/v1/evaluations";
pub const TRACES_PATH: &str = "/v1/traces";
pub const VERSION_PATH: &str = "/arize_phoenix_version";

pub const PANDAS_ARROW: &str = "application/x-pandas-arrow";
pub const PROTOBUF: &str = "application/x-protobuf";
pub const PROJECT_NAME_HEADER: &str = "project-name";

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("project name {0:?} is not a valid header value")]
    ProjectName(String),
}

/// `GET /v1/spans`. Open ends of the time range are left out of the body.
pub fn query_spans(
    base_url: &Url,
    queries: &[SpanQuery],
    time_range: &TimeRange,
    root_spans_only: Option<bool>,
    project_name: &str,
) -> Result<HttpRequest, RequestError> {
    let mut body = Map::new();
    body.insert(
        "queries".to_string(),
        Value::Array(
            queries
                .iter()
                .map(|q| Value::Object(q.to_dict().clone()))
                .collect(),
        ),
    );
    if let Some(start) = &time_range.start {
        body.insert("start_time".to_string(), Value::String(to_iso_format(start)));
    }
    if let Some(stop) = &time_range.stop {
        body.insert("stop_time".to_string(), Value::String(to_iso_format(stop)));
    }
    body.insert(
        "root_spans_only".to_string(),
        root_spans_only.map_or(Value::Null, Value::Bool),
    );
    body.insert(
        "project_name".to_string(),
        Value::String(project_name.to_string()),
    );

    Ok(HttpRequest {
        method: Method::GET,
        url: base_url.join(SPANS_PATH)?,
        headers: HeaderMap::new(),
        body: RequestBody::Json(Value::Object(body)),
    })
}

/// `GET /v1/evaluations`.
pub fn get_evaluations(base_url: &Url, project_name: &str) -> Result<HttpRequest, RequestError> {
    let mut body = Map::new();
    body.insert(
        "project_name".to_string(),
        Value::String(project_name.to_string()),
    );
    Ok(HttpRequest {
        method: Method::GET,
        url: base_url.join(EVALUATIONS_PATH)?,
        headers: HeaderMap::new(),
        body: RequestBody::Json(Value::Object(body)),
    })
}

/// `POST /v1/evaluations` carrying one encoded evaluation table.
pub fn log_evaluations(
    base_url: &Url,
    table: Vec<u8>,
    project_name: &str,
) -> Result<HttpRequest, RequestError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(PANDAS_ARROW));
    if !project_name.is_empty() {
        let value = HeaderValue::from_str(project_name)
            .map_err(|_| RequestError::ProjectName(project_name.to_string()))?;
        headers.insert(PROJECT_NAME_HEADER, value);
    }
    Ok(HttpRequest {
        method: Method::POST,
        url: base_url.join(EVALUATIONS_PATH)?,
        headers,
        body: RequestBody::Bytes(table),
    })
}

/// `POST /v1/traces` carrying one gzipped export request.
pub fn log_span(base_url: &Url, gzipped: Vec<u8>) -> Result<HttpRequest, RequestError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(PROTOBUF));
    headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
    Ok(HttpRequest {
        method: Method::POST,
        url: base_url.join(TRACES_PATH)?,
        headers,
        body: RequestBody::Bytes(gzipped),
    })
}

/// `GET /arize_phoenix_version`, used as a liveness probe.
pub fn version(base_url: &Url) -> Result<HttpRequest, RequestError> {
    Ok(HttpRequest {
        method: Method::GET,
        url: base_url.join(VERSION_PATH)?,
        headers: HeaderMap::new(),
        body: RequestBody::Empty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("http://127.0.0.1:6006").unwrap()
    }

    fn json_body(req: &HttpRequest) -> &Value {
        match &req.body {
            RequestBody::Json(value) => value,
            other => panic!("expected a JSON body, got {:?}", other),
        }
    }

    #[test]
    fn test_query_spans_full_body() {
        let range = TimeRange::new(
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()),
        );
        let req =
            query_spans(&base(), &[SpanQuery::default()], &range, Some(true), "chat").unwrap();

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.as_str(), "http://127.0.0.1:6006/v1/spans");
        assert_eq!(
            json_body(&req),
            &json!({
                "queries": [{}],
                "start_time": "2024-01-01T00:00:00+00:00",
                "stop_time": "2024-01-02T00:00:00+00:00",
                "root_spans_only": true,
                "project_name": "chat",
            })
        );
    }

    #[test]
    fn test_query_spans_open_range() {
        let req = query_spans(&base(), &[SpanQuery::default()], &TimeRange::default(), None, "p")
            .unwrap();
        assert_eq!(
            json_body(&req),
            &json!({"queries": [{}], "root_spans_only": null, "project_name": "p"})
        );
    }

    #[test]
    fn test_base_path_is_replaced() {
        let base = Url::parse("http://phoenix.internal/some/prefix").unwrap();
        let req = get_evaluations(&base, "p").unwrap();
        assert_eq!(req.url.as_str(), "http://phoenix.internal/v1/evaluations");
        assert_eq!(json_body(&req), &json!({"project_name": "p"}));
    }

    #[test]
    fn test_log_evaluations_headers() {
        let req = log_evaluations(&base(), vec![1, 2, 3], "evals").unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.headers[CONTENT_TYPE], PANDAS_ARROW);
        assert_eq!(req.headers[PROJECT_NAME_HEADER], "evals");
        assert_eq!(req.body, RequestBody::Bytes(vec![1, 2, 3]));

        let req = log_evaluations(&base(), vec![], "").unwrap();
        assert!(req.headers.get(PROJECT_NAME_HEADER).is_none());

        assert!(matches!(
            log_evaluations(&base(), vec![], "bad\nname"),
            Err(RequestError::ProjectName(_))
        ));
    }

    #[test]
    fn test_log_span_headers() {
        let req = log_span(&base(), vec![0x1f, 0x8b]).unwrap();
        assert_eq!(req.url.path(), TRACES_PATH);
        assert_eq!(req.headers[CONTENT_TYPE], PROTOBUF);
        assert_eq!(req.headers[CONTENT_ENCODING], "gzip");
    }

    #[test]
    fn test_version_probe() {
        let req = version(&base()).unwrap();
        assert_eq!(req.url.path(), VERSION_PATH);
        assert_eq!(req.body, RequestBody::Empty);
    }

    proptest! {
        #[test]
        fn prop_open_time_range_ends_are_omitted(
            start in proptest::option::of(0i64..4_000_000_000),
            stop in proptest::option::of(0i64..4_000_000_000),
        ) {
            let to_dt = |secs: i64| Utc.timestamp_opt(secs, 0).unwrap();
            let range = TimeRange::new(start.map(to_dt), stop.map(to_dt));
            let req = query_spans(&base(), &[SpanQuery::default()], &range, None, "p").unwrap();
            let body = json_body(&req).as_object().unwrap();

            prop_assert_eq!(body.contains_key("start_time"), start.is_some());
            prop_assert_eq!(body.contains_key("stop_time"), stop.is_some());
            for key in ["start_time", "stop_time"] {
                if let Some(value) = body.get(key) {
                    prop_assert!(value.is_string());
                }
            }
        }
    }
}
