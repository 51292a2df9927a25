//! The process-wide session registry. Kept to a single test since the
//! registry is shared by every test in this binary.

mod common;

use std::sync::Arc;

use phoenix_client::{
    active_session, set_active_session, Client, ClientError, Evaluations, LocalSession,
    QueryOptions, SpanQuery, SpanQueryResult, TimeRange, TraceDataset,
};

use common::{spans_table, MockTransport, UnreachableTransport};

struct FixedSession;

impl LocalSession for FixedSession {
    fn query_spans(
        &self,
        _queries: &[SpanQuery],
        _time_range: &TimeRange,
        _root_spans_only: Option<bool>,
        _project_name: &str,
    ) -> Result<Option<SpanQueryResult>, ClientError> {
        Ok(Some(SpanQueryResult::Single(spans_table(&["local"]))))
    }

    fn get_evaluations(&self, _project_name: &str) -> Result<Vec<Evaluations>, ClientError> {
        Ok(Vec::new())
    }

    fn log_evaluations(
        &self,
        _evals: &[Evaluations],
        _project_name: &str,
    ) -> Result<(), ClientError> {
        Ok(())
    }

    fn log_traces(&self, _dataset: &TraceDataset, _project_name: &str) -> Result<(), ClientError> {
        Ok(())
    }
}

#[test]
fn test_registry_is_read_once_at_construction() {
    assert!(active_session().is_none());
    assert!(set_active_session(Some(Arc::new(FixedSession))).is_none());

    // Picked up from the registry.
    let local = Client::builder()
        .transport(UnreachableTransport)
        .build()
        .unwrap();

    // An explicit endpoint never consults the registry.
    let transport = MockTransport::status(404, "");
    let remote = Client::builder()
        .endpoint("http://phoenix.test:6006")
        .transport(transport.clone())
        .build()
        .unwrap();

    // Clearing the registry does not affect clients already built.
    assert!(set_active_session(None).is_some());

    let result = local
        .query_spans(Vec::new(), &QueryOptions::default())
        .unwrap();
    assert_eq!(result, Some(SpanQueryResult::Single(spans_table(&["local"]))));

    assert_eq!(
        remote
            .query_spans(Vec::new(), &QueryOptions::default())
            .unwrap(),
        None
    );
    assert_eq!(transport.requests().len(), 1);

    // Opted out.
    set_active_session(Some(Arc::new(FixedSession)));
    let opted_out = Client::builder()
        .use_active_session_if_available(false)
        .transport(UnreachableTransport)
        .build()
        .unwrap();
    assert!(opted_out.get_evaluations(None).is_err());
    set_active_session(None);
}
