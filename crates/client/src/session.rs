//! In-process sessions that can answer client calls without the network.

use std::sync::{Arc, PoisonError, RwLock};

use phoenix_spans::TraceDataset;

use crate::decode::SpanQueryResult;
use crate::error::ClientError;
use crate::evals::Evaluations;
use crate::query::{SpanQuery, TimeRange};

/// A Phoenix instance running in this process.
///
/// When a [`Client`](crate::Client) has a session it forwards every
/// operation here with the project name already resolved, and returns the
/// result unchanged.
pub trait LocalSession: Send + Sync {
    fn query_spans(
        &self,
        queries: &[SpanQuery],
        time_range: &TimeRange,
        root_spans_only: Option<bool>,
        project_name: &str,
    ) -> Result<Option<SpanQueryResult>, ClientError>;

    fn get_evaluations(&self, project_name: &str) -> Result<Vec<Evaluations>, ClientError>;

    fn log_evaluations(
        &self,
        evals: &[Evaluations],
        project_name: &str,
    ) -> Result<(), ClientError>;

    fn log_traces(&self, dataset: &TraceDataset, project_name: &str) -> Result<(), ClientError>;
}

static ACTIVE_SESSION: RwLock<Option<Arc<dyn LocalSession>>> = RwLock::new(None);

/// Register (or with `None`, clear) the process-wide active session.
///
/// Clients look this up once, when they are built. Returns the previously
/// registered session.
pub fn set_active_session(
    session: Option<Arc<dyn LocalSession>>,
) -> Option<Arc<dyn LocalSession>> {
    let mut active = ACTIVE_SESSION
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *active, session)
}

/// The process-wide active session, if one is registered.
pub fn active_session() -> Option<Arc<dyn LocalSession>> {
    ACTIVE_SESSION
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
