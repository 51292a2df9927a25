use std::sync::Arc;
use std::time::Duration;

use phoenix_spans::TraceDataset;
use url::Url;

use crate::codec;
use crate::config::ClientConfig;
use crate::decode::{self, SpanQueryResult};
use crate::error::ClientError;
use crate::evals::Evaluations;
use crate::query::{normalize_queries, QueryOptions, SpanQuery};
use crate::request;
use crate::session::{self, LocalSession};
use crate::status::{self, QueryOutcome};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Builder for [`Client`].
pub struct ClientBuilder {
    endpoint: Option<String>,
    use_active_session_if_available: bool,
    local_session: Option<Arc<dyn LocalSession>>,
    transport: Option<Box<dyn Transport>>,
    timeout: Option<Duration>,
    default_project_name: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        ClientBuilder {
            endpoint: None,
            use_active_session_if_available: true,
            local_session: None,
            transport: None,
            timeout: None,
            default_project_name: None,
        }
    }
}

impl ClientBuilder {
    /// Server base URL, e.g. `http://localhost:6006`.
    ///
    /// Giving an endpoint explicitly disables the process-wide session lookup.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn use_active_session_if_available(mut self, enabled: bool) -> Self {
        self.use_active_session_if_available = enabled;
        self
    }

    /// Delegate every call to `session` instead of the server.
    pub fn local_session(mut self, session: Arc<dyn LocalSession>) -> Self {
        self.local_session = Some(session);
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Request timeout for the default transport.
    ///
    /// Has no effect when a transport is given with [`ClientBuilder::transport`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Project used when an operation is not given one. Overrides `PHOENIX_PROJECT_NAME`.
    pub fn default_project_name(mut self, name: impl Into<String>) -> Self {
        self.default_project_name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Client, ClientError> {
        let mut config = ClientConfig::from_env(
            self.endpoint.as_deref(),
            self.use_active_session_if_available,
        )?;
        if let Some(name) = self.default_project_name.filter(|n| !n.is_empty()) {
            config.default_project_name = name;
        }

        let local_session = match self.local_session {
            Some(session) => Some(session),
            None if config.use_active_session_if_available => session::active_session(),
            None => None,
        };

        let transport: Box<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Box::new(ReqwestTransport::new(self.timeout)?),
        };

        let client = Client {
            config,
            transport,
            local_session,
        };
        if client.local_session.is_none() {
            client.warn_if_phoenix_is_not_running();
        }
        Ok(client)
    }
}

/// Client for a Phoenix server.
///
/// Every call blocks until the server (or the local session) has answered.
/// Uploads are sent one request per item, in order, and stop at the first
/// failure.
pub struct Client {
    config: ClientConfig,
    transport: Box<dyn Transport>,
    local_session: Option<Arc<dyn LocalSession>>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// A client configured from the environment.
    pub fn new() -> Result<Self, ClientError> {
        Self::builder().build()
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Query spans. With no queries, a single unfiltered query is sent.
    ///
    /// Returns `None` when nothing matched.
    pub fn query_spans(
        &self,
        queries: impl IntoIterator<Item = SpanQuery>,
        options: &QueryOptions,
    ) -> Result<Option<SpanQueryResult>, ClientError> {
        let project_name = self.config.project_name(options.project_name.as_deref());
        let queries = normalize_queries(queries);

        if let Some(session) = &self.local_session {
            return session.query_spans(
                &queries,
                &options.time_range,
                options.root_spans_only,
                &project_name,
            );
        }

        let req = request::query_spans(
            &self.config.base_url,
            &queries,
            &options.time_range,
            options.root_spans_only,
            &project_name,
        )?;
        match status::classify_query(self.send(req)?)? {
            QueryOutcome::NotFound => {
                log::info!("No spans found.");
                Ok(None)
            }
            QueryOutcome::Found(body) => Ok(decode::collapse(decode::decode_tables(&body)?)),
        }
    }

    /// Fetch every evaluation logged for the project. Empty when there are none.
    pub fn get_evaluations(
        &self,
        project_name: Option<&str>,
    ) -> Result<Vec<Evaluations>, ClientError> {
        let project_name = self.config.project_name(project_name);

        if let Some(session) = &self.local_session {
            return session.get_evaluations(&project_name);
        }

        let req = request::get_evaluations(&self.config.base_url, &project_name)?;
        match status::classify_query(self.send(req)?)? {
            QueryOutcome::NotFound => {
                log::info!("No evaluations found.");
                Ok(Vec::new())
            }
            QueryOutcome::Found(body) => decode::decode_tables(&body)?
                .into_iter()
                .map(|table| Evaluations::from_table(table).map_err(ClientError::from))
                .collect(),
        }
    }

    /// Upload evaluations, one request per item.
    pub fn log_evaluations(
        &self,
        evals: &[Evaluations],
        project_name: Option<&str>,
    ) -> Result<(), ClientError> {
        let project_name = self.config.project_name(project_name);

        if let Some(session) = &self.local_session {
            return session.log_evaluations(evals, &project_name);
        }

        for evaluation in evals {
            let table = codec::encode_table(&evaluation.to_table()?)?;
            let req = request::log_evaluations(&self.config.base_url, table, &project_name)?;
            status::ensure_success(self.send(req)?)?;
        }
        Ok(())
    }

    /// Export every span of `dataset`, one request per span.
    ///
    /// Nothing is sent if any span fails to convert.
    pub fn log_traces(
        &self,
        dataset: &TraceDataset,
        project_name: Option<&str>,
    ) -> Result<(), ClientError> {
        let project_name = self.config.project_name(project_name);

        if let Some(session) = &self.local_session {
            return session.log_traces(dataset, &project_name);
        }

        // Encode everything first so a bad span aborts before anything is sent.
        let bodies = dataset
            .to_spans()
            .map(|span| phoenix_otlp::encode_span(&project_name, span))
            .collect::<Result<Vec<_>, _>>()?;
        for body in bodies {
            let req = request::log_span(&self.config.base_url, body)?;
            status::ensure_success(self.send(req)?)?;
        }
        Ok(())
    }

    /// Release the transport now rather than when the client goes out of scope.
    pub fn close(self) {
        drop(self);
    }

    fn send(&self, req: HttpRequest) -> Result<HttpResponse, ClientError> {
        log::debug!("{} {}", req.method, req.url);
        let response = self.transport.send(req)?;
        log::debug!("response status {}", response.status);
        Ok(response)
    }

    fn warn_if_phoenix_is_not_running(&self) {
        let probe = request::version(&self.config.base_url)
            .map_err(ClientError::from)
            .and_then(|req| self.send(req))
            .and_then(status::ensure_success);
        if let Err(err) = probe {
            log::warn!(
                "Arize Phoenix is not running on {}: {}",
                self.config.base_url,
                err
            );
        }
    }
}
