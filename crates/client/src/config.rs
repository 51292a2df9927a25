//! Endpoint and project resolution from the environment.

use url::Url;

pub const ENV_COLLECTOR_ENDPOINT: &str = "PHOENIX_COLLECTOR_ENDPOINT";
pub const ENV_HOST: &str = "PHOENIX_HOST";
pub const ENV_PORT: &str = "PHOENIX_PORT";
pub const ENV_PROJECT_NAME: &str = "PHOENIX_PROJECT_NAME";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 6006;
const DEFAULT_PROJECT_NAME: &str = "default";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid port")]
    InvalidPort { var: &'static str, value: String },

    #[error("invalid endpoint {value:?}: {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("endpoint {0:?} cannot be used as a base URL")]
    NotABase(String),
}

/// Resolved client settings. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    /// Whether calls may be delegated to an in-process session.
    /// Always false when the endpoint was given explicitly.
    pub use_active_session_if_available: bool,
    /// Project used when an operation is not given one.
    pub default_project_name: String,
}

impl ClientConfig {
    /// Resolve the configuration from the process environment.
    pub fn from_env(
        endpoint: Option<&str>,
        use_active_session_if_available: bool,
    ) -> Result<Self, ConfigError> {
        Self::resolve(endpoint, use_active_session_if_available, |key| {
            std::env::var(key).ok()
        })
    }

    /// Resolve the configuration using `lookup` for environment variables.
    ///
    /// The base URL is the explicit `endpoint`, else `PHOENIX_COLLECTOR_ENDPOINT`,
    /// else `http://{PHOENIX_HOST}:{PHOENIX_PORT}`. A host of `0.0.0.0` is
    /// rewritten to `127.0.0.1`. Empty values count as unset.
    pub fn resolve(
        endpoint: Option<&str>,
        use_active_session_if_available: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let endpoint = endpoint.filter(|e| !e.is_empty());

        let base = match endpoint
            .map(str::to_string)
            .or_else(|| var(ENV_COLLECTOR_ENDPOINT))
        {
            Some(base) => base,
            None => {
                let mut host = var(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
                if host == "0.0.0.0" {
                    host = "127.0.0.1".to_string();
                }
                let port = match var(ENV_PORT) {
                    Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                        var: ENV_PORT,
                        value,
                    })?,
                    None => DEFAULT_PORT,
                };
                format!("http://{host}:{port}")
            }
        };

        let base_url = Url::parse(&base).map_err(|source| ConfigError::InvalidEndpoint {
            value: base.clone(),
            source,
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::NotABase(base));
        }

        Ok(ClientConfig {
            base_url,
            use_active_session_if_available: use_active_session_if_available
                && endpoint.is_none(),
            default_project_name: var(ENV_PROJECT_NAME)
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        })
    }

    /// The explicit project name if non-empty, else the default.
    pub fn project_name(&self, explicit: Option<&str>) -> String {
        explicit
            .filter(|name| !name.is_empty())
            .unwrap_or(self.default_project_name.as_str())
            .to_string()
    }
}
