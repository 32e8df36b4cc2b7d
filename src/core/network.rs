use crate::game::user::ApiUser;
use log::{debug, warn};
use std::fmt;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Non-success HTTP status.
    Status(u16),
    /// Transport failure (DNS, TLS, timeout, ...).
    Http(String),
    /// Body was not a valid user record.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "server returned HTTP {code}"),
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Decode(e) => write!(f, "failed to parse user record: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Anything that can produce a user record by id. Called off the UI thread.
pub trait UserSource: Send + Sync {
    fn fetch_user(&self, id: u64) -> Result<ApiUser, FetchError>;
}

/// Exposes a ureq Agent with the shared request timeout.
pub fn get_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build()
        .into()
}

pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            agent: get_agent(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn user_url(&self, id: u64) -> String {
        format!("{}/users/{id}", self.base_url)
    }
}

impl UserSource for ApiClient {
    fn fetch_user(&self, id: u64) -> Result<ApiUser, FetchError> {
        let url = self.user_url(id);
        debug!("Requesting user {id} from {url}");
        let resp = match self.agent.get(&url).call() {
            Ok(resp) => resp,
            Err(ureq::Error::StatusCode(code)) => {
                warn!("User {id} request failed with HTTP {code}");
                return Err(FetchError::Status(code));
            }
            Err(e) => {
                warn!("HTTP error fetching user {id}: {e}");
                return Err(FetchError::Http(e.to_string()));
            }
        };
        let mut body = resp.into_body();
        match body.read_json::<ApiUser>() {
            Ok(user) => Ok(user),
            Err(e) => {
                warn!("Failed to decode user {id}: {e}");
                Err(FetchError::Decode(e.to_string()))
            }
        }
    }
}
