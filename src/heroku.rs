//! Heroku Platform API access
//!
//! The store only needs one question answered: which apps does this API key
//! own? [`AppSource`] is that question; [`HerokuClient`] answers it with the
//! Platform API's `GET /apps`.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::HerokuConfig;

/// Media type selecting version 3 of the Platform API
const ACCEPT: &str = "application/vnd.heroku+json; version=3";

/// Errors from an [`AppSource`]
#[derive(Debug, Error)]
pub enum SourceError {
    /// The service refused the key (revoked, mistyped, expired)
    #[error("API key rejected: HTTP {status}")]
    Rejected { status: u16 },

    /// The service could not be reached or answered with garbage
    #[error("{0}")]
    Transport(String),
}

/// Something that can list the apps owned by an API key
pub trait AppSource {
    fn apps_for_key(&self, key: &str) -> Result<Vec<String>, SourceError>;
}

/// Fields of a Platform API app we care about
#[derive(Debug, Deserialize)]
struct HerokuApp {
    name: String,
}

/// Blocking Platform API client
pub struct HerokuClient {
    agent: ureq::Agent,
    api_url: String,
}

impl HerokuClient {
    pub fn new(config: &HerokuConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build();

        Self {
            agent,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for HerokuClient {
    fn default() -> Self {
        Self::new(&HerokuConfig::default())
    }
}

impl AppSource for HerokuClient {
    /// List app names, following `Next-Range` while the API answers 206
    fn apps_for_key(&self, key: &str) -> Result<Vec<String>, SourceError> {
        let url = format!("{}/apps", self.api_url);
        let mut range: Option<String> = None;
        let mut apps = Vec::new();

        loop {
            let mut request = self
                .agent
                .get(&url)
                .set("Accept", ACCEPT)
                .set("Authorization", &format!("Bearer {}", key));
            if let Some(range) = &range {
                request = request.set("Range", range);
            }

            let response = match request.call() {
                Ok(resp) => resp,
                Err(ureq::Error::Status(status, _)) => {
                    return Err(SourceError::Rejected { status });
                }
                Err(e) => return Err(SourceError::Transport(e.to_string())),
            };

            let status = response.status();
            let next_range = response.header("Next-Range").map(str::to_string);
            let page: Vec<HerokuApp> = response
                .into_json()
                .map_err(|e| SourceError::Transport(format!("bad /apps response: {}", e)))?;
            debug!(count = page.len(), status, "fetched page of apps");
            apps.extend(page.into_iter().map(|app| app.name));

            match next_range {
                Some(next) if status == 206 => range = Some(next),
                _ => break,
            }
        }

        Ok(apps)
    }
}
