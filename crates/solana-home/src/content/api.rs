use std::time::Duration;

use log::debug;
use ureq::Agent;

use super::{ContentRecord, ContentSource};
use crate::errors::ContentError;

/// Reads content from the portal's JSON API.
///
/// Collections are served at `{base_url}/changelog`, `{base_url}/newsletter` and `{base_url}/playlists/{key}`, each as a
/// JSON array of records.
pub struct ApiContentSource {
    base_url: String,
    agent: Agent,
}

impl ApiContentSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn get_records(&self, path: &str) -> Result<Vec<ContentRecord>, ContentError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(target: "content", "GET {}", url);

        self.agent
            .get(&url)
            .call()
            .and_then(|mut response| response.body_mut().read_json::<Vec<ContentRecord>>())
            .map_err(|source| ContentError::Http { url, source })
    }
}

impl ContentSource for ApiContentSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    fn changelog(&self) -> Result<Vec<ContentRecord>, ContentError> {
        self.get_records("changelog")
    }

    fn newsletter(&self) -> Result<Vec<ContentRecord>, ContentError> {
        self.get_records("newsletter")
    }

    fn playlist(&self, key: &str) -> Result<Vec<ContentRecord>, ContentError> {
        self.get_records(&format!("playlists/{}", urlencoding::encode(key)))
    }
}
