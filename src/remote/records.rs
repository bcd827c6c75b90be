//! Record persistence over the hosted REST service.
//!
//! PostgREST-style wire contract: rows live in a `memories` collection
//! with `title`, `description`, `image_urls` and `memory_date`, plus
//! service-assigned id and timestamps. The service sorts for us; inserts
//! and updates replace whole records.

use log::{debug, info};
use reqwest::blocking::Client;

use super::{RemoteError, ok_or_status};
use crate::config::ServiceConfig;
use crate::entities::{Record, RecordPayload, RecordRow};

const COLLECTION: &str = "memories";

/// Client for the record collection. Constructed once at startup and
/// passed into the views that need it.
#[derive(Clone)]
pub struct RecordStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RecordStore {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base(&config.base_url),
            api_key: config.api_key.clone(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, COLLECTION)
    }

    /// Fetch every record, ascending by memory date.
    ///
    /// Callers surface failures by logging and staying in the loading or
    /// empty view; there is no automatic retry.
    pub fn list_all(&self) -> Result<Vec<Record>, RemoteError> {
        let response = self
            .client
            .get(self.collection_url())
            .query(&[("select", "*"), ("order", "memory_date.asc")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()?;
        let response = ok_or_status(response)?;
        let rows: Vec<RecordRow> = response.json()?;
        debug!("Fetched {} record row(s)", rows.len());
        Ok(rows.into_iter().map(Record::from).collect())
    }

    /// Persist a new record. The generated id is not returned; the caller
    /// navigates back to the timeline and re-fetches.
    pub fn create(&self, draft: &RecordPayload) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.collection_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(draft)
            .send()?;
        ok_or_status(response)?;
        info!("Created record dated {}", draft.memory_date);
        Ok(())
    }

    /// Replace the mutable fields of an existing record by id.
    pub fn update(&self, id: &str, patch: &RecordPayload) -> Result<(), RemoteError> {
        let filter = format!("eq.{id}");
        let response = self
            .client
            .patch(self.collection_url())
            .query(&[("id", filter.as_str())])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()?;
        ok_or_status(response)?;
        info!("Updated record {id}");
        Ok(())
    }
}

fn normalize_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
