//! PostgREST-style HTTP record store.
//!
//! Each probe becomes one `GET {base}/{collection}` with an `in.(...)` filter
//! on the probed field. Responses are JSON arrays of records.

use std::time::Duration;

use super::{CandidateRecord, Collection, IdentifierField, RecordStore, StoreError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A remote roster reached over HTTPS.
pub struct RestStore {
    base: url::Url,
    api_key: Option<String>,
    agent: ureq::Agent,
}

impl RestStore {
    /// Creates a store rooted at `base_url` (e.g. `https://host/rest/v1/`).
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, StoreError> {
        let mut base = url::Url::parse(base_url).map_err(|source| StoreError::InvalidUrl {
            url: base_url.to_string(),
            message: source.to_string(),
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();

        Ok(Self {
            base,
            api_key,
            agent: config.into(),
        })
    }

    /// Builds the query URL for one probe.
    pub fn probe_url(
        &self,
        collection: Collection,
        field: IdentifierField,
        values: &[String],
    ) -> Result<url::Url, StoreError> {
        let mut url = self
            .base
            .join(collection.as_str())
            .map_err(|source| StoreError::InvalidUrl {
                url: self.base.to_string(),
                message: source.to_string(),
            })?;

        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair(field.as_str(), &in_filter(values));

        Ok(url)
    }
}

impl RecordStore for RestStore {
    fn find_by_field(
        &self,
        collection: Collection,
        field: IdentifierField,
        values: &[String],
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        let url = self.probe_url(collection, field, values)?;

        let mut request = self.agent.get(url.as_str());
        if let Some(key) = self.api_key.as_deref() {
            request = request
                .header("apikey", key)
                .header("Authorization", &format!("Bearer {key}"));
        }

        let mut response = request.call().map_err(|source| StoreError::Request {
            url: url.to_string(),
            message: source.to_string(),
        })?;

        response
            .body_mut()
            .read_json::<Vec<CandidateRecord>>()
            .map_err(|source| StoreError::Decode {
                url: url.to_string(),
                message: source.to_string(),
            })
    }
}

/// Renders `in.("a","b")`, escaping embedded quotes and backslashes.
fn in_filter(values: &[String]) -> String {
    let quoted: Vec<String> = values
        .iter()
        .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("in.({})", quoted.join(","))
}
