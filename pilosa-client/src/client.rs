//! This module submits PQL queries to a Pilosa server and decodes the responses.
//!
//! It provides functionality to:
//! - Accumulate queries and post them as one batch.
//! - Set, clear and count bits with single-query round trips.
//!
//! Every request is an HTTP POST to `<base url>/query?db=<db>` with the query
//! text as an `application/pql` body. Status codes of 400 and above are mapped
//! to [`Error::HttpRequest`]; anything else is decoded as JSON.

use crate::common::error::Error;
use crate::common::{
    ClearBitResponse, CountBitResponse, QueryResponse, Results, SetBitResponse,
};
use crate::config::PilosaConfig;
use crate::query;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// The maximum number of queries that may be submitted in one batch.
pub const MAX_QUERIES: usize = 1000;

const QUERY_PATH: &str = "/query";
const PQL_CONTENT_TYPE: &str = "application/pql";

/// A client for a single Pilosa server.
///
/// The client owns a list of pending queries, so it is meant to be used by
/// one caller at a time. Adding or clearing queries needs `&mut self`; callers
/// that want concurrency should use one client per task or wrap it in a lock.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    queries: Vec<String>,
}

impl Client {
    /// Construct a new [`Client`] for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Construct a new [`Client`] that sends its requests through `http`
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Client {
            http,
            base_url,
            queries: Vec::new(),
        }
    }

    /// Construct a new [`Client`] from loaded settings
    pub fn from_settings(config: &PilosaConfig) -> Self {
        Self::new(config.url.as_str())
    }

    /// The base URL requests are sent to, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The pending queries, in the order they were added
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Append a query to the pending batch. The text is not validated.
    pub fn add_query(&mut self, query: impl Into<String>) {
        self.queries.push(query.into());
    }

    /// Drop all pending queries
    pub fn clear_queries(&mut self) {
        self.queries.clear();
    }

    /// Post every pending query to `db` in a single request and decode the
    /// results.
    ///
    /// With no pending queries this returns empty [`Results`] without touching
    /// the network. The pending list is left as is; call
    /// [`Client::clear_queries`] to reset it.
    #[instrument(skip(self), fields(queries = self.queries.len()))]
    pub async fn execute_queries(&self, db: &str) -> Result<Results, Error> {
        let Some(body) = self.batch_body()? else {
            return Ok(Results::default());
        };

        self.post_json(db, body).await
    }

    /// Same request as [`Client::execute_queries`], but returns the response
    /// body as text instead of decoding it.
    #[instrument(skip(self), fields(queries = self.queries.len()))]
    pub async fn execute_queries_raw(&self, db: &str) -> Result<String, Error> {
        let Some(body) = self.batch_body()? else {
            return Ok(String::new());
        };

        let response = self.post(db, body).await?;
        Ok(response.text().await?)
    }

    /// Set the bit at (`bitmap_id`, `profile_id`) in `frame`. Returns whether
    /// the bit changed.
    #[instrument(skip(self))]
    pub async fn set_bit(
        &self,
        db: &str,
        bitmap_id: u64,
        frame: &str,
        profile_id: u64,
    ) -> Result<bool, Error> {
        let body = query::set_bit(bitmap_id, frame, profile_id);
        let response: SetBitResponse = self.post_json(db, body).await?;
        single_result("SetBit", response)
    }

    /// Clear the bit at (`bitmap_id`, `profile_id`) in `frame`. Returns
    /// whether the bit changed.
    #[instrument(skip(self))]
    pub async fn clear_bit(
        &self,
        db: &str,
        bitmap_id: u64,
        frame: &str,
        profile_id: u64,
    ) -> Result<bool, Error> {
        let body = query::clear_bit(bitmap_id, frame, profile_id);
        let response: ClearBitResponse = self.post_json(db, body).await?;
        single_result("ClearBit", response)
    }

    /// Count the bits set in bitmap `bitmap_id` of `frame`
    #[instrument(skip(self))]
    pub async fn count_bit(&self, db: &str, bitmap_id: u64, frame: &str) -> Result<i64, Error> {
        let body = query::count(&query::bitmap(bitmap_id, frame));
        let response: CountBitResponse = self.post_json(db, body).await?;
        single_result("CountBit", response)
    }

    /// Concatenates the pending queries. `None` means there is nothing to send.
    fn batch_body(&self) -> Result<Option<String>, Error> {
        match self.queries.len() {
            0 => Ok(None),
            n if n > MAX_QUERIES => Err(Error::TooManyQueries(n)),
            _ => Ok(Some(self.queries.concat())),
        }
    }

    fn query_url(&self) -> String {
        format!("{}{}", self.base_url, QUERY_PATH)
    }

    async fn post(&self, db: &str, body: String) -> Result<Response, Error> {
        let url = self.query_url();
        debug!(%url, db, bytes = body.len(), "Posting query");

        let response = self
            .http
            .post(&url)
            .query(&[("db", db)])
            .header(CONTENT_TYPE, PQL_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        check_api_response(response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, db: &str, body: String) -> Result<T, Error> {
        let response = self.post(db, body).await?;
        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes).map_err(Error::from)
    }
}

/// Turns a status code of 400 or above into an error carrying the response body
async fn check_api_response(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.as_u16() < 400 {
        return Ok(response);
    }

    // An unreadable body still yields the status error
    let body = response.text().await.unwrap_or_default();
    warn!(%status, %body, "Pilosa returned an error status");

    Err(Error::HttpRequest(status, body))
}

fn single_result<T>(operation: &'static str, response: QueryResponse<T>) -> Result<T, Error> {
    let [result]: [T; 1] = response
        .results
        .try_into()
        .map_err(|results: Vec<T>| Error::UnexpectedResultCount {
            operation,
            count: results.len(),
        })?;

    Ok(result)
}
