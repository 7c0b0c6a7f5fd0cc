//! Top-level error type for the Pilosa client

use reqwest::StatusCode;

use crate::client::MAX_QUERIES;

/// Errors occurring while talking to a Pilosa server
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The server answered with a status code of 400 or above. Carries the
    /// status and the text of the response body.
    #[error("bad status: {0} - body: {1}")]
    HttpRequest(StatusCode, String),

    /// Network error, covering connection, DNS and body read failures
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected shape
    #[error("error decoding response body: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A single-query call got back a result array that did not hold
    /// exactly one element
    #[error("unexpected response from {operation}: expected 1 result, got {count}")]
    UnexpectedResultCount {
        /// The query operation that was submitted, e.g. `SetBit`
        operation: &'static str,
        /// The number of results the server returned
        count: usize,
    },

    /// The pending batch holds more queries than a single request may carry
    #[error("too many queries in batch: {0} (maximum is {max})", max = MAX_QUERIES)]
    TooManyQueries(usize),
}

impl Error {
    /// Returns the HTTP status code attached to the error, if the server
    /// produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpRequest(code, _) => Some(*code),
            Error::Network(err) => err.status(),
            _ => None,
        }
    }
}
