//! Error types for the uploader.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot read {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not a DynamoDB export with an Items list: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} is not a valid AWS region. Examples: ap-southeast-2, ca-central-1, us-west-1")]
    Region(String),

    #[error("item {index}: {reason} '{field}'")]
    Schema {
        index: usize,
        field: &'static str,
        reason: &'static str,
    },

    #[error("batch {batch} rejected with HTTP status {status}")]
    Write {
        batch: usize,
        status: u16,
        response: String,
    },

    #[error("batch {batch} failed: {message}")]
    Transport { batch: usize, message: String },

    #[error("cannot open or write request log: {0}")]
    Log(#[from] io::Error),
}
