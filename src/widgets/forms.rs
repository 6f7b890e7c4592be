//! Contact and booking form submission.
//!
//! One multipart POST to the configured forms endpoint, no retry. The
//! endpoint answers JSON; its optional `message` is what the page shows
//! the visitor.

use crate::config::FormsConfig;
use reqwest::multipart::Form;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum FormError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid field {0:?}: expected key=value")]
    InvalidField(String),
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    message: Option<String>,
}

/// Parse a `key=value` command-line field. The value may contain `=`.
pub fn parse_field(raw: &str) -> Result<(String, String), FormError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(FormError::InvalidField(raw.to_string())),
    }
}

/// `message` of an endpoint response, if present and non-null.
pub fn response_message(body: &[u8]) -> Result<Option<String>, FormError> {
    let response: SubmitResponse = serde_json::from_slice(body)?;
    Ok(response.message)
}

pub struct FormSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl FormSubmitter {
    pub fn new(config: &FormsConfig) -> Result<Self, FormError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post `fields` as `multipart/form-data`; returns the response message.
    pub async fn submit(&self, fields: &[(String, String)]) -> Result<Option<String>, FormError> {
        let form = fields
            .iter()
            .fold(Form::new(), |form, (key, value)| form.text(key.clone(), value.clone()));

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, status = status.as_u16(), "form endpoint rejected submission");
        }
        let body = response.bytes().await?;
        let message = response_message(&body)?;
        debug!(endpoint = %self.endpoint, has_message = message.is_some(), "form submitted");
        Ok(message)
    }
}
