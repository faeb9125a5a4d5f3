//! Jobs sent to the document builder service.
//!
//! A job is a synchronous `POST <doc server>docbuilder` naming a callback URL the service
//! downloads its build-script from. The service replies with either a non-zero error code or
//! the URLs of the files the script saved.

pub mod orchestrator;
pub mod script;

use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::server::{config::Config, error::builder::BuilderError};

/// Messages of the error codes returned by the document builder service
pub const BUILDER_ERROR_MESSAGES: &[(i64, &str)] = &[
    (-1, "Unknown error."),
    (-2, "Generation timeout error."),
    (-3, "Document generation error."),
    (-4, "Error while downloading the document file to be generated."),
    (-6, "Error while accessing the document generation result database."),
    (-8, "Invalid token."),
];

/// Message of error codes missing from the table
pub const UNRECOGNIZED_ERROR_MESSAGE: &str = "Error code not recognized.";

/// Maps builder service error codes to user facing messages
#[derive(Clone, Copy, Debug)]
pub struct ErrorCodeTable {
    messages: &'static [(i64, &'static str)],
}

impl ErrorCodeTable {
    pub const fn new(messages: &'static [(i64, &'static str)]) -> Self {
        Self { messages }
    }

    pub fn message(&self, code: i64) -> &'static str {
        self.messages
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, message)| *message)
            .unwrap_or(UNRECOGNIZED_ERROR_MESSAGE)
    }
}

impl Default for ErrorCodeTable {
    fn default() -> Self {
        Self::new(BUILDER_ERROR_MESSAGES)
    }
}

#[derive(Debug, Deserialize)]
struct BuilderResponse {
    #[serde(default)]
    error: Option<i64>,
    #[serde(default)]
    urls: Option<Map<String, Value>>,
}

/// Client of the document builder service
pub struct BuilderClient<'a> {
    http_client: &'a reqwest::Client,
    config: &'a Config,
    error_codes: ErrorCodeTable,
}

impl<'a> BuilderClient<'a> {
    /// Creates a new instance of [`BuilderClient`]
    pub fn new(http_client: &'a reqwest::Client, config: &'a Config) -> Self {
        Self {
            http_client,
            config,
            error_codes: ErrorCodeTable::default(),
        }
    }

    pub fn with_error_codes(mut self, error_codes: ErrorCodeTable) -> Self {
        self.error_codes = error_codes;
        self
    }

    /// Runs a job whose build-script is served at `callback_url`
    ///
    /// # Returns
    /// - `Ok(String)` - URL of the first file saved by the job
    /// - `Err(BuilderError::Request)` - Timeout, connection error or non-2xx status
    /// - `Err(BuilderError::Job)` - The service replied with a non-zero error code
    /// - `Err(BuilderError::MissingOutput)` - The reply named no output file
    /// - `Err(BuilderError::MalformedResponse)` - The reply is not a job result
    pub async fn run_job(&self, callback_url: &str) -> Result<String, BuilderError> {
        let mut payload = json!({"async": false, "url": callback_url});

        let mut request = self
            .http_client
            .post(self.config.docbuilder_url())
            .header(ACCEPT, "application/json");

        if let Some(secret) = &self.config.doc_server_jwt_secret {
            let key = EncodingKey::from_secret(secret.as_bytes());

            let token = encode(&Header::default(), &payload, &key).map_err(BuilderError::Signing)?;
            payload["token"] = Value::String(token);

            let bearer = encode(&Header::default(), &json!({ "payload": payload }), &key)
                .map_err(BuilderError::Signing)?;
            request = request.header(
                self.config.doc_server_jwt_header.as_str(),
                format!("Bearer {}", bearer),
            );
        }

        let body = request
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let response: BuilderResponse = serde_json::from_str(&body)
            .map_err(|e| BuilderError::MalformedResponse(e.to_string()))?;

        self.job_output(response)
    }

    /// Downloads a file saved by a job
    pub async fn fetch_output(&self, url: &str) -> Result<String, BuilderError> {
        let content = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(content)
    }

    fn job_output(&self, response: BuilderResponse) -> Result<String, BuilderError> {
        if let Some(code) = response.error.filter(|code| *code != 0) {
            return Err(BuilderError::Job {
                code,
                message: self.error_codes.message(code),
            });
        }

        response
            .urls
            .iter()
            .flat_map(|urls| urls.values())
            .find_map(|url| url.as_str())
            .map(str::to_string)
            .ok_or(BuilderError::MissingOutput)
    }
}
