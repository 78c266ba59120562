//! reqwest adapter for the goals API.
//!
//! Thin HTTP wrapper; body parsing lives in free functions so it can be
//! tested without a server.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ApiError, GoalsApi};
use crate::config::ApiConfig;
use crate::model::{BingoId, GoalRow, GoalUpdate};

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpGoalsApi {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpGoalsApi {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl GoalsApi for HttpGoalsApi {
    async fn create_goals(&self, goals: &[String]) -> Result<BingoId, ApiError> {
        let url = create_endpoint(&self.config);
        debug!(%url, count = goals.len(), "api: create goals");

        let response = self
            .http
            .post(&url)
            .json(&CreateRequest { goals })
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let (status, text) = read_response(response).await?;

        let bingo_id = parse_create_response(status, &text)?;
        info!(%bingo_id, "api: bingo created");
        Ok(bingo_id)
    }

    async fn fetch_goals(&self, bingo_id: BingoId) -> Result<Vec<GoalRow>, ApiError> {
        let url = read_endpoint(&self.config, bingo_id);
        debug!(%url, "api: fetch goals");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let (status, text) = read_response(response).await?;

        parse_goal_rows(status, &text)
    }

    async fn update_goals(&self, bingo_id: BingoId, update: &GoalUpdate) -> Result<(), ApiError> {
        let url = update_endpoint(&self.config, bingo_id);
        debug!(%url, count = update.len(), "api: update goals");

        let response = self
            .http
            .put(&url)
            .json(update)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = if is_success(status) { None } else { response.text().await.ok() };
        parse_update_response(status, body.as_deref())
    }
}

async fn read_response(response: reqwest::Response) -> Result<(u16, String), ApiError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    Ok((status, text))
}

// =============================================================================
// ENDPOINTS
// =============================================================================

fn create_endpoint(config: &ApiConfig) -> String {
    config.endpoint("/api/createGoals")
}

fn read_endpoint(config: &ApiConfig, bingo_id: BingoId) -> String {
    config.endpoint(&format!("/api/goals?bingoId={bingo_id}"))
}

fn update_endpoint(config: &ApiConfig, bingo_id: BingoId) -> String {
    config.endpoint(&format!("/api/goals/{bingo_id}"))
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CreateRequest<'a> {
    goals: &'a [String],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateResponse {
    #[serde(default = "default_ok")]
    ok: bool,
    bingo_id: Option<String>,
    error: Option<String>,
}

fn default_ok() -> bool {
    true
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Pull the `error` string out of a failure body, if it is JSON and has one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|message| !message.trim().is_empty())
}

fn status_error(status: u16, body: &str) -> ApiError {
    ApiError::Status { status, message: error_message(body) }
}

/// Any 2xx confirms the update; the body is only read for the error text.
fn parse_update_response(status: u16, body: Option<&str>) -> Result<(), ApiError> {
    if is_success(status) {
        return Ok(());
    }
    Err(status_error(status, body.unwrap_or_default()))
}

fn parse_create_response(status: u16, body: &str) -> Result<BingoId, ApiError> {
    if !is_success(status) {
        return Err(status_error(status, body));
    }

    let parsed: CreateResponse = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !parsed.ok {
        return Err(ApiError::Status { status, message: parsed.error });
    }

    let raw = parsed
        .bingo_id
        .ok_or_else(|| ApiError::Decode("missing field `bingoId`".into()))?;
    BingoId::parse(&raw).map_err(|e| ApiError::Decode(format!("bingoId '{raw}' is not a UUID: {e}")))
}

/// The backend encodes an empty result set as `null`.
fn parse_goal_rows(status: u16, body: &str) -> Result<Vec<GoalRow>, ApiError> {
    if !is_success(status) {
        return Err(status_error(status, body));
    }

    serde_json::from_str::<Option<Vec<GoalRow>>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| ApiError::Decode(e.to_string()))
}
