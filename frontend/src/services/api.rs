use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{AcceptInvitationResponse, InvitationDetails, WeekContent, WeekRangeResponse};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Not found")]
    NotFound,
    #[error("Already used or expired")]
    AlreadyUsed,
    #[error("Server error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx status
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => ApiError::NotFound,
            409 | 410 => ApiError::AlreadyUsed,
            _ => ApiError::Status { status, body },
        }
    }

    /// Friendly inline message for invitation screens
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::NotFound => "We couldn't find this invitation. Please check the link you were sent.",
            ApiError::AlreadyUsed => "This invitation has already been used or has expired. Ask for a new one!",
            ApiError::Network(_) => "We're having trouble connecting right now. Please try again in a moment.",
            ApiError::Status { .. } | ApiError::Decode(_) => "Something went wrong. Please try again.",
        }
    }
}

/// Source of week development content
#[async_trait(?Send)]
pub trait ContentTransport {
    async fn get_week(&self, week: u32) -> Result<WeekContent, ApiError>;
    async fn get_week_range(&self, from: u32, to: u32) -> Result<Vec<WeekContent>, ApiError>;
}

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the configured base URL
    pub fn new() -> Self {
        Self::with_base_url(AppConfig::from_env().api_base_url)
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn week_url(&self, week: u32) -> String {
        format!("{}/api/content/weeks/{}", self.base_url, week)
    }

    fn week_range_url(&self, from: u32, to: u32) -> String {
        format!("{}/api/content/weeks?from={}&to={}", self.base_url, from, to)
    }

    fn invitation_url(&self, token: &str) -> String {
        format!("{}/api/family/invitations/{}", self.base_url, urlencoding::encode(token))
    }

    /// Get invitation details for a token
    pub async fn get_invitation(&self, token: &str) -> Result<InvitationDetails, ApiError> {
        let response = Request::get(&self.invitation_url(token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    /// Accept the invitation identified by `token`
    pub async fn accept_invitation(&self, token: &str) -> Result<AcceptInvitationResponse, ApiError> {
        let url = format!("{}/accept", self.invitation_url(token));
        let response = Request::post(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ContentTransport for ApiClient {
    async fn get_week(&self, week: u32) -> Result<WeekContent, ApiError> {
        let response = Request::get(&self.week_url(week))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    async fn get_week_range(&self, from: u32, to: u32) -> Result<Vec<WeekContent>, ApiError> {
        let response = Request::get(&self.week_range_url(from, to))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let data: WeekRangeResponse = read_json(response).await?;
        Ok(data.weeks)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::from_status(status, body))
    }
}
