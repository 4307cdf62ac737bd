//! HTTP client for the transit API.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::{Departure, Favourite, FavouriteId, StopId, StopSelection};

use super::error::ApiError;
use super::transit::TransitApi;
use super::types::{CreateFavouriteRequest, DepartureDto, FavouriteDto, StatusResponse};

/// Default base URL for the transit API.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Maximum number of body characters kept on decode errors.
const ERROR_BODY_LIMIT: usize = 500;

/// Configuration for the transit API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL the `/api/...` paths are appended to
    pub base_url: String,
    /// Request timeout; `None` leaves requests unbounded
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    /// Create a config for the API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for the transit API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidConfig(format!(
                "base URL must be http(s): {base_url}"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a successful JSON response.
    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(ERROR_BODY_LIMIT).collect()),
        })
    }
}

impl TransitApi for ApiClient {
    async fn departures(&self, stop: &StopId) -> Result<Vec<Departure>, ApiError> {
        let request = self
            .http
            .get(self.url("/api/departures"))
            .query(&[("stop_id", stop.as_str())]);

        let departures: Vec<DepartureDto> = self.fetch_json(request).await?;
        Ok(departures.into_iter().map(Departure::from).collect())
    }

    async fn favourites(&self) -> Result<Vec<Favourite>, ApiError> {
        let request = self.http.get(self.url("/api/favourites"));

        let favourites: Vec<FavouriteDto> = self.fetch_json(request).await?;
        Ok(favourites
            .into_iter()
            .filter_map(FavouriteDto::into_favourite)
            .collect())
    }

    async fn add_favourite(&self, stop: &StopSelection) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/favourites"))
            .json(&CreateFavouriteRequest::from(stop))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // A conflict is reported through the body, not the status code
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<StatusResponse>(&body) {
            Ok(s) if s.is_exists() => Err(ApiError::Conflict),
            _ => Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            }),
        }
    }

    async fn remove_favourite(&self, id: FavouriteId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/favourites/{id}")))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = if status == StatusCode::NOT_FOUND {
            format!("favourite {id} not found")
        } else {
            response.text().await.unwrap_or_default()
        };
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
