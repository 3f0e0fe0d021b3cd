use chrono::{DateTime, Utc};
use polls::dto::{CreateQuestionDto, IndexDto, IndexQueryDto, QuestionDetailDto};
use polls::models::Question;
use reqwest::Client;
use thiserror::Error;

/// Error type for CLI client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server returned an error status with a message body
    #[error("Server error ({}): {message}", .status.as_u16())]
    Server { status: reqwest::StatusCode, message: String },
    /// Network/connection/request error
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Extension trait for checking HTTP responses and extracting server error messages
trait ResponseExt {
    /// Checks for error status and extracts the server's error message body
    async fn check(self) -> Result<reqwest::Response, ClientError>;
}

impl ResponseExt for reqwest::Response {
    async fn check(self) -> Result<reqwest::Response, ClientError> {
        if self.status().is_success() {
            return Ok(self);
        }
        let status = self.status();
        let message = match self.json::<serde_json::Value>().await {
            Ok(body) => body.get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("Unknown error")
                .to_string(),
            Err(_) => format!("HTTP {}", status),
        };
        Err(ClientError::Server { status, message })
    }
}

/// HTTP client wrapper for communicating with the polls server
pub struct PollsClient {
    /// The base URL of the server (e.g. "http://localhost:3000")
    base_url: String,
    /// The underlying HTTP client
    client: Client,
}

impl PollsClient {
    /// Creates a new PollsClient
    ///
    /// ### Arguments
    ///
    /// * `base_url` - The base URL of the polls server
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Fetches the index of published questions
    pub async fn index(&self, limit: Option<i64>) -> Result<IndexDto, ClientError> {
        let url = format!("{}/polls", self.base_url);
        let query = IndexQueryDto { limit };
        let response = self.client.get(&url).query(&query).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Fetches questions published within the last 24 hours
    pub async fn recent(&self) -> Result<Vec<Question>, ClientError> {
        let url = format!("{}/polls/recent", self.base_url);
        let response = self.client.get(&url).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Fetches the detail of a published question
    pub async fn detail(&self, id: &str) -> Result<QuestionDetailDto, ClientError> {
        let url = format!("{}/polls/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Creates a new question
    pub async fn create_question(
        &self,
        question_text: String,
        pub_date: Option<DateTime<Utc>>,
        days: Option<i64>,
    ) -> Result<Question, ClientError> {
        let url = format!("{}/questions", self.base_url);
        let dto = CreateQuestionDto { question_text, pub_date, days };
        let response = self.client.post(&url).json(&dto).send().await?.check().await?;
        Ok(response.json().await?)
    }

    /// Lists every question, including unpublished ones
    pub async fn list_all(&self) -> Result<Vec<Question>, ClientError> {
        let url = format!("{}/questions", self.base_url);
        let response = self.client.get(&url).send().await?.check().await?;
        Ok(response.json().await?)
    }
}
