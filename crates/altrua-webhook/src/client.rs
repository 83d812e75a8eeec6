//! Webhook client implementation.

use crate::error::WebhookError;
use altrua_domain::summary::REQUIRED_KEYS;
use altrua_domain::Summary;
use altrua_extractor::{ExtractorError, SourceDocument, SummaryTransport, DEFAULT_ORGANIZATION};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Default timeout for one upload-and-summarize round trip (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Multipart field carrying the uploaded report
pub const FILE_FIELD: &str = "file";

/// Client for a remote extraction pipeline behind a webhook
///
/// The webhook receives the raw report as a multipart upload and answers
/// with a summary in the same JSON shape the local pipeline produces.
pub struct WebhookClient {
    url: String,
    client: reqwest::Client,
    organization: String,
}

impl WebhookClient {
    /// Create a new client for the given webhook URL
    pub fn new(url: impl Into<String>) -> Result<Self, WebhookError> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(WebhookError::InvalidUrl(url));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            url,
            client,
            organization: DEFAULT_ORGANIZATION.to_string(),
        })
    }

    /// Bound each round trip by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, WebhookError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Label used when neither the reply nor the document names an organization
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    /// Webhook URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Upload a document and return the raw JSON reply
    ///
    /// Only `200 OK` carries a summary; any other status, including other
    /// 2xx codes such as `202 Accepted`, is an error.
    pub async fn upload(&self, document: &SourceDocument) -> Result<Value, WebhookError> {
        let content_type = content_type_for(&document.file_name);
        let part = Part::bytes(document.bytes.clone())
            .file_name(document.file_name.clone())
            .mime_str(&content_type)?;
        let form = Form::new().part(FILE_FIELD, part);

        info!(
            url = %self.url,
            file = %document.file_name,
            bytes = document.bytes.len(),
            content_type = %content_type,
            "uploading document to webhook"
        );

        let resp = self.client.post(&self.url).multipart(form).send().await?;
        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        debug!(status = status.as_u16(), chars = body.len(), "webhook replied");
        Ok(serde_json::from_str(&body)?)
    }

    /// Upload a document and return the validated summary
    pub async fn fetch_summary(&self, document: &SourceDocument) -> Result<Summary, WebhookError> {
        let value = self.upload(document).await?;
        let organization = document.organization.as_deref().unwrap_or(&self.organization);
        let summary = summary_from_value(value, organization)?;

        info!(
            sections = summary.total_sections(),
            categories = summary.distinct_categories(),
            low_confidence = summary.low_confidence_count(),
            "received webhook summary"
        );
        Ok(summary)
    }
}

#[async_trait]
impl SummaryTransport for WebhookClient {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn summarize(&self, document: &SourceDocument) -> Result<Summary, ExtractorError> {
        Ok(self.fetch_summary(document).await?)
    }
}

/// Content type for an upload, guessed from the file extension
pub fn content_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Turn a webhook reply into a validated summary
///
/// The three collection keys are mandatory and never defaulted. A reply
/// without `organization` gets `default_organization`.
pub fn summary_from_value(
    mut value: Value,
    default_organization: &str,
) -> Result<Summary, WebhookError> {
    for key in REQUIRED_KEYS {
        if value.get(key).is_none() {
            return Err(WebhookError::MissingKey(key));
        }
    }

    if let Some(object) = value.as_object_mut() {
        let named = object.get("organization").is_some_and(Value::is_string);
        if !named {
            object.insert(
                "organization".to_string(),
                Value::String(default_organization.to_string()),
            );
        }
    }

    let summary: Summary = serde_json::from_value(value)?;
    summary.validate()?;
    Ok(summary)
}
