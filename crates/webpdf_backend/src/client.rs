use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::{BackendError, FailureKind, GenerateReply};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GenerateDescriptor {
    user_id: String,
    file: String,
}

/// The three operations the PDF service exposes.
#[async_trait::async_trait]
pub trait PdfBackend: Send + Sync {
    async fn generate(
        &self,
        url: &str,
        identity: Option<&str>,
    ) -> Result<GenerateReply, BackendError>;

    async fn history(&self, identity: &str) -> Result<Vec<String>, BackendError>;

    async fn download(&self, file: &str) -> Result<Vec<u8>, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ClientSettings,
}

impl ReqwestBackend {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, BackendError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, BackendError> {
        let base = reqwest::Url::parse(&self.settings.base_url)
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))?;
        base.join(path)
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn check_status(response: &reqwest::Response) -> Result<(), BackendError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ))
        }
    }
}

#[async_trait::async_trait]
impl PdfBackend for ReqwestBackend {
    async fn generate(
        &self,
        url: &str,
        identity: Option<&str>,
    ) -> Result<GenerateReply, BackendError> {
        let client = self.build_client()?;
        let response = client
            .post(self.endpoint("/generate-pdf")?)
            .json(&GenerateBody {
                url,
                user_id: identity,
            })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::check_status(&response)?;

        // The content type selects the decoding path between the two
        // success contracts. A missing header is treated as bytes.
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| {
                value
                    .split(';')
                    .next()
                    .unwrap_or(value)
                    .trim()
                    .to_ascii_lowercase()
            });

        match content_type.as_deref() {
            Some("application/json") => {
                let descriptor: GenerateDescriptor = response
                    .json()
                    .await
                    .map_err(|err| BackendError::new(FailureKind::MalformedBody, err.to_string()))?;
                Ok(GenerateReply::Descriptor {
                    user_id: descriptor.user_id,
                    file: descriptor.file,
                })
            }
            Some("application/pdf") | None => {
                let bytes = response.bytes().await.map_err(map_reqwest_error)?;
                Ok(GenerateReply::Pdf {
                    bytes: bytes.to_vec(),
                })
            }
            Some(other) => Err(BackendError::new(
                FailureKind::MalformedBody,
                format!("unexpected content type {other}"),
            )),
        }
    }

    async fn history(&self, identity: &str) -> Result<Vec<String>, BackendError> {
        let client = self.build_client()?;
        let response = client
            .get(self.endpoint("/history")?)
            .query(&[("user_id", identity)])
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::check_status(&response)?;

        response
            .json::<Vec<String>>()
            .await
            .map_err(|err| BackendError::new(FailureKind::MalformedBody, err.to_string()))
    }

    async fn download(&self, file: &str) -> Result<Vec<u8>, BackendError> {
        let client = self.build_client()?;
        let response = client
            .get(self.endpoint(&format!("/generated/{file}"))?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::check_status(&response)?;

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return BackendError::new(FailureKind::MalformedBody, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}
