//! Cloud generative-text provider (REST transport)

use crate::error::{CvRankerError, Result};
use crate::llm::normalizer::parse_fenced_reply;
use crate::llm::prompts::render_analysis_prompt;
use crate::llm::provider::AnalysisProvider;
use crate::processing::assessment::CandidateAssessment;
use log::{debug, error, warn};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Clone)]
pub struct CloudClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl CloudClient {
    pub fn new(client: Client, api_key: String, model: String, endpoint: String) -> Self {
        Self {
            client,
            api_key,
            model,
            endpoint,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    /// Send one prompt and return the reply text.
    ///
    /// Transport errors are stripped of their URL, which carries the API key.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| CvRankerError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CvRankerError::Provider(format!(
                "cloud provider returned {}: {}",
                status,
                text.trim()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| CvRankerError::Network(e.without_url()))?;

        payload
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| {
                CvRankerError::Provider(
                    "unexpected response structure from cloud provider".to_string(),
                )
            })
    }
}

impl AnalysisProvider for CloudClient {
    async fn analyze(&self, resume_text: &str, job_description: &str) -> CandidateAssessment {
        if self.api_key.trim().is_empty() {
            warn!("Cloud API key is missing; skipping request");
            return CandidateAssessment::failed("API key is missing");
        }

        let prompt = render_analysis_prompt(resume_text, job_description);
        debug!("Sending {} prompt characters to {}", prompt.len(), self.model);

        match self.generate(&prompt).await {
            Ok(reply) => parse_fenced_reply(&reply).unwrap_or_else(|e| {
                error!("Cloud reply could not be parsed: {}", e);
                CandidateAssessment::failed(e)
            }),
            Err(e) => {
                error!("Cloud analysis failed ({}): {}", self.model, e);
                CandidateAssessment::failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url_joins_model() {
        let client = CloudClient::new(
            Client::new(),
            "key".to_string(),
            "gemini-2.5-pro".to_string(),
            "https://example.test/v1beta/models/".to_string(),
        );
        assert_eq!(
            client.generate_url(),
            "https://example.test/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]}));
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        // Unroutable endpoint: any request attempt would fail differently.
        let client = CloudClient::new(
            Client::new(),
            String::new(),
            "gemini-2.5-pro".to_string(),
            "http://127.0.0.1:9".to_string(),
        );
        let record = client.analyze("resume", "job").await;
        assert!(record.is_error());
        assert_eq!(record.fit_score, 0);
        assert!(record.experience_summary.contains("API key is missing"));
    }
}
