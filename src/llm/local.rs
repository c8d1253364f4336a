//! Local model-serving daemon provider

use crate::error::{CvRankerError, Result};
use crate::llm::normalizer::parse_reply;
use crate::llm::prompts::render_analysis_prompt;
use crate::llm::provider::AnalysisProvider;
use crate::processing::assessment::CandidateAssessment;
use log::{debug, error, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    format: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

fn api_url(endpoint: &str, path: &str) -> String {
    format!("{}/api/{}", endpoint.trim_end_matches('/'), path)
}

/// Names of the models installed in the daemon.
pub async fn try_list_models(client: &Client, endpoint: &str) -> Result<Vec<String>> {
    let response = client.get(api_url(endpoint, "tags")).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CvRankerError::Provider(format!(
            "model listing returned {}",
            status
        )));
    }

    let tags: TagsResponse = response.json().await?;
    Ok(tags.models.into_iter().map(|model| model.name).collect())
}

/// Like [`try_list_models`], but an unreachable daemon means no models.
pub async fn list_models(client: &Client, endpoint: &str) -> Vec<String> {
    match try_list_models(client, endpoint).await {
        Ok(models) => models,
        Err(e) => {
            warn!("Could not list local models at {}: {}", endpoint, e);
            Vec::new()
        }
    }
}

#[derive(Clone)]
pub struct LocalClient {
    client: Client,
    model_name: String,
    endpoint: String,
}

impl LocalClient {
    pub fn new(client: Client, model_name: String, endpoint: String) -> Self {
        Self {
            client,
            model_name,
            endpoint,
        }
    }

    /// Send one user message and return the reply content.
    pub async fn chat(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model_name,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            format: "json",
        };

        let response = self
            .client
            .post(api_url(&self.endpoint, "chat"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CvRankerError::Provider(format!(
                "local daemon returned {}: {}",
                status,
                text.trim()
            )));
        }

        let payload: Value = response.json().await?;
        payload
            .pointer("/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                CvRankerError::Provider("local daemon reply has no message content".to_string())
            })
    }
}

impl AnalysisProvider for LocalClient {
    async fn analyze(&self, resume_text: &str, job_description: &str) -> CandidateAssessment {
        let prompt = render_analysis_prompt(resume_text, job_description);
        debug!("Sending {} prompt characters to {}", prompt.len(), self.model_name);

        match self.chat(&prompt).await {
            Ok(reply) => parse_reply(&reply).unwrap_or_else(|e| {
                error!("Local reply could not be parsed: {}", e);
                CandidateAssessment::failed(e)
            }),
            Err(e) => {
                error!("Local analysis failed ({}): {}", self.model_name, e);
                CandidateAssessment::failed(e)
            }
        }
    }
}
