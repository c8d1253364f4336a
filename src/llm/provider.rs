//! Provider selection and the analysis capability

use crate::error::{CvRankerError, Result};
use crate::llm::cloud::CloudClient;
use crate::llm::local::LocalClient;
use crate::processing::assessment::CandidateAssessment;
use reqwest::Client;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Analyze one resume against one job description.
///
/// Implementations never fail: every error path yields a complete
/// [`CandidateAssessment::failed`] record.
pub trait AnalysisProvider {
    fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> impl Future<Output = CandidateAssessment> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Cloud,
    Local,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Cloud => f.write_str("cloud"),
            ProviderKind::Local => f.write_str("local"),
        }
    }
}

/// Provider settings, fixed for the duration of a run.
#[derive(Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    Cloud {
        api_key: String,
        model: String,
        endpoint: String,
    },
    Local {
        model_name: String,
        endpoint: String,
    },
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderConfig::Cloud {
                api_key,
                model,
                endpoint,
            } => f
                .debug_struct("Cloud")
                .field("api_key", &if api_key.is_empty() { "<empty>" } else { "<redacted>" })
                .field("model", model)
                .field("endpoint", endpoint)
                .finish(),
            ProviderConfig::Local {
                model_name,
                endpoint,
            } => f
                .debug_struct("Local")
                .field("model_name", model_name)
                .field("endpoint", endpoint)
                .finish(),
        }
    }
}

impl ProviderConfig {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderConfig::Cloud { .. } => ProviderKind::Cloud,
            ProviderConfig::Local { .. } => ProviderKind::Local,
        }
    }

    /// Human-readable label, e.g. `cloud (gemini-2.5-pro)`.
    pub fn label(&self) -> String {
        let model = match self {
            ProviderConfig::Cloud { model, .. } => model,
            ProviderConfig::Local { model_name, .. } => model_name,
        };
        format!("{} ({})", self.kind(), model)
    }

    /// Why this configuration cannot run, if it cannot.
    pub fn missing_requirement(&self) -> Option<String> {
        match self {
            ProviderConfig::Cloud { api_key, .. } if api_key.trim().is_empty() => {
                Some("a valid cloud API key is required".to_string())
            }
            ProviderConfig::Local { model_name, .. } if model_name.trim().is_empty() => {
                Some("select a local model to use".to_string())
            }
            _ => None,
        }
    }
}

pub fn build_http_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| CvRankerError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

/// The configured provider.
#[derive(Clone)]
pub enum Provider {
    Cloud(CloudClient),
    Local(LocalClient),
}

impl Provider {
    pub fn from_config(config: &ProviderConfig, client: Client) -> Self {
        match config {
            ProviderConfig::Cloud {
                api_key,
                model,
                endpoint,
            } => Provider::Cloud(CloudClient::new(
                client,
                api_key.clone(),
                model.clone(),
                endpoint.clone(),
            )),
            ProviderConfig::Local {
                model_name,
                endpoint,
            } => Provider::Local(LocalClient::new(
                client,
                model_name.clone(),
                endpoint.clone(),
            )),
        }
    }
}

impl AnalysisProvider for Provider {
    async fn analyze(&self, resume_text: &str, job_description: &str) -> CandidateAssessment {
        match self {
            Provider::Cloud(client) => client.analyze(resume_text, job_description).await,
            Provider::Local(client) => client.analyze(resume_text, job_description).await,
        }
    }
}
