//! LLM integration module

pub mod cloud;
pub mod local;
pub mod normalizer;
pub mod prompts;
pub mod provider;

pub use provider::{AnalysisProvider, Provider, ProviderConfig, ProviderKind};
