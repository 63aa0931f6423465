//! Configuration surfaces for the chat services and the pipeline stages.
//!
//! Everything that affects response shape or truncation risk (model id,
//! temperature, output-token ceiling, timeout) lives in an explicit config
//! struct handed to each component at construction, never in process-wide
//! state. That keeps the orchestrator and verifier constructible against a
//! mock endpoint in tests.

use std::time::Duration;

use crate::types::PipelineError;

/// Default character budget for one annotation request.
pub const DEFAULT_MAX_CHARS: usize = 4000;

/// Default line-start formula that opens a sutra when no title lines exist.
pub const DEFAULT_OPENING_PHRASE: &str = "Như vầy tôi nghe:";

/// Connection and sampling parameters for an OpenAI-compatible chat endpoint.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1234,
            model: "openai/gpt-oss-20b".to_string(),
            temperature: 0.1,
            max_tokens: 2000,
            timeout: Duration::from_secs(120),
        }
    }
}

impl ServiceConfig {
    /// Resolves a config from `CHUNKER_LM_HOST`, `CHUNKER_LM_PORT` and
    /// `CHUNKER_LM_MODEL` (a `.env` file is honored), falling back to the
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        if let Ok(host) = std::env::var("CHUNKER_LM_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("CHUNKER_LM_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        if let Ok(model) = std::env::var("CHUNKER_LM_MODEL") {
            config.model = model;
        }
        config
    }

    /// Base URL of the endpoint, e.g. `http://localhost:1234/v1`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/v1", self.host, self.port)
    }
}

/// Knobs for boundary detection and size-bounded packing.
#[derive(Clone, Debug)]
pub struct SegmenterConfig {
    max_chars: usize,
    opening_phrase: String,
}

impl SegmenterConfig {
    /// Builds a config, rejecting a zero packing budget and a blank opening
    /// phrase before any pipeline work can start.
    pub fn new(max_chars: usize, opening_phrase: impl Into<String>) -> Result<Self, PipelineError> {
        if max_chars == 0 {
            return Err(PipelineError::Config(
                "packing budget must be a positive number of characters".to_string(),
            ));
        }
        let opening_phrase = opening_phrase.into();
        if opening_phrase.trim().is_empty() {
            return Err(PipelineError::Config(
                "opening phrase must not be blank".to_string(),
            ));
        }
        Ok(Self {
            max_chars,
            opening_phrase,
        })
    }

    /// Convenience constructor keeping the default opening phrase.
    pub fn with_max_chars(max_chars: usize) -> Result<Self, PipelineError> {
        Self::new(max_chars, DEFAULT_OPENING_PHRASE)
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn opening_phrase(&self) -> &str {
        &self.opening_phrase
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            opening_phrase: DEFAULT_OPENING_PHRASE.to_string(),
        }
    }
}

/// Sampling parameters for the verification harness.
#[derive(Clone, Debug)]
pub struct VerifierConfig {
    sample_size: usize,
}

impl VerifierConfig {
    /// Builds a config, rejecting a zero sample size up front.
    pub fn new(sample_size: usize) -> Result<Self, PipelineError> {
        if sample_size == 0 {
            return Err(PipelineError::Config(
                "sample size must be at least 1".to_string(),
            ));
        }
        Ok(Self { sample_size })
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self { sample_size: 5 }
    }
}
