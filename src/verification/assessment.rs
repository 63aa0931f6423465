//! Judge assessments and their best-effort parsing.

use serde::{Deserialize, Serialize};

/// Score substituted for every criterion when the judge reply is unusable.
pub const NEUTRAL_SCORE: f64 = 5.0;

/// Criterion keys in report order.
pub const CRITERIA: [&str; 6] = [
    "accuracy_score",
    "coherence_score",
    "context_score",
    "logic_score",
    "added_value_score",
    "overall_score",
];

/// Scores the judge service returns for one verified sample.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JudgeAssessment {
    #[serde(default = "neutral")]
    pub accuracy_score: f64,
    #[serde(default = "neutral")]
    pub coherence_score: f64,
    #[serde(default = "neutral")]
    pub context_score: f64,
    #[serde(default = "neutral")]
    pub logic_score: f64,
    #[serde(default = "neutral")]
    pub added_value_score: f64,
    #[serde(default = "neutral")]
    pub overall_score: f64,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

fn neutral() -> f64 {
    NEUTRAL_SCORE
}

impl JudgeAssessment {
    /// All-neutral record used when the judge call itself failed.
    pub fn neutral_default() -> Self {
        Self {
            accuracy_score: NEUTRAL_SCORE,
            coherence_score: NEUTRAL_SCORE,
            context_score: NEUTRAL_SCORE,
            logic_score: NEUTRAL_SCORE,
            added_value_score: NEUTRAL_SCORE,
            overall_score: NEUTRAL_SCORE,
            feedback: String::new(),
            strengths: Vec::new(),
            improvements: Vec::new(),
        }
    }

    /// Substitute for a reply that was received but is not JSON: the raw
    /// reply is preserved as feedback so nothing the judge said is lost.
    pub fn parsing_failed(raw_reply: &str) -> Self {
        Self {
            feedback: raw_reply.to_string(),
            improvements: vec!["Assessment parsing failed".to_string()],
            ..Self::neutral_default()
        }
    }

    /// Parses a judge reply, substituting [`parsing_failed`](Self::parsing_failed)
    /// when the reply is not a JSON assessment. Deliberately no fence
    /// stripping or object extraction: a reply is either the requested JSON
    /// object or it is feedback.
    pub fn from_reply(reply: &str) -> Self {
        serde_json::from_str(reply.trim()).unwrap_or_else(|_| Self::parsing_failed(reply))
    }

    /// Looks a criterion score up by its report key.
    pub fn score(&self, criterion: &str) -> Option<f64> {
        match criterion {
            "accuracy_score" => Some(self.accuracy_score),
            "coherence_score" => Some(self.coherence_score),
            "context_score" => Some(self.context_score),
            "logic_score" => Some(self.logic_score),
            "added_value_score" => Some(self.added_value_score),
            "overall_score" => Some(self.overall_score),
            _ => None,
        }
    }
}
