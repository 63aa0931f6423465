//! Sampling-based verification of a stored coarse-chunk corpus.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::annotator::{CompletionProvider, annotate_text, judge_request};
use crate::config::VerifierConfig;
use crate::corpus::{AnnotatedChunk, CoarseChunk};
use crate::verification::assessment::{CRITERIA, JudgeAssessment};

/// Report header describing one verification run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub description: String,
}

impl ReportMetadata {
    fn current() -> Self {
        Self {
            generated_at: Utc::now(),
            version: "1.0".to_string(),
            description: "Chunk quality verification results".to_string(),
        }
    }
}

/// One sampled chunk, its fresh re-annotation, and the judge's scores.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SampleResult {
    pub original_chunk: CoarseChunk,
    pub agentic_chunks: Vec<AnnotatedChunk>,
    pub assessment: JudgeAssessment,
}

/// Complete in-memory result of one verification run.
///
/// Every persisted artifact (full JSON, summary sibling, text report) is
/// rendered from this one structure; nothing is recomputed independently.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub metadata: ReportMetadata,
    pub source_file: String,
    pub total_chunks_available: usize,
    pub chunks_tested: usize,
    pub reduced_sample: bool,
    pub results: Vec<SampleResult>,
    pub summary: BTreeMap<String, f64>,
}

impl VerificationOutcome {
    /// `true` when not a single sample made it to a scored result.
    pub fn produced_nothing(&self) -> bool {
        self.results.is_empty()
    }
}

/// Re-runs sampled chunks through the annotation round-trip and has an
/// external judge score the re-annotation against the stored original.
pub struct QualityVerifier {
    annotator: Arc<dyn CompletionProvider>,
    judge: Arc<dyn CompletionProvider>,
    config: VerifierConfig,
}

impl QualityVerifier {
    pub fn new(
        annotator: Arc<dyn CompletionProvider>,
        judge: Arc<dyn CompletionProvider>,
        config: VerifierConfig,
    ) -> Self {
        Self {
            annotator,
            judge,
            config,
        }
    }

    /// One service playing both the annotator and the judge role.
    pub fn with_shared_provider(
        provider: Arc<dyn CompletionProvider>,
        config: VerifierConfig,
    ) -> Self {
        Self {
            annotator: provider.clone(),
            judge: provider,
            config,
        }
    }

    /// Verifies a uniform random sample of `chunks`.
    pub async fn verify(&self, chunks: &[CoarseChunk], source_file: &str) -> VerificationOutcome {
        let mut rng = rand::rng();
        self.verify_with_rng(chunks, source_file, &mut rng).await
    }

    /// Verification with a caller-supplied RNG, so runs can be seeded.
    pub async fn verify_with_rng<R: Rng + ?Sized>(
        &self,
        chunks: &[CoarseChunk],
        source_file: &str,
        rng: &mut R,
    ) -> VerificationOutcome {
        let requested = self.config.sample_size();
        let reduced = chunks.len() < requested;
        if reduced {
            warn!(
                available = chunks.len(),
                requested, "fewer chunks than requested; using all of them"
            );
        }

        let selected: Vec<&CoarseChunk> = if reduced {
            chunks.iter().collect()
        } else {
            index::sample(rng, chunks.len(), requested)
                .iter()
                .map(|i| &chunks[i])
                .collect()
        };
        info!(selected = selected.len(), "selected chunks for verification");

        let mut results = Vec::new();
        for (i, chunk) in selected.iter().enumerate() {
            info!(
                sample = i + 1,
                of = selected.len(),
                chunk = chunk.number,
                "verifying sample"
            );

            let reannotated =
                annotate_text(self.annotator.as_ref(), &chunk.content, chunk.number).await;
            if reannotated.is_empty() {
                warn!(
                    chunk = chunk.number,
                    "re-annotation produced no chunks; sample skipped"
                );
                continue;
            }

            let assessment = self.assess(chunk, &reannotated).await;
            info!(
                chunk = chunk.number,
                overall = assessment.overall_score,
                "sample scored"
            );
            results.push(SampleResult {
                original_chunk: (*chunk).clone(),
                agentic_chunks: reannotated,
                assessment,
            });
        }

        if results.is_empty() {
            error!(source = source_file, "verification produced no scored samples");
        }

        let summary = summarize(results.iter().map(|result| &result.assessment));

        VerificationOutcome {
            metadata: ReportMetadata::current(),
            source_file: source_file.to_string(),
            total_chunks_available: chunks.len(),
            chunks_tested: selected.len(),
            reduced_sample: reduced,
            results,
            summary,
        }
    }

    /// One judge round-trip; transport failures and unusable replies both
    /// fall back to a default assessment instead of dropping the sample.
    async fn assess(
        &self,
        original: &CoarseChunk,
        reannotated: &[AnnotatedChunk],
    ) -> JudgeAssessment {
        let request = judge_request(&original.content, reannotated);
        match self.judge.submit(&request).await {
            Ok(reply) => JudgeAssessment::from_reply(&reply),
            Err(err) => {
                warn!(chunk = original.number, %err, "judge call failed");
                JudgeAssessment::neutral_default()
            }
        }
    }
}

/// Per-criterion mean/min/max over the scored samples, keyed
/// `avg_`/`min_`/`max_` plus the criterion name. Empty input produces an
/// empty summary.
pub fn summarize<'a>(
    assessments: impl Iterator<Item = &'a JudgeAssessment>,
) -> BTreeMap<String, f64> {
    let assessments: Vec<&JudgeAssessment> = assessments.collect();
    let mut summary = BTreeMap::new();

    for criterion in CRITERIA {
        let scores: Vec<f64> = assessments
            .iter()
            .filter_map(|assessment| assessment.score(criterion))
            .collect();
        if scores.is_empty() {
            continue;
        }
        let sum: f64 = scores.iter().sum();
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        summary.insert(format!("avg_{criterion}"), sum / scores.len() as f64);
        summary.insert(format!("min_{criterion}"), min);
        summary.insert(format!("max_{criterion}"), max);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_is_mean_min_max_per_criterion() {
        let mut first = JudgeAssessment::neutral_default();
        first.accuracy_score = 9.0;
        first.overall_score = 8.0;
        let mut second = JudgeAssessment::neutral_default();
        second.accuracy_score = 6.0;
        second.overall_score = 7.0;

        let summary = summarize([&first, &second].into_iter());

        assert_eq!(summary["avg_accuracy_score"], 7.5);
        assert_eq!(summary["min_accuracy_score"], 6.0);
        assert_eq!(summary["max_accuracy_score"], 9.0);
        assert_eq!(summary["avg_overall_score"], 7.5);
        assert_eq!(summary["avg_coherence_score"], NEUTRAL);
    }

    const NEUTRAL: f64 = crate::verification::assessment::NEUTRAL_SCORE;

    #[test]
    fn empty_input_yields_empty_summary() {
        assert!(summarize(std::iter::empty()).is_empty());
    }
}
