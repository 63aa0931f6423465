//! Persisted renderings of a verification run.
//!
//! Three artifacts derive from one [`VerificationOutcome`]: the full JSON
//! results, a reduced `_summary.json` sibling for quick reference, and a
//! plain-text report for human review.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde_json::json;
use tokio::fs;
use tracing::info;

use crate::corpus::records::ensure_parent_dir;
use crate::types::PipelineError;
use crate::verification::sampler::VerificationOutcome;

const REPORT_SEPARATOR: &str =
    "================================================================================";
const SECTION_RULE: &str = "----------------------------------------";
const DETAIL_RULE: &str = "--------------------";

const SUMMARY_LINES: [(&str, &str); 6] = [
    ("Average Overall Score", "avg_overall_score"),
    ("Average Accuracy Score", "avg_accuracy_score"),
    ("Average Coherence Score", "avg_coherence_score"),
    ("Average Context Score", "avg_context_score"),
    ("Average Logic Score", "avg_logic_score"),
    ("Average Added Value Score", "avg_added_value_score"),
];

/// Writes the full JSON results plus the `_summary.json` sibling.
pub async fn save_results(
    outcome: &VerificationOutcome,
    path: impl AsRef<Path>,
) -> Result<(), PipelineError> {
    let path = path.as_ref();
    ensure_parent_dir(path).await?;
    fs::write(path, serde_json::to_string_pretty(outcome)?).await?;
    info!(path = %path.display(), results = outcome.results.len(), "wrote verification results");

    let summary = json!({
        "metadata": &outcome.metadata,
        "source_file": &outcome.source_file,
        "total_chunks_available": outcome.total_chunks_available,
        "chunks_tested": outcome.chunks_tested,
        "summary": &outcome.summary,
        "quick_stats": {
            "avg_overall_score": outcome.summary.get("avg_overall_score").copied().unwrap_or(0.0),
            "total_results": outcome.results.len(),
            "successful_assessments": outcome.results.len(),
        },
    });
    let summary_path = sibling_summary_path(path);
    fs::write(&summary_path, serde_json::to_string_pretty(&summary)?).await?;
    info!(path = %summary_path.display(), "wrote verification summary");
    Ok(())
}

/// Renders the human-readable verification report.
pub fn render_report(outcome: &VerificationOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "CHUNK QUALITY VERIFICATION REPORT");
    out.push_str(REPORT_SEPARATOR);
    out.push_str("\n\n");
    let _ = writeln!(out, "Source file: {}", outcome.source_file);
    let _ = writeln!(
        out,
        "Total chunks available: {}",
        outcome.total_chunks_available
    );
    let _ = writeln!(out, "Chunks tested: {}", outcome.chunks_tested);
    out.push('\n');

    if !outcome.summary.is_empty() {
        let _ = writeln!(out, "SUMMARY SCORES");
        let _ = writeln!(out, "{SECTION_RULE}");
        for (label, key) in SUMMARY_LINES {
            if let Some(value) = outcome.summary.get(key) {
                let _ = writeln!(out, "{label}: {value:.2}");
            }
        }
        out.push('\n');
    }

    for (i, result) in outcome.results.iter().enumerate() {
        let _ = writeln!(out, "VERIFICATION RESULT {}", i + 1);
        let _ = writeln!(out, "{REPORT_SEPARATOR}");
        let chunk = &result.original_chunk;
        let _ = writeln!(out, "Original Chunk: {}", chunk.number);
        if let Some(length) = chunk.length {
            let _ = writeln!(out, "Length: {length} characters");
        }
        out.push('\n');

        let _ = writeln!(out, "ORIGINAL CONTENT:");
        let _ = writeln!(out, "{DETAIL_RULE}");
        let _ = writeln!(out, "{}...", truncate_chars(&chunk.content, 500));
        out.push('\n');

        let _ = writeln!(out, "AGENTIC CHUNKS ({}):", result.agentic_chunks.len());
        let _ = writeln!(out, "{DETAIL_RULE}");
        for (j, agentic) in result.agentic_chunks.iter().enumerate() {
            let _ = writeln!(out, "{}. [{}]", j + 1, agentic.context);
            let _ = writeln!(out, "   {}...", truncate_chars(&agentic.content, 200));
            out.push('\n');
        }

        let assessment = &result.assessment;
        let _ = writeln!(out, "ASSESSMENT:");
        let _ = writeln!(out, "{DETAIL_RULE}");
        let _ = writeln!(out, "Overall Score: {}", assessment.overall_score);
        let _ = writeln!(out, "Accuracy: {}", assessment.accuracy_score);
        let _ = writeln!(out, "Coherence: {}", assessment.coherence_score);
        let _ = writeln!(out, "Context: {}", assessment.context_score);
        let _ = writeln!(out, "Logic: {}", assessment.logic_score);
        let _ = writeln!(out, "Added Value: {}", assessment.added_value_score);
        out.push('\n');
        let _ = writeln!(out, "Feedback: {}", assessment.feedback);
        out.push('\n');

        if !assessment.strengths.is_empty() {
            let _ = writeln!(out, "Strengths:");
            for strength in &assessment.strengths {
                let _ = writeln!(out, "- {strength}");
            }
            out.push('\n');
        }
        if !assessment.improvements.is_empty() {
            let _ = writeln!(out, "Areas for Improvement:");
            for improvement in &assessment.improvements {
                let _ = writeln!(out, "- {improvement}");
            }
            out.push('\n');
        }

        let _ = writeln!(out, "{REPORT_SEPARATOR}");
        out.push('\n');
    }

    out
}

/// Writes [`render_report`] to `path`.
pub async fn save_report(
    outcome: &VerificationOutcome,
    path: impl AsRef<Path>,
) -> Result<(), PipelineError> {
    let path = path.as_ref();
    ensure_parent_dir(path).await?;
    fs::write(path, render_report(outcome)).await?;
    info!(path = %path.display(), "wrote verification report");
    Ok(())
}

fn sibling_summary_path(path: &Path) -> PathBuf {
    match path.file_stem().and_then(|stem| stem.to_str()) {
        Some(stem) => path.with_file_name(format!("{stem}_summary.json")),
        None => path.with_extension("summary.json"),
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{AnnotatedChunk, CoarseChunk};
    use crate::verification::assessment::JudgeAssessment;
    use crate::verification::sampler::{ReportMetadata, SampleResult, summarize};
    use chrono::Utc;

    fn sample_outcome() -> VerificationOutcome {
        let mut assessment = JudgeAssessment::neutral_default();
        assessment.overall_score = 8.0;
        assessment.feedback = "good split".to_string();
        assessment.strengths = vec!["verbatim text".to_string()];

        let result = SampleResult {
            original_chunk: CoarseChunk {
                number: 3,
                total: 10,
                length: Some(42),
                content: "original story content".to_string(),
            },
            agentic_chunks: vec![AnnotatedChunk {
                chunk_id: "3_1".to_string(),
                original_chunk: 3,
                sub_chunk: 1,
                context: "opening".to_string(),
                content: "original story".to_string(),
                full_text: "[opening], original story".to_string(),
            }],
            assessment,
        };

        let summary = summarize(std::iter::once(&result.assessment));
        VerificationOutcome {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                version: "1.0".to_string(),
                description: "Chunk quality verification results".to_string(),
            },
            source_file: "chunks_output.txt".to_string(),
            total_chunks_available: 10,
            chunks_tested: 1,
            reduced_sample: false,
            results: vec![result],
            summary,
        }
    }

    #[test]
    fn report_carries_summary_and_per_sample_sections() {
        let report = render_report(&sample_outcome());

        assert!(report.starts_with("CHUNK QUALITY VERIFICATION REPORT"));
        assert!(report.contains("Source file: chunks_output.txt"));
        assert!(report.contains("Average Overall Score: 8.00"));
        assert!(report.contains("VERIFICATION RESULT 1"));
        assert!(report.contains("Original Chunk: 3"));
        assert!(report.contains("1. [opening]"));
        assert!(report.contains("Feedback: good split"));
        assert!(report.contains("- verbatim text"));
    }

    #[tokio::test]
    async fn results_write_a_summary_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verification_results.json");
        let outcome = sample_outcome();

        save_results(&outcome, &path).await.unwrap();

        let full: serde_json::Value =
            serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
        assert_eq!(full["chunks_tested"], 1);
        assert_eq!(full["results"][0]["assessment"]["overall_score"], 8.0);

        let summary_path = dir.path().join("verification_results_summary.json");
        let summary: serde_json::Value =
            serde_json::from_str(&tokio::fs::read_to_string(&summary_path).await.unwrap())
                .unwrap();
        assert_eq!(summary["quick_stats"]["total_results"], 1);
        assert_eq!(summary["summary"]["avg_overall_score"], 8.0);
        assert!(summary.get("results").is_none());
    }

    #[tokio::test]
    async fn report_writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("verification_report.txt");

        save_report(&sample_outcome(), &path).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.contains("CHUNK QUALITY VERIFICATION REPORT"));
    }
}
