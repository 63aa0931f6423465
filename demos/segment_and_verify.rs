//! Segments one extracted text file into annotated chunks and runs sampled
//! quality verification, both against a local OpenAI-compatible endpoint
//! (e.g. LM Studio).
//!
//! ```bash
//! CHUNKER_SOURCE=./corpus/tang_chi_bo_kinh.txt \
//! CHUNKER_LM_HOST=192.168.1.24 CHUNKER_LM_PORT=2223 \
//! cargo run --example segment_and_verify
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use agentic_chunker::corpus::coarse;
use agentic_chunker::verification::{save_report, save_results};
use agentic_chunker::{
    ChatClient, DocumentSegmenter, PipelineError, QualityVerifier, RawDocument, SegmenterConfig,
    ServiceConfig, VerifierConfig,
};

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let source =
        env::var("CHUNKER_SOURCE").unwrap_or_else(|_| "./corpus/extracted.txt".to_string());
    let out_dir = PathBuf::from(env::var("CHUNKER_OUT").unwrap_or_else(|_| "./output".to_string()));
    let sample_size = env::var("CHUNKER_SAMPLE")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(5);

    let document = RawDocument::from_text_file(&source).await?;
    let client = Arc::new(ChatClient::new(ServiceConfig::from_env())?);

    let segmenter = DocumentSegmenter::new(client.clone(), SegmenterConfig::default())?;

    let scan = segmenter.scan(&document);
    println!(
        "Found {} units ({} title lines, {} opening lines)",
        scan.units.len(),
        scan.title_matches,
        scan.opening_matches
    );
    let coarse_path = out_dir.join("coarse_chunks.txt");
    coarse::write_coarse_chunk_file(&coarse_path, &source, &scan.units).await?;

    let outcome = segmenter.segment(&document).await?;
    println!(
        "Produced {} chunks from {} pieces ({} failed)",
        outcome.chunks.total_chunks, outcome.stats.pieces, outcome.stats.failed_pieces
    );
    outcome
        .chunks
        .write_json(out_dir.join("agentic_chunks.json"))
        .await?;
    outcome
        .chunks
        .write_text(out_dir.join("agentic_chunks.txt"))
        .await?;

    let coarse_chunks = coarse::read_coarse_chunk_file(&coarse_path).await?;
    let verifier =
        QualityVerifier::with_shared_provider(client, VerifierConfig::new(sample_size)?);
    let verification = verifier.verify(&coarse_chunks, &source).await;

    save_results(&verification, out_dir.join("verification_results.json")).await?;
    save_report(&verification, out_dir.join("verification_report.txt")).await?;

    if let Some(avg) = verification.summary.get("avg_overall_score") {
        println!("Average overall score: {avg:.2}");
    } else {
        println!("Verification produced no scored samples");
    }
    Ok(())
}
