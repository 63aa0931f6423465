//! End-to-end per-document segmentation pipeline.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::annotator::{CompletionProvider, annotate_text};
use crate::config::SegmenterConfig;
use crate::corpus::{AnnotatedChunk, DocumentChunks};
use crate::segmentation::boundaries::{BoundaryDetector, BoundaryFamily, BoundaryScan};
use crate::segmentation::cleaner::clean_text;
use crate::segmentation::packer::pack_text;
use crate::types::{PipelineError, RawDocument};

/// Run statistics for one segmented document.
#[derive(Clone, Debug, Serialize)]
pub struct SegmentationStats {
    pub units: usize,
    pub pieces: usize,
    pub failed_pieces: usize,
    pub title_matches: usize,
    pub opening_matches: usize,
    pub family: BoundaryFamily,
    pub duration_ms: u128,
}

/// Chunk list plus diagnostics for one document run.
#[derive(Clone, Debug)]
pub struct SegmentationOutcome {
    pub chunks: DocumentChunks,
    pub stats: SegmentationStats,
}

/// Composes cleaning, boundary detection, packing and the annotation
/// round-trip into the per-document pipeline.
///
/// Pieces are processed strictly one after another; each annotation call is
/// a single blocking round-trip with the client's fixed timeout, and the
/// output chunk list preserves piece order.
pub struct DocumentSegmenter {
    annotator: Arc<dyn CompletionProvider>,
    detector: BoundaryDetector,
    config: SegmenterConfig,
}

impl DocumentSegmenter {
    pub fn new(
        annotator: Arc<dyn CompletionProvider>,
        config: SegmenterConfig,
    ) -> Result<Self, PipelineError> {
        let detector = BoundaryDetector::new(&config)?;
        Ok(Self {
            annotator,
            detector,
            config,
        })
    }

    /// Runs cleaning and boundary detection only, without any service calls.
    pub fn scan(&self, document: &RawDocument) -> BoundaryScan {
        self.detector.detect(&clean_text(&document.text))
    }

    /// Produces the document's ordered annotated chunk list.
    ///
    /// A failed or empty annotator reply costs the affected piece its chunks
    /// and nothing else; a document yielding no chunks at all is logged as
    /// its own outcome, distinct from partial piece failures.
    pub async fn segment(
        &self,
        document: &RawDocument,
    ) -> Result<SegmentationOutcome, PipelineError> {
        let started = Instant::now();

        let cleaned = clean_text(&document.text);
        if cleaned.is_empty() {
            error!(
                source = %document.source.display(),
                "extraction produced no text; skipping document"
            );
            return Ok(SegmentationOutcome {
                chunks: DocumentChunks::new(Vec::new()),
                stats: SegmentationStats {
                    units: 0,
                    pieces: 0,
                    failed_pieces: 0,
                    title_matches: 0,
                    opening_matches: 0,
                    family: BoundaryFamily::WholeText,
                    duration_ms: started.elapsed().as_millis(),
                },
            });
        }

        let scan = self.detector.detect(&cleaned);
        info!(
            source = %document.source.display(),
            units = scan.units.len(),
            "boundary detection complete"
        );

        let mut pieces: Vec<String> = Vec::new();
        for unit in &scan.units {
            if unit.text.chars().count() > self.config.max_chars() {
                pieces.extend(pack_text(&unit.text, self.config.max_chars()));
            } else {
                pieces.push(unit.text.clone());
            }
        }

        let mut chunks: Vec<AnnotatedChunk> = Vec::new();
        let mut failed_pieces = 0usize;
        for (i, piece) in pieces.iter().enumerate() {
            let ordinal = i + 1;
            let parsed = annotate_text(self.annotator.as_ref(), piece, ordinal).await;
            if parsed.is_empty() {
                warn!(ordinal, total = pieces.len(), "piece produced no chunks");
                failed_pieces += 1;
                continue;
            }
            info!(ordinal, chunks = parsed.len(), "piece annotated");
            chunks.extend(parsed);
        }

        if chunks.is_empty() {
            error!(
                source = %document.source.display(),
                pieces = pieces.len(),
                "no chunks produced for document"
            );
        }

        let stats = SegmentationStats {
            units: scan.units.len(),
            pieces: pieces.len(),
            failed_pieces,
            title_matches: scan.title_matches,
            opening_matches: scan.opening_matches,
            family: scan.family,
            duration_ms: started.elapsed().as_millis(),
        };

        Ok(SegmentationOutcome {
            chunks: DocumentChunks::new(chunks),
            stats,
        })
    }
}
