//! ```text
//! Extracted text ──► segmentation::cleaner ──► segmentation::boundaries ──► Units
//!                                                          │
//!                              over-budget units ──► segmentation::packer ──► SubUnits
//!                                                          │
//! pieces ──► annotator::prompt ──► chat endpoint ──► annotator::parser ──► AnnotatedChunks
//!                                                          │
//!                                  corpus::records (JSON corpus + text rendering)
//!
//! corpus::coarse ──► verification::sampler ──► judge endpoint ──► verification::report
//! ```
//!
//! The pipeline segments long-form scripture documents into retrievable
//! chunks by composing deterministic stages (cleaning, boundary detection,
//! size-bounded packing) with a semantic-annotation round-trip against an
//! external chat endpoint, then verifies chunk quality by re-annotating a
//! random sample and having a judge endpoint score the result.

pub mod annotator;
pub mod config;
pub mod corpus;
pub mod segmentation;
pub mod types;
pub mod verification;

pub use annotator::{ChatClient, CompletionProvider};
pub use config::{SegmenterConfig, ServiceConfig, VerifierConfig};
pub use corpus::{AnnotatedChunk, CoarseChunk, DocumentChunks};
pub use segmentation::{DocumentSegmenter, SegmentationOutcome, Unit};
pub use types::{PipelineError, RawDocument};
pub use verification::{JudgeAssessment, QualityVerifier, VerificationOutcome};
