//! Deterministic segmentation stages and the orchestrating per-document
//! pipeline.
//!
//! * [`cleaner`] — extraction-noise removal.
//! * [`boundaries`] — narrative boundary detection producing [`Unit`]s.
//! * [`packer`] — size-bounded greedy packing of over-long units.
//! * [`pipeline`] — composition of the above with the annotation round-trip.

pub mod boundaries;
pub mod cleaner;
pub mod packer;
pub mod pipeline;

pub use boundaries::{BoundaryDetector, BoundaryFamily, BoundaryScan, Unit};
pub use cleaner::clean_text;
pub use packer::{SubUnit, pack_text, pack_unit};
pub use pipeline::{DocumentSegmenter, SegmentationOutcome, SegmentationStats};
