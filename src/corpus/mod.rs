//! Persisted corpus formats shared between pipeline stages.
//!
//! Two interchange shapes exist:
//!
//! * [`coarse`] — the unit-level text file written after boundary detection
//!   and read back by the verification harness.
//! * [`records`] — the annotated chunk corpus produced by the full pipeline,
//!   persisted as JSON plus a human-readable rendering.

pub mod coarse;
pub mod records;

pub use coarse::{
    CoarseChunk, parse_coarse_chunk_file, read_coarse_chunk_file, render_coarse_chunk_file,
    write_coarse_chunk_file,
};
pub use records::{AnnotatedChunk, DocumentChunks};
