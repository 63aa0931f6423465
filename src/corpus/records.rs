//! Annotated chunk records and their persisted renderings.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use crate::types::PipelineError;

/// Separator between chunk blocks in the text renderings.
pub(crate) const BLOCK_SEPARATOR: &str =
    "================================================================================";

/// Rule between a chunk's header lines and its content.
pub(crate) const RULE_SEPARATOR: &str = "--------------------------------------------------";

/// One retrievable chunk: a short contextual label plus verbatim content.
///
/// `chunk_id` is `{piece ordinal}_{sub-chunk counter}` and unique within a
/// document. Records are immutable once parsed; persistence is their end of
/// life as far as this crate is concerned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedChunk {
    pub chunk_id: String,
    pub original_chunk: usize,
    pub sub_chunk: usize,
    pub context: String,
    pub content: String,
    pub full_text: String,
}

/// A document's complete annotated output, in piece order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentChunks {
    pub total_chunks: usize,
    pub chunks: Vec<AnnotatedChunk>,
}

impl DocumentChunks {
    pub fn new(chunks: Vec<AnnotatedChunk>) -> Self {
        Self {
            total_chunks: chunks.len(),
            chunks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Serializes the corpus as pretty JSON at `path`.
    pub async fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PipelineError> {
        let path = path.as_ref();
        ensure_parent_dir(path).await?;
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized).await?;
        info!(chunks = self.total_chunks, path = %path.display(), "wrote chunk corpus");
        Ok(())
    }

    /// Loads a previously persisted JSON corpus.
    pub async fn read_json(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let data = fs::read_to_string(path.as_ref()).await?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Renders the one-block-per-chunk text form used for manual inspection
    /// and as the interchange format between stages.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total chunks: {}", self.total_chunks);
        out.push_str(BLOCK_SEPARATOR);
        out.push_str("\n\n");

        for (i, chunk) in self.chunks.iter().enumerate() {
            let _ = writeln!(out, "CHUNK {}/{}", i + 1, self.total_chunks);
            let _ = writeln!(out, "ID: {}", chunk.chunk_id);
            let _ = writeln!(out, "Context: {}", chunk.context);
            out.push_str(RULE_SEPARATOR);
            out.push('\n');
            out.push_str(&chunk.content);
            out.push('\n');
            out.push_str(BLOCK_SEPARATOR);
            out.push_str("\n\n");
        }
        out
    }

    /// Writes [`render_text`](Self::render_text) to `path`.
    pub async fn write_text(&self, path: impl AsRef<Path>) -> Result<(), PipelineError> {
        let path = path.as_ref();
        ensure_parent_dir(path).await?;
        fs::write(path, self.render_text()).await?;
        info!(chunks = self.total_chunks, path = %path.display(), "wrote chunk corpus text");
        Ok(())
    }
}

pub(crate) async fn ensure_parent_dir(path: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}
