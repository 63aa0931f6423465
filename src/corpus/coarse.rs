//! The unit-level interchange file written after boundary detection.
//!
//! Verification consumes this file to learn what the coarse pass stored, so
//! the reader is tolerant: blocks that do not follow the layout are skipped,
//! never fatal, and a missing file degrades to an empty corpus.

use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, warn};

use crate::segmentation::Unit;
use crate::types::PipelineError;

use super::records::{BLOCK_SEPARATOR, RULE_SEPARATOR, ensure_parent_dir};

/// One block parsed back from the coarse chunk file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoarseChunk {
    #[serde(rename = "chunk_number")]
    pub number: usize,
    #[serde(rename = "total_chunks")]
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    pub content: String,
}

/// Renders units in the coarse interchange layout.
pub fn render_coarse_chunk_file(source: &str, units: &[Unit]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Source file: {source}");
    let _ = writeln!(out, "Total chunks: {}", units.len());
    out.push_str(BLOCK_SEPARATOR);
    out.push_str("\n\n");

    for unit in units {
        let _ = writeln!(out, "CHUNK {}/{}", unit.index, units.len());
        let _ = writeln!(out, "Length: {} characters", unit.text.chars().count());
        out.push_str(RULE_SEPARATOR);
        out.push('\n');
        out.push_str(&unit.text);
        out.push('\n');
        out.push_str(BLOCK_SEPARATOR);
        out.push_str("\n\n");
    }
    out
}

/// Writes the coarse interchange file for one document's units.
pub async fn write_coarse_chunk_file(
    path: impl AsRef<Path>,
    source: &str,
    units: &[Unit],
) -> Result<(), PipelineError> {
    let path = path.as_ref();
    ensure_parent_dir(path).await?;
    fs::write(path, render_coarse_chunk_file(source, units)).await?;
    info!(units = units.len(), path = %path.display(), "wrote coarse chunk file");
    Ok(())
}

/// Parses the coarse layout back into chunk blocks.
///
/// A block must carry a `CHUNK n/N` header and a dash rule followed by
/// content; anything else is skipped with a warning.
pub fn parse_coarse_chunk_file(content: &str) -> Vec<CoarseChunk> {
    let mut chunks = Vec::new();

    // The section before the first separator is the file header.
    for section in content.split(BLOCK_SEPARATOR).skip(1) {
        let section = section.trim();
        if section.is_empty() {
            continue;
        }

        let lines: Vec<&str> = section.lines().collect();
        let mut number = None;
        let mut total = None;
        let mut length = None;
        let mut body: Option<&[&str]> = None;

        for (idx, line) in lines.iter().enumerate() {
            if let Some(rest) = line.strip_prefix("CHUNK ") {
                let mut parts = rest.splitn(2, '/');
                number = parts.next().and_then(|v| v.trim().parse().ok());
                total = parts.next().and_then(|v| v.trim().parse().ok());
            } else if let Some(rest) = line.strip_prefix("Length: ") {
                length = rest.trim_end_matches(" characters").trim().parse().ok();
            } else if line.starts_with(RULE_SEPARATOR) {
                body = Some(&lines[idx + 1..]);
                break;
            }
        }

        match (number, body) {
            (Some(number), Some(body)) if !body.is_empty() => chunks.push(CoarseChunk {
                number,
                total: total.unwrap_or(0),
                length,
                content: body.join("\n"),
            }),
            _ => warn!("skipping malformed coarse chunk block"),
        }
    }

    chunks
}

/// Reads and parses a coarse chunk file.
///
/// A missing file is logged and yields an empty list so callers can decide
/// whether to continue; other i/o failures propagate.
pub async fn read_coarse_chunk_file(
    path: impl AsRef<Path>,
) -> Result<Vec<CoarseChunk>, PipelineError> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "coarse chunk file missing");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };
    Ok(parse_coarse_chunk_file(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(index: usize, text: &str) -> Unit {
        Unit {
            index,
            start: 0,
            end: text.len(),
            text: text.to_string(),
        }
    }

    #[test]
    fn writer_and_reader_round_trip() {
        let units = vec![
            unit(1, "(I) (1) Title A\nBody A."),
            unit(2, "(II) (2) Title B\nBody B."),
        ];
        let rendered = render_coarse_chunk_file("corpus/book.pdf", &units);
        let parsed = parse_coarse_chunk_file(&rendered);

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].number, 1);
        assert_eq!(parsed[0].total, 2);
        assert_eq!(parsed[0].length, Some(23));
        assert_eq!(parsed[0].content, "(I) (1) Title A\nBody A.");
        assert_eq!(parsed[1].number, 2);
        assert_eq!(parsed[1].content, "(II) (2) Title B\nBody B.");
    }

    #[test]
    fn malformed_blocks_are_skipped() {
        let mut rendered = render_coarse_chunk_file("src.pdf", &[unit(1, "Body.")]);
        rendered.push_str("no header here\njust noise\n");
        rendered.push_str(BLOCK_SEPARATOR);
        rendered.push('\n');

        let parsed = parse_coarse_chunk_file(&rendered);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].number, 1);
    }

    #[test]
    fn header_section_is_not_a_chunk() {
        let rendered = render_coarse_chunk_file("src.pdf", &[]);
        assert!(parse_coarse_chunk_file(&rendered).is_empty());
    }

    #[tokio::test]
    async fn missing_file_degrades_to_empty_corpus() {
        let chunks = read_coarse_chunk_file("/no/such/coarse_chunks.txt")
            .await
            .unwrap();
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunks_output.txt");
        let units = vec![unit(1, "Như vầy tôi nghe: one story.")];

        write_coarse_chunk_file(&path, "book.pdf", &units)
            .await
            .unwrap();
        let parsed = read_coarse_chunk_file(&path).await.unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].content, "Như vầy tôi nghe: one story.");
    }
}
