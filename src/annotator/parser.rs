//! Tolerant parser for the annotator's line-oriented reply.

use tracing::debug;

use crate::corpus::AnnotatedChunk;

/// Delimiter between the bracketed context and the chunk content.
///
/// The split happens on the first occurrence only, so content containing the
/// same byte sequence keeps its remainder intact. Known ambiguity: a context
/// label can never itself contain `], `. Mirrors the format promised in
/// [`crate::annotator::prompt`]; tightening it would change which reply
/// lines are accepted, so the two must change together.
const CONTEXT_DELIMITER: &str = "], ";

/// Parses a raw annotator reply into ordered chunk records.
///
/// Lines that do not follow the `[context], content` shape are skipped
/// without shifting the sub-chunk counter; conversational noise from the
/// service degrades to fewer chunks, never to a failed piece. A reply with
/// no matching lines yields an empty list.
pub fn parse_annotation_response(response: &str, ordinal: usize) -> Vec<AnnotatedChunk> {
    let mut chunks = Vec::new();
    let mut counter = 1usize;

    for line in response.lines() {
        let line = line.trim();
        if line.is_empty() || !line.starts_with('[') {
            continue;
        }
        let Some((head, content)) = line.split_once(CONTEXT_DELIMITER) else {
            debug!(ordinal, "skipping line without context delimiter");
            continue;
        };
        let context = head.strip_prefix('[').unwrap_or(head).to_string();
        chunks.push(AnnotatedChunk {
            chunk_id: format!("{ordinal}_{counter}"),
            original_chunk: ordinal,
            sub_chunk: counter,
            context,
            content: content.to_string(),
            full_text: line.to_string(),
        });
        counter += 1;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_lines_in_order() {
        let response = "[intro], Hello world\nnot a chunk line\n[closing], Goodbye";
        let chunks = parse_annotation_response(response, 4);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chunk_id, "4_1");
        assert_eq!(chunks[0].context, "intro");
        assert_eq!(chunks[0].content, "Hello world");
        assert_eq!(chunks[1].chunk_id, "4_2");
        assert_eq!(chunks[1].context, "closing");
        assert_eq!(chunks[1].content, "Goodbye");
    }

    #[test]
    fn malformed_lines_do_not_shift_counters() {
        let response = "[a], one\n[missing delimiter\nplain chatter\n[b], two";
        let chunks = parse_annotation_response(response, 1);

        let ids: Vec<&str> = chunks.iter().map(|c| c.chunk_id.as_str()).collect();
        assert_eq!(ids, vec!["1_1", "1_2"]);
    }

    #[test]
    fn splits_on_first_delimiter_occurrence_only() {
        let chunks = parse_annotation_response("[ctx], left], right", 2);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].context, "ctx");
        assert_eq!(chunks[0].content, "left], right");
    }

    #[test]
    fn blank_or_unmatched_response_yields_empty_list() {
        assert!(parse_annotation_response("", 1).is_empty());
        assert!(parse_annotation_response("I could not chunk this.", 1).is_empty());
        assert!(parse_annotation_response("\n\n  \n", 1).is_empty());
    }

    #[test]
    fn full_text_preserves_the_raw_line() {
        let chunks = parse_annotation_response("  [ctx], body text  ", 7);
        assert_eq!(chunks[0].full_text, "[ctx], body text");
        assert_eq!(chunks[0].original_chunk, 7);
        assert_eq!(chunks[0].sub_chunk, 1);
    }
}
