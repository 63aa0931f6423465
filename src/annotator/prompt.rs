//! Task descriptions for the annotation and judging services.
//!
//! The `[context], content` output contract is centralized here; the parser
//! in [`crate::annotator::parser`] mirrors it and the two must change
//! together.

use std::fmt::Write as _;

use crate::corpus::AnnotatedChunk;

/// Builds the semantic-annotation task for one piece of unit text.
///
/// The instructions pin the annotator to the line format the parser expects:
/// verbatim wording, one `[context], content` line per sub-chunk, nothing
/// outside that format.
pub fn annotation_request(text: &str, ordinal: usize) -> String {
    format!(
        "You are an expert at analysing and segmenting scripture texts. Read the \
passage below until you understand its full narrative and context, then perform \
semantic chunking on it.\n\
\n\
REQUIREMENTS:\n\
1. Understand the whole story and its context before splitting.\n\
2. Split the meaning into sub-chunks that each carry one complete idea.\n\
3. Keep the original wording verbatim inside every sub-chunk.\n\
4. Prefix each sub-chunk with a short contextual label.\n\
5. Answer with exactly one line per sub-chunk in the format: [context], content\n\
6. Output only the chunk lines, with no commentary before or after them.\n\
\n\
PASSAGE TO CHUNK (piece {ordinal}):\n\
{text}\n\
\n\
Perform the semantic chunking and reply in the format:\n\
[context], content"
    )
}

/// Builds the quality-assessment task comparing a stored chunk against its
/// fresh re-annotation.
///
/// The judge is asked for a single JSON object so the reply can be parsed
/// into a [`crate::verification::JudgeAssessment`].
pub fn judge_request(original: &str, reannotated: &[AnnotatedChunk]) -> String {
    let mut listing = String::new();
    for chunk in reannotated {
        let _ = writeln!(listing, "- [{}], {}", chunk.context, chunk.content);
    }
    format!(
        "You are an expert judge of chunking quality for scripture corpora. \
Compare the original chunk with the result of re-chunking it.\n\
\n\
ORIGINAL CHUNK:\n\
{original}\n\
\n\
AGENTIC CHUNKING RESULT:\n\
{listing}\n\
Score the re-chunking on each criterion from 1 to 10:\n\
\n\
1. ACCURACY: does the result preserve the full original content?\n\
2. COHERENCE: is each chunk a complete, connected idea?\n\
3. CONTEXT: are the contextual labels appropriate and useful?\n\
4. LOGIC: is the split logical and easy to follow?\n\
5. ADDED VALUE: what does the re-chunking add over the original chunk?\n\
\n\
Reply with a single JSON object:\n\
{{\n\
  \"accuracy_score\": <1-10>,\n\
  \"coherence_score\": <1-10>,\n\
  \"context_score\": <1-10>,\n\
  \"logic_score\": <1-10>,\n\
  \"added_value_score\": <1-10>,\n\
  \"overall_score\": <average>,\n\
  \"feedback\": \"<detailed remarks>\",\n\
  \"strengths\": [\"<strength 1>\", \"<strength 2>\"],\n\
  \"improvements\": [\"<improvement 1>\", \"<improvement 2>\"]\n\
}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(context: &str, content: &str) -> AnnotatedChunk {
        AnnotatedChunk {
            chunk_id: "1_1".to_string(),
            original_chunk: 1,
            sub_chunk: 1,
            context: context.to_string(),
            content: content.to_string(),
            full_text: format!("[{context}], {content}"),
        }
    }

    #[test]
    fn annotation_request_embeds_passage_and_ordinal() {
        let request = annotation_request("Thus the Blessed One spoke.", 3);
        assert!(request.contains("PASSAGE TO CHUNK (piece 3):"));
        assert!(request.contains("Thus the Blessed One spoke."));
        assert!(request.contains("[context], content"));
    }

    #[test]
    fn judge_request_lists_reannotated_chunks() {
        let chunks = vec![chunk("intro", "Hello world"), chunk("closing", "Goodbye")];
        let request = judge_request("the original text", &chunks);
        assert!(request.contains("ORIGINAL CHUNK:\nthe original text"));
        assert!(request.contains("- [intro], Hello world"));
        assert!(request.contains("- [closing], Goodbye"));
        assert!(request.contains("\"overall_score\""));
    }
}
