//! Round-trip with the external semantic-annotation and judging services.
//!
//! * [`client`] — typed chat client for an OpenAI-compatible endpoint.
//! * [`prompt`] — task descriptions sent to the annotator and the judge.
//! * [`parser`] — tolerant line parser for the annotator's reply format.

pub mod client;
pub mod parser;
pub mod prompt;

pub use client::{ChatClient, CompletionProvider};
pub use parser::parse_annotation_response;
pub use prompt::{annotation_request, judge_request};

use tracing::warn;

use crate::corpus::AnnotatedChunk;

/// One full annotation round-trip: build the request, submit it, parse the
/// reply into chunks.
///
/// Transport failures and empty replies degrade to an empty list at this
/// boundary; the caller decides how to log and account for the loss.
pub async fn annotate_text(
    provider: &dyn CompletionProvider,
    text: &str,
    ordinal: usize,
) -> Vec<AnnotatedChunk> {
    let request = annotation_request(text, ordinal);
    let response = match provider.submit(&request).await {
        Ok(response) => response,
        Err(err) => {
            warn!(ordinal, %err, "annotation call failed");
            return Vec::new();
        }
    };
    if response.is_empty() {
        return Vec::new();
    }
    parse_annotation_response(&response, ordinal)
}
