//! Size-bounded greedy packing of over-long units.

use tracing::debug;

use super::boundaries::Unit;

/// A size-bounded fragment of one unit, ready for a single annotation
/// request.
#[derive(Clone, Debug, PartialEq)]
pub struct SubUnit {
    /// Ordinal of the parent unit.
    pub unit_index: usize,
    /// 1-based position within the parent unit.
    pub seq: usize,
    pub text: String,
}

/// Splits `text` into pieces of at most `max_chars` characters each.
///
/// Packing is greedy with three fallback levels: whole paragraphs are
/// accumulated first; a paragraph that alone exceeds the budget is split on
/// word boundaries instead of being flushed whole; a single word longer than
/// the budget is truncated to exactly the budget. Only that last case loses
/// text. The word-level remainder stays in the running buffer so following
/// paragraphs can join it.
///
/// Lengths are Unicode scalar counts, not bytes. `max_chars` must already be
/// validated as non-zero by the caller's [`crate::config::SegmenterConfig`].
pub fn pack_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n") {
        if char_count(paragraph) > max_chars {
            flush(&mut pieces, &mut current);
            current = pack_words(paragraph, max_chars, &mut pieces);
            continue;
        }
        if char_count(&current) + char_count(paragraph) > max_chars {
            flush(&mut pieces, &mut current);
            current.push_str(paragraph);
        } else if current.is_empty() {
            current.push_str(paragraph);
        } else {
            current.push_str("\n\n");
            current.push_str(paragraph);
        }
    }

    flush(&mut pieces, &mut current);
    pieces
}

/// Packs one unit into sequenced sub-units.
pub fn pack_unit(unit: &Unit, max_chars: usize) -> Vec<SubUnit> {
    pack_text(&unit.text, max_chars)
        .into_iter()
        .enumerate()
        .map(|(i, text)| SubUnit {
            unit_index: unit.index,
            seq: i + 1,
            text,
        })
        .collect()
}

fn pack_words(paragraph: &str, max_chars: usize, pieces: &mut Vec<String>) -> String {
    let mut buffer = String::new();

    for word in paragraph.split_whitespace() {
        let word_len = char_count(word);
        if word_len > max_chars {
            flush(pieces, &mut buffer);
            debug!(dropped = word_len - max_chars, "truncating over-long token");
            pieces.push(word.chars().take(max_chars).collect());
            continue;
        }
        if buffer.is_empty() {
            buffer.push_str(word);
        } else if char_count(&buffer) + word_len + 1 > max_chars {
            flush(pieces, &mut buffer);
            buffer.push_str(word);
        } else {
            buffer.push(' ');
            buffer.push_str(word);
        }
    }

    buffer
}

fn flush(pieces: &mut Vec<String>, buffer: &mut String) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        pieces.push(trimmed.to_string());
    }
    buffer.clear();
}

fn char_count(text: &str) -> usize {
    text.chars().count()
}
