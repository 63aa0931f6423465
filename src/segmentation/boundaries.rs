//! Structural boundary detection over cleaned document text.
//!
//! Two pattern families mark the start of a narrative unit (a sutra):
//! title lines like `(VI) (37) Tôn Giả Ananda` and numbered opening lines
//! like `1. - Như vầy tôi nghe:`. Titles take priority; openings are only a
//! fallback when a text carries no title lines at all.

use regex::Regex;
use serde::Serialize;
use tracing::info;

use crate::config::SegmenterConfig;
use crate::types::PipelineError;

/// A parenthesised Roman numeral, a parenthesised arabic number, then the
/// title text, anchored at line start.
const TITLE_PATTERN: &str = r"(?m)^\s*\(\s*[IVXLCDM]+\s*\)\s*\(\s*\d+\s*\)\s+.+$";

/// One top-level narrative segment of a document.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    /// 1-based position of the unit within its document.
    pub index: usize,
    /// Byte offset of the unit's span start in the cleaned text.
    pub start: usize,
    /// Byte offset one past the unit's span end.
    pub end: usize,
    /// The span's text, trimmed of surrounding whitespace.
    pub text: String,
}

/// Which boundary-pattern family produced the split points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryFamily {
    Title,
    Opening,
    WholeText,
}

/// Detection result: the units plus diagnostics about how they were found.
///
/// The match counts and chosen family are observational only; consuming them
/// never feeds back into how the text was split.
#[derive(Clone, Debug)]
pub struct BoundaryScan {
    pub title_matches: usize,
    pub opening_matches: usize,
    pub family: BoundaryFamily,
    pub units: Vec<Unit>,
}

pub struct BoundaryDetector {
    title_re: Regex,
    opening_re: Regex,
}

impl BoundaryDetector {
    pub fn new(config: &SegmenterConfig) -> Result<Self, PipelineError> {
        let title_re =
            Regex::new(TITLE_PATTERN).map_err(|err| PipelineError::Config(err.to_string()))?;
        let opening_pattern = format!(
            r"(?m)^\s*\d+\.\s*(?:-\s*)?{}",
            regex::escape(config.opening_phrase())
        );
        let opening_re =
            Regex::new(&opening_pattern).map_err(|err| PipelineError::Config(err.to_string()))?;
        Ok(Self {
            title_re,
            opening_re,
        })
    }

    /// Splits `text` into ordered, non-overlapping units.
    ///
    /// Unit *i* spans from split point *i* to split point *i+1* (exclusive),
    /// the last unit to end-of-text. Spans that trim to nothing are
    /// discarded. With neither family matching, the whole trimmed text
    /// becomes a single unit (or none, when the text is empty).
    pub fn detect(&self, text: &str) -> BoundaryScan {
        let title_starts: Vec<usize> = self.title_re.find_iter(text).map(|m| m.start()).collect();
        let opening_starts: Vec<usize> =
            self.opening_re.find_iter(text).map(|m| m.start()).collect();

        let (family, starts) = if !title_starts.is_empty() {
            (BoundaryFamily::Title, title_starts.as_slice())
        } else if !opening_starts.is_empty() {
            (BoundaryFamily::Opening, opening_starts.as_slice())
        } else {
            (BoundaryFamily::WholeText, &[][..])
        };

        info!(
            titles = title_starts.len(),
            openings = opening_starts.len(),
            family = ?family,
            "boundary scan"
        );

        let mut units = Vec::new();
        if starts.is_empty() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                units.push(Unit {
                    index: 1,
                    start: 0,
                    end: text.len(),
                    text: trimmed.to_string(),
                });
            }
        } else {
            for (i, &start) in starts.iter().enumerate() {
                let end = starts.get(i + 1).copied().unwrap_or(text.len());
                let trimmed = text[start..end].trim();
                if trimmed.is_empty() {
                    continue;
                }
                units.push(Unit {
                    index: units.len() + 1,
                    start,
                    end,
                    text: trimmed.to_string(),
                });
            }
        }

        BoundaryScan {
            title_matches: title_starts.len(),
            opening_matches: opening_starts.len(),
            family,
            units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> BoundaryDetector {
        BoundaryDetector::new(&SegmenterConfig::default()).unwrap()
    }

    #[test]
    fn splits_on_title_lines() {
        let text = "(I) (1) Title A\nBody A.\n(II) (2) Title B\nBody B.";
        let scan = detector().detect(text);

        assert_eq!(scan.family, BoundaryFamily::Title);
        assert_eq!(scan.title_matches, 2);
        assert_eq!(scan.units.len(), 2);
        assert_eq!(scan.units[0].text, "(I) (1) Title A\nBody A.");
        assert_eq!(scan.units[1].text, "(II) (2) Title B\nBody B.");
    }

    #[test]
    fn unit_spans_cover_from_first_match_to_end_without_gaps() {
        let text = "preamble before the first story\n(I) (1) One\nbody\n(II) (2) Two\nbody tail";
        let scan = detector().detect(text);

        assert_eq!(scan.units.len(), 2);
        assert_eq!(scan.units[1].end, text.len());
        for pair in scan.units.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert!(text[scan.units[0].start..].starts_with("(I) (1) One"));
    }

    #[test]
    fn openings_are_only_a_fallback() {
        let text = "1. - Như vầy tôi nghe:\nfirst story\n2. Như vầy tôi nghe:\nsecond story";
        let scan = detector().detect(text);

        assert_eq!(scan.family, BoundaryFamily::Opening);
        assert_eq!(scan.opening_matches, 2);
        assert_eq!(scan.units.len(), 2);
        assert!(scan.units[0].text.starts_with("1. - Như vầy tôi nghe:"));
        assert!(scan.units[1].text.starts_with("2. Như vầy tôi nghe:"));
    }

    #[test]
    fn titles_win_over_openings_when_both_exist() {
        let text = "(I) (1) Title\n1. - Như vầy tôi nghe:\nbody";
        let scan = detector().detect(text);

        assert_eq!(scan.family, BoundaryFamily::Title);
        assert_eq!(scan.title_matches, 1);
        assert_eq!(scan.opening_matches, 1);
        assert_eq!(scan.units.len(), 1);
    }

    #[test]
    fn text_without_boundaries_is_one_unit() {
        let scan = detector().detect("  just some narrative text  ");

        assert_eq!(scan.family, BoundaryFamily::WholeText);
        assert_eq!(scan.units.len(), 1);
        assert_eq!(scan.units[0].text, "just some narrative text");
    }

    #[test]
    fn empty_text_yields_zero_units() {
        let scan = detector().detect("   \n ");
        assert!(scan.units.is_empty());
    }

    #[test]
    fn custom_opening_phrase_is_honored() {
        let config = SegmenterConfig::new(4000, "Thus have I heard:").unwrap();
        let detector = BoundaryDetector::new(&config).unwrap();
        let text = "1. Thus have I heard:\na story\n2. Thus have I heard:\nanother";
        let scan = detector.detect(text);

        assert_eq!(scan.family, BoundaryFamily::Opening);
        assert_eq!(scan.units.len(), 2);
    }
}
