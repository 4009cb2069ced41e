/// Stat line parsing for recognized scoreboard text
///
/// This module turns noisy OCR output into a `StatRecord`. Scoreboard rows
/// end with combat score, kills, deaths and assists, so the parser keeps the
/// last four standalone numbers of the first line that has at least four.
/// Digits inside a username are either glued to letters (and ignored) or
/// appear before the stat columns (and dropped by the tail rule).
///
/// Known limitations: a username that ends in a standalone number directly in
/// front of a row with a missing column would be read as the combat score.
/// Only ASCII digits form tokens; digits from other scripts count as word
/// characters, so they never become numbers and they block an adjacent run.
use crate::error::PipelineError;
use crate::stats::{CandidateLine, StatRecord};

/// Characters OCR commonly produces for column separators or a misread "1"
const SEPARATOR_ARTIFACTS: [char; 5] = ['/', '|', '\\', 'l', 'I'];

/// Replace separator artifacts with a single space.
///
/// Applied to the whole text before splitting into lines. Idempotent.
pub fn normalize_artifacts(text: &str) -> String {
    text.chars()
        .map(|c| {
            if SEPARATOR_ARTIFACTS.contains(&c) {
                ' '
            } else {
                c
            }
        })
        .collect()
}

/// Word characters bound a digit run; a run touching one is not standalone.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Extract the standalone integer tokens of a single line.
///
/// A token is a maximal run of ASCII digits whose neighbours are not word
/// characters. Returns `None` when a token does not fit `u32`, since the
/// remaining tokens could no longer be matched to their columns.
pub fn tokenize_line(line: &str) -> Option<Vec<u32>> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let end = i;

        let bounded_left = start == 0 || !is_word_char(chars[start - 1]);
        let bounded_right = end == chars.len() || !is_word_char(chars[end]);
        if !(bounded_left && bounded_right) {
            continue;
        }

        let run: String = chars[start..end].iter().collect();
        match run.parse::<u32>() {
            Ok(value) => tokens.push(value),
            Err(_) => {
                tracing::warn!("Rejecting line with out-of-range number '{}'", run);
                return None;
            }
        }
    }

    Some(tokens)
}

/// Normalize the text and tokenize every line, keeping line order.
pub fn candidate_lines(raw_text: &str) -> Vec<CandidateLine> {
    normalize_artifacts(raw_text)
        .lines()
        .enumerate()
        .map(|(line_index, line)| CandidateLine {
            line_index,
            tokens: tokenize_line(line).unwrap_or_default(),
        })
        .collect()
}

/// Every record the text contains, in the order the rows appear.
pub fn extract_all_records(raw_text: &str) -> Vec<StatRecord> {
    candidate_lines(raw_text)
        .iter()
        .filter(|line| line.is_admissible())
        .filter_map(|line| {
            let record = line.record();
            if let Some(record) = record {
                tracing::debug!(
                    "Line {} admitted with tokens {:?} -> {}",
                    line.line_index,
                    line.tokens,
                    record
                );
            }
            record
        })
        .collect()
}

/// Parse the first stat row out of recognized text.
///
/// # Returns
/// The record of the topmost admissible line, or
/// `PipelineError::NoStatsFound` when no line has four standalone numbers.
///
/// # Examples
/// ```
/// # use valocoach::ocr::text_extraction::parse_stat_record;
/// # use valocoach::stats::StatRecord;
/// let record = parse_stat_record("PlayerOne 189 14 15 5\nHeader CS K D A\n").unwrap();
/// assert_eq!(record, StatRecord::new(189, 14, 15, 5));
/// assert!(parse_stat_record("no numbers here").is_err());
/// ```
pub fn parse_stat_record(raw_text: &str) -> Result<StatRecord, PipelineError> {
    let records = extract_all_records(raw_text);
    if records.len() > 1 {
        tracing::debug!(
            "Found {} stat rows, using the first one",
            records.len()
        );
    }
    records.into_iter().next().ok_or(PipelineError::NoStatsFound)
}
