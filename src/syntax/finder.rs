//! Candidate match discovery
//!
//! Runs a subset of rules over a text segment and reports every non-empty
//! occurrence. Candidates may overlap; see `resolve` for selection.

use std::ops::Range;

use super::rules::RuleSet;

/// A rule occurrence within a text segment
///
/// Offsets are byte offsets into the segment the match was found in. For a
/// nested match that segment is the parent's captured substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Start of the whole occurrence (inclusive)
    pub start: usize,
    /// End of the whole occurrence (exclusive)
    pub end: usize,
    /// Index of the rule that produced this match
    pub rule_index: usize,
    /// Start of the colored range
    pub capture_start: usize,
    /// End of the colored range
    pub capture_end: usize,
    /// Matches inside the capture, relative to `capture_start`
    pub nested: Vec<Match>,
}

impl Match {
    /// A match whose capture is the whole occurrence
    pub fn whole(rule_index: usize, start: usize, end: usize) -> Self {
        Self::captured(rule_index, start..end, start..end)
    }

    /// A match coloring only `capture` within `whole`
    pub fn captured(rule_index: usize, whole: Range<usize>, capture: Range<usize>) -> Self {
        Self {
            start: whole.start,
            end: whole.end,
            rule_index,
            capture_start: capture.start,
            capture_end: capture.end,
            nested: Vec::new(),
        }
    }

    /// Full occurrence range
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Captured range
    pub fn capture_range(&self) -> Range<usize> {
        self.capture_start..self.capture_end
    }
}

/// Find every candidate match of the `active` rules in `text`
///
/// Zero-width occurrences are discarded. For rules with a capture group, an
/// occurrence where the group did not participate (or does not exist) is
/// dropped without producing a match.
pub fn find_matches(text: &str, rules: &RuleSet, active: &[usize]) -> Vec<Match> {
    let mut found = Vec::new();

    for &index in active {
        let Some(rule) = rules.get(index) else {
            continue;
        };

        match rule.capture {
            None => {
                found.extend(
                    rule.regex
                        .find_iter(text)
                        .filter(|m| m.start() < m.end())
                        .map(|m| Match::whole(index, m.start(), m.end())),
                );
            }
            Some(group) => {
                for caps in rule.regex.captures_iter(text) {
                    let Some(whole) = caps.get(0) else { continue };
                    if whole.start() >= whole.end() {
                        continue;
                    }
                    if let Some(cap) = caps.get(group) {
                        found.push(Match::captured(index, whole.range(), cap.range()));
                    }
                }
            }
        }
    }

    found
}
