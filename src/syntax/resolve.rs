//! Overlap resolution and nested expansion
//!
//! Candidates are selected greedily: earliest start first, lower rule index
//! first on ties, and a candidate is kept only if none of its bytes are
//! already claimed. There is no backtracking, so declared priority wins over
//! coverage.
//!
//! Every kept match whose rule names nested rules is then resolved again,
//! with the same two steps, over its captured substring and restricted to
//! those rules.

use tracing::trace;

use super::finder::{find_matches, Match};
use super::rules::RuleSet;

/// Select a non-overlapping subset of `candidates` for a segment of `len` bytes
///
/// The result is in ascending `start` order.
pub fn resolve_overlaps(mut candidates: Vec<Match>, len: usize) -> Vec<Match> {
    candidates.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.rule_index.cmp(&b.rule_index))
    });

    let mut claimed = vec![false; len];
    let mut accepted = Vec::new();

    for m in candidates {
        let span = &mut claimed[m.range()];
        if span.iter().any(|&used| used) {
            continue;
        }
        span.fill(true);
        accepted.push(m);
    }

    accepted
}

/// Resolve `text` against the `active` rules, including nested matches
pub fn resolve(text: &str, rules: &RuleSet, active: &[usize]) -> Vec<Match> {
    let mut path = Vec::new();
    resolve_within(text, rules, active, &mut path)
}

/// `path` holds the rules of every enclosing match; they are not eligible
/// again further down, which keeps cyclic nested references finite.
fn resolve_within(
    text: &str,
    rules: &RuleSet,
    active: &[usize],
    path: &mut Vec<usize>,
) -> Vec<Match> {
    let candidates = find_matches(text, rules, active);
    let candidate_count = candidates.len();
    let accepted = resolve_overlaps(candidates, text.len());
    trace!(
        depth = path.len(),
        candidates = candidate_count,
        accepted = accepted.len(),
        "resolved segment"
    );

    accepted
        .into_iter()
        .map(|m| expand_nested(m, text, rules, path))
        .collect()
}

fn expand_nested(m: Match, text: &str, rules: &RuleSet, path: &mut Vec<usize>) -> Match {
    let owner = m.rule_index;
    let eligible: Vec<usize> = rules[owner]
        .nested
        .iter()
        .copied()
        .filter(|&i| i != owner && !path.contains(&i))
        .collect();

    if eligible.is_empty() {
        return m;
    }

    let inner = &text[m.capture_range()];
    path.push(owner);
    let nested = resolve_within(inner, rules, &eligible, path);
    path.pop();

    Match { nested, ..m }
}
