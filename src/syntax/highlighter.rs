//! Line highlighter
//!
//! Ties the pipeline together for one line at a time: find candidates for
//! every rule, resolve overlaps, expand nested rules, render. Lines are
//! independent, so a `Highlighter` can be shared across threads freely.

use super::finder::Match;
use super::render::render;
use super::resolve::resolve;
use super::rules::RuleSet;
use super::style::Segment;

/// Highlights lines against a fixed rule set
#[derive(Debug, Clone)]
pub struct Highlighter {
    rules: RuleSet,
    top_level: Vec<usize>,
    /// Whether rendered lines carry color sequences
    pub enabled: bool,
}

impl Highlighter {
    /// Create a highlighter with color enabled
    pub fn new(rules: RuleSet) -> Self {
        let top_level = rules.all_indices();
        Self {
            rules,
            top_level,
            enabled: true,
        }
    }

    /// Builder: enable or disable color output
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Resolve a line into its match tree
    pub fn resolve_line(&self, line: &str) -> Vec<Match> {
        resolve(line, &self.rules, &self.top_level)
    }

    /// Resolve and render a line into segments
    pub fn segments<'t>(&self, line: &'t str) -> Vec<Segment<'t>> {
        let matches = self.resolve_line(line);
        render(line, &matches, &self.rules, None)
    }

    /// Highlight a line, returning it with ANSI color sequences
    ///
    /// With color disabled the line is returned unchanged.
    pub fn highlight_line(&self, line: &str) -> String {
        if !self.enabled {
            return line.to_string();
        }

        self.segments(line)
            .iter()
            .map(|segment| segment.to_string())
            .collect()
    }
}
