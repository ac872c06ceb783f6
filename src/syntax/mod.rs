//! Rule-driven highlighting engine
//!
//! This module turns a line of text and an ordered rule set into colored
//! output:
//! - candidate discovery per rule (`finder`)
//! - greedy, priority-ordered overlap resolution and nested expansion (`resolve`)
//! - segment rendering with parent color context (`render`)

mod finder;
mod highlighter;
mod render;
mod resolve;
mod rules;
mod style;

pub use finder::{find_matches, Match};
pub use highlighter::Highlighter;
pub use render::render;
pub use resolve::{resolve, resolve_overlaps};
pub use rules::{parse_rules, CompiledRule, Rule, RuleSet};
pub use style::{Color, Segment};
