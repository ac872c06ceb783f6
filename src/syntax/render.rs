//! Rendering resolved matches into colored segments

use super::finder::Match;
use super::rules::RuleSet;
use super::style::{Color, Segment};

/// Render `text` with its resolved `matches`
///
/// Text outside any capture is emitted in `parent` (plain when `None`). A
/// match without nested matches colors its capture; otherwise the capture is
/// rendered recursively with the match's color as the new parent, so gaps
/// between nested matches take the enclosing rule's color.
pub fn render<'t>(
    text: &'t str,
    matches: &[Match],
    rules: &RuleSet,
    parent: Option<Color>,
) -> Vec<Segment<'t>> {
    let mut out = Vec::new();
    render_into(text, matches, rules, parent, &mut out);
    out
}

fn render_into<'t>(
    text: &'t str,
    matches: &[Match],
    rules: &RuleSet,
    parent: Option<Color>,
    out: &mut Vec<Segment<'t>>,
) {
    let mut cursor = 0;

    for m in matches {
        emit(out, &text[cursor..m.start], parent);
        emit(out, &text[m.start..m.capture_start], parent);

        let color = rules[m.rule_index].color;
        let captured = &text[m.capture_range()];
        if m.nested.is_empty() {
            emit(out, captured, Some(color));
        } else {
            render_into(captured, &m.nested, rules, Some(color), out);
        }

        emit(out, &text[m.capture_end..m.end], parent);
        cursor = m.end;
    }

    emit(out, &text[cursor..], parent);
}

fn emit<'t>(out: &mut Vec<Segment<'t>>, text: &'t str, color: Option<Color>) {
    if !text.is_empty() {
        out.push(Segment::new(text, color));
    }
}
