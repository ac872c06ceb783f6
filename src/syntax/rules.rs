//! Highlighting rules
//!
//! A [`Rule`] is the declarative record read from a rule file. A [`RuleSet`]
//! compiles an ordered list of them once; afterwards it is read-only and the
//! position of each rule is its priority (lower index wins ties).

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Index;
use std::path::Path;

use regex::Regex;
use serde::de::IgnoredAny;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::style::Color;
use crate::error::ConfigError;

/// A single highlighting rule as declared in a rule file
///
/// Field names are matched in any case (`pattern`, `Pattern`, `PATTERN`), as
/// older rule files were written for a case-insensitive reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Regular expression to match
    pub pattern: String,
    /// Color specification (named, `#rrggbb`, or `rgb(r,g,b)`)
    pub color: String,
    /// Patterns of other rules allowed to highlight inside this rule's capture
    pub nested: Vec<String>,
    /// 1-based capture group to color instead of the whole match
    pub capture: Option<usize>,
}

impl Rule {
    /// Create a rule with no capture group and no nested rules
    pub fn new(pattern: &str, color: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            color: color.to_string(),
            nested: Vec::new(),
            capture: None,
        }
    }

    /// Builder: color only this capture group
    pub fn with_capture(mut self, group: usize) -> Self {
        self.capture = Some(group);
        self
    }

    /// Builder: allow these rules (by pattern) inside the capture
    pub fn with_nested(mut self, patterns: &[&str]) -> Self {
        self.nested = patterns.iter().map(|p| p.to_string()).collect();
        self
    }
}

/// A rule-file field value, before it is checked against the field it names
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
    List(Vec<String>),
    Other(#[allow(dead_code)] IgnoredAny),
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let fields = BTreeMap::<String, FieldValue>::deserialize(deserializer)?;

        let mut seen = BTreeSet::new();
        let mut pattern = None;
        let mut color = None;
        let mut nested = Vec::new();
        let mut capture = None;

        for (key, value) in fields {
            let name = key.to_ascii_lowercase();
            if !matches!(name.as_str(), "pattern" | "color" | "nested" | "capture") {
                continue;
            }
            if !seen.insert(name.clone()) {
                return Err(D::Error::custom(format!("field `{}` is given more than once", name)));
            }

            match (name.as_str(), value) {
                ("pattern", FieldValue::Text(text)) => pattern = Some(text),
                ("color", FieldValue::Text(text)) => color = Some(text),
                ("nested", FieldValue::List(list)) => nested = list,
                ("nested", FieldValue::Null) => {}
                ("capture", FieldValue::Integer(n)) => {
                    capture = Some(usize::try_from(n).map_err(|_| not_a_group::<D::Error>())?)
                }
                ("capture", FieldValue::Null) => {}
                ("nested", _) => {
                    return Err(D::Error::custom("field `nested` must be a list of strings"))
                }
                ("capture", _) => return Err(not_a_group()),
                _ => return Err(D::Error::custom(format!("field `{}` must be a string", name))),
            }
        }

        Ok(Rule {
            pattern: pattern.ok_or_else(|| D::Error::missing_field("pattern"))?,
            color: color.ok_or_else(|| D::Error::missing_field("color"))?,
            nested,
            capture,
        })
    }
}

fn not_a_group<E: serde::de::Error>() -> E {
    E::custom("field `capture` must be a positive integer")
}

/// TOML rule files hold an array of `[[rule]]` tables
#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rule: Vec<Rule>,
}

/// A rule with its regex compiled and references resolved
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// Compiled pattern
    pub regex: Regex,
    /// Parsed color
    pub color: Color,
    /// Capture group to color, if any
    pub capture: Option<usize>,
    /// Indices of rules eligible inside this rule's capture, in declared order
    pub nested: Vec<usize>,
}

/// Ordered, immutable collection of compiled rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile an ordered list of rules
    ///
    /// Fails on an empty list, an invalid pattern or color, or a zero capture
    /// index. The error names the offending rule.
    pub fn new(rules: Vec<Rule>) -> Result<Self, ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::EmptyRuleSet);
        }

        let mut compiled = Vec::with_capacity(rules.len());
        for (index, rule) in rules.iter().enumerate() {
            let regex = Regex::new(&rule.pattern).map_err(|source| ConfigError::InvalidPattern {
                index,
                pattern: rule.pattern.clone(),
                source,
            })?;

            let color = Color::parse(&rule.color).ok_or_else(|| ConfigError::InvalidColor {
                index,
                pattern: rule.pattern.clone(),
                color: rule.color.clone(),
            })?;

            if let Some(group) = rule.capture {
                if group == 0 {
                    return Err(ConfigError::InvalidCapture {
                        index,
                        pattern: rule.pattern.clone(),
                    });
                }
                // captures_len counts the implicit whole-match group 0
                if group >= regex.captures_len() {
                    warn!(
                        rule = index,
                        pattern = %rule.pattern,
                        capture = group,
                        "capture group does not exist; this rule will never highlight"
                    );
                }
            }

            if let Some(first) = rules[..index].iter().position(|r| r.pattern == rule.pattern) {
                debug!(
                    rule = index,
                    shadowed_by = first,
                    "duplicate pattern; nested references resolve to the earlier rule"
                );
            }

            compiled.push(CompiledRule {
                regex,
                color,
                capture: rule.capture,
                nested: resolve_nested(index, rule, &rules),
            });
        }

        info!(rules = compiled.len(), "compiled rule set");
        Ok(Self { rules: compiled })
    }

    /// Load a rule file: `.toml` as `[[rule]]` tables, anything else as a JSON array
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loading rules");
        Self::new(parse_rules(&contents, path)?)
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a constructed rule set
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Get a rule by index
    pub fn get(&self, index: usize) -> Option<&CompiledRule> {
        self.rules.get(index)
    }

    /// Every rule index, in priority order
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.rules.len()).collect()
    }
}

impl Index<usize> for RuleSet {
    type Output = CompiledRule;

    fn index(&self, index: usize) -> &CompiledRule {
        &self.rules[index]
    }
}

/// Parse rule file contents, choosing the format from the file extension
pub fn parse_rules(contents: &str, path: &Path) -> Result<Vec<Rule>, ConfigError> {
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str::<RuleFile>(contents)
            .map(|file| file.rule)
            .map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })
    } else {
        serde_json::from_str(contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Map a rule's nested pattern strings to rule indices
///
/// The first rule declaring an identical pattern wins. Unknown names are
/// skipped, repeated names collapse to one entry.
fn resolve_nested(owner: usize, rule: &Rule, rules: &[Rule]) -> Vec<usize> {
    let mut indices = Vec::with_capacity(rule.nested.len());
    for name in &rule.nested {
        match rules.iter().position(|r| &r.pattern == name) {
            Some(target) if !indices.contains(&target) => indices.push(target),
            Some(_) => {}
            None => warn!(
                rule = owner,
                nested = %name,
                "nested pattern does not match any rule; ignoring"
            ),
        }
    }
    indices
}
