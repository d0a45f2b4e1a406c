// Rewrite rules and rule groups
//
// A group bundles the ordered rewrite rules that apply in one context:
// a `<category>_<scheme>` pair, or a root-specific `exception_<root>_<scheme>`.

use serde::{Deserialize, Serialize};

/// Clause prefix of a global replacement rule.
pub const REPLACE_PREFIX: &str = "replace=";

/// Clause prefix of a final-letter replacement rule.
pub const REPLACE_FINAL_PREFIX: &str = "replace_final=";

/// The rewrite performed by a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewriteOp {
    /// Replace every occurrence of `from` with `to`.
    Replace { from: String, to: String },
    /// Replace the last character of the word with `to`.
    ReplaceFinal { to: String },
}

/// One rewrite rule together with its position inside its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationRule {
    pub order: usize,
    #[serde(flatten)]
    pub op: RewriteOp,
}

impl TransformationRule {
    pub fn replace(order: usize, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            order,
            op: RewriteOp::Replace {
                from: from.into(),
                to: to.into(),
            },
        }
    }

    pub fn replace_final(order: usize, to: impl Into<String>) -> Self {
        Self {
            order,
            op: RewriteOp::ReplaceFinal { to: to.into() },
        }
    }

    /// Apply this rule to `word`.
    ///
    /// `ReplaceFinal` on an empty word is a no-op.
    pub fn apply(&self, word: &str) -> String {
        match &self.op {
            RewriteOp::Replace { from, to } => word.replace(from.as_str(), to),
            RewriteOp::ReplaceFinal { to } => {
                let mut out = word.to_string();
                if out.pop().is_some() {
                    out.push_str(to);
                }
                out
            }
        }
    }
}

/// Formats the rule as its definition-file clause.
impl std::fmt::Display for TransformationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.op {
            RewriteOp::Replace { from, to } => write!(f, "{REPLACE_PREFIX}{from}>{to}"),
            RewriteOp::ReplaceFinal { to } => write!(f, "{REPLACE_FINAL_PREFIX}{to}"),
        }
    }
}

/// A keyed, ordered list of rewrite rules with an optional free-text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationGroup {
    pub key: String,
    #[serde(default)]
    pub rules: Vec<TransformationRule>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl TransformationGroup {
    /// Create an empty group.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            rules: Vec::new(),
            comment: None,
        }
    }

    /// Append a rule, assigning it the next order index.
    pub fn push(&mut self, op: RewriteOp) {
        let order = self.rules.len();
        self.rules.push(TransformationRule { order, op });
    }

    /// Append a comment line, newline-joining it to any existing comment.
    pub fn append_comment(&mut self, line: &str) {
        match &mut self.comment {
            Some(existing) => {
                existing.push('\n');
                existing.push_str(line);
            }
            None => self.comment = Some(line.to_string()),
        }
    }

    /// Stable-sort the rules by order index and renumber them `0..n`.
    pub fn normalize_order(&mut self) {
        self.rules.sort_by_key(|r| r.order);
        for (i, rule) in self.rules.iter_mut().enumerate() {
            rule.order = i;
        }
    }

    /// Apply every rule in sequence.
    ///
    /// Rules are expected in ascending order index; groups built by the
    /// definition parser or passed through [`normalize_order`](Self::normalize_order)
    /// satisfy this.
    pub fn apply(&self, word: &str) -> String {
        self.rules
            .iter()
            .fold(word.to_string(), |acc, rule| rule.apply(&acc))
    }
}
