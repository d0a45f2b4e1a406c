// Validation verdict

use serde::{Deserialize, Serialize};

/// Result of checking whether a word derives from a root.
///
/// `root` is `None` only when the root itself is unknown; `scheme` is set
/// only for a valid word.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub root: Option<String>,
    pub scheme: Option<String>,
}

impl ValidationResult {
    /// The root is not known at all.
    pub fn unknown_root() -> Self {
        Self::default()
    }

    /// The root is known but no scheme produces the word.
    pub fn no_match(root: impl Into<String>) -> Self {
        Self {
            valid: false,
            root: Some(root.into()),
            scheme: None,
        }
    }

    /// `scheme` applied to `root` produces the word.
    pub fn matched(root: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            valid: true,
            root: Some(root.into()),
            scheme: Some(scheme.into()),
        }
    }
}
