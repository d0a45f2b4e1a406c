// Generation engine
//
// Fills a scheme template with a root's canonical letters, then rewrites the
// result with the groups selected by the root type and scheme name:
//
//   1. category group   `<category>_<scheme>`   (Lafif: mithal, lafif, and
//                                                naqis when lafif is absent)
//   2. exception group  `exception_<root>_<scheme>`
//   3. nunation of a weak active participle ending in yeh
//
// Every operation here takes the engine state explicitly; there is no
// global registry.

use sarf_core::character::{KASRATAN, YEH};
use sarf_core::{InvalidRoot, RootType, ValidationResult, canonical_letters, classify};
use sarf_store::{PatternStore, RootStore};

use crate::MorphologyError;
use crate::registry::TransformationRegistry;

/// Scheme name of the active participle, which gets nunation when the
/// root is weak.
pub const ACTIVE_PARTICIPLE: &str = "فاعل";

/// Template placeholders for root letters 1, 2 and 3.
pub const PLACEHOLDERS: [&str; 3] = ["{1}", "{2}", "{3}"];

/// Prefix of root-specific exception group keys.
pub const EXCEPTION_PREFIX: &str = "exception";

/// The three process-lifetime stores, owned together.
#[derive(Debug, Default)]
pub struct EngineState {
    pub roots: RootStore,
    pub patterns: PatternStore,
    pub transformations: TransformationRegistry,
}

impl EngineState {
    /// Empty state whose pattern table starts with `pattern_capacity` buckets.
    pub fn with_pattern_capacity(pattern_capacity: usize) -> Self {
        Self {
            roots: RootStore::new(),
            patterns: PatternStore::with_capacity(pattern_capacity),
            transformations: TransformationRegistry::new(),
        }
    }
}

/// Key of the category group for `category` and `scheme`.
pub fn category_key(category: &str, scheme: &str) -> String {
    format!("{category}_{scheme}")
}

/// Key of the exception group for `root` and `scheme`.
pub fn exception_key(root: &str, scheme: &str) -> String {
    format!("{EXCEPTION_PREFIX}_{root}_{scheme}")
}

/// Substitute the three placeholders in `template`.
pub fn fill_template(template: &str, letters: [char; 3]) -> String {
    let mut word = template.to_string();
    let mut buf = [0u8; 4];
    for (placeholder, letter) in PLACEHOLDERS.iter().zip(letters) {
        word = word.replace(placeholder, letter.encode_utf8(&mut buf));
    }
    word
}

/// Category group keys to apply, in order, for a root type and scheme.
pub fn category_sequence(
    registry: &TransformationRegistry,
    root_type: RootType,
    scheme: &str,
) -> Vec<String> {
    match root_type {
        RootType::Lafif => {
            let lafif = category_key(RootType::Lafif.category(), scheme);
            let has_lafif = registry.contains(&lafif);
            let mut keys = vec![category_key(RootType::Mithal.category(), scheme), lafif];
            if !has_lafif {
                keys.push(category_key(RootType::Naqis.category(), scheme));
            }
            keys
        }
        other => vec![category_key(other.category(), scheme)],
    }
}

/// Produce the surface word for `root` under `scheme`, without recording
/// anything.
pub fn derive_word(
    registry: &TransformationRegistry,
    root: &str,
    scheme: &str,
    template: &str,
) -> Result<String, InvalidRoot> {
    let letters = canonical_letters(root)?;
    let root_type = classify(root)?;

    let mut word = fill_template(template, letters);
    for key in category_sequence(registry, root_type, scheme) {
        word = registry.apply(&key, &word);
    }
    word = registry.apply(&exception_key(root, scheme), &word);

    let weak = matches!(root_type, RootType::Naqis | RootType::Lafif | RootType::Ajwaf);
    if scheme == ACTIVE_PARTICIPLE && weak && word.ends_with(YEH) {
        word.pop();
        word.push(KASRATAN);
    }

    tracing::debug!(root, scheme, %root_type, word = %word, "derived word");
    Ok(word)
}

/// Generate the word for `root` under `scheme` and record it as a
/// derivative of the root.
pub fn generate(state: &mut EngineState, root: &str, scheme: &str) -> Result<String, MorphologyError> {
    if !state.roots.contains(root) {
        return Err(MorphologyError::RootNotFound(root.to_string()));
    }
    let template = state
        .patterns
        .get(scheme)
        .ok_or_else(|| MorphologyError::SchemeNotFound(scheme.to_string()))?;
    let word = derive_word(&state.transformations, root, scheme, template)?;
    state.roots.record_derivative(root, &word);
    Ok(word)
}

/// Generate `root` under every scheme, in pattern-table bucket order.
///
/// An unknown root yields an empty list. Every produced word is recorded.
pub fn generate_all(state: &mut EngineState, root: &str) -> Result<Vec<String>, MorphologyError> {
    if !state.roots.contains(root) {
        return Ok(Vec::new());
    }
    let mut words = Vec::with_capacity(state.patterns.len());
    for (scheme, template) in state.patterns.iter() {
        let word = derive_word(&state.transformations, root, scheme, template)?;
        state.roots.record_derivative(root, &word);
        words.push(word);
    }
    Ok(words)
}

/// Check whether some scheme turns `root` into `word`.
///
/// Schemes are tried in bucket order and the first match wins. A match is
/// recorded as a derivative of the root.
pub fn validate(
    state: &mut EngineState,
    root: &str,
    word: &str,
) -> Result<ValidationResult, MorphologyError> {
    if !state.roots.contains(root) {
        return Ok(ValidationResult::unknown_root());
    }
    let matched = find_scheme(&state.patterns, &state.transformations, root, word)?;
    match matched {
        Some(scheme) => {
            state.roots.record_derivative(root, word);
            Ok(ValidationResult::matched(root, scheme))
        }
        None => Ok(ValidationResult::no_match(root)),
    }
}

fn find_scheme(
    patterns: &PatternStore,
    registry: &TransformationRegistry,
    root: &str,
    word: &str,
) -> Result<Option<String>, InvalidRoot> {
    for (scheme, template) in patterns.iter() {
        if derive_word(registry, root, scheme, template)? == word {
            return Ok(Some(scheme.to_string()));
        }
    }
    Ok(None)
}
