// Arabic letter constants and weak-letter classification
//
// Root letters are addressed by position (1 = fa', 2 = 'ayn, 3 = lam).
// Each position admits a different set of weak letters.

// ---------------------------------------------------------------------------
// Letters
// ---------------------------------------------------------------------------

/// WAW (U+0648).
pub const WAW: char = '\u{0648}';

/// YEH (U+064A).
pub const YEH: char = '\u{064A}';

/// ALEF (U+0627), the vowel-lengthening alif.
pub const ALEF: char = '\u{0627}';

/// ALEF MAKSURA (U+0649), the final "alif" written with a dotless yeh.
pub const ALEF_MAKSURA: char = '\u{0649}';

/// KASRATAN (U+064D), the double-kasra nunation mark.
pub const KASRATAN: char = '\u{064D}';

// ---------------------------------------------------------------------------
// Weak-letter sets
// ---------------------------------------------------------------------------

/// Weak letters recognized in the first root position.
const WEAK_FIRST: &[char] = &[WAW, YEH];

/// Weak letters recognized in the second root position.
const WEAK_MIDDLE: &[char] = &[WAW, YEH, ALEF];

/// Weak letters recognized in the third root position.
const WEAK_LAST: &[char] = &[WAW, YEH, ALEF, ALEF_MAKSURA];

/// Position of a letter inside a triliteral root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootPosition {
    /// First radical (fa').
    First,
    /// Second radical ('ayn).
    Middle,
    /// Third radical (lam).
    Last,
}

impl RootPosition {
    /// The weak-letter set that applies at this position.
    pub fn weak_letters(self) -> &'static [char] {
        match self {
            RootPosition::First => WEAK_FIRST,
            RootPosition::Middle => WEAK_MIDDLE,
            RootPosition::Last => WEAK_LAST,
        }
    }
}

/// Check whether `c` counts as a weak letter at the given root position.
pub fn is_weak_at(c: char, position: RootPosition) -> bool {
    position.weak_letters().contains(&c)
}
