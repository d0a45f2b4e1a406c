// Root-shape classification
//
// A root is classified purely from the positions of its weak letters. The
// type is never stored; callers recompute it whenever they need it.

use serde::{Deserialize, Serialize};

use crate::character::{ALEF, RootPosition, WAW, is_weak_at};

/// Number of letters in a triliteral root.
pub const ROOT_LEN: usize = 3;

/// Error returned when a root does not consist of exactly three letters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid root {root:?}: expected 3 letters, got {letters}")]
pub struct InvalidRoot {
    pub root: String,
    pub letters: usize,
}

/// Structural class of a triliteral root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RootType {
    /// No weak letter (e.g. كتب).
    Regular,
    /// Weak first letter (e.g. وعد).
    Mithal,
    /// Weak middle letter (e.g. قول).
    Ajwaf,
    /// Weak last letter (e.g. رمي).
    Naqis,
    /// Two or more weak letters (e.g. وقي, روي).
    Lafif,
}

impl RootType {
    /// Lowercase name used as the category prefix of transformation keys.
    pub fn category(self) -> &'static str {
        match self {
            RootType::Regular => "regular",
            RootType::Mithal => "mithal",
            RootType::Ajwaf => "ajwaf",
            RootType::Naqis => "naqis",
            RootType::Lafif => "lafif",
        }
    }
}

impl std::fmt::Display for RootType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.category())
    }
}

/// Split a root into its three letters.
pub fn root_letters(root: &str) -> Result<[char; ROOT_LEN], InvalidRoot> {
    let mut letters = [' '; ROOT_LEN];
    let mut count = 0;
    for c in root.chars() {
        if count < ROOT_LEN {
            letters[count] = c;
        }
        count += 1;
    }
    if count != ROOT_LEN {
        return Err(InvalidRoot {
            root: root.to_string(),
            letters: count,
        });
    }
    Ok(letters)
}

/// Classify a root by the positions of its weak letters.
///
/// Two or more weak positions make the root Lafif. Otherwise the single
/// weak position decides, checked first to last.
pub fn classify(root: &str) -> Result<RootType, InvalidRoot> {
    let [first, middle, last] = root_letters(root)?;

    let weak_first = is_weak_at(first, RootPosition::First);
    let weak_middle = is_weak_at(middle, RootPosition::Middle);
    let weak_last = is_weak_at(last, RootPosition::Last);

    let weak_count = [weak_first, weak_middle, weak_last]
        .iter()
        .filter(|&&w| w)
        .count();

    let root_type = if weak_count >= 2 {
        RootType::Lafif
    } else if weak_first {
        RootType::Mithal
    } else if weak_middle {
        RootType::Ajwaf
    } else if weak_last {
        RootType::Naqis
    } else {
        RootType::Regular
    };
    Ok(root_type)
}

/// Letters used to fill a template.
///
/// A medial alif is never an original radical, so it is restored to waw
/// (قال is filled as ق و ل).
pub fn canonical_letters(root: &str) -> Result<[char; ROOT_LEN], InvalidRoot> {
    let mut letters = root_letters(root)?;
    if letters[1] == ALEF {
        letters[1] = WAW;
    }
    Ok(letters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{ALEF_MAKSURA, YEH};

    fn root(a: char, b: char, c: char) -> String {
        [a, b, c].iter().collect()
    }

    #[test]
    fn classify_regular() {
        assert_eq!(classify("كتب"), Ok(RootType::Regular));
        assert_eq!(classify("درس"), Ok(RootType::Regular));
    }

    #[test]
    fn classify_single_weak_positions() {
        assert_eq!(classify("وعد"), Ok(RootType::Mithal));
        assert_eq!(classify("قول"), Ok(RootType::Ajwaf));
        assert_eq!(classify("قال"), Ok(RootType::Ajwaf));
        assert_eq!(classify("رمي"), Ok(RootType::Naqis));
        assert_eq!(classify("سعى"), Ok(RootType::Naqis));
    }

    #[test]
    fn classify_lafif() {
        assert_eq!(classify("وقي"), Ok(RootType::Lafif));
        assert_eq!(classify("روي"), Ok(RootType::Lafif));
        assert_eq!(classify("ووي"), Ok(RootType::Lafif));
    }

    #[test]
    fn classify_covers_every_weak_combination() {
        let strong = 'ك';
        for mask in 0u8..8 {
            let first = if mask & 1 != 0 { WAW } else { strong };
            let middle = if mask & 2 != 0 { YEH } else { strong };
            let last = if mask & 4 != 0 { ALEF_MAKSURA } else { strong };
            let expected = match mask.count_ones() {
                0 => RootType::Regular,
                1 if mask & 1 != 0 => RootType::Mithal,
                1 if mask & 2 != 0 => RootType::Ajwaf,
                1 => RootType::Naqis,
                _ => RootType::Lafif,
            };
            let r = root(first, middle, last);
            assert_eq!(classify(&r), Ok(expected), "mask {mask:03b}");
            // Deterministic.
            assert_eq!(classify(&r), classify(&r));
        }
    }

    #[test]
    fn alef_in_first_position_is_strong() {
        assert_eq!(classify(&root(ALEF, 'ك', 'ل')), Ok(RootType::Regular));
    }

    #[test]
    fn alef_maksura_in_middle_is_strong() {
        assert_eq!(classify(&root('ك', ALEF_MAKSURA, 'ل')), Ok(RootType::Regular));
    }

    #[test]
    fn classify_rejects_wrong_length() {
        let err = classify("كتبة").unwrap_err();
        assert_eq!(err.letters, 4);
        assert_eq!(err.root, "كتبة");
        assert_eq!(classify("").unwrap_err().letters, 0);
        assert_eq!(classify("كت").unwrap_err().letters, 2);
    }

    #[test]
    fn canonical_letters_restore_medial_alef() {
        assert_eq!(canonical_letters("قال"), Ok(['ق', WAW, 'ل']));
    }

    #[test]
    fn canonical_letters_leave_other_positions() {
        assert_eq!(canonical_letters("كتب"), Ok(['ك', 'ت', 'ب']));
        assert_eq!(canonical_letters("دعا"), Ok(['د', 'ع', ALEF]));
    }

    #[test]
    fn category_names() {
        assert_eq!(RootType::Regular.category(), "regular");
        assert_eq!(RootType::Lafif.to_string(), "lafif");
    }
}
