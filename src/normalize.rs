//! Diacritic-insensitive normalization of word forms.
//!
//! Performs:
//! - Unicode NFD decomposition
//! - Removal of combining marks (accents, breathings, iota subscript)
//! - Lowercase conversion
//! - Final sigma folding (`ς` -> `σ`)
//! - Removal of elision apostrophes

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Characters used to mark an elided final vowel (`δι᾽`, `ἀπ'`, ...).
pub const ELISION_MARKS: &[char] = &['\u{1FBD}', '\u{2019}', '\u{02BC}', '\'', '\u{1FBF}'];

/// Normalize a word form for comparison.
///
/// # Examples
///
/// ```
/// use layered_verse::normalize_form;
///
/// assert_eq!(normalize_form("Λόγος"), "λογοσ");
/// assert_eq!(normalize_form("ἀρχῇ"), "αρχη");
/// assert_eq!(normalize_form("δι᾽"), "δι");
/// ```
pub fn normalize_form(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c) && !ELISION_MARKS.contains(c))
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ς' { 'σ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Returns true if the form carries an elision mark.
pub fn has_elision_mark(s: &str) -> bool {
    s.chars().any(|c| ELISION_MARKS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diacritics_removed() {
        assert_eq!(normalize_form("ὅτι"), normalize_form("οτι"));
        assert_eq!(normalize_form("ἐν"), "εν");
        assert_eq!(normalize_form("Θεοῦ"), "θεου");
    }

    #[test]
    fn test_final_sigma_folded() {
        assert_eq!(normalize_form("λόγος"), "λογοσ");
        assert_eq!(normalize_form("λόγοσ"), "λογοσ");
    }

    #[test]
    fn test_elision_marks() {
        assert!(has_elision_mark("ἀλλ᾽"));
        assert!(has_elision_mark("δ'"));
        assert!(!has_elision_mark("ἀλλά"));
        assert_eq!(normalize_form("ἀπ᾽"), "απ");
    }
}
