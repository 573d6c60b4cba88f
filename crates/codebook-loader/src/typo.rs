//! Codesystem typo detection.

use codebook_types::well_known::{self, CANONICAL_CODESYSTEMS, KNOWN_MISSPELLINGS};

/// Lookup of probable codesystem misspellings.
pub trait TypoDictionary {
    /// Returns the intended codesystem if `codesystem` looks like a typo.
    fn suggestion(&self, codesystem: &str) -> Option<&str>;

    /// Returns true if `codesystem` looks like a typo.
    fn is_probable_typo(&self, codesystem: &str) -> bool {
        self.suggestion(codesystem).is_some()
    }
}

/// The built-in dictionary of well-known codesystems.
///
/// A codesystem is flagged when it matches a canonical name only after
/// ignoring case, whitespace, hyphens and underscores, or when it is a
/// listed misspelling. Exact canonical names and unknown codesystems pass.
///
/// # Examples
///
/// ```
/// use codebook_loader::{KnownCodesystems, TypoDictionary};
///
/// let typos = KnownCodesystems;
/// assert_eq!(typos.suggestion("snomed"), Some("SNOMED"));
/// assert_eq!(typos.suggestion("Snowmed"), Some("SNOMED"));
/// assert!(!typos.is_probable_typo("SNOMED"));
/// assert!(!typos.is_probable_typo("local-list"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KnownCodesystems;

impl TypoDictionary for KnownCodesystems {
    fn suggestion(&self, codesystem: &str) -> Option<&str> {
        if codesystem.is_empty() || CANONICAL_CODESYSTEMS.contains(&codesystem) {
            return None;
        }

        let normalized = well_known::normalize(codesystem);
        CANONICAL_CODESYSTEMS
            .iter()
            .copied()
            .find(|canonical| well_known::normalize(canonical) == normalized)
            .or_else(|| {
                KNOWN_MISSPELLINGS
                    .iter()
                    .find(|(misspelling, _)| *misspelling == normalized)
                    .map(|(_, canonical)| *canonical)
            })
    }
}
