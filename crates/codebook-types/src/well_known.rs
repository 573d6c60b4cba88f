//! Well-known codesystem names.
//!
//! Canonical spellings of the codesystems codebooks refer to, plus the
//! misspellings authors are known to make.
//!
//! # Examples
//!
//! ```
//! use codebook_types::well_known;
//!
//! assert_eq!(well_known::normalize("Palga-Thesaurus"), "palgathesaurus");
//! assert!(well_known::CANONICAL_CODESYSTEMS.contains(&well_known::SNOMED));
//! ```

// =============================================================================
// Canonical Codesystems
// =============================================================================

/// SNOMED clinical terms.
pub const SNOMED: &str = "SNOMED";

/// Logical Observation Identifiers Names and Codes.
pub const LOINC: &str = "LOINC";

/// PALGA pathology thesaurus.
pub const PALGA_THESAURUS: &str = "PALGA-thesaurus";

/// International Classification of Diseases for Oncology, 3rd edition.
pub const ICD_O_3: &str = "ICD-O-3";

/// ICD-10.
pub const ICD_10: &str = "ICD-10";

/// UCUM units of measure.
pub const UCUM: &str = "UCUM";

/// All canonical codesystem names.
pub const CANONICAL_CODESYSTEMS: &[&str] =
    &[SNOMED, LOINC, PALGA_THESAURUS, ICD_O_3, ICD_10, UCUM];

// =============================================================================
// Known Misspellings
// =============================================================================

/// `(normalized misspelling, canonical name)` pairs.
///
/// Keys are in [`normalize`]d form.
pub const KNOWN_MISSPELLINGS: &[(&str, &str)] = &[
    ("snowmed", SNOMED),
    ("snomedct", SNOMED),
    ("snomet", SNOMED),
    ("lonic", LOINC),
    ("loinic", LOINC),
    ("palga", PALGA_THESAURUS),
    ("thesaurus", PALGA_THESAURUS),
    ("palgathesarus", PALGA_THESAURUS),
    ("icdo", ICD_O_3),
    ("icd10", ICD_10),
];

/// Lowercases and strips whitespace, hyphens and underscores.
pub fn normalize(codesystem: &str) -> String {
    codesystem
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
