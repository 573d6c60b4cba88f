//! # codebook-types
//!
//! Type definitions for versioned, spreadsheet-authored clinical codebooks.
//!
//! This crate provides the data model produced by the ingestion engine in
//! `codebook-loader`: concepts, their code lists, multi-language dataset
//! settings, effective dates and numeric version keys.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!
//! ## Usage
//!
//! ```rust
//! use codebook_types::{Concept, EffectiveDate, StatusCode, VersionKey};
//!
//! let version = VersionKey::parse("33").unwrap();
//! assert_eq!(version.value(), 33.0);
//!
//! let concept = Concept {
//!     id: "C1".to_string(),
//!     codesystem: "SNOMED".to_string(),
//!     code: "73211009".to_string(),
//!     code_description: "Diabetes mellitus".to_string(),
//!     properties: String::new(),
//!     parent_id: None,
//!     data_type: "code".to_string(),
//!     codelist_ref: None,
//!     effective_date: EffectiveDate::sentinel(),
//!     version_label: "33".to_string(),
//!     status_code: StatusCode::Draft,
//!     language_descriptions: Default::default(),
//!     code_list_entries: Vec::new(),
//! };
//!
//! assert!(concept.is_root());
//! assert!(!concept.has_code_list());
//! ```

#![warn(missing_docs)]

mod code_list;
mod concept;
mod effective_date;
mod language;
mod status;
mod version;
pub mod well_known;

// Re-export all public types at crate root
pub use code_list::CodeListEntry;
pub use concept::Concept;
pub use effective_date::EffectiveDate;
pub use language::LanguageSettings;
pub use status::StatusCode;
pub use version::{InvalidVersion, VersionKey};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        let _status = StatusCode::Final;
        let _date = EffectiveDate::sentinel();
        let _settings = LanguageSettings::default();
        let _key = VersionKey::ZERO;
    }

    #[test]
    fn test_well_known_accessible() {
        assert_eq!(well_known::SNOMED, "SNOMED");
        assert!(well_known::CANONICAL_CODESYSTEMS.contains(&well_known::LOINC));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let mut concept = Concept {
            id: "C1".to_string(),
            codesystem: "SNOMED".to_string(),
            code: "73211009".to_string(),
            code_description: "Diabetes mellitus".to_string(),
            properties: "required".to_string(),
            parent_id: Some("ROOT".to_string()),
            data_type: "code".to_string(),
            codelist_ref: None,
            effective_date: EffectiveDate::sentinel(),
            version_label: "33".to_string(),
            status_code: StatusCode::Final,
            language_descriptions: Default::default(),
            code_list_entries: Vec::new(),
        };
        concept
            .language_descriptions
            .insert("nl".to_string(), "Suikerziekte".to_string());

        let json = serde_json::to_string(&concept).unwrap();
        let parsed: Concept = serde_json::from_str(&json).unwrap();
        assert_eq!(concept, parsed);
    }
}
