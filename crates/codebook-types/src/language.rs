//! Per-language dataset settings.

/// Dataset name and description for one active language.
///
/// Both fields may be empty; every active language gets an entry
/// regardless of whether the Info sheet supplied text for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanguageSettings {
    /// Dataset name in this language.
    pub dataset_name: String,
    /// Dataset description in this language.
    pub dataset_description: String,
}

impl LanguageSettings {
    /// Creates settings from a name and description.
    pub fn new(dataset_name: impl Into<String>, dataset_description: impl Into<String>) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            dataset_description: dataset_description.into(),
        }
    }

    /// Returns true if neither field carries text.
    pub fn is_empty(&self) -> bool {
        self.dataset_name.is_empty() && self.dataset_description.is_empty()
    }
}
