//! Publication status of a codebook run.

/// Status code stamped on every concept of a run.
///
/// # Examples
///
/// ```
/// use codebook_types::StatusCode;
///
/// assert_eq!(StatusCode::from_label("FINAL"), Some(StatusCode::Final));
/// assert_eq!(StatusCode::Draft.as_str(), "draft");
/// assert_eq!(StatusCode::from_label("retired"), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StatusCode {
    /// Work in progress.
    #[default]
    Draft,
    /// Released for publication.
    Final,
}

impl StatusCode {
    /// Parses a status label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("draft") {
            Some(Self::Draft)
        } else if label.eq_ignore_ascii_case("final") {
            Some(Self::Final)
        } else {
            None
        }
    }

    /// Returns the lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Final => "final",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
