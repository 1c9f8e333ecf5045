//! External references: links from a component to related resources.

use serde::{Deserialize, Serialize};
use std::fmt;

/// External reference types defined by the CycloneDX schemas.
///
/// Lookup is case-sensitive exact match, unlike the hash-algorithm
/// registry. "other" is itself a canonical value, not a free-form escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExternalReferenceType {
    Vcs,
    IssueTracker,
    Website,
    Advisories,
    Bom,
    MailingList,
    Social,
    Chat,
    Documentation,
    Support,
    Distribution,
    License,
    BuildMeta,
    BuildSystem,
    ReleaseNotes,
    Other,
}

impl ExternalReferenceType {
    /// All canonical reference types, in schema order.
    pub const ALL: [Self; 16] = [
        Self::Vcs,
        Self::IssueTracker,
        Self::Website,
        Self::Advisories,
        Self::Bom,
        Self::MailingList,
        Self::Social,
        Self::Chat,
        Self::Documentation,
        Self::Support,
        Self::Distribution,
        Self::License,
        Self::BuildMeta,
        Self::BuildSystem,
        Self::ReleaseNotes,
        Self::Other,
    ];

    /// The schema string for this reference type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vcs => "vcs",
            Self::IssueTracker => "issue-tracker",
            Self::Website => "website",
            Self::Advisories => "advisories",
            Self::Bom => "bom",
            Self::MailingList => "mailing-list",
            Self::Social => "social",
            Self::Chat => "chat",
            Self::Documentation => "documentation",
            Self::Support => "support",
            Self::Distribution => "distribution",
            Self::License => "license",
            Self::BuildMeta => "build-meta",
            Self::BuildSystem => "build-system",
            Self::ReleaseNotes => "release-notes",
            Self::Other => "other",
        }
    }

    /// Case-sensitive exact-match lookup.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    /// Whether `value` is exactly a canonical reference type.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        Self::parse(value).is_some()
    }
}

impl fmt::Display for ExternalReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link from a component to an external resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReference {
    /// Reference type.
    pub reference_type: ExternalReferenceType,
    /// URL or locator.
    pub url: String,
    /// Free-text comment.
    pub comment: Option<String>,
}

impl ExternalReference {
    /// Create a new external reference.
    #[must_use]
    pub const fn new(reference_type: ExternalReferenceType, url: String) -> Self {
        Self {
            reference_type,
            url,
            comment: None,
        }
    }

    /// Attach a comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}
