//! Component model and the classification registry.

use super::{ExternalReference, Hash, HashAlgorithm, License};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Component classifications defined by the CycloneDX schemas.
///
/// Closed set; lookup is case-sensitive exact match. Which values are legal
/// depends on the target spec version (container and firmware arrived in
/// 1.2); that gating lives in [`Spec`](crate::spec::Spec), not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Application,
    Framework,
    #[default]
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    File,
}

impl Classification {
    /// All canonical classifications, in schema order.
    pub const ALL: [Self; 8] = [
        Self::Application,
        Self::Framework,
        Self::Library,
        Self::Container,
        Self::OperatingSystem,
        Self::Device,
        Self::Firmware,
        Self::File,
    ];

    /// The schema string for this classification.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Framework => "framework",
            Self::Library => "library",
            Self::Container => "container",
            Self::OperatingSystem => "operating-system",
            Self::Device => "device",
            Self::Firmware => "firmware",
            Self::File => "file",
        }
    }

    /// Case-sensitive exact-match lookup.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }

    /// Whether `value` is exactly a canonical classification.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        Self::parse(value).is_some()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dependency node in the BOM.
///
/// A component exclusively owns its hashes, licenses, external references
/// and nested sub-components; nesting is a tree by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Component classification.
    pub classification: Classification,
    /// Component name.
    pub name: String,
    /// Version string.
    pub version: Option<String>,
    /// Parsed semantic version (if the version string is valid semver).
    pub semver: Option<semver::Version>,
    /// Group/namespace (e.g. the "acme" in "acme/lib").
    pub group: Option<String>,
    /// Package URL.
    pub purl: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Hashes, unique by algorithm, insertion order preserved.
    pub hashes: IndexMap<HashAlgorithm, String>,
    /// Declared licenses.
    pub licenses: Vec<License>,
    /// External references.
    pub external_references: Vec<ExternalReference>,
    /// Nested sub-components.
    pub components: Vec<Component>,
}

impl Component {
    /// Create a new component with the minimal required fields.
    #[must_use]
    pub fn new(classification: Classification, name: impl Into<String>) -> Self {
        Self {
            classification,
            name: name.into(),
            version: None,
            semver: None,
            group: None,
            purl: None,
            description: None,
            hashes: IndexMap::new(),
            licenses: Vec::new(),
            external_references: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Create a library component, the most common case.
    #[must_use]
    pub fn library(name: impl Into<String>) -> Self {
        Self::new(Classification::Library, name)
    }

    /// Set the version, opportunistically parsing it as semver.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        self.semver = semver::Version::parse(&version).ok();
        self.version = Some(version);
        self
    }

    /// Set the group/namespace.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set the package URL.
    #[must_use]
    pub fn with_purl(mut self, purl: impl Into<String>) -> Self {
        self.purl = Some(purl.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a hash. Per-algorithm uniqueness: a later hash with the same
    /// algorithm replaces the earlier digest.
    pub fn add_hash(&mut self, hash: Hash) {
        self.hashes.insert(hash.algorithm, hash.value);
    }

    /// Add a declared license.
    pub fn add_license(&mut self, license: License) {
        self.licenses.push(license);
    }

    /// Add an external reference.
    pub fn add_external_reference(&mut self, reference: ExternalReference) {
        self.external_references.push(reference);
    }

    /// Nest a sub-component under this one.
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Display name with version, e.g. "acme/lib@2.0.0".
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = self.group.as_ref().map_or_else(
            || self.name.clone(),
            |group| format!("{group}/{}", self.name),
        );
        self.version
            .as_ref()
            .map_or(name.clone(), |v| format!("{name}@{v}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_round_trip() {
        for c in Classification::ALL {
            assert_eq!(Classification::parse(c.as_str()), Some(c));
            assert!(!Classification::is_valid(&format!("{}_bogus", c.as_str())));
        }
    }

    #[test]
    fn classification_lookup_is_case_sensitive() {
        assert!(Classification::is_valid("operating-system"));
        assert!(!Classification::is_valid("Operating-System"));
        assert!(!Classification::is_valid("LIBRARY"));
    }

    #[test]
    fn hashes_are_unique_by_algorithm() {
        let mut comp = Component::library("lib");
        comp.add_hash(Hash::new(HashAlgorithm::Sha256, "aaa".into()));
        comp.add_hash(Hash::new(HashAlgorithm::Sha1, "bbb".into()));
        comp.add_hash(Hash::new(HashAlgorithm::Sha256, "ccc".into()));

        assert_eq!(comp.hashes.len(), 2);
        assert_eq!(comp.hashes[&HashAlgorithm::Sha256], "ccc");
        // Insertion order preserved
        let algorithms: Vec<_> = comp.hashes.keys().copied().collect();
        assert_eq!(algorithms, vec![HashAlgorithm::Sha256, HashAlgorithm::Sha1]);
    }

    #[test]
    fn with_version_parses_semver_when_possible() {
        let comp = Component::library("lib").with_version("2.0.0");
        assert!(comp.semver.is_some());
        let comp = Component::library("lib").with_version("not-a-version");
        assert!(comp.semver.is_none());
        assert_eq!(comp.version.as_deref(), Some("not-a-version"));
    }

    #[test]
    fn display_name_includes_group_and_version() {
        let comp = Component::library("lib").with_group("acme").with_version("2.0.0");
        assert_eq!(comp.display_name(), "acme/lib@2.0.0");
        assert_eq!(Component::library("solo").display_name(), "solo");
    }
}
