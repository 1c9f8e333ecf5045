//! Spec version descriptors and the version factory.
//!
//! One [`Spec`] per supported CycloneDX schema version declares which enum
//! values and structures are legal for that version. Descriptors are built
//! from static tables, constructed per request and never mutated. The
//! version-to-descriptor mapping is a closed `match` over [`SpecVersion`],
//! checked exhaustively at compile time.

use crate::error::{BomError, Result};
use crate::model::{Classification, ExternalReferenceType, HashAlgorithm};
use std::fmt;

/// Supported CycloneDX spec versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecVersion {
    V1_0,
    V1_1,
    V1_2,
    V1_3,
    V1_4,
}

impl SpecVersion {
    /// All supported versions, oldest first.
    pub const ALL: [Self; 5] = [Self::V1_0, Self::V1_1, Self::V1_2, Self::V1_3, Self::V1_4];

    /// The highest supported version, used as the default.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V1_4
    }

    /// The version string, e.g. "1.3".
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
            Self::V1_2 => "1.2",
            Self::V1_3 => "1.3",
            Self::V1_4 => "1.4",
        }
    }

    /// Exact-match lookup of a version string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output wire formats.
///
/// CycloneDX had XML from the start; the JSON binding arrived with 1.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Xml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Xml => f.write_str("XML"),
        }
    }
}

/// Hash algorithms legal since 1.0.
const HASH_ALGORITHMS_1_0: &[HashAlgorithm] = &[
    HashAlgorithm::Md5,
    HashAlgorithm::Sha1,
    HashAlgorithm::Sha256,
    HashAlgorithm::Sha384,
    HashAlgorithm::Sha512,
    HashAlgorithm::Sha3_256,
    HashAlgorithm::Sha3_512,
];

/// 1.2 added SHA3-384 and the BLAKE family.
const HASH_ALGORITHMS_1_2: &[HashAlgorithm] = &[
    HashAlgorithm::Md5,
    HashAlgorithm::Sha1,
    HashAlgorithm::Sha256,
    HashAlgorithm::Sha384,
    HashAlgorithm::Sha512,
    HashAlgorithm::Sha3_256,
    HashAlgorithm::Sha3_384,
    HashAlgorithm::Sha3_512,
    HashAlgorithm::Blake2b256,
    HashAlgorithm::Blake2b384,
    HashAlgorithm::Blake2b512,
    HashAlgorithm::Blake3,
];

/// Classifications legal since 1.0.
const CLASSIFICATIONS_1_0: &[Classification] = &[
    Classification::Application,
    Classification::Framework,
    Classification::Library,
    Classification::OperatingSystem,
    Classification::Device,
    Classification::File,
];

/// 1.2 added container and firmware.
const CLASSIFICATIONS_1_2: &[Classification] = &[
    Classification::Application,
    Classification::Framework,
    Classification::Library,
    Classification::Container,
    Classification::OperatingSystem,
    Classification::Device,
    Classification::Firmware,
    Classification::File,
];

/// External reference types as introduced in 1.1.
const EXTERNAL_REFERENCE_TYPES_1_1: &[ExternalReferenceType] = &[
    ExternalReferenceType::Vcs,
    ExternalReferenceType::IssueTracker,
    ExternalReferenceType::Website,
    ExternalReferenceType::Advisories,
    ExternalReferenceType::Bom,
    ExternalReferenceType::MailingList,
    ExternalReferenceType::Social,
    ExternalReferenceType::Chat,
    ExternalReferenceType::Documentation,
    ExternalReferenceType::Support,
    ExternalReferenceType::Distribution,
    ExternalReferenceType::License,
    ExternalReferenceType::BuildMeta,
    ExternalReferenceType::BuildSystem,
    ExternalReferenceType::Other,
];

/// 1.4 added release-notes.
const EXTERNAL_REFERENCE_TYPES_1_4: &[ExternalReferenceType] = &[
    ExternalReferenceType::Vcs,
    ExternalReferenceType::IssueTracker,
    ExternalReferenceType::Website,
    ExternalReferenceType::Advisories,
    ExternalReferenceType::Bom,
    ExternalReferenceType::MailingList,
    ExternalReferenceType::Social,
    ExternalReferenceType::Chat,
    ExternalReferenceType::Documentation,
    ExternalReferenceType::Support,
    ExternalReferenceType::Distribution,
    ExternalReferenceType::License,
    ExternalReferenceType::BuildMeta,
    ExternalReferenceType::BuildSystem,
    ExternalReferenceType::ReleaseNotes,
    ExternalReferenceType::Other,
];

/// Structural and enum constraints for one spec version.
///
/// Read-only after construction. Serializers consult the descriptor at
/// every field to decide inclusion and validation.
#[derive(Debug, Clone, Copy)]
pub struct Spec {
    version: SpecVersion,
    classifications: &'static [Classification],
    hash_algorithms: &'static [HashAlgorithm],
    external_reference_types: &'static [ExternalReferenceType],
    supports_json: bool,
    supports_metadata: bool,
    supports_license_expression: bool,
    supports_nested_components: bool,
    supports_external_references: bool,
    supports_purl: bool,
    requires_component_version: bool,
}

impl Spec {
    /// Descriptor for a parsed spec version.
    #[must_use]
    pub const fn of(version: SpecVersion) -> Self {
        match version {
            SpecVersion::V1_0 => Self {
                version,
                classifications: CLASSIFICATIONS_1_0,
                hash_algorithms: HASH_ALGORITHMS_1_0,
                external_reference_types: &[],
                supports_json: false,
                supports_metadata: false,
                supports_license_expression: false,
                supports_nested_components: false,
                supports_external_references: false,
                supports_purl: false,
                requires_component_version: true,
            },
            SpecVersion::V1_1 => Self {
                version,
                classifications: CLASSIFICATIONS_1_0,
                hash_algorithms: HASH_ALGORITHMS_1_0,
                external_reference_types: EXTERNAL_REFERENCE_TYPES_1_1,
                supports_json: false,
                supports_metadata: false,
                supports_license_expression: false,
                supports_nested_components: true,
                supports_external_references: true,
                supports_purl: true,
                requires_component_version: true,
            },
            SpecVersion::V1_2 | SpecVersion::V1_3 => Self {
                version,
                classifications: CLASSIFICATIONS_1_2,
                hash_algorithms: HASH_ALGORITHMS_1_2,
                external_reference_types: EXTERNAL_REFERENCE_TYPES_1_1,
                supports_json: true,
                supports_metadata: true,
                supports_license_expression: true,
                supports_nested_components: true,
                supports_external_references: true,
                supports_purl: true,
                requires_component_version: true,
            },
            SpecVersion::V1_4 => Self {
                version,
                classifications: CLASSIFICATIONS_1_2,
                hash_algorithms: HASH_ALGORITHMS_1_2,
                external_reference_types: EXTERNAL_REFERENCE_TYPES_1_4,
                supports_json: true,
                supports_metadata: true,
                supports_license_expression: true,
                supports_nested_components: true,
                supports_external_references: true,
                supports_purl: true,
                requires_component_version: false,
            },
        }
    }

    /// Resolve a version string to its descriptor.
    ///
    /// # Errors
    ///
    /// [`BomError::UnsupportedSpecVersion`] for anything outside the
    /// supported set; fatal, no partial output.
    pub fn for_version(version: &str) -> Result<Self> {
        SpecVersion::parse(version).map(Self::of).ok_or_else(|| {
            BomError::UnsupportedSpecVersion {
                version: version.to_string(),
                supported: SpecVersion::ALL
                    .iter()
                    .map(SpecVersion::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })
    }

    /// Descriptor for the latest supported version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::of(SpecVersion::latest())
    }

    /// The version this descriptor describes.
    #[must_use]
    pub const fn version(&self) -> SpecVersion {
        self.version
    }

    /// The XML namespace for this version.
    #[must_use]
    pub fn xml_namespace(&self) -> String {
        format!("http://cyclonedx.org/schema/bom/{}", self.version)
    }

    /// Whether `format` output is defined for this version.
    #[must_use]
    pub const fn supports_format(&self, format: Format) -> bool {
        match format {
            Format::Xml => true,
            Format::Json => self.supports_json,
        }
    }

    /// Whether a classification is legal for this version.
    #[must_use]
    pub fn supports_classification(&self, classification: Classification) -> bool {
        self.classifications.contains(&classification)
    }

    /// Whether a hash algorithm is legal for this version.
    #[must_use]
    pub fn supports_hash_algorithm(&self, algorithm: HashAlgorithm) -> bool {
        self.hash_algorithms.contains(&algorithm)
    }

    /// Whether an external reference type is legal for this version.
    #[must_use]
    pub fn supports_external_reference_type(&self, reference_type: ExternalReferenceType) -> bool {
        self.external_reference_types.contains(&reference_type)
    }

    /// Whether the document root may carry a serial number. True for every
    /// supported version; kept as an explicit gate so serializers never
    /// hard-code structural knowledge.
    #[must_use]
    pub const fn supports_serial_number(&self) -> bool {
        true
    }

    /// Whether the document may carry a metadata block (1.2+).
    #[must_use]
    pub const fn supports_metadata(&self) -> bool {
        self.supports_metadata
    }

    /// Whether expression-style licenses are representable (1.2+).
    #[must_use]
    pub const fn supports_license_expression(&self) -> bool {
        self.supports_license_expression
    }

    /// Whether components may nest (1.1+). Serializers flatten otherwise.
    #[must_use]
    pub const fn supports_nested_components(&self) -> bool {
        self.supports_nested_components
    }

    /// Whether components may carry external references (1.1+).
    #[must_use]
    pub const fn supports_external_references(&self) -> bool {
        self.supports_external_references
    }

    /// Whether components may carry a package URL (1.1+).
    #[must_use]
    pub const fn supports_purl(&self) -> bool {
        self.supports_purl
    }

    /// Whether every component must carry a version field. 1.4 made it
    /// optional; earlier versions get an empty string for a missing one.
    #[must_use]
    pub const fn requires_component_version(&self) -> bool {
        self.requires_component_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Invariant: every descriptor self-reports the version it was built for.
    #[test]
    fn for_version_round_trips() {
        for version in SpecVersion::ALL {
            let spec = Spec::for_version(version.as_str()).expect("supported version");
            assert_eq!(spec.version(), version);
            assert_eq!(spec.version().as_str(), version.as_str());
        }
    }

    #[test]
    fn latest_is_in_the_supported_set() {
        let spec = Spec::for_version(SpecVersion::latest().as_str()).expect("latest is supported");
        assert_eq!(spec.version(), SpecVersion::latest());
        assert_eq!(SpecVersion::latest(), SpecVersion::V1_4);
    }

    #[test]
    fn unknown_versions_are_rejected() {
        for bogus in ["1.5", "2.0", "1", "", "1.3.1"] {
            let err = Spec::for_version(bogus).unwrap_err();
            assert!(
                matches!(&err, crate::error::BomError::UnsupportedSpecVersion { version, .. }
                    if version == bogus),
                "unexpected error for {bogus:?}: {err}"
            );
        }
    }

    #[test]
    fn json_arrived_with_1_2() {
        assert!(!Spec::of(SpecVersion::V1_0).supports_format(Format::Json));
        assert!(!Spec::of(SpecVersion::V1_1).supports_format(Format::Json));
        assert!(Spec::of(SpecVersion::V1_2).supports_format(Format::Json));
        for version in SpecVersion::ALL {
            assert!(Spec::of(version).supports_format(Format::Xml));
        }
    }

    #[test]
    fn container_class_and_blake_hashes_arrived_with_1_2() {
        let old = Spec::of(SpecVersion::V1_1);
        assert!(!old.supports_classification(Classification::Container));
        assert!(!old.supports_hash_algorithm(HashAlgorithm::Blake3));

        let new = Spec::of(SpecVersion::V1_2);
        assert!(new.supports_classification(Classification::Container));
        assert!(new.supports_hash_algorithm(HashAlgorithm::Blake3));
    }

    #[test]
    fn release_notes_reference_is_1_4_only() {
        assert!(!Spec::of(SpecVersion::V1_3)
            .supports_external_reference_type(ExternalReferenceType::ReleaseNotes));
        assert!(Spec::of(SpecVersion::V1_4)
            .supports_external_reference_type(ExternalReferenceType::ReleaseNotes));
    }

    #[test]
    fn version_1_0_has_no_external_references() {
        let spec = Spec::of(SpecVersion::V1_0);
        assert!(!spec.supports_external_references());
        for t in ExternalReferenceType::ALL {
            assert!(!spec.supports_external_reference_type(t));
        }
    }

    #[test]
    fn component_version_became_optional_in_1_4() {
        assert!(Spec::of(SpecVersion::V1_3).requires_component_version());
        assert!(!Spec::of(SpecVersion::V1_4).requires_component_version());
    }

    #[test]
    fn xml_namespace_carries_the_version() {
        assert_eq!(
            Spec::of(SpecVersion::V1_3).xml_namespace(),
            "http://cyclonedx.org/schema/bom/1.3"
        );
    }
}
