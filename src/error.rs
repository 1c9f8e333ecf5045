//! Unified error types for cyclonedx-emit.
//!
//! Structural and identity errors (unsupported version, illegal component
//! classification, malformed license resource) are fatal and abort the
//! serialization call. Optional-field incompatibilities never surface here;
//! they are collected as [`Warning`](crate::serialize::Warning) values and
//! returned alongside successful output.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BomError>;

/// Main error type for cyclonedx-emit operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BomError {
    /// Requested spec version string is not in the supported set.
    #[error("unsupported CycloneDX spec version: {version} (supported: {supported})")]
    UnsupportedSpecVersion { version: String, supported: String },

    /// Requested wire format does not exist for the target spec version
    /// (e.g. JSON before CycloneDX 1.2).
    #[error("{format} output is not defined for CycloneDX {version}")]
    UnsupportedFormat { format: String, version: String },

    /// A component's classification is not legal for the target spec
    /// version. Fatal for the whole serialization call: emitting a document
    /// with a silently-altered type would misrepresent the dependency tree.
    #[error("component type '{classification}' is not allowed in CycloneDX {version}")]
    InvalidClassification {
        classification: String,
        version: String,
    },

    /// An optional field value the target spec version cannot represent,
    /// raised only under a fail-hard [`OnIncompatible`] policy override
    /// (the default policy drops such values with a warning instead).
    ///
    /// [`OnIncompatible`]: crate::serialize::OnIncompatible
    #[error("{field} value '{value}' is not representable in CycloneDX {version}")]
    UnsupportedValue {
        field: String,
        value: String,
        version: String,
    },

    /// A hash algorithm name that is not in the registry under any casing.
    #[error("unknown hash algorithm: {0}")]
    UnknownHashAlgorithm(String),

    /// An SPDX license id that failed validation against the bundled list.
    #[error("'{0}' is not a known SPDX license id")]
    InvalidSpdxId(String),

    /// The bundled SPDX license list is missing or malformed. License
    /// validation is a core correctness guarantee, so this is fatal at
    /// first use rather than a silent always-invalid.
    #[error("invalid SPDX license data: {0}")]
    InvalidLicenseData(String),

    /// Malformed package URL input while building a component.
    #[error("malformed package URL for '{package}': {reason}")]
    InvalidPurl { package: String, reason: String },

    /// Failure while rendering the document tree to its textual form.
    #[error("failed to render document: {0}")]
    Render(String),
}
