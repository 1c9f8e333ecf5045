//! **CycloneDX BOM document model and multi-spec-version serializer.**
//!
//! `cyclonedx-emit` is the core of a package-manager SBOM plugin: it takes
//! an already-resolved dependency list, builds a version-agnostic
//! [`Bom`](model::Bom) document, and renders it against any supported
//! CycloneDX spec version (1.0 through 1.4) in JSON or XML.
//!
//! The mutually incompatible schema versions are captured as
//! [`Spec`](spec::Spec) descriptors: one per version, declaring which enum
//! values and structures that version admits. Serializers consult the
//! descriptor at every field. Structural mismatches fail hard (an illegal
//! component type aborts the call); optional enrichment mismatches degrade
//! gracefully and come back as [`Warning`](serialize::Warning)s next to the
//! rendered document.
//!
//! ## Example
//!
//! ```
//! use cyclonedx_emit::{
//!     model::{Bom, Component, Hash, HashAlgorithm},
//!     serialize::{serialize, SerializeOutput},
//!     spec::{Format, Spec},
//! };
//!
//! fn main() -> cyclonedx_emit::Result<()> {
//!     let mut component = Component::library("lib")
//!         .with_group("acme")
//!         .with_version("2.0.0");
//!     component.add_hash(Hash::new(HashAlgorithm::Sha256, "abc123".into()));
//!
//!     let mut bom = Bom::new().with_generated_serial_number();
//!     bom.add_component(component);
//!
//!     let spec = Spec::for_version("1.3")?;
//!     let SerializeOutput { document, warnings } = serialize(&bom, &spec, Format::Json)?;
//!     assert!(document.contains("\"specVersion\": \"1.3\""));
//!     assert!(warnings.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! Plugin hook wiring, CLI parsing, and file output are host concerns; the
//! natural host entry point is [`builder::BomBuilder`], which transposes the
//! host's resolved-package descriptors into a [`Bom`](model::Bom).

#![warn(clippy::unwrap_used)]
#![allow(
    // # Errors sections exist where the failure mode isn't obvious, not everywhere
    clippy::missing_errors_doc
)]

pub mod builder;
pub mod error;
pub mod model;
pub mod serialize;
pub mod spdx;
pub mod spec;

// Re-export main types for convenience
pub use builder::{BomBuilder, ResolvedPackage};
pub use error::{BomError, Result};
pub use model::{
    Bom, Classification, Component, ExternalReference, ExternalReferenceType, Hash, HashAlgorithm,
    License, Metadata, Tool,
};
pub use serialize::{
    serialize, serialize_with_policy, JsonSerializer, OnIncompatible, SerializeOutput,
    SerializePolicy, Warning, XmlSerializer,
};
pub use spec::{Format, Spec, SpecVersion};
