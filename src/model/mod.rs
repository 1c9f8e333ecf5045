//! The version-agnostic CycloneDX document model.
//!
//! A [`Bom`] owns an ordered list of [`Component`]s; each component owns its
//! hashes, licenses, external references and nested sub-components. Nothing
//! here knows about spec versions; per-version gating happens in
//! [`crate::spec`] and [`crate::serialize`].

mod bom;
mod component;
mod external_reference;
mod hash;
mod license;

pub use bom::{Bom, Metadata, Tool};
pub use component::{Classification, Component};
pub use external_reference::{ExternalReference, ExternalReferenceType};
pub use hash::{Hash, HashAlgorithm};
pub use license::License;
