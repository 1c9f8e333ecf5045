//! Serializers: render a [`Bom`](crate::model::Bom) against a spec version
//! descriptor into JSON or XML.
//!
//! The policy boundary, observed from the schemas and kept configurable per
//! field category: structural/type fields fail hard (an illegal component
//! classification aborts the call), optional enrichment fields degrade
//! gracefully (an illegal hash algorithm or an unrepresentable license
//! expression is dropped and recorded as a warning).

mod gate;
mod json;
mod xml;

pub use json::JsonSerializer;
pub use xml::{Element, XmlSerializer};

use crate::error::Result;
use crate::model::Bom;
use crate::spec::{Format, Spec};
use std::fmt;

/// What to do when a field value is not representable in the target version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnIncompatible {
    /// Abort the serialization call with an error.
    Fail,
    /// Omit the value and record a [`Warning`].
    #[default]
    Drop,
}

/// Per-field-category incompatibility policy.
///
/// Defaults follow the schema-observed boundary: classifications fail,
/// enrichment fields drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializePolicy {
    /// Component classification not legal for the version.
    pub classification: OnIncompatible,
    /// Hash algorithm not legal for the version.
    pub hash: OnIncompatible,
    /// Expression license in a version without expression support.
    pub license_expression: OnIncompatible,
}

impl Default for SerializePolicy {
    fn default() -> Self {
        Self {
            classification: OnIncompatible::Fail,
            hash: OnIncompatible::Drop,
            license_expression: OnIncompatible::Drop,
        }
    }
}

/// A non-fatal notice recorded during serialization.
///
/// Warnings accompany successful output; they are never raised as errors.
/// The host decides whether to log, surface, or ignore them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Warning {
    /// An optional field was omitted because the target version cannot
    /// represent it.
    DroppedField {
        /// Dotted path of the omitted field, e.g. "component.hashes".
        field: String,
        /// Human-readable reason including the offending value.
        reason: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DroppedField { field, reason } => write!(f, "dropped {field}: {reason}"),
        }
    }
}

impl Warning {
    pub(crate) fn dropped(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let field = field.into();
        let reason = reason.into();
        tracing::warn!(field = %field, reason = %reason, "dropping field");
        Self::DroppedField { field, reason }
    }
}

/// A rendered document plus the warnings collected while producing it.
#[derive(Debug, Clone)]
pub struct SerializeOutput {
    /// The serialized document text.
    pub document: String,
    /// Dropped-field notices, in emission order.
    pub warnings: Vec<Warning>,
}

/// Render `bom` against `spec` in the requested wire format with the
/// default policy.
///
/// # Errors
///
/// Fails for a format undefined at the target version, for an illegal
/// component classification, and for rendering failures.
pub fn serialize(bom: &Bom, spec: &Spec, format: Format) -> Result<SerializeOutput> {
    serialize_with_policy(bom, spec, format, SerializePolicy::default())
}

/// [`serialize`] with an explicit incompatibility policy.
pub fn serialize_with_policy(
    bom: &Bom,
    spec: &Spec,
    format: Format,
    policy: SerializePolicy,
) -> Result<SerializeOutput> {
    tracing::debug!(version = %spec.version(), %format, "serializing BOM");
    match format {
        Format::Json => JsonSerializer::new(spec).with_policy(policy).serialize(bom),
        Format::Xml => XmlSerializer::new(spec).with_policy(policy).serialize(bom),
    }
}
