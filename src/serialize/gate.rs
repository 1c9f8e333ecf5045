//! Shared per-field admission logic used by both serializers.
//!
//! Each function decides, for one field category, what the target spec
//! version admits: structural mismatches surface as errors (subject to the
//! policy), enrichment mismatches are filtered out with a warning.

use super::{OnIncompatible, SerializePolicy, Warning};
use crate::error::{BomError, Result};
use crate::model::{Component, ExternalReference, HashAlgorithm, License};
use crate::spec::Spec;

/// Whether `component` may appear at all. `false` means the component (and
/// its subtree) is dropped under a drop-policy override; the default policy
/// fails instead.
pub(super) fn admit_component(
    spec: &Spec,
    policy: SerializePolicy,
    component: &Component,
    warnings: &mut Vec<Warning>,
) -> Result<bool> {
    if spec.supports_classification(component.classification) {
        return Ok(true);
    }
    match policy.classification {
        OnIncompatible::Fail => Err(BomError::InvalidClassification {
            classification: component.classification.to_string(),
            version: spec.version().to_string(),
        }),
        OnIncompatible::Drop => {
            warnings.push(Warning::dropped(
                "component",
                format!(
                    "type '{}' of '{}' is not allowed in CycloneDX {}",
                    component.classification,
                    component.display_name(),
                    spec.version()
                ),
            ));
            Ok(false)
        }
    }
}

/// Hashes whose algorithm the version admits, in insertion order.
pub(super) fn admitted_hashes<'c>(
    spec: &Spec,
    policy: SerializePolicy,
    component: &'c Component,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<(HashAlgorithm, &'c str)>> {
    let mut hashes = Vec::new();
    for (algorithm, digest) in &component.hashes {
        if spec.supports_hash_algorithm(*algorithm) {
            hashes.push((*algorithm, digest.as_str()));
        } else {
            match policy.hash {
                OnIncompatible::Fail => {
                    return Err(BomError::UnsupportedValue {
                        field: "component.hashes".into(),
                        value: algorithm.to_string(),
                        version: spec.version().to_string(),
                    });
                }
                OnIncompatible::Drop => warnings.push(Warning::dropped(
                    "component.hashes",
                    format!(
                        "hash algorithm {algorithm} on '{}' is not supported in CycloneDX {}",
                        component.display_name(),
                        spec.version()
                    ),
                )),
            }
        }
    }
    Ok(hashes)
}

/// Licenses the version admits. SPDX-id and named licenses always pass;
/// expressions are gated on descriptor support.
pub(super) fn admitted_licenses<'c>(
    spec: &Spec,
    policy: SerializePolicy,
    component: &'c Component,
    warnings: &mut Vec<Warning>,
) -> Result<Vec<&'c License>> {
    let mut licenses = Vec::new();
    for license in &component.licenses {
        if let License::Expression(expression) = license {
            if !spec.supports_license_expression() {
                match policy.license_expression {
                    OnIncompatible::Fail => {
                        return Err(BomError::UnsupportedValue {
                            field: "component.licenses".into(),
                            value: expression.clone(),
                            version: spec.version().to_string(),
                        });
                    }
                    OnIncompatible::Drop => {
                        warnings.push(Warning::dropped(
                            "component.licenses",
                            format!(
                                "license expression '{expression}' on '{}' is not representable in CycloneDX {}",
                                component.display_name(),
                                spec.version()
                            ),
                        ));
                        continue;
                    }
                }
            }
        }
        licenses.push(license);
    }
    Ok(licenses)
}

/// External references the version admits, filtered per entry. Versions
/// without external references at all drop the whole collection with a
/// single warning.
pub(super) fn admitted_references<'c>(
    spec: &Spec,
    component: &'c Component,
    warnings: &mut Vec<Warning>,
) -> Vec<&'c ExternalReference> {
    if component.external_references.is_empty() {
        return Vec::new();
    }
    if !spec.supports_external_references() {
        warnings.push(Warning::dropped(
            "component.externalReferences",
            format!("not representable in CycloneDX {}", spec.version()),
        ));
        return Vec::new();
    }

    let mut references = Vec::new();
    for reference in &component.external_references {
        if spec.supports_external_reference_type(reference.reference_type) {
            references.push(reference);
        } else {
            warnings.push(Warning::dropped(
                "component.externalReferences",
                format!(
                    "reference type '{}' on '{}' is not supported in CycloneDX {}",
                    reference.reference_type,
                    component.display_name(),
                    spec.version()
                ),
            ));
        }
    }
    references
}

/// The component's purl when the version admits one.
pub(super) fn admitted_purl<'c>(
    spec: &Spec,
    component: &'c Component,
    warnings: &mut Vec<Warning>,
) -> Option<&'c str> {
    let purl = component.purl.as_deref()?;
    if spec.supports_purl() {
        Some(purl)
    } else {
        warnings.push(Warning::dropped(
            "component.purl",
            format!("not representable in CycloneDX {}", spec.version()),
        ));
        None
    }
}
