//! SPDX license-id validation against the bundled license list.
//!
//! The list ships with the crate as `data/spdx-licenses.json`, a read-only
//! JSON array of identifier strings. It is parsed exactly once per process
//! behind a [`OnceLock`]; concurrent first access cannot race-corrupt the
//! cache. A missing or malformed resource is a fatal configuration error
//! reported at first use, never a silent "always invalid".

use crate::error::{BomError, Result};
use std::collections::HashSet;
use std::sync::OnceLock;

const LICENSE_LIST: &str = include_str!("../data/spdx-licenses.json");

static SPDX_IDS: OnceLock<std::result::Result<HashSet<String>, String>> = OnceLock::new();

fn load() -> std::result::Result<HashSet<String>, String> {
    let ids: Vec<serde_json::Value> =
        serde_json::from_str(LICENSE_LIST).map_err(|e| format!("not a JSON array: {e}"))?;

    if ids.is_empty() {
        return Err("license list is empty".to_string());
    }

    ids.into_iter()
        .map(|entry| match entry {
            serde_json::Value::String(id) => Ok(id),
            other => Err(format!("non-string entry in license list: {other}")),
        })
        .collect()
}

fn license_ids() -> Result<&'static HashSet<String>> {
    match SPDX_IDS.get_or_init(load) {
        Ok(ids) => Ok(ids),
        Err(message) => Err(BomError::InvalidLicenseData(message.clone())),
    }
}

/// Whether `id` is a known SPDX license identifier (exact match).
///
/// # Errors
///
/// Returns [`BomError::InvalidLicenseData`] if the bundled list cannot be
/// loaded.
pub fn is_valid_spdx_id(id: &str) -> Result<bool> {
    Ok(license_ids()?.contains(id))
}

/// Number of identifiers in the bundled list.
pub fn license_count() -> Result<usize> {
    Ok(license_ids()?.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Resource integrity: non-empty, valid JSON, every entry a string.
    #[test]
    fn bundled_list_is_well_formed() {
        let parsed: serde_json::Value =
            serde_json::from_str(LICENSE_LIST).expect("bundled list must be valid JSON");
        let entries = parsed.as_array().expect("bundled list must be an array");
        assert!(!entries.is_empty());
        assert!(entries.iter().all(serde_json::Value::is_string));
        assert_eq!(license_count().expect("list loads"), entries.len());
    }

    #[test]
    fn common_ids_validate() {
        for id in ["MIT", "Apache-2.0", "GPL-3.0-only", "BSD-3-Clause", "ISC"] {
            assert!(is_valid_spdx_id(id).expect("list loads"), "{id} should be valid");
        }
    }

    #[test]
    fn lookup_is_exact_match() {
        assert!(!is_valid_spdx_id("mit").expect("list loads"));
        assert!(!is_valid_spdx_id("MIT ").expect("list loads"));
        assert!(!is_valid_spdx_id("NotALicense-1.0").expect("list loads"));
    }
}
