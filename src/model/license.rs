//! License model: SPDX-identified, expression, or named license.
//!
//! Uses the `spdx` crate in lax mode to recognize compound expressions
//! ("MIT OR Apache-2.0"); single identifiers are validated against the
//! bundled SPDX license list.

use crate::error::{BomError, Result};
use crate::spdx::is_valid_spdx_id;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A declared license. Exactly one variant per instance by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum License {
    /// A single identifier from the SPDX license list (e.g. "MIT").
    SpdxId(String),
    /// A compound SPDX license expression (e.g. "MIT OR Apache-2.0").
    /// Only representable in spec versions that support expressions.
    Expression(String),
    /// A free-text license name with an optional URL to its text.
    Named { name: String, url: Option<String> },
}

impl License {
    /// Create an SPDX-id license, validating the id against the bundled
    /// license list.
    ///
    /// # Errors
    ///
    /// [`BomError::InvalidSpdxId`] for unknown ids,
    /// [`BomError::InvalidLicenseData`] if the bundled list cannot load.
    pub fn spdx_id(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if is_valid_spdx_id(&id)? {
            Ok(Self::SpdxId(id))
        } else {
            Err(BomError::InvalidSpdxId(id))
        }
    }

    /// Create a named license without validation.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            url: None,
        }
    }

    /// Create a named license with a URL to its text.
    #[must_use]
    pub fn named_with_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            url: Some(url.into()),
        }
    }

    /// Classify a raw declared-license string from package metadata.
    ///
    /// Detection order: known SPDX id, then parseable SPDX expression
    /// (lax mode accepts common sloppiness like "/" for "OR"), then a named
    /// license as the catch-all.
    ///
    /// # Errors
    ///
    /// [`BomError::InvalidLicenseData`] if the bundled list cannot load.
    pub fn from_declared(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if is_valid_spdx_id(trimmed)? {
            return Ok(Self::SpdxId(trimmed.to_string()));
        }
        let looks_compound = trimmed.contains(char::is_whitespace)
            || trimmed.contains('(')
            || trimmed.contains('/');
        if looks_compound
            && spdx::Expression::parse_mode(trimmed, spdx::ParseMode::LAX).is_ok()
        {
            return Ok(Self::Expression(trimmed.to_string()));
        }
        Ok(Self::named(trimmed))
    }

    /// Whether this is the expression variant (version-gated in output).
    #[must_use]
    pub const fn is_expression(&self) -> bool {
        matches!(self, Self::Expression(_))
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpdxId(id) => f.write_str(id),
            Self::Expression(expr) => f.write_str(expr),
            Self::Named { name, .. } => f.write_str(name),
        }
    }
}
