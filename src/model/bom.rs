//! BOM root aggregate and document metadata.

use super::Component;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The root BOM document.
///
/// Version-agnostic: the target spec version is chosen at serialization
/// time, never stored on the model. Component order is insertion order and
/// is reflected in output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bom {
    /// Optional serial number, a `urn:uuid:` identifier by convention.
    pub serial_number: Option<String>,
    /// Monotonic document version, starting at 1.
    pub version: u32,
    /// Document metadata (only emitted for spec versions that carry it).
    pub metadata: Metadata,
    /// Root component list, insertion order preserved.
    pub components: Vec<Component>,
}

impl Bom {
    /// Create a new empty BOM with document version 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            serial_number: None,
            version: 1,
            metadata: Metadata::default(),
            components: Vec::new(),
        }
    }

    /// Set an explicit serial number.
    #[must_use]
    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }

    /// Generate a fresh `urn:uuid:` serial number.
    #[must_use]
    pub fn with_generated_serial_number(mut self) -> Self {
        self.serial_number = Some(format!("urn:uuid:{}", uuid::Uuid::new_v4()));
        self
    }

    /// Set the document version.
    #[must_use]
    pub const fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Append a root-level component.
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Total number of components, nested ones included.
    #[must_use]
    pub fn component_count(&self) -> usize {
        fn count(components: &[Component]) -> usize {
            components.iter().map(|c| 1 + count(&c.components)).sum()
        }
        count(&self.components)
    }
}

impl Default for Bom {
    fn default() -> Self {
        Self::new()
    }
}

/// Document-level metadata: creation time, generating tools, and the
/// root component the BOM describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Creation timestamp.
    pub timestamp: DateTime<Utc>,
    /// Tools that produced the document.
    pub tools: Vec<Tool>,
    /// The component the BOM describes (the project itself).
    pub component: Option<Component>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            tools: Vec::new(),
            component: None,
        }
    }
}

/// A tool that contributed to the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool vendor.
    pub vendor: Option<String>,
    /// Tool name.
    pub name: String,
    /// Tool version.
    pub version: Option<String>,
}

impl Tool {
    /// Create a tool entry.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            vendor: None,
            name: name.into(),
            version: None,
        }
    }

    /// Set the vendor.
    #[must_use]
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Set the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Classification;

    #[test]
    fn generated_serial_number_is_a_urn_uuid() {
        let bom = Bom::new().with_generated_serial_number();
        let serial = bom.serial_number.expect("serial set");
        assert!(serial.starts_with("urn:uuid:"));
        assert_eq!(serial.len(), "urn:uuid:".len() + 36);
    }

    #[test]
    fn component_count_includes_nested() {
        let mut root = Component::new(Classification::Application, "app");
        let mut lib = Component::library("lib");
        lib.add_component(Component::library("transitive"));
        root.add_component(lib);

        let mut bom = Bom::new();
        bom.add_component(root);
        bom.add_component(Component::library("sibling"));

        assert_eq!(bom.component_count(), 4);
    }

    #[test]
    fn document_version_defaults_to_one() {
        assert_eq!(Bom::new().version, 1);
        assert_eq!(Bom::new().with_version(3).version, 3);
    }
}
