//! JSON serializer: renders a BOM into the CycloneDX JSON binding.
//!
//! The intermediate representation is a [`serde_json::Value`] tree; string
//! rendering is a thin final step. The JSON binding exists from spec 1.2
//! onward, so requesting it for 1.0/1.1 fails up front.

use super::{gate, SerializeOutput, SerializePolicy, Warning};
use crate::error::{BomError, Result};
use crate::model::{Bom, Component, License, Metadata};
use crate::spec::{Format, Spec};
use chrono::SecondsFormat;
use serde_json::{json, Map, Value};

/// JSON serializer parameterized by a spec version descriptor.
pub struct JsonSerializer<'a> {
    spec: &'a Spec,
    policy: SerializePolicy,
}

impl<'a> JsonSerializer<'a> {
    /// Create a serializer with the default incompatibility policy.
    #[must_use]
    pub fn new(spec: &'a Spec) -> Self {
        Self {
            spec,
            policy: SerializePolicy::default(),
        }
    }

    /// Override the incompatibility policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: SerializePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Render to the document tree plus collected warnings.
    ///
    /// # Errors
    ///
    /// [`BomError::UnsupportedFormat`] when the target version predates the
    /// JSON binding; [`BomError::InvalidClassification`] per the policy.
    pub fn to_value(&self, bom: &Bom) -> Result<(Value, Vec<Warning>)> {
        if !self.spec.supports_format(Format::Json) {
            return Err(BomError::UnsupportedFormat {
                format: Format::Json.to_string(),
                version: self.spec.version().to_string(),
            });
        }

        let mut warnings = Vec::new();
        let mut root = Map::new();
        root.insert("bomFormat".into(), json!("CycloneDX"));
        root.insert("specVersion".into(), json!(self.spec.version().as_str()));

        if let Some(serial) = &bom.serial_number {
            if self.spec.supports_serial_number() {
                root.insert("serialNumber".into(), json!(serial));
            } else {
                warnings.push(Warning::dropped(
                    "serialNumber",
                    format!("not representable in CycloneDX {}", self.spec.version()),
                ));
            }
        }
        root.insert("version".into(), json!(bom.version));

        if self.spec.supports_metadata() {
            root.insert(
                "metadata".into(),
                self.metadata_value(&bom.metadata, &mut warnings)?,
            );
        } else if !bom.metadata.tools.is_empty() || bom.metadata.component.is_some() {
            // A bare timestamp is not worth a notice
            warnings.push(Warning::dropped(
                "metadata",
                format!("not representable in CycloneDX {}", self.spec.version()),
            ));
        }

        let mut components = Vec::new();
        for component in &bom.components {
            self.push_component(component, &mut components, &mut warnings)?;
        }
        root.insert("components".into(), Value::Array(components));

        Ok((Value::Object(root), warnings))
    }

    /// Render to the document string plus collected warnings.
    pub fn serialize(&self, bom: &Bom) -> Result<SerializeOutput> {
        let (value, warnings) = self.to_value(bom)?;
        let document =
            serde_json::to_string_pretty(&value).map_err(|e| BomError::Render(e.to_string()))?;
        Ok(SerializeOutput { document, warnings })
    }

    fn metadata_value(&self, metadata: &Metadata, warnings: &mut Vec<Warning>) -> Result<Value> {
        let mut value = Map::new();
        value.insert(
            "timestamp".into(),
            json!(metadata.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );

        if !metadata.tools.is_empty() {
            let tools: Vec<Value> = metadata
                .tools
                .iter()
                .map(|tool| {
                    let mut entry = Map::new();
                    if let Some(vendor) = &tool.vendor {
                        entry.insert("vendor".into(), json!(vendor));
                    }
                    entry.insert("name".into(), json!(tool.name));
                    if let Some(version) = &tool.version {
                        entry.insert("version".into(), json!(version));
                    }
                    Value::Object(entry)
                })
                .collect();
            value.insert("tools".into(), Value::Array(tools));
        }

        if let Some(component) = &metadata.component {
            if let Some(object) = self.component_object(component, warnings)? {
                value.insert("component".into(), Value::Object(object));
            }
        }

        Ok(Value::Object(value))
    }

    /// Emit one component into `out`, recursing into children. When the
    /// descriptor cannot nest, children are flattened into `out` after
    /// their parent (lossy, warned).
    fn push_component(
        &self,
        component: &Component,
        out: &mut Vec<Value>,
        warnings: &mut Vec<Warning>,
    ) -> Result<()> {
        let Some(mut object) = self.component_object(component, warnings)? else {
            return Ok(());
        };

        if self.spec.supports_nested_components() {
            if !component.components.is_empty() {
                let mut nested = Vec::new();
                for child in &component.components {
                    self.push_component(child, &mut nested, warnings)?;
                }
                object.insert("components".into(), Value::Array(nested));
            }
            out.push(Value::Object(object));
        } else {
            out.push(Value::Object(object));
            if !component.components.is_empty() {
                warnings.push(Warning::dropped(
                    "component.components",
                    format!(
                        "CycloneDX {} cannot nest components; children of '{}' flattened into the root list",
                        self.spec.version(),
                        component.display_name()
                    ),
                ));
                for child in &component.components {
                    self.push_component(child, out, warnings)?;
                }
            }
        }
        Ok(())
    }

    /// The component object without its nested children, or `None` when the
    /// component is dropped under a drop-policy classification override.
    fn component_object(
        &self,
        component: &Component,
        warnings: &mut Vec<Warning>,
    ) -> Result<Option<Map<String, Value>>> {
        if !gate::admit_component(self.spec, self.policy, component, warnings)? {
            return Ok(None);
        }

        let mut object = Map::new();
        object.insert("type".into(), json!(component.classification.as_str()));
        object.insert("name".into(), json!(component.name));
        match &component.version {
            Some(version) => {
                object.insert("version".into(), json!(version));
            }
            None if self.spec.requires_component_version() => {
                object.insert("version".into(), json!(""));
            }
            None => {}
        }
        if let Some(group) = &component.group {
            object.insert("group".into(), json!(group));
        }
        if let Some(description) = &component.description {
            object.insert("description".into(), json!(description));
        }

        let hashes = gate::admitted_hashes(self.spec, self.policy, component, warnings)?;
        if !hashes.is_empty() {
            let hashes: Vec<Value> = hashes
                .into_iter()
                .map(|(algorithm, digest)| json!({ "alg": algorithm.as_str(), "content": digest }))
                .collect();
            object.insert("hashes".into(), Value::Array(hashes));
        }

        let licenses = gate::admitted_licenses(self.spec, self.policy, component, warnings)?;
        if !licenses.is_empty() {
            let licenses: Vec<Value> = licenses.into_iter().map(license_value).collect();
            object.insert("licenses".into(), Value::Array(licenses));
        }

        if let Some(purl) = gate::admitted_purl(self.spec, component, warnings) {
            object.insert("purl".into(), json!(purl));
        }

        let references = gate::admitted_references(self.spec, component, warnings);
        if !references.is_empty() {
            let references: Vec<Value> = references
                .into_iter()
                .map(|reference| {
                    let mut entry = Map::new();
                    entry.insert("type".into(), json!(reference.reference_type.as_str()));
                    entry.insert("url".into(), json!(reference.url));
                    if let Some(comment) = &reference.comment {
                        entry.insert("comment".into(), json!(comment));
                    }
                    Value::Object(entry)
                })
                .collect();
            object.insert("externalReferences".into(), Value::Array(references));
        }

        Ok(Some(object))
    }
}

fn license_value(license: &License) -> Value {
    match license {
        License::SpdxId(id) => json!({ "license": { "id": id } }),
        License::Named { name, url } => {
            let mut entry = Map::new();
            entry.insert("name".into(), json!(name));
            if let Some(url) = url {
                entry.insert("url".into(), json!(url));
            }
            json!({ "license": Value::Object(entry) })
        }
        License::Expression(expression) => json!({ "expression": expression }),
    }
}
