//! XML serializer: renders a BOM into the CycloneDX XML binding.
//!
//! The intermediate representation is an [`Element`] tree; text rendering
//! goes through `quick_xml`'s event writer, which handles escaping.

use super::{gate, SerializeOutput, SerializePolicy, Warning};
use crate::error::{BomError, Result};
use crate::model::{Bom, Component, License, Metadata};
use crate::spec::{Format, Spec};
use chrono::SecondsFormat;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// A minimal XML element tree: name, attributes, optional text, children.
///
/// Text and children are mutually exclusive in the shapes this crate emits,
/// but the writer supports both for completeness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create an element holding only text.
    #[must_use]
    pub fn text_node(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).with_text(text)
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Append a child element, builder style.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Direct children, in document order.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the tree as an XML document string with declaration.
    pub fn render(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| BomError::Render(e.to_string()))?;
        self.write_into(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|e| BomError::Render(e.to_string()))
    }

    fn write_into(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.text.is_none() && self.children.is_empty() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(|e| BomError::Render(e.to_string()));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| BomError::Render(e.to_string()))?;
        if let Some(text) = &self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| BomError::Render(e.to_string()))?;
        }
        for child in &self.children {
            child.write_into(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(|e| BomError::Render(e.to_string()))
    }
}

/// XML serializer parameterized by a spec version descriptor.
pub struct XmlSerializer<'a> {
    spec: &'a Spec,
    policy: SerializePolicy,
}

impl<'a> XmlSerializer<'a> {
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
    /// [`BomError::InvalidClassification`] per the policy; XML itself is
    /// defined for every supported version.
    pub fn to_tree(&self, bom: &Bom) -> Result<(Element, Vec<Warning>)> {
        debug_assert!(self.spec.supports_format(Format::Xml));

        let mut warnings = Vec::new();
        let mut root = Element::new("bom")
            .with_attr("xmlns", self.spec.xml_namespace())
            .with_attr("version", bom.version.to_string());

        if let Some(serial) = &bom.serial_number {
            if self.spec.supports_serial_number() {
                root = root.with_attr("serialNumber", serial.as_str());
            } else {
                warnings.push(Warning::dropped(
                    "serialNumber",
                    format!("not representable in CycloneDX {}", self.spec.version()),
                ));
            }
        }

        if self.spec.supports_metadata() {
            root.push(self.metadata_element(&bom.metadata, &mut warnings)?);
        } else if !bom.metadata.tools.is_empty() || bom.metadata.component.is_some() {
            // A bare timestamp is not worth a notice
            warnings.push(Warning::dropped(
                "metadata",
                format!("not representable in CycloneDX {}", self.spec.version()),
            ));
        }

        let mut components = Element::new("components");
        for component in &bom.components {
            self.push_component(component, &mut components, &mut warnings)?;
        }
        root.push(components);

        Ok((root, warnings))
    }

    /// Render to the document string plus collected warnings.
    pub fn serialize(&self, bom: &Bom) -> Result<SerializeOutput> {
        let (tree, warnings) = self.to_tree(bom)?;
        Ok(SerializeOutput {
            document: tree.render()?,
            warnings,
        })
    }

    fn metadata_element(&self, metadata: &Metadata, warnings: &mut Vec<Warning>) -> Result<Element> {
        let mut element = Element::new("metadata").with_child(Element::text_node(
            "timestamp",
            metadata.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));

        if !metadata.tools.is_empty() {
            let mut tools = Element::new("tools");
            for tool in &metadata.tools {
                let mut entry = Element::new("tool");
                if let Some(vendor) = &tool.vendor {
                    entry.push(Element::text_node("vendor", vendor));
                }
                entry.push(Element::text_node("name", &tool.name));
                if let Some(version) = &tool.version {
                    entry.push(Element::text_node("version", version));
                }
                tools.push(entry);
            }
            element.push(tools);
        }

        if let Some(component) = &metadata.component {
            if let Some(entry) = self.component_element(component, warnings)? {
                element.push(entry);
            }
        }

        Ok(element)
    }

    /// Emit one component into the `components` container, flattening its
    /// children after it when the version cannot nest.
    fn push_component(
        &self,
        component: &Component,
        out: &mut Element,
        warnings: &mut Vec<Warning>,
    ) -> Result<()> {
        let Some(mut element) = self.component_element(component, warnings)? else {
            return Ok(());
        };

        if self.spec.supports_nested_components() {
            if !component.components.is_empty() {
                let mut nested = Element::new("components");
                for child in &component.components {
                    self.push_component(child, &mut nested, warnings)?;
                }
                element.push(nested);
            }
            out.push(element);
        } else {
            out.push(element);
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

    /// The component element without its nested children, or `None` when
    /// dropped under a drop-policy classification override.
    fn component_element(
        &self,
        component: &Component,
        warnings: &mut Vec<Warning>,
    ) -> Result<Option<Element>> {
        if !gate::admit_component(self.spec, self.policy, component, warnings)? {
            return Ok(None);
        }

        let mut element =
            Element::new("component").with_attr("type", component.classification.as_str());
        if let Some(group) = &component.group {
            element.push(Element::text_node("group", group));
        }
        element.push(Element::text_node("name", &component.name));
        match &component.version {
            Some(version) => element.push(Element::text_node("version", version)),
            None if self.spec.requires_component_version() => {
                element.push(Element::text_node("version", ""));
            }
            None => {}
        }
        if let Some(description) = &component.description {
            element.push(Element::text_node("description", description));
        }

        let admitted = gate::admitted_hashes(self.spec, self.policy, component, warnings)?;
        if !admitted.is_empty() {
            let mut hashes = Element::new("hashes");
            for (algorithm, digest) in admitted {
                hashes.push(
                    Element::text_node("hash", digest).with_attr("alg", algorithm.as_str()),
                );
            }
            element.push(hashes);
        }

        let admitted = gate::admitted_licenses(self.spec, self.policy, component, warnings)?;
        if !admitted.is_empty() {
            let mut licenses = Element::new("licenses");
            for license in admitted {
                licenses.push(license_element(license));
            }
            element.push(licenses);
        }

        if let Some(purl) = gate::admitted_purl(self.spec, component, warnings) {
            element.push(Element::text_node("purl", purl));
        }

        let admitted = gate::admitted_references(self.spec, component, warnings);
        if !admitted.is_empty() {
            let mut references = Element::new("externalReferences");
            for reference in admitted {
                let mut entry = Element::new("reference")
                    .with_attr("type", reference.reference_type.as_str())
                    .with_child(Element::text_node("url", &reference.url));
                if let Some(comment) = &reference.comment {
                    entry.push(Element::text_node("comment", comment));
                }
                references.push(entry);
            }
            element.push(references);
        }

        Ok(Some(element))
    }
}

fn license_element(license: &License) -> Element {
    match license {
        License::SpdxId(id) => Element::new("license").with_child(Element::text_node("id", id)),
        License::Named { name, url } => {
            let mut element = Element::new("license").with_child(Element::text_node("name", name));
            if let Some(url) = url {
                element.push(Element::text_node("url", url));
            }
            element
        }
        License::Expression(expression) => Element::text_node("expression", expression),
    }
}
