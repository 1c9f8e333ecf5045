//! Builds a [`Bom`] from an already-resolved package list.
//!
//! This is the host-facing input contract: a pure data transposition from
//! resolved package descriptors into the document model. Dependency edges
//! are turned into nested sub-components; each package is placed exactly
//! once (first dependent wins), so the result stays a tree even when the
//! resolver graph has shared or cyclic edges.

use crate::error::{BomError, Result};
use crate::model::{Bom, Classification, Component, Hash, License, Tool};
use std::collections::{HashMap, HashSet};

/// One resolved package as reported by the host's dependency resolver.
#[derive(Debug, Clone)]
pub struct ResolvedPackage {
    /// Package name, without the group/namespace part.
    pub name: String,
    /// Resolved version.
    pub version: String,
    /// Component classification for this package.
    pub kind: Classification,
    /// Group/namespace (e.g. the "acme" in "acme/lib").
    pub group: Option<String>,
    /// Package-URL ecosystem type (e.g. "cargo", "npm", "composer").
    pub ecosystem: Option<String>,
    /// Raw declared license strings from package metadata.
    pub declared_licenses: Vec<String>,
    /// (algorithm name, digest) pairs; algorithm names in any casing.
    pub hashes: Vec<(String, String)>,
    /// Names of direct dependencies.
    pub dependencies: Vec<String>,
}

impl ResolvedPackage {
    /// A library package with just name and version.
    #[must_use]
    pub fn library(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind: Classification::Library,
            group: None,
            ecosystem: None,
            declared_licenses: Vec::new(),
            hashes: Vec::new(),
            dependencies: Vec::new(),
        }
    }
}

/// Builder turning a resolved package list into a [`Bom`].
#[derive(Debug, Default)]
pub struct BomBuilder {
    tool: Option<Tool>,
    root: Option<Component>,
    generate_serial_number: bool,
}

impl BomBuilder {
    /// Create a builder with no metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the generating tool in the document metadata.
    #[must_use]
    pub fn tool(mut self, tool: Tool) -> Self {
        self.tool = Some(tool);
        self
    }

    /// Set the root component the document describes (the project itself).
    #[must_use]
    pub fn root_component(mut self, component: Component) -> Self {
        self.root = Some(component);
        self
    }

    /// Generate a fresh serial number on the built document.
    #[must_use]
    pub const fn generate_serial_number(mut self) -> Self {
        self.generate_serial_number = true;
        self
    }

    /// Build the BOM.
    ///
    /// Package order is preserved in the root component list. A package
    /// appearing as a direct dependency of an earlier package is nested
    /// under it instead of listed at the root.
    ///
    /// # Errors
    ///
    /// Fails on unknown hash algorithm names, malformed package URLs, and
    /// an unloadable SPDX license list.
    pub fn build(&self, packages: &[ResolvedPackage]) -> Result<Bom> {
        let mut components: HashMap<&str, Component> = HashMap::with_capacity(packages.len());
        for package in packages {
            components.insert(package.name.as_str(), convert(package)?);
        }

        let edges: HashMap<&str, &[String]> = packages
            .iter()
            .map(|p| (p.name.as_str(), p.dependencies.as_slice()))
            .collect();

        let mut placed: HashSet<&str> = HashSet::with_capacity(packages.len());
        let mut bom = Bom::new();
        if self.generate_serial_number {
            bom = bom.with_generated_serial_number();
        }
        if let Some(tool) = &self.tool {
            bom.metadata.tools.push(tool.clone());
        }
        bom.metadata.component = self.root.clone();

        for package in packages {
            if !placed.contains(package.name.as_str()) {
                let component = attach(package.name.as_str(), &mut components, &edges, &mut placed);
                if let Some(component) = component {
                    bom.add_component(component);
                }
            }
        }

        Ok(bom)
    }
}

/// Take a component out of the pool and nest its not-yet-placed direct
/// dependencies under it.
fn attach<'p>(
    name: &'p str,
    components: &mut HashMap<&'p str, Component>,
    edges: &HashMap<&'p str, &'p [String]>,
    placed: &mut HashSet<&'p str>,
) -> Option<Component> {
    let mut component = components.remove(name)?;
    placed.insert(name);
    fill(&mut component, name, components, edges, placed);
    Some(component)
}

/// Claim all of `name`'s not-yet-placed direct dependencies as children
/// before descending into any of them. Claiming the whole level first keeps
/// a grandchild edge from stealing a sibling; marking before descending
/// keeps cycles from looping and shared dependencies from duplicating.
fn fill<'p>(
    component: &mut Component,
    name: &'p str,
    components: &mut HashMap<&'p str, Component>,
    edges: &HashMap<&'p str, &'p [String]>,
    placed: &mut HashSet<&'p str>,
) {
    let mut children: Vec<(&'p str, Component)> = Vec::new();
    if let Some(dependencies) = edges.get(name) {
        for dependency in *dependencies {
            if !placed.contains(dependency.as_str()) {
                if let Some(child) = components.remove(dependency.as_str()) {
                    placed.insert(dependency.as_str());
                    children.push((dependency.as_str(), child));
                }
            }
        }
    }
    for (child_name, mut child) in children {
        fill(&mut child, child_name, components, edges, placed);
        component.add_component(child);
    }
}

fn convert(package: &ResolvedPackage) -> Result<Component> {
    let mut component =
        Component::new(package.kind, package.name.clone()).with_version(package.version.clone());
    if let Some(group) = &package.group {
        component = component.with_group(group.clone());
    }
    if let Some(ecosystem) = &package.ecosystem {
        component = component.with_purl(purl_for(package, ecosystem)?);
    }
    for raw in &package.declared_licenses {
        component.add_license(License::from_declared(raw)?);
    }
    for (algorithm, digest) in &package.hashes {
        component.add_hash(Hash::from_name(algorithm, digest.clone())?);
    }
    Ok(component)
}

/// Format a package URL. Basic formatting only; names in the supported
/// ecosystems need no percent-encoding.
fn purl_for(package: &ResolvedPackage, ecosystem: &str) -> Result<String> {
    if ecosystem.is_empty() || ecosystem.contains(|c: char| !c.is_ascii_alphanumeric() && c != '-')
    {
        return Err(BomError::InvalidPurl {
            package: package.name.clone(),
            reason: format!("invalid purl type '{ecosystem}'"),
        });
    }
    let namespace = package
        .group
        .as_ref()
        .map_or_else(String::new, |group| format!("{group}/"));
    Ok(format!(
        "pkg:{ecosystem}/{namespace}{}@{}",
        package.name, package.version
    ))
}
