//! Integration tests for cyclonedx-emit
//!
//! These tests exercise the public API end to end: building a BOM,
//! resolving a spec version descriptor, and serializing against it in
//! JSON and XML.

use cyclonedx_emit::{
    serialize, serialize_with_policy, Bom, BomError, Classification, Component, ExternalReference,
    ExternalReferenceType, Format, Hash, HashAlgorithm, License, OnIncompatible, SerializePolicy,
    Spec, SpecVersion, Tool, Warning,
};

fn acme_bom() -> Bom {
    let mut component = Component::library("lib")
        .with_group("acme")
        .with_version("2.0.0");
    component.add_hash(Hash::new(HashAlgorithm::Sha256, "abc123".into()));

    let mut bom = Bom::new().with_generated_serial_number();
    bom.metadata.tools.push(Tool::new("cdx-plugin").with_vendor("acme").with_version("0.1.0"));
    bom.add_component(component);
    bom
}

// ============================================================================
// Spec factory
// ============================================================================

mod spec_factory {
    use super::*;

    #[test]
    fn every_supported_version_round_trips() {
        for version in ["1.0", "1.1", "1.2", "1.3", "1.4"] {
            let spec = Spec::for_version(version).expect("supported version");
            assert_eq!(spec.version().as_str(), version);
        }
    }

    #[test]
    fn latest_resolves_and_is_supported() {
        let spec = Spec::for_version(SpecVersion::latest().as_str()).expect("latest resolves");
        assert_eq!(spec.version(), SpecVersion::latest());
    }

    #[test]
    fn unsupported_version_is_fatal_with_no_output() {
        let err = Spec::for_version("1.9").unwrap_err();
        assert!(matches!(
            err,
            BomError::UnsupportedSpecVersion { ref version, .. } if version == "1.9"
        ));
    }
}

// ============================================================================
// JSON end to end
// ============================================================================

mod json_end_to_end {
    use super::*;

    #[test]
    fn acme_lib_at_1_3_matches_the_wire_shape() {
        let spec = Spec::for_version("1.3").expect("supported");
        let output = serialize(&acme_bom(), &spec, Format::Json).expect("serializes");
        assert!(output.warnings.is_empty());

        let value: serde_json::Value =
            serde_json::from_str(&output.document).expect("valid JSON out");
        assert_eq!(value["bomFormat"], "CycloneDX");
        assert_eq!(value["specVersion"], "1.3");
        assert_eq!(value["components"][0]["name"], "lib");
        assert_eq!(value["components"][0]["group"], "acme");
        assert_eq!(value["components"][0]["version"], "2.0.0");
        assert_eq!(value["components"][0]["hashes"][0]["alg"], "SHA-256");
        assert_eq!(value["components"][0]["hashes"][0]["content"], "abc123");
        assert_eq!(value["metadata"]["tools"][0]["name"], "cdx-plugin");
        assert!(value["serialNumber"]
            .as_str()
            .expect("serial emitted")
            .starts_with("urn:uuid:"));
    }

    // Hosts that keep the vendor prefix in the name get it back verbatim.
    #[test]
    fn slash_qualified_name_is_emitted_unsplit() {
        let mut component = Component::library("acme/lib").with_version("2.0.0");
        component.add_hash(Hash::new(HashAlgorithm::Sha256, "abc123".into()));
        let mut bom = Bom::new();
        bom.add_component(component);

        let spec = Spec::for_version("1.3").expect("supported");
        let output = serialize(&bom, &spec, Format::Json).expect("serializes");
        let value: serde_json::Value =
            serde_json::from_str(&output.document).expect("valid JSON out");
        assert_eq!(value["components"][0]["name"], "acme/lib");
        assert_eq!(value["components"][0]["hashes"][0]["alg"], "SHA-256");
        assert!(value["components"][0].get("group").is_none());
    }

    #[test]
    fn json_before_1_2_is_refused() {
        for version in ["1.0", "1.1"] {
            let spec = Spec::for_version(version).expect("supported");
            let err = serialize(&acme_bom(), &spec, Format::Json).unwrap_err();
            assert!(matches!(err, BomError::UnsupportedFormat { .. }));
        }
    }
}

// ============================================================================
// Version gating: fail-hard vs degrade-gracefully
// ============================================================================

mod version_gating {
    use super::*;

    #[test]
    fn illegal_classification_fails_the_whole_call() {
        let mut bom = Bom::new();
        bom.add_component(Component::new(Classification::Container, "runtime"));

        let spec = Spec::for_version("1.1").expect("supported");
        let err = serialize(&bom, &spec, Format::Xml).unwrap_err();
        assert!(matches!(
            err,
            BomError::InvalidClassification { ref classification, ref version }
                if classification == "container" && version == "1.1"
        ));
    }

    #[test]
    fn illegal_hash_algorithm_is_dropped_with_one_warning() {
        let mut component = Component::library("lib").with_version("1.0.0");
        component.add_hash(Hash::new(HashAlgorithm::Blake3, "fff".into()));
        component.add_hash(Hash::new(HashAlgorithm::Sha1, "aaa".into()));
        let mut bom = Bom::new();
        bom.add_component(component);

        let spec = Spec::for_version("1.1").expect("supported");
        let output = serialize(&bom, &spec, Format::Xml).expect("succeeds despite dropped hash");

        assert_eq!(output.warnings.len(), 1);
        assert!(matches!(
            &output.warnings[0],
            Warning::DroppedField { field, .. } if field == "component.hashes"
        ));
        assert!(!output.document.contains("BLAKE3"));
        assert!(output.document.contains(r#"<hash alg="SHA-1">aaa</hash>"#));
    }

    #[test]
    fn expression_license_is_dropped_before_1_2() {
        let mut component = Component::library("lib").with_version("1.0.0");
        component.add_license(License::Expression("MIT OR Apache-2.0".into()));
        component.add_license(License::SpdxId("MIT".into()));
        let mut bom = Bom::new();
        bom.add_component(component);

        let spec = Spec::for_version("1.1").expect("supported");
        let output = serialize(&bom, &spec, Format::Xml).expect("succeeds");

        assert_eq!(output.warnings.len(), 1);
        assert!(!output.document.contains("expression"));
        assert!(output.document.contains("<id>MIT</id>"));
    }

    #[test]
    fn nested_components_flatten_at_1_0() {
        let mut parent = Component::new(Classification::Application, "app").with_version("1.0.0");
        parent.add_component(Component::library("child").with_version("0.1.0"));
        let mut bom = Bom::new();
        bom.add_component(parent);

        let spec = Spec::for_version("1.0").expect("supported");
        let output = serialize(&bom, &spec, Format::Xml).expect("succeeds");

        // child emitted as a sibling of app, not nested under it
        let document = output.document;
        let app_end = document.find("</component>").expect("app closes");
        let child_start = document.find("<name>child</name>").expect("child emitted");
        assert!(child_start > app_end);
        assert!(output
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::DroppedField { field, .. } if field == "component.components")));
    }

    #[test]
    fn external_references_are_dropped_entirely_at_1_0() {
        let mut component = Component::library("lib").with_version("1.0.0");
        component.add_external_reference(
            ExternalReference::new(ExternalReferenceType::Vcs, "https://example.com/r.git".into())
                .with_comment("upstream"),
        );
        let mut bom = Bom::new();
        bom.add_component(component);

        let spec = Spec::for_version("1.0").expect("supported");
        let output = serialize(&bom, &spec, Format::Xml).expect("succeeds");
        assert!(!output.document.contains("externalReferences"));
        assert!(output
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::DroppedField { field, .. } if field == "component.externalReferences")));
    }
}

// ============================================================================
// Policy overrides
// ============================================================================

mod policy_overrides {
    use super::*;

    #[test]
    fn drop_policy_skips_the_offending_component() {
        let mut bom = Bom::new();
        bom.add_component(Component::new(Classification::Container, "runtime"));
        bom.add_component(Component::library("kept").with_version("1.0.0"));

        let spec = Spec::for_version("1.1").expect("supported");
        let policy = SerializePolicy {
            classification: OnIncompatible::Drop,
            ..SerializePolicy::default()
        };
        let output =
            serialize_with_policy(&bom, &spec, Format::Xml, policy).expect("succeeds under drop policy");

        assert!(!output.document.contains("runtime"));
        assert!(output.document.contains("<name>kept</name>"));
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn fail_policy_promotes_a_dropped_hash_to_an_error() {
        let mut component = Component::library("lib").with_version("1.0.0");
        component.add_hash(Hash::new(HashAlgorithm::Blake3, "fff".into()));
        let mut bom = Bom::new();
        bom.add_component(component);

        let spec = Spec::for_version("1.1").expect("supported");
        let policy = SerializePolicy {
            hash: OnIncompatible::Fail,
            ..SerializePolicy::default()
        };
        let err = serialize_with_policy(&bom, &spec, Format::Xml, policy).unwrap_err();
        assert!(matches!(err, BomError::UnsupportedValue { .. }));
    }
}

// ============================================================================
// XML wire shape
// ============================================================================

mod xml_wire_shape {
    use super::*;

    #[test]
    fn namespace_follows_the_selected_version() {
        for version in ["1.0", "1.1", "1.2", "1.3", "1.4"] {
            let spec = Spec::for_version(version).expect("supported");
            let output = serialize(&acme_bom(), &spec, Format::Xml).expect("serializes");
            assert!(
                output
                    .document
                    .contains(&format!("http://cyclonedx.org/schema/bom/{version}")),
                "missing namespace for {version}"
            );
        }
    }

    #[test]
    fn component_fields_use_schema_names() {
        let spec = Spec::for_version("1.4").expect("supported");
        let output = serialize(&acme_bom(), &spec, Format::Xml).expect("serializes");
        assert!(output.document.contains(r#"<component type="library">"#));
        assert!(output.document.contains("<group>acme</group>"));
        assert!(output.document.contains("<name>lib</name>"));
        assert!(output.document.contains("<version>2.0.0</version>"));
    }
}
