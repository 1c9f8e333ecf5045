//! End-to-end pipeline tests: resolved package list in, document out.

use cyclonedx_emit::{
    serialize, BomBuilder, Classification, Component, Format, ResolvedPackage, Spec, Tool,
};

fn resolved_packages() -> Vec<ResolvedPackage> {
    let mut logging = ResolvedPackage::library("logging", "1.4.2");
    logging.group = Some("acme".to_string());
    logging.ecosystem = Some("composer".to_string());
    logging.declared_licenses = vec!["MIT".to_string()];
    logging.hashes = vec![("sha-256".to_string(), "abc123".to_string())];

    let mut http = ResolvedPackage::library("http-client", "3.0.1");
    http.ecosystem = Some("composer".to_string());
    http.declared_licenses = vec!["MIT OR Apache-2.0".to_string()];
    http.dependencies = vec!["logging".to_string()];

    vec![http, logging]
}

#[test]
fn build_then_serialize_latest_json() {
    let bom = BomBuilder::new()
        .tool(Tool::new("cdx-plugin").with_vendor("acme").with_version("0.1.0"))
        .root_component(Component::new(Classification::Application, "shop").with_version("5.0.0"))
        .generate_serial_number()
        .build(&resolved_packages())
        .expect("builds");

    let spec = Spec::latest();
    let output = serialize(&bom, &spec, Format::Json).expect("serializes");
    assert!(output.warnings.is_empty());

    let value: serde_json::Value = serde_json::from_str(&output.document).expect("valid JSON");
    assert_eq!(value["specVersion"], "1.4");
    assert_eq!(value["metadata"]["component"]["name"], "shop");
    assert_eq!(value["metadata"]["tools"][0]["vendor"], "acme");

    // http-client at the root, logging nested under it
    assert_eq!(value["components"][0]["name"], "http-client");
    assert_eq!(value["components"][0]["components"][0]["name"], "logging");
    assert_eq!(
        value["components"][0]["components"][0]["purl"],
        "pkg:composer/acme/logging@1.4.2"
    );
    assert_eq!(
        value["components"][0]["components"][0]["hashes"][0]["alg"],
        "SHA-256"
    );
    assert_eq!(value["components"][0]["licenses"][0]["expression"], "MIT OR Apache-2.0");
}

#[test]
fn build_then_serialize_oldest_xml_flattens_and_warns() {
    let bom = BomBuilder::new()
        .tool(Tool::new("cdx-plugin"))
        .build(&resolved_packages())
        .expect("builds");

    let spec = Spec::for_version("1.0").expect("supported");
    let output = serialize(&bom, &spec, Format::Xml).expect("serializes");

    // 1.0 cannot nest, carry purls, or represent expressions or metadata;
    // everything still lands in the document at the root level.
    assert!(output.document.contains("<name>http-client</name>"));
    assert!(output.document.contains("<name>logging</name>"));
    assert!(!output.document.contains("purl"));
    assert!(!output.document.contains("expression"));
    assert!(!output.warnings.is_empty());
}
