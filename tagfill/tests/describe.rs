mod support;

use anyhow::Result;
use serde_json::json;
use tagfill::{
    CodeGenerator, Defaults, EmitConfig, IntWidth, RecordDescriptor, TypeKind, Visibility, describe,
};

#[derive(Defaults, Debug, Default)]
pub struct Endpoint {
    #[tagfill(default = "localhost")]
    pub host: String,
    #[tagfill(default = "8080", opt = "nonzero")]
    pub port: u16,
    #[tagfill(skip)]
    pub cache: Vec<String>,
    token: String,
}

impl Endpoint {
    fn token(&self) -> &str {
        &self.token
    }
}

#[test]
fn descriptor_lists_every_field_in_order() -> Result<()> {
    support::init_logging();

    let endpoint = Endpoint::default();
    let descriptor = describe(&endpoint)?;
    assert_eq!(endpoint.token(), "");

    assert_eq!(descriptor.type_name, "Endpoint");
    let names: Vec<&str> = descriptor.fields.iter().map(|field| field.name.as_str()).collect();
    assert_eq!(names, ["host", "port", "cache", "token"]);

    let port = &descriptor.fields[1];
    assert_eq!(port.index, 1);
    assert_eq!(port.kind, TypeKind::Uint(IntWidth::W16));
    assert_eq!(port.default_spec.as_deref(), Some("8080"));
    assert!(port.options.nonzero());
    assert!(port.writable);

    let cache = &descriptor.fields[2];
    assert_eq!(cache.kind, TypeKind::Other);
    assert_eq!(cache.visibility, Visibility::Hidden);
    assert!(!cache.writable);

    let token = &descriptor.fields[3];
    assert_eq!(token.visibility, Visibility::Hidden);
    assert_eq!(token.default_spec, None);
    Ok(())
}

#[test]
fn descriptor_serializes_for_tooling() -> Result<()> {
    let descriptor = describe(&Box::new(Endpoint::default()))?;
    let value = serde_json::to_value(&descriptor)?;

    assert_eq!(value["type_name"], "Endpoint");
    assert_eq!(
        value["fields"][1],
        json!({
            "index": 1,
            "name": "port",
            "kind": { "Uint": "W16" },
            "visibility": "Exported",
            "writable": true,
            "default_spec": "8080",
            "options": ["nonzero"],
        })
    );

    let restored: RecordDescriptor = serde_json::from_value(value)?;
    assert_eq!(restored, descriptor);
    Ok(())
}

#[test]
fn emit_config_loads_from_toml() -> Result<()> {
    let config: EmitConfig = toml::from_str(r#"method_name = "apply_defaults""#)?;
    assert_eq!(config.visibility, "pub");
    assert_eq!(config.indent, "    ");

    let generated = CodeGenerator::with_config(config).generate_string(&Endpoint::default())?;
    assert_eq!(
        generated,
        "impl Endpoint {\n    pub fn apply_defaults(&mut self) {\n        self.host = String::from(\"localhost\");\n        if self.port == 0 {\n            self.port = 8080;\n        }\n    }\n}"
    );
    Ok(())
}

#[test]
fn empty_config_uses_defaults() -> Result<()> {
    let config: EmitConfig = toml::from_str("")?;
    assert_eq!(config, EmitConfig::default());
    Ok(())
}
