//! JSON Schema generation for the configuration file.

use super::ZbgConfig;

/// Generates a JSON Schema for the zbg configuration.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(ZbgConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert(
            "$id".to_string(),
            serde_json::json!(
                "https://raw.githubusercontent.com/Arthurdw/Zorin-Background/main/zbg.schema.json"
            ),
        );
    }

    schema
}

/// Generates the schema as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the schema cannot be serialized.
pub fn generate_schema_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&generate_schema())
}
