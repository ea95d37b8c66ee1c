//! JSON Schema generation for structured model output.
//!
//! Result types derive [`JsonSchema`] and implement [`StructuredOutput`], which
//! ties the schema sent to the model to the type the response is decoded into.

use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A type the model can be asked to produce as strict JSON.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Schema name sent with the request.
    const NAME: &'static str;

    const DESCRIPTION: &'static str;

    fn named_schema() -> NamedSchema {
        NamedSchema {
            name: Self::NAME.to_string(),
            description: Some(Self::DESCRIPTION.to_string()),
            schema: generate_schema::<Self>(),
            strict: true,
        }
    }
}

/// The `json_schema` object of a structured-output response format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSchema {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: Value,
    pub strict: bool,
}

/// Module or package names suggested for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Scopes {
    pub scopes: Vec<String>,
}

impl StructuredOutput for Scopes {
    const NAME: &'static str = "names";
    const DESCRIPTION: &'static str = "A list of module or package names.";
}

/// Reflect `T` into a schema with every definition inlined and no
/// additional properties allowed on any object.
pub fn generate_schema<T: JsonSchema + ?Sized>() -> Value {
    let generator = SchemaSettings::draft2020_12()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let mut schema = Value::from(generator.into_root_schema_for::<T>());

    forbid_additional_properties(&mut schema);

    if let Some(root) = schema.as_object_mut()
        && root
            .get("$defs")
            .and_then(Value::as_object)
            .is_some_and(|defs| defs.is_empty())
    {
        root.remove("$defs");
    }

    schema
}

fn forbid_additional_properties(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let is_object_schema = map.get("type").and_then(Value::as_str) == Some("object")
                || map.get("properties").is_some_and(Value::is_object);
            if is_object_schema {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            for child in map.values_mut() {
                forbid_additional_properties(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(forbid_additional_properties),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct Release {
        version: String,
        notes: Vec<Note>,
    }

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct Note {
        scope: String,
        text: String,
    }

    #[test]
    fn scopes_schema_forbids_additional_properties() {
        let schema = generate_schema::<Scopes>();
        assert_eq!(schema["additionalProperties"], Value::Bool(false));
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["scopes"]["type"], "array");
        assert_eq!(schema["properties"]["scopes"]["items"]["type"], "string");
        assert_eq!(schema["required"], serde_json::json!(["scopes"]));
    }

    #[test]
    fn scopes_schema_has_no_references() {
        let text = generate_schema::<Scopes>().to_string();
        assert!(!text.contains("$ref"));
        assert!(!text.contains("$defs"));
    }

    #[test]
    fn nested_types_are_inlined_and_closed() {
        let schema = generate_schema::<Release>();
        assert!(!schema.to_string().contains("$ref"));

        let note = &schema["properties"]["notes"]["items"];
        assert_eq!(note["type"], "object");
        assert_eq!(note["additionalProperties"], Value::Bool(false));
        assert_eq!(note["properties"]["scope"]["type"], "string");
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate_schema::<Scopes>(), generate_schema::<Scopes>());
    }

    #[test]
    fn named_schema_is_strict() {
        let named = Scopes::named_schema();
        assert_eq!(named.name, "names");
        assert_eq!(named.description.as_deref(), Some("A list of module or package names."));
        assert!(named.strict);
        assert_eq!(named.schema, generate_schema::<Scopes>());
    }
}
