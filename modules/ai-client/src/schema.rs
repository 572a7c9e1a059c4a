use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for argument types that can be declared as function-calling parameters.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait ToolParameters: JsonSchema + DeserializeOwned {
    /// Generate the `parameters` object of a function declaration.
    ///
    /// Function-calling endpoints expect:
    /// 1. A plain object schema with no `$schema`, `title` or `definitions`
    /// 2. Fully inlined subschemas (no `$ref`)
    /// 3. Optional fields left out of `required` and not typed as nullable
    fn parameters_schema() -> Value {
        let settings = SchemaSettings::draft07().with(|s| {
            s.option_nullable = false;
            s.option_add_null_type = false;
            s.inline_subschemas = true;
        });
        let schema = settings.into_generator().into_root_schema_for::<Self>();
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        if let Value::Object(map) = &mut value {
            map.remove("$schema");
            map.remove("title");
            map.remove("definitions");
        }

        collapse_single_all_of(&mut value);
        value
    }
}

impl<T: JsonSchema + DeserializeOwned> ToolParameters for T {}

/// schemars wraps a described subschema as `{"description": .., "allOf": [schema]}`.
/// Flatten those so the model sees `enum`/`type` directly on the property.
fn collapse_single_all_of(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let single = match map.get("allOf") {
                Some(Value::Array(all_of)) if all_of.len() == 1 => all_of[0].clone(),
                _ => Value::Null,
            };

            if let Value::Object(inner) = single {
                map.remove("allOf");
                for (k, v) in inner {
                    map.entry(k).or_insert(v);
                }
            }

            for (_, v) in map.iter_mut() {
                collapse_single_all_of(v);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                collapse_single_all_of(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    #[serde(rename_all = "lowercase")]
    enum Course {
        Starter,
        Main,
    }

    #[derive(Deserialize, JsonSchema)]
    #[serde(rename_all = "camelCase")]
    struct Order {
        /// Dishes to order.
        dish_names: Vec<String>,
        /// Which course.
        course: Option<Course>,
        table: Option<u32>,
    }

    #[test]
    fn test_top_level_is_plain_object() {
        let schema = Order::parameters_schema();
        let obj = schema.as_object().unwrap();

        assert_eq!(obj.get("type"), Some(&Value::String("object".to_string())));
        assert!(!obj.contains_key("$schema"));
        assert!(!obj.contains_key("definitions"));
        assert!(!obj.contains_key("title"));
    }

    #[test]
    fn test_optional_fields_not_required() {
        let schema = Order::parameters_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();

        assert_eq!(required, vec!["dishNames"]);
    }

    #[test]
    fn test_enum_inlined_without_null() {
        let schema = Order::parameters_schema();
        let course = &schema["properties"]["course"];

        assert!(course.get("$ref").is_none());
        assert!(course.get("allOf").is_none());
        assert_eq!(course["enum"], serde_json::json!(["starter", "main"]));
        assert_eq!(course["description"], "Which course.");
        assert_eq!(schema["properties"]["table"]["type"], "integer");
    }
}
