use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::borrow::Cow;

/// JSON types a setting property may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl PropertyType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

/// A registered, object-shaped settings record.
///
/// The definition doubles as the externally visible schema: [`SettingDefinition::schema`]
/// renders the `{ "type": "object", "properties": { .. } }` document a settings API
/// would publish.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingDefinition {
    pub name: Cow<'static, str>,
    pub description: Cow<'static, str>,
    properties: Vec<(Cow<'static, str>, PropertyType)>,
    default: Value,
}

impl SettingDefinition {
    /// An object record with no declared properties and `{}` as default.
    pub fn object(name: impl Into<Cow<'static, str>>, description: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            properties: Vec::new(),
            default: Value::Object(Map::new()),
        }
    }

    #[must_use]
    pub fn property(mut self, name: impl Into<Cow<'static, str>>, kind: PropertyType) -> Self {
        self.properties.push((name.into(), kind));
        self
    }

    #[must_use]
    pub fn default_value(mut self, default: Value) -> Self {
        self.default = default;
        self
    }

    #[must_use]
    pub const fn default(&self) -> &Value {
        &self.default
    }

    #[must_use]
    pub fn schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, kind)| (name.to_string(), json!({ "type": kind.as_str() })))
            .collect();

        json!({
            "type": "object",
            "description": self.description,
            "properties": properties,
            "default": self.default,
        })
    }

    /// Checks `value` against the declared shape.
    ///
    /// The value must be an object. Declared properties, when present, must have the
    /// declared type; `null` counts as absent. Undeclared properties are dropped unless
    /// the definition declares none at all.
    pub(crate) fn sanitize(&self, value: Value) -> Result<Value, SettingsError> {
        let Value::Object(mut fields) = value else {
            return Err(SettingsError::Schema {
                message: format!("expected an object, got {}", json_kind(&value)).into(),
                context: Some(self.name.clone()),
            });
        };

        if self.properties.is_empty() {
            return Ok(Value::Object(fields));
        }

        let mut clean = Map::new();
        for (name, kind) in &self.properties {
            match fields.remove(name.as_ref()) {
                None | Some(Value::Null) => {},
                Some(field) if kind.accepts(&field) => {
                    clean.insert(name.to_string(), field);
                },
                Some(field) => {
                    return Err(SettingsError::Schema {
                        message: format!(
                            "property '{name}' must be {}, got {}",
                            kind.as_str(),
                            json_kind(&field)
                        )
                        .into(),
                        context: Some(self.name.clone()),
                    });
                },
            }
        }

        if !fields.is_empty() {
            tracing::debug!(
                setting = %self.name,
                dropped = ?fields.keys().collect::<Vec<_>>(),
                "Dropping undeclared setting properties"
            );
        }

        Ok(Value::Object(clean))
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> SettingDefinition {
        SettingDefinition::object("pair", "Two strings")
            .property("left", PropertyType::String)
            .property("right", PropertyType::String)
            .default_value(json!({ "left": "", "right": "" }))
    }

    #[test]
    fn schema_lists_properties() {
        let schema = pair().schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["description"], "Two strings");
        assert_eq!(schema["properties"]["left"]["type"], "string");
        assert_eq!(schema["default"]["right"], "");
    }

    #[test]
    fn sanitize_drops_unknown_and_null_fields() {
        let clean = pair().sanitize(json!({ "left": "a", "right": null, "extra": 1 })).unwrap();
        assert_eq!(clean, json!({ "left": "a" }));
    }

    #[test]
    fn sanitize_rejects_wrong_types() {
        let err = pair().sanitize(json!({ "left": 1200 })).unwrap_err();
        assert!(err.to_string().contains("property 'left' must be string, got number"));

        let err = pair().sanitize(json!(["left"])).unwrap_err();
        assert!(matches!(err, SettingsError::Schema { .. }));
    }

    #[test]
    fn open_objects_keep_everything() {
        let open = SettingDefinition::object("bag", "Anything goes");
        let value = json!({ "a": 1, "b": [true] });
        assert_eq!(open.sanitize(value.clone()).unwrap(), value);
    }
}
