use geojson::{JsonObject, JsonValue};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeValue, Properties};
use crate::error::GeoDataError;

/// Treatment of values that have no counterpart on the other side of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedValue {
    /// Fail the whole conversion.
    #[default]
    Reject,
    /// Leave the entry out and carry on.
    Skip,
}

/// Rules for mapping feature properties in both directions.
///
/// The default policy is strict on input and lenient on output: a GeoJSON property that cannot
/// be represented as an [`AttributeValue`] fails ingestion, while attributes that cannot be
/// written as JSON (`Null`, non-finite numbers) are silently dropped from the output.
///
/// JSON `null` on input is never an error. It always maps to an absent entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyPolicy {
    /// Policy for GeoJSON values that have no [`AttributeValue`] counterpart.
    pub input: UnsupportedValue,
    /// Policy for attributes that cannot be written as JSON.
    pub output: UnsupportedValue,
}

impl Default for PropertyPolicy {
    fn default() -> Self {
        Self::STRICT_INPUT
    }
}

impl PropertyPolicy {
    /// Reject unsupported input values, skip unsupported output values.
    pub const STRICT_INPUT: Self = Self::new(UnsupportedValue::Reject, UnsupportedValue::Skip);

    /// Creates a new policy.
    pub const fn new(input: UnsupportedValue, output: UnsupportedValue) -> Self {
        Self { input, output }
    }

    /// Converts GeoJSON properties into canonical attributes.
    pub fn to_attribute_map(&self, properties: &JsonObject) -> Result<Properties, GeoDataError> {
        let mut attributes = Properties::with_capacity(properties.len());
        for (key, value) in properties {
            match from_json_value(value) {
                Some(attribute) if attribute.is_null() => {}
                Some(attribute) => {
                    attributes.insert(key.clone(), attribute);
                }
                None => match self.input {
                    UnsupportedValue::Reject => {
                        return Err(GeoDataError::UnsupportedPropertyType {
                            key: key.clone(),
                            kind: json_type_name(value).to_string(),
                        })
                    }
                    UnsupportedValue::Skip => {
                        warn!(
                            "Skipping property `{key}` of unsupported type {}",
                            json_type_name(value)
                        );
                    }
                },
            }
        }

        Ok(attributes)
    }

    /// Converts canonical attributes into GeoJSON properties.
    pub fn to_external_map(&self, attributes: &Properties) -> Result<JsonObject, GeoDataError> {
        let mut properties = JsonObject::new();
        for (key, attribute) in attributes {
            match to_json_value(attribute) {
                Some(value) => {
                    properties.insert(key.clone(), value);
                }
                None => match self.output {
                    UnsupportedValue::Reject => {
                        return Err(GeoDataError::UnsupportedPropertyType {
                            key: key.clone(),
                            kind: output_kind_name(attribute).to_string(),
                        })
                    }
                    UnsupportedValue::Skip => {
                        debug!("Property `{key}` has no JSON representation ({attribute}), skipped");
                    }
                },
            }
        }

        Ok(properties)
    }
}

/// Converts GeoJSON properties into canonical attributes using the default policy.
///
/// Booleans, numbers and strings are accepted, `null` entries are omitted, arrays and objects
/// fail with [`GeoDataError::UnsupportedPropertyType`].
pub fn to_attribute_map(properties: &JsonObject) -> Result<Properties, GeoDataError> {
    PropertyPolicy::default().to_attribute_map(properties)
}

/// Converts canonical attributes into GeoJSON properties, dropping entries that have no JSON
/// representation.
pub fn to_external_map(attributes: &Properties) -> JsonObject {
    attributes
        .iter()
        .filter_map(|(key, attribute)| Some((key.clone(), to_json_value(attribute)?)))
        .collect()
}

fn from_json_value(value: &JsonValue) -> Option<AttributeValue> {
    match value {
        JsonValue::Null => Some(AttributeValue::Null),
        JsonValue::Bool(v) => Some(AttributeValue::Bool(*v)),
        JsonValue::Number(v) => v.as_f64().map(AttributeValue::Number),
        JsonValue::String(v) => Some(AttributeValue::String(v.clone())),
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

fn to_json_value(attribute: &AttributeValue) -> Option<JsonValue> {
    match attribute {
        AttributeValue::Bool(v) => Some(JsonValue::Bool(*v)),
        AttributeValue::Number(v) => serde_json::Number::from_f64(*v).map(JsonValue::Number),
        AttributeValue::String(v) => Some(JsonValue::String(v.clone())),
        AttributeValue::Null => None,
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn output_kind_name(attribute: &AttributeValue) -> &'static str {
    match attribute {
        AttributeValue::Number(_) => "non-finite number",
        other => other.kind_name(),
    }
}
