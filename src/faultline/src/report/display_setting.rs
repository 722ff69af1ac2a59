use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Declared type of a display setting; decides how its default value is read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SettingKind {
    Checkbox,
    Number,
    Other(String),
}

impl From<String> for SettingKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "checkbox" => SettingKind::Checkbox,
            "number" => SettingKind::Number,
            _ => SettingKind::Other(value),
        }
    }
}

impl From<SettingKind> for String {
    fn from(value: SettingKind) -> Self {
        match value {
            SettingKind::Checkbox => "checkbox".to_string(),
            SettingKind::Number => "number".to_string(),
            SettingKind::Other(other) => other,
        }
    }
}

/// The polymorphic `default` of a setting, tagged by its JSON shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
    /// Lists, objects and anything else the formatter has no reading for.
    Other(Value),
}

impl SettingValue {
    /// Checkbox reading: enabled only for `true` / "true" (any case, no padding).
    pub fn as_flag(&self) -> bool {
        match self {
            SettingValue::Boolean(enabled) => *enabled,
            SettingValue::Text(text) => text.eq_ignore_ascii_case("true"),
            SettingValue::Integer(_) | SettingValue::Other(_) => false,
        }
    }

    /// Number reading: `None` when the value is not an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(value) => Some(*value),
            SettingValue::Text(text) => text.trim().parse().ok(),
            SettingValue::Boolean(_) | SettingValue::Other(_) => None,
        }
    }
}

struct SettingValueVisitor;

impl<'de> Visitor<'de> for SettingValueVisitor {
    type Value = SettingValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(SettingValue::Boolean(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(SettingValue::Integer(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(value)
            .map(SettingValue::Integer)
            .unwrap_or_else(|_| SettingValue::Text(value.to_string())))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(SettingValue::Text(value.to_string()))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(SettingValue::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(SettingValue::Text(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(SettingValue::Other(Value::Null))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        Value::deserialize(SeqAccessDeserializer::new(seq)).map(SettingValue::Other)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        Value::deserialize(MapAccessDeserializer::new(map)).map(SettingValue::Other)
    }
}

impl<'de> Deserialize<'de> for SettingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SettingValueVisitor)
    }
}

/// A caller-supplied formatting toggle or parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplaySetting {
    #[serde(alias = "Label")]
    pub label: String,
    #[serde(rename = "type", alias = "Type")]
    pub kind: SettingKind,
    #[serde(
        rename = "default",
        alias = "Default",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<SettingValue>,
    #[serde(alias = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        alias = "is_required",
        alias = "Is_required",
        alias = "Required",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub required: Option<bool>,
}

impl DisplaySetting {
    pub fn new(label: impl Into<String>, kind: SettingKind, default_value: SettingValue) -> Self {
        Self {
            label: label.into(),
            kind,
            default_value: Some(default_value),
            description: None,
            required: None,
        }
    }

    pub fn checkbox(label: impl Into<String>, enabled: bool) -> Self {
        Self::new(label, SettingKind::Checkbox, SettingValue::Boolean(enabled))
    }

    pub fn number(label: impl Into<String>, value: i64) -> Self {
        Self::new(label, SettingKind::Number, SettingValue::Integer(value))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// First setting with this exact label and kind.
    pub fn find<'a>(
        settings: &'a [DisplaySetting],
        label: &str,
        kind: &SettingKind,
    ) -> Option<&'a DisplaySetting> {
        settings
            .iter()
            .find(|setting| setting.label == label && &setting.kind == kind)
    }
}
