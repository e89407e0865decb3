use serde::{ser::Error as _, Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Value stored in a service descriptor's `config` map.
///
/// Config maps come from whatever the service operator wrote into the
/// cluster, so every JSON shape has to survive a round trip. Variant order
/// matters for the untagged deserializer: signed integers are tried first,
/// then unsigned ones above `i64::MAX`, then floats, so that `42` stays an
/// integer and `4.2` becomes a float.
///
/// JSON has no infinity or NaN. Encoding a non-finite `Float` fails instead
/// of silently turning it into `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Integer(i64),
    UnsignedInteger(u64),
    #[serde(serialize_with = "serialize_finite")]
    Float(f64),
    String(String),
    Sequence(Vec<ConfigValue>),
    Mapping(BTreeMap<String, ConfigValue>),
}

pub type ConfigMap = BTreeMap<String, ConfigValue>;

fn serialize_finite<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        Err(S::Error::custom(format!(
            "config value {} can not be encoded as JSON",
            value
        )))
    }
}

impl ConfigValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<u64> for ConfigValue {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(ConfigValue::Integer)
            .unwrap_or(ConfigValue::UnsignedInteger(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_and_floats_keep_their_kind() {
        let parsed: ConfigValue = serde_json::from_str("[1, 1.5, 2.0]").unwrap();
        assert_eq!(
            parsed,
            ConfigValue::Sequence(vec![
                ConfigValue::Integer(1),
                ConfigValue::Float(1.5),
                ConfigValue::Float(2.0),
            ])
        );
    }

    #[test]
    fn large_unsigned_integers_are_not_widened_to_floats() {
        let parsed: ConfigValue = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(parsed, ConfigValue::UnsignedInteger(u64::MAX));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "18446744073709551615");

        assert_eq!(ConfigValue::from(7u64), ConfigValue::Integer(7));
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(serde_json::to_string(&ConfigValue::Float(value)).is_err());
        }
        assert_eq!(serde_json::to_string(&ConfigValue::Float(0.5)).unwrap(), "0.5");
    }

    #[test]
    fn null_and_nested_mapping() {
        let parsed: ConfigValue =
            serde_json::from_str(r#"{"realm":"mobile","auth":{"public":true,"secret":null}}"#).unwrap();
        let map = parsed.as_mapping().unwrap();
        assert_eq!(map["realm"].as_str(), Some("mobile"));

        let auth = map["auth"].as_mapping().unwrap();
        assert_eq!(auth["public"], ConfigValue::Bool(true));
        assert_eq!(auth["secret"], ConfigValue::Null);
    }
}
