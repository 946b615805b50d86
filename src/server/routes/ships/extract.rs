use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

use crate::db::{ShipCreate, ShipPatch};
use crate::error::ValidationError;

/// Ship fields as they arrive in a request body.
///
/// Only `name` and `displacement` are read; any other key (`id` included)
/// is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ShipPayload {
    #[serde(default)]
    pub name: Option<String>,

    /// Form inputs often submit numbers as strings, so `"1200"` is accepted.
    #[serde(default, deserialize_with = "deserialize_i64_lax")]
    pub displacement: Option<i64>,
}

impl ShipPayload {
    pub fn into_create(self) -> Result<ShipCreate, ValidationError> {
        let name = self.name.ok_or(ValidationError::Missing { field: "name" })?;
        let displacement = self.displacement.ok_or(ValidationError::Missing {
            field: "displacement",
        })?;
        Ok(ShipCreate { name, displacement })
    }

    pub fn into_patch(self) -> ShipPatch {
        ShipPatch {
            name: self.name,
            displacement: self.displacement,
        }
    }
}

/// `?bulk=on` switches `POST /ships` to array bodies.
#[derive(Debug, Default, Deserialize)]
pub struct CreateParams {
    #[serde(default)]
    pub bulk: Option<String>,
}

impl CreateParams {
    pub fn is_bulk(&self) -> bool {
        self.bulk.as_deref() == Some("on")
    }
}

fn deserialize_i64_lax<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;

    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| de::Error::custom("expected an integer for displacement")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::custom("expected an integer for displacement")),
        _ => Err(de::Error::custom(
            "expected an integer or a numeric string for displacement",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn displacement_accepts_numbers_and_numeric_strings() {
        let p: ShipPayload = serde_json::from_value(json!({"displacement": 1200})).unwrap();
        assert_eq!(p.displacement, Some(1200));
        let p: ShipPayload = serde_json::from_value(json!({"displacement": " 75 "})).unwrap();
        assert_eq!(p.displacement, Some(75));
        let p: ShipPayload = serde_json::from_value(json!({"displacement": null})).unwrap();
        assert_eq!(p.displacement, None);
        assert!(serde_json::from_value::<ShipPayload>(json!({"displacement": "heavy"})).is_err());
        assert!(serde_json::from_value::<ShipPayload>(json!({"displacement": 12.5})).is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let p: ShipPayload =
            serde_json::from_value(json!({"id": 99, "name": "Argo", "crew": []})).unwrap();
        let patch = p.into_patch();
        assert_eq!(patch.name.as_deref(), Some("Argo"));
        assert_eq!(patch.displacement, None);
    }

    #[test]
    fn create_requires_both_fields() {
        let p: ShipPayload = serde_json::from_value(json!({"name": "Argo"})).unwrap();
        assert_eq!(
            p.into_create(),
            Err(ValidationError::Missing {
                field: "displacement"
            })
        );
    }

    #[test]
    fn bulk_flag_is_exact() {
        let on = CreateParams {
            bulk: Some("on".to_string()),
        };
        let yes = CreateParams {
            bulk: Some("true".to_string()),
        };
        assert!(on.is_bulk());
        assert!(!yes.is_bulk());
        assert!(!CreateParams::default().is_bulk());
    }
}
