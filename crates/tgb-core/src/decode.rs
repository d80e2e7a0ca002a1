//! JSON mapping conventions shared by every record type.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::Result;

/// Decode / encode contract of the model layer.
///
/// Every record gets it through the blanket impl; variant families are decoded by the
/// same `decode`, their `Deserialize` impl picks the concrete shape.
pub trait TelegramType: Serialize + DeserializeOwned + Sized {
    /// `Ok(None)` for JSON `null`.
    fn decode(value: &Value) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(Self::deserialize(value)?))
    }

    /// `null` yields an empty list; element order is preserved.
    fn decode_list(value: &Value) -> Result<Vec<Self>> {
        if value.is_null() {
            return Ok(Vec::new());
        }
        Ok(Vec::<Self>::deserialize(value)?)
    }

    fn encode(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<T> TelegramType for T where T: Serialize + DeserializeOwned {}

/// Accepts a missing key (with `#[serde(default)]`) or an explicit `null` as `[]`.
pub fn nullable_vec<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Unix epoch seconds to UTC. Out-of-range values give `None`.
pub fn unix_time(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Display helper; stored values are never rounded.
///
/// Past 15 places an `f64` has no digits left to round, so the value comes back as is.
pub fn round_to(value: f64, places: u32) -> f64 {
    if places > 15 {
        return value;
    }
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PhotoSize, User};
    use serde_json::json;

    #[test]
    fn null_decodes_to_none_and_empty_list() {
        assert_eq!(User::decode(&Value::Null).unwrap(), None);
        assert!(User::decode_list(&Value::Null).unwrap().is_empty());
        assert!(PhotoSize::decode_list(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn list_order_is_preserved() {
        let users = User::decode_list(&json!([
            {"id": 3, "is_bot": false, "first_name": "a"},
            {"id": 1, "is_bot": false, "first_name": "b"},
            {"id": 2, "is_bot": false, "first_name": "c"}
        ]))
        .unwrap();
        let names: Vec<_> = users.iter().map(|u| u.first_name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn non_array_list_is_a_decode_error() {
        assert!(User::decode_list(&json!({"id": 1})).is_err());
    }

    #[test]
    fn rounding_does_not_touch_input() {
        let lat = 52.520_008_123;
        assert_eq!(round_to(lat, 3), 52.52);
        assert_eq!(round_to(lat, 6), 52.520008);
        assert_eq!(lat, 52.520_008_123);
    }

    #[test]
    fn large_place_counts_keep_the_value() {
        assert_eq!(round_to(1.5, 400), 1.5);
        assert_eq!(round_to(-0.123, u32::MAX), -0.123);
        assert_eq!(round_to(0.1, 15), 0.1);
    }

    #[test]
    fn unix_time_is_utc_seconds() {
        let t = unix_time(1_700_000_000).unwrap();
        assert_eq!(t.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }
}
