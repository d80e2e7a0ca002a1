use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

use crate::decode::{nullable_vec, round_to};

use super::{LabeledPrice, MessageEntity, ParseMode};

/// Content of the message sent as the result of an inline query.
///
/// The wire form carries no tag. Decoding picks the variant from the first key found in
/// this order: `message_text`, `payload`, `address`, `phone_number`, `latitude`.
/// Venue content also has `latitude`, so `address` is checked before it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InputMessageContent {
    Text(InputTextMessageContent),
    Invoice(InputInvoiceMessageContent),
    Venue(InputVenueMessageContent),
    Contact(InputContactMessageContent),
    Location(InputLocationMessageContent),
}

impl<'de> Deserialize<'de> for InputMessageContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let pick = |key: &str| map.contains_key(key);

        let content = if pick("message_text") {
            serde_json::from_value(Value::Object(map)).map(InputMessageContent::Text)
        } else if pick("payload") {
            serde_json::from_value(Value::Object(map)).map(InputMessageContent::Invoice)
        } else if pick("address") {
            serde_json::from_value(Value::Object(map)).map(InputMessageContent::Venue)
        } else if pick("phone_number") {
            serde_json::from_value(Value::Object(map)).map(InputMessageContent::Contact)
        } else if pick("latitude") {
            serde_json::from_value(Value::Object(map)).map(InputMessageContent::Location)
        } else {
            return Err(D::Error::custom(
                "input message content has none of message_text, payload, address, phone_number, latitude",
            ));
        };
        content.map_err(D::Error::custom)
    }
}

impl InputMessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        InputMessageContent::Text(InputTextMessageContent::new(text))
    }
}

impl From<InputTextMessageContent> for InputMessageContent {
    fn from(c: InputTextMessageContent) -> Self {
        InputMessageContent::Text(c)
    }
}

impl From<InputLocationMessageContent> for InputMessageContent {
    fn from(c: InputLocationMessageContent) -> Self {
        InputMessageContent::Location(c)
    }
}

impl From<InputVenueMessageContent> for InputMessageContent {
    fn from(c: InputVenueMessageContent) -> Self {
        InputMessageContent::Venue(c)
    }
}

impl From<InputContactMessageContent> for InputMessageContent {
    fn from(c: InputContactMessageContent) -> Self {
        InputMessageContent::Contact(c)
    }
}

impl From<InputInvoiceMessageContent> for InputMessageContent {
    fn from(c: InputInvoiceMessageContent) -> Self {
        InputMessageContent::Invoice(c)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputTextMessageContent {
    pub message_text: String,
    pub parse_mode: Option<ParseMode>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub entities: Vec<MessageEntity>,
    pub disable_web_page_preview: Option<bool>,
}

impl InputTextMessageContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            message_text: text.into(),
            parse_mode: None,
            entities: Vec::new(),
            disable_web_page_preview: None,
        }
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputLocationMessageContent {
    pub latitude: f64,
    pub longitude: f64,
    pub horizontal_accuracy: Option<f64>,
    pub live_period: Option<u32>,
    pub heading: Option<u16>,
    pub proximity_alert_radius: Option<u32>,
}

impl InputLocationMessageContent {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            horizontal_accuracy: None,
            live_period: None,
            heading: None,
            proximity_alert_radius: None,
        }
    }

    pub fn latitude_rounded(&self, places: u32) -> f64 {
        round_to(self.latitude, places)
    }

    pub fn longitude_rounded(&self, places: u32) -> f64 {
        round_to(self.longitude, places)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputVenueMessageContent {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
    pub foursquare_id: Option<String>,
    pub foursquare_type: Option<String>,
    pub google_place_id: Option<String>,
    pub google_place_type: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputContactMessageContent {
    pub phone_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub vcard: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputInvoiceMessageContent {
    pub title: String,
    pub description: String,
    /// Not shown to the user.
    pub payload: String,
    pub provider_token: String,
    pub currency: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub prices: Vec<LabeledPrice>,
    pub max_tip_amount: Option<i64>,
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub suggested_tip_amounts: Vec<i64>,
    pub provider_data: Option<String>,
    pub photo_url: Option<String>,
    pub photo_size: Option<u64>,
    pub photo_width: Option<u32>,
    pub photo_height: Option<u32>,
    pub need_name: Option<bool>,
    pub need_phone_number: Option<bool>,
    pub need_email: Option<bool>,
    pub need_shipping_address: Option<bool>,
    pub send_phone_number_to_provider: Option<bool>,
    pub send_email_to_provider: Option<bool>,
    pub is_flexible: Option<bool>,
}
