//! Invoices, shipping and checkout.
//!
//! Amounts are integers in the smallest unit of the currency (cents for USD).

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::decode::nullable_vec;

use super::User;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPrice {
    pub label: String,
    pub amount: i64,
}

impl LabeledPrice {
    pub fn new(label: impl Into<String>, amount: i64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub title: String,
    pub description: String,
    pub start_parameter: String,
    /// ISO 4217 code.
    pub currency: String,
    pub total_amount: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// ISO 3166-1 alpha-2.
    pub country_code: String,
    pub state: String,
    pub city: String,
    pub street_line1: String,
    pub street_line2: String,
    pub post_code: String,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInfo {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub prices: Vec<LabeledPrice>,
}

impl ShippingOption {
    pub fn new(id: impl Into<String>, title: impl Into<String>, prices: Vec<LabeledPrice>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            prices,
        }
    }

    pub fn total(&self) -> i64 {
        self.prices.iter().map(|p| p.amount).sum()
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessfulPayment {
    pub currency: String,
    pub total_amount: i64,
    pub invoice_payload: String,
    pub shipping_option_id: Option<String>,
    pub order_info: Option<OrderInfo>,
    pub telegram_payment_charge_id: String,
    pub provider_payment_charge_id: String,
}

/// Sent only for invoices with flexible price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuery {
    pub id: String,
    pub from: User,
    pub invoice_payload: String,
    pub shipping_address: ShippingAddress,
}

/// Must be answered within 10 seconds.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreCheckoutQuery {
    pub id: String,
    pub from: User,
    pub currency: String,
    pub total_amount: i64,
    pub invoice_payload: String,
    pub shipping_option_id: Option<String>,
    pub order_info: Option<OrderInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TelegramType;
    use serde_json::json;

    #[test]
    fn pre_checkout_query_decodes() {
        let query = PreCheckoutQuery::decode(&json!({
            "id": "pcq-1",
            "from": {"id": 8, "is_bot": false, "first_name": "Kim"},
            "currency": "EUR",
            "total_amount": 1250,
            "invoice_payload": "order-77",
            "order_info": {"email": "kim@example.org"}
        }))
        .unwrap()
        .unwrap();
        assert_eq!(query.total_amount, 1250);
        assert_eq!(query.shipping_option_id, None);
        assert_eq!(
            query.order_info.unwrap().email.as_deref(),
            Some("kim@example.org")
        );
    }

    #[test]
    fn missing_required_fields_fail_decoding() {
        let err = ShippingQuery::decode(&json!({"id": "abc"})).unwrap_err();
        assert!(matches!(err, crate::Error::Decode(_)));
        let msg = err.to_string();
        assert!(msg.contains("missing field"), "{msg}");
        assert!(!msg.contains("`id`"), "{msg}");

        assert!(PreCheckoutQuery::decode(&json!({"id": "abc"})).is_err());
    }

    #[test]
    fn shipping_option_totals_prices() {
        let option = ShippingOption::new(
            "dhl",
            "DHL Express",
            vec![LabeledPrice::new("Base", 900), LabeledPrice::new("Fuel", 150)],
        );
        assert_eq!(option.total(), 1050);
        assert_eq!(
            option.encode().unwrap(),
            json!({
                "id": "dhl",
                "title": "DHL Express",
                "prices": [{"label": "Base", "amount": 900}, {"label": "Fuel", "amount": 150}]
            })
        );
    }
}
