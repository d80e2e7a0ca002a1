use tgb_core::{
    domain::ChatId,
    types::{InputInvoiceMessageContent, Message, ShippingOption},
};

use crate::api::{ApiClient, Call};

/// Invoices and the two checkout queries a bot must answer.
#[derive(Clone, Debug)]
pub struct PaymentsManager {
    client: ApiClient,
}

impl PaymentsManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The invoice fields are the ones of an invoice message content.
    /// Optional: `start_parameter`, `reply_markup`, `disable_notification`.
    pub fn send_invoice(
        &self,
        chat_id: impl Into<ChatId>,
        invoice: &InputInvoiceMessageContent,
    ) -> Call<Message> {
        self.client
            .post("sendInvoice")
            .args_from(invoice)
            .arg("chat_id", chat_id.into())
    }

    pub fn create_invoice_link(&self, invoice: &InputInvoiceMessageContent) -> Call<String> {
        self.client.post("createInvoiceLink").args_from(invoice)
    }

    /// `shipping_options` must be given when `ok`, `error_message` when not.
    pub fn answer_shipping_query(
        &self,
        shipping_query_id: impl Into<String>,
        ok: bool,
    ) -> Call<bool> {
        let call = self
            .client
            .post("answerShippingQuery")
            .arg("shipping_query_id", shipping_query_id.into())
            .arg("ok", ok);
        if ok {
            call.require("shipping_options")
        } else {
            call.require("error_message")
        }
    }

    pub fn accept_shipping(
        &self,
        shipping_query_id: impl Into<String>,
        options: Vec<ShippingOption>,
    ) -> Call<bool> {
        self.answer_shipping_query(shipping_query_id, true)
            .arg("shipping_options", options)
    }

    pub fn reject_shipping(
        &self,
        shipping_query_id: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Call<bool> {
        self.answer_shipping_query(shipping_query_id, false)
            .arg("error_message", error_message.into())
    }

    /// Must be answered within 10 seconds. `error_message` is needed when `ok` is false.
    pub fn answer_pre_checkout_query(
        &self,
        pre_checkout_query_id: impl Into<String>,
        ok: bool,
    ) -> Call<bool> {
        let call = self
            .client
            .post("answerPreCheckoutQuery")
            .arg("pre_checkout_query_id", pre_checkout_query_id.into())
            .arg("ok", ok);
        if ok {
            call
        } else {
            call.require("error_message")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::FakeTransport;
    use serde_json::json;
    use tgb_core::{
        types::{InputInvoiceMessageContent, LabeledPrice, ShippingOption},
        Error,
    };

    fn invoice() -> InputInvoiceMessageContent {
        InputInvoiceMessageContent {
            title: "Pro".to_string(),
            description: "Monthly plan".to_string(),
            payload: "pro-1".to_string(),
            provider_token: "prov".to_string(),
            currency: "USD".to_string(),
            prices: vec![LabeledPrice::new("Month", 999)],
            max_tip_amount: None,
            suggested_tip_amounts: Vec::new(),
            provider_data: None,
            photo_url: None,
            photo_size: None,
            photo_width: None,
            photo_height: None,
            need_name: None,
            need_phone_number: None,
            need_email: Some(true),
            need_shipping_address: None,
            send_phone_number_to_provider: None,
            send_email_to_provider: None,
            is_flexible: None,
        }
    }

    #[tokio::test]
    async fn shipping_ok_without_options_fails_before_io() {
        let (client, fake) = FakeTransport::client([r#"{"ok":true,"result":true}"#]);
        let err = client
            .payments()
            .answer_shipping_query("sq", true)
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter("shipping_options")));
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn shipping_rejection_needs_message() {
        let (client, fake) = FakeTransport::client([r#"{"ok":true,"result":true}"#]);
        let payments = client.payments();

        let err = payments.answer_shipping_query("sq", false).send().await.unwrap_err();
        assert!(matches!(err, Error::MissingParameter("error_message")));

        assert!(payments
            .reject_shipping("sq", "We do not ship there")
            .send()
            .await
            .unwrap());
        let req = fake.last_request();
        assert_eq!(req.params.get("ok"), Some(&json!(false)));
        assert_eq!(req.params.get("error_message"), Some(&json!("We do not ship there")));
    }

    #[tokio::test]
    async fn shipping_options_via_bag_satisfy_requirement() {
        let (client, fake) = FakeTransport::client([r#"{"ok":true,"result":true}"#]);
        let options = vec![ShippingOption::new(
            "post",
            "Post",
            vec![LabeledPrice::new("Post", 500)],
        )];
        client
            .payments()
            .answer_shipping_query("sq", true)
            .param("shipping_options", &options)
            .send()
            .await
            .unwrap();
        assert_eq!(fake.requests().len(), 1);
    }

    #[tokio::test]
    async fn pre_checkout_rules() {
        let (client, fake) = FakeTransport::client([r#"{"ok":true,"result":true}"#]);
        let payments = client.payments();

        let err = payments.answer_pre_checkout_query("pc", false).send().await.unwrap_err();
        assert!(matches!(err, Error::MissingParameter("error_message")));
        assert!(fake.requests().is_empty());

        assert!(payments.answer_pre_checkout_query("pc", true).send().await.unwrap());
        assert_eq!(fake.last_request().params.get("pre_checkout_query_id"), Some(&json!("pc")));
    }

    #[tokio::test]
    async fn invoice_fields_become_parameters() {
        let (client, fake) = FakeTransport::client([r#"{"ok":true,"result":"https://t.me/$abc"}"#]);
        let link = client.payments().create_invoice_link(&invoice()).send().await.unwrap();
        assert_eq!(link, "https://t.me/$abc");

        let req = fake.last_request();
        assert_eq!(req.params.get("payload"), Some(&json!("pro-1")));
        assert_eq!(req.params.get("prices"), Some(&json!([{"label": "Month", "amount": 999}])));
        assert_eq!(req.params.get("need_email"), Some(&json!(true)));
        assert!(!req.params.contains("suggested_tip_amounts"));
    }

    #[tokio::test]
    async fn send_invoice_targets_chat() {
        let (client, fake) = FakeTransport::client([
            r#"{"ok":true,"result":{"message_id":1,"date":1,"chat":{"id":4,"type":"private"},"invoice":{"title":"Pro","description":"Monthly plan","start_parameter":"","currency":"USD","total_amount":999}}}"#,
        ]);
        let msg = client.payments().send_invoice(4, &invoice()).send().await.unwrap();
        assert_eq!(msg.invoice.unwrap().total_amount, 999);
        assert_eq!(fake.last_request().params.get("chat_id"), Some(&json!(4)));
    }
}
