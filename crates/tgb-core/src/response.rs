use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::{errors::Error, Result};

/// Extra information attached to some failed requests.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseParameters {
    pub migrate_to_chat_id: Option<i64>,
    pub retry_after: Option<u64>,
}

/// Envelope around every Bot API answer.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    pub result: Option<Value>,
    pub error_code: Option<i64>,
    pub description: Option<String>,
    pub parameters: Option<ResponseParameters>,
}

impl ApiResponse {
    pub fn parse(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// The `result` payload, or the API error carried by the envelope.
    ///
    /// A successful envelope without `result` yields `true`, which is what boolean
    /// endpoints mean by it.
    pub fn into_result(self) -> Result<Value> {
        if !self.ok {
            let parameters = self.parameters.unwrap_or_default();
            return Err(Error::Api {
                code: self.error_code.unwrap_or_default(),
                description: self
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
                retry_after: parameters.retry_after,
                migrate_to_chat_id: parameters.migrate_to_chat_id,
            });
        }
        Ok(self.result.unwrap_or(Value::Bool(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_envelope_yields_result() {
        let resp = ApiResponse::parse(r#"{"ok":true,"result":{"id":1}}"#).unwrap();
        assert_eq!(resp.into_result().unwrap(), json!({"id": 1}));
    }

    #[test]
    fn ok_without_result_is_true() {
        let resp = ApiResponse::parse(r#"{"ok":true}"#).unwrap();
        assert_eq!(resp.into_result().unwrap(), json!(true));
    }

    #[test]
    fn error_envelope_surfaces_code_and_description() {
        let resp = ApiResponse::parse(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        )
        .unwrap();
        match resp.into_result() {
            Err(Error::Api {
                code, description, ..
            }) => {
                assert_eq!(code, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn flood_control_exposes_retry_after() {
        let resp = ApiResponse::parse(
            r#"{"ok":false,"error_code":429,"description":"Too Many Requests: retry after 3","parameters":{"retry_after":3}}"#,
        )
        .unwrap();
        let err = resp.into_result().unwrap_err();
        assert_eq!(err.retry_after(), Some(std::time::Duration::from_secs(3)));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        assert!(matches!(
            ApiResponse::parse("<html>502</html>"),
            Err(Error::Decode(_))
        ));
    }
}
