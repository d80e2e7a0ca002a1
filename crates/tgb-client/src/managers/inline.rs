use tgb_core::types::{InlineQueryResult, SentWebAppMessage};

use crate::api::{ApiClient, Call};

#[derive(Clone, Debug)]
pub struct InlineManager {
    client: ApiClient,
}

impl InlineManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// At most 50 results per query.
    /// Optional: `cache_time`, `is_personal`, `next_offset`, `switch_pm_text`,
    /// `switch_pm_parameter`.
    pub fn answer_inline_query(
        &self,
        inline_query_id: impl Into<String>,
        results: Vec<InlineQueryResult>,
    ) -> Call<bool> {
        self.client
            .post("answerInlineQuery")
            .arg("inline_query_id", inline_query_id.into())
            .arg("results", results)
    }

    /// Answer for a Web App query, sent on behalf of the user.
    pub fn answer_web_app_query(
        &self,
        web_app_query_id: impl Into<String>,
        result: InlineQueryResult,
    ) -> Call<SentWebAppMessage> {
        self.client
            .post("answerWebAppQuery")
            .arg("web_app_query_id", web_app_query_id.into())
            .arg("result", result)
    }
}
