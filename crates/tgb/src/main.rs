//! Connectivity check: who is this bot, and where do its updates go.
//!
//! Reads `TELEGRAM_BOT_TOKEN` (and the other `TELEGRAM_*` settings) from the
//! environment or a `.env` file in the working directory.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use tgb_client::ApiClient;
use tgb_core::config::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` may set RUST_LOG.
    dotenvy::dotenv().ok();
    tgb_core::logging::init("tgb")?;

    let cfg = Arc::new(ClientConfig::from_env().context("loading bot configuration")?);
    let client = ApiClient::from_shared(cfg)?;

    let me = client.bot().get_me().send().await.context("getMe failed")?;
    info!(
        id = me.id,
        username = me.username.as_deref().unwrap_or("-"),
        inline = me.supports_inline_queries.unwrap_or(false),
        "connected as {}",
        me.full_name()
    );

    let hook = client
        .updates()
        .get_webhook_info()
        .send()
        .await
        .context("getWebhookInfo failed")?;

    if hook.is_set() {
        info!(url = %hook.url, pending = hook.pending_update_count, "webhook delivery");
    } else {
        info!(pending = hook.pending_update_count, "no webhook; updates via getUpdates");
    }

    if let Some(msg) = &hook.last_error_message {
        let at = hook
            .last_error_time()
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        warn!(error = %msg, at = %at, "last webhook delivery error");
    }

    Ok(())
}
