use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use hwb_core::{config::Config, notifier::Notifier, poller::Poller};
use hwb_practicum::PracticumClient;
use hwb_telegram::TelegramMessenger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hwb_core::logging::init("hwb")?;

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("CRITICAL: cannot start: {e}");
            return Err(e.into());
        }
    };

    let api = Arc::new(PracticumClient::from_config(&cfg)?);
    info!(endpoint = api.endpoint(), chat_id = %cfg.telegram_chat_id, "hwb starting");

    let messenger = Arc::new(TelegramMessenger::from_token(cfg.telegram_token.clone()));
    let notifier = Notifier::new(messenger, cfg.telegram_chat_id.clone());
    let mut poller = Poller::new(&cfg, api, notifier);

    // Ctrl-C stops the loop between iterations.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {e}");
                return;
            }
            info!("Shutdown requested");
            cancel.cancel();
        });
    }

    poller.run(cancel).await;
    Ok(())
}
