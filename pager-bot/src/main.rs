//! Demo bot: one gateway shard feeding paginated sessions.

mod commands;
mod config;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use pager_twilight::TwilightAdapter;

use crate::commands::{Context, handle_interaction, handle_message};
use crate::config::BotConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    dotenvy::dotenv().ok();
    let config = BotConfig::from_env()?;
    info!(
        mode = ?config.settings.mode,
        timeout_secs = config.settings.timeout_secs,
        single_user = config.settings.single_user_mode,
        "pagination settings loaded"
    );

    let http = Arc::new(Client::new(config.token.clone()));
    let adapter = Arc::new(TwilightAdapter::new(Arc::clone(&http)));
    let ctx = Context {
        http,
        adapter,
        settings: config.settings,
    };

    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;
    let mut shard = Shard::new(ShardId::new(0, 1), config.token, intents);

    info!("connecting to the gateway");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("gateway session ready");
            }
            Event::MessageCreate(msg) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_message(ctx, msg).await {
                        error!(?source, "failed to handle message");
                    }
                });
            }
            Event::InteractionCreate(interaction) => {
                if let Err(source) = handle_interaction(ctx.clone(), interaction.0).await {
                    error!(?source, "failed to handle interaction");
                }
            }
            _ => {}
        }
    }

    Ok(())
}
