//! `!pages` command and component interaction routing for the demo bot.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use twilight_http::Client;
use twilight_model::{
    application::interaction::{Interaction, InteractionData},
    channel::message::MessageFlags,
    gateway::payload::incoming::MessageCreate,
    http::interaction::{InteractionResponse, InteractionResponseType},
};
use twilight_util::builder::InteractionResponseDataBuilder;

use pager_core::{EmbedSection, PaginatorOptions, PaginatorSettings};
use pager_engine::{Page, PageSource, Paginator, PaginatorEvent};
use pager_twilight::{TwilightAdapter, TwilightTarget};

pub const COMMAND_PREFIX: &str = "!";

const DEFAULT_PAGE_COUNT: usize = 5;
const MAX_PAGE_COUNT: usize = 60;
const EMBED_COLOR: u32 = 0x90_54_30;

/// Shown when someone clicks the controls of a session that already ended.
pub const SESSION_EXPIRED_MESSAGE: &str =
    "This pagination session expired. Run the command again.";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub adapter: Arc<TwilightAdapter>,
    pub settings: PaginatorSettings,
}

/// Page count requested by `!pages [count]`.
///
/// `None` when the argument is not a positive number.
pub fn parse_page_count(arg: Option<&str>) -> Option<usize> {
    match arg {
        None => Some(DEFAULT_PAGE_COUNT),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|count| *count > 0)
            .map(|count| count.min(MAX_PAGE_COUNT)),
    }
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.trim();
    let Some(content) = content.strip_prefix(COMMAND_PREFIX) else {
        return Ok(());
    };

    let mut parts = content.split_whitespace();
    let command = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next().map(str::to_owned);

    match command.as_str() {
        "pages" => run_pages(ctx, msg, arg.as_deref()).await,
        _ => Ok(()),
    }
}

/// `!pages [count]`: a demo session over generated pages.
async fn run_pages(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg: Option<&str>,
) -> anyhow::Result<()> {
    let Some(count) = parse_page_count(arg) else {
        ctx.http
            .create_message(msg.channel_id)
            .content("Usage: `!pages [count]` (count starts at 1)")
            .await?;
        return Ok(());
    };

    let source = PageSource::generator(move |index, context| async move {
        if index >= count {
            return Ok(None);
        }
        let requester = context.user_id.unwrap_or_else(|| "nobody".to_owned());
        let page = EmbedSection::new()
            .title(format!("Sample page #{}", index + 1))
            .description(format!("Generated for <@{requester}>."))
            .color(EMBED_COLOR)
            .field("Index", index.to_string(), true)
            .field("Count", count.to_string(), true);
        Ok(Some(Page::from(page)))
    });

    let options = PaginatorOptions::from_settings(ctx.settings.clone()).on_page_change(
        |old_page, new_page, _context| async move {
            debug!(old_page, new_page, "demo session changed page");
        },
    );

    let paginator = Paginator::new(Arc::clone(&ctx.adapter), source, options);
    let events = paginator.subscribe();
    tokio::spawn(log_session(events));

    let target = TwilightTarget::from(msg.0);
    paginator.send(&target).await?;
    info!(pages = paginator.total_pages(), "demo session started");

    Ok(())
}

async fn log_session(mut events: tokio::sync::broadcast::Receiver<PaginatorEvent>) {
    while let Ok(event) = events.recv().await {
        match event {
            PaginatorEvent::Error { stage, message } => {
                warn!(?stage, %message, "demo session error");
            }
            PaginatorEvent::Destroy(context) => {
                debug!(page = context.current_page, "demo session ended");
                break;
            }
            event => debug!(?event, "demo session event"),
        }
    }
}

/// Route component interactions to open sessions, answering stale ones.
pub async fn handle_interaction(ctx: Context, interaction: Interaction) -> anyhow::Result<()> {
    let Err(unrouted) = ctx.adapter.router().dispatch(interaction) else {
        return Ok(());
    };

    let is_pager_control = matches!(
        &unrouted.data,
        Some(InteractionData::MessageComponent(data)) if data.custom_id.starts_with("paginator_")
    );
    if !is_pager_control {
        return Ok(());
    }

    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(SESSION_EXPIRED_MESSAGE)
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };

    if let Err(source) = ctx
        .http
        .interaction(unrouted.application_id)
        .create_response(unrouted.id, &unrouted.token, &response)
        .await
    {
        error!(?source, "failed to answer stale pagination interaction");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_defaults_and_caps() {
        assert_eq!(parse_page_count(None), Some(DEFAULT_PAGE_COUNT));
        assert_eq!(parse_page_count(Some("12")), Some(12));
        assert_eq!(parse_page_count(Some("5000")), Some(MAX_PAGE_COUNT));
    }

    #[test]
    fn page_count_rejects_garbage() {
        assert_eq!(parse_page_count(Some("0")), None);
        assert_eq!(parse_page_count(Some("-3")), None);
        assert_eq!(parse_page_count(Some("lots")), None);
    }
}
