//! [`PlatformAdapter`] over the twilight HTTP client.

use std::{sync::Arc, time::Duration};

use tracing::debug;
use twilight_http::Client;
use twilight_model::{
    application::interaction::{
        Interaction, InteractionData, InteractionType,
        message_component::MessageComponentInteractionData,
    },
    channel::{
        Message,
        message::{MessageFlags, component::Component},
    },
    http::interaction::{InteractionResponse, InteractionResponseType},
};
use twilight_util::builder::InteractionResponseDataBuilder;

use pager_core::{
    ButtonSpec, ChannelCollector, CollectorFilter, PageContent, PaginatorError, PlatformAdapter,
    Result, SelectMenuSpec,
};

use crate::components::{action_row, button, select_menu};
use crate::embed::message_parts;
use crate::router::InteractionRouter;
use crate::target::{PagedMessage, ResponseHandle, TwilightTarget};

/// Discord adapter backed by one shared HTTP client.
#[derive(Clone)]
pub struct TwilightAdapter {
    http: Arc<Client>,
    router: InteractionRouter,
}

impl TwilightAdapter {
    pub fn new(http: Arc<Client>) -> Self {
        Self {
            http,
            router: InteractionRouter::new(),
        }
    }

    /// Router the gateway loop feeds with component interactions.
    pub fn router(&self) -> &InteractionRouter {
        &self.router
    }

    async fn reply_in_channel(
        &self,
        message: &Message,
        content: &PageContent,
        rows: &[Component],
    ) -> anyhow::Result<PagedMessage> {
        let parts = message_parts(content, true)?;

        let mut request = self
            .http
            .create_message(message.channel_id)
            .reply(message.id)
            .embeds(&parts.embeds)
            .components(rows)
            .attachments(&parts.attachments);
        if let Some(text) = parts.content.as_deref() {
            request = request.content(text);
        }
        let created = request.await?.model().await?;

        Ok(PagedMessage {
            channel_id: created.channel_id,
            message_id: created.id,
            response: None,
        })
    }

    async fn respond_to_interaction(
        &self,
        interaction: &Interaction,
        content: &PageContent,
        rows: Vec<Component>,
        ephemeral: bool,
    ) -> anyhow::Result<PagedMessage> {
        let parts = message_parts(content, true)?;

        let mut data = InteractionResponseDataBuilder::new()
            .embeds(parts.embeds)
            .components(rows)
            .attachments(parts.attachments);
        if let Some(text) = parts.content {
            data = data.content(text);
        }
        if ephemeral {
            data = data.flags(MessageFlags::EPHEMERAL);
        }
        let response = InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(data.build()),
        };

        let client = self.http.interaction(interaction.application_id);
        client
            .create_response(interaction.id, &interaction.token, &response)
            .await?;
        let created = client.response(&interaction.token).await?.model().await?;

        Ok(PagedMessage {
            channel_id: created.channel_id,
            message_id: created.id,
            response: Some(ResponseHandle {
                application_id: interaction.application_id,
                token: interaction.token.clone(),
            }),
        })
    }

    async fn edit(
        &self,
        message: &PagedMessage,
        content: &PageContent,
        rows: &[Component],
    ) -> anyhow::Result<()> {
        let parts = message_parts(content, false)?;

        match &message.response {
            Some(handle) => {
                self.http
                    .interaction(handle.application_id)
                    .update_response(&handle.token)
                    .content(parts.content.as_deref())
                    .embeds(Some(&parts.embeds))
                    .components(Some(rows))
                    .await?;
            }
            None => {
                self.http
                    .update_message(message.channel_id, message.message_id)
                    .content(parts.content.as_deref())
                    .embeds(Some(&parts.embeds))
                    .components(Some(rows))
                    .await?;
            }
        }

        Ok(())
    }

    async fn remove(&self, message: &PagedMessage) -> anyhow::Result<()> {
        match &message.response {
            Some(handle) => {
                self.http
                    .interaction(handle.application_id)
                    .delete_response(&handle.token)
                    .await?;
            }
            None => {
                self.http
                    .delete_message(message.channel_id, message.message_id)
                    .await?;
            }
        }

        Ok(())
    }

    async fn acknowledge(&self, interaction: &Interaction) -> anyhow::Result<()> {
        let response = InteractionResponse {
            kind: InteractionResponseType::DeferredUpdateMessage,
            data: None,
        };

        self.http
            .interaction(interaction.application_id)
            .create_response(interaction.id, &interaction.token, &response)
            .await?;

        Ok(())
    }
}

fn component_data(interaction: &Interaction) -> Option<&MessageComponentInteractionData> {
    match interaction.data.as_ref()? {
        InteractionData::MessageComponent(data) => Some(data.as_ref()),
        _ => None,
    }
}

impl PlatformAdapter for TwilightAdapter {
    type Target = TwilightTarget;
    type Message = PagedMessage;
    type Interaction = Interaction;
    type Control = Component;
    type Row = Component;
    type Collector = ChannelCollector<Interaction>;

    async fn send_message(
        &self,
        target: &TwilightTarget,
        content: &PageContent,
        rows: Vec<Component>,
        ephemeral: bool,
    ) -> Result<PagedMessage> {
        let sent = match target {
            TwilightTarget::Message(message) => {
                if ephemeral {
                    debug!("ephemeral replies need an interaction, sending a normal message");
                }
                self.reply_in_channel(message, content, &rows).await
            }
            TwilightTarget::Interaction(interaction) => {
                if matches!(
                    interaction.kind,
                    InteractionType::Ping | InteractionType::ApplicationCommandAutocomplete
                ) {
                    return Err(PaginatorError::InvalidTarget(format!(
                        "cannot reply to a {:?} interaction",
                        interaction.kind
                    )));
                }
                self.respond_to_interaction(interaction, content, rows, ephemeral)
                    .await
            }
        };

        let message = sent.map_err(PaginatorError::adapter)?;
        debug!(
            channel_id = message.channel_id.get(),
            message_id = message.message_id.get(),
            "sent paginated message"
        );
        Ok(message)
    }

    async fn update_message(
        &self,
        message: &PagedMessage,
        content: &PageContent,
        rows: Vec<Component>,
    ) -> Result<PagedMessage> {
        self.edit(message, content, &rows)
            .await
            .map_err(PaginatorError::adapter)?;
        Ok(message.clone())
    }

    async fn delete_message(&self, message: &PagedMessage) -> Result<()> {
        self.remove(message).await.map_err(PaginatorError::adapter)
    }

    fn create_button(&self, spec: ButtonSpec) -> Component {
        button(spec)
    }

    fn create_select_menu(&self, spec: SelectMenuSpec) -> Component {
        select_menu(spec)
    }

    fn create_action_row(&self, controls: Vec<Component>) -> Component {
        action_row(controls)
    }

    fn create_collector(
        &self,
        message: &PagedMessage,
        filter: CollectorFilter<Interaction>,
        timeout: Duration,
    ) -> Result<ChannelCollector<Interaction>> {
        let message_id = message.message_id;
        let receiver = self.router.register(message_id);
        let router = self.router.clone();

        Ok(ChannelCollector::new(receiver, filter, timeout)
            .on_end(move || router.unregister(message_id)))
    }

    fn target_user_id(&self, target: &TwilightTarget) -> Option<String> {
        target.user_id().map(|id| id.to_string())
    }

    fn target_channel_id(&self, target: &TwilightTarget) -> Option<String> {
        target.channel_id().map(|id| id.to_string())
    }

    fn target_guild_id(&self, target: &TwilightTarget) -> Option<String> {
        target.guild_id().map(|id| id.to_string())
    }

    fn custom_id(&self, interaction: &Interaction) -> Option<String> {
        component_data(interaction).map(|data| data.custom_id.clone())
    }

    fn interaction_user_id(&self, interaction: &Interaction) -> Option<String> {
        interaction.author_id().map(|id| id.to_string())
    }

    fn interaction_channel_id(&self, interaction: &Interaction) -> Option<String> {
        interaction
            .channel
            .as_ref()
            .map(|channel| channel.id.to_string())
    }

    fn interaction_guild_id(&self, interaction: &Interaction) -> Option<String> {
        interaction.guild_id.map(|id| id.to_string())
    }

    fn select_menu_values(&self, interaction: &Interaction) -> Vec<String> {
        component_data(interaction)
            .map(|data| data.values.clone())
            .unwrap_or_default()
    }

    async fn defer_update(&self, interaction: &Interaction) -> Result<()> {
        self.acknowledge(interaction)
            .await
            .map_err(PaginatorError::adapter)
    }
}
