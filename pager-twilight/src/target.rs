//! What a session replies to, and the handle of what it sent.

use twilight_model::{
    application::interaction::Interaction,
    channel::Message,
    id::{
        Id,
        marker::{ApplicationMarker, ChannelMarker, GuildMarker, MessageMarker, UserMarker},
    },
};

/// Where a paginated message is sent.
#[derive(Clone, Debug)]
pub enum TwilightTarget {
    /// Reply in the channel of a gateway message.
    Message(Box<Message>),
    /// Answer an application command or component interaction.
    Interaction(Box<Interaction>),
}

impl TwilightTarget {
    pub fn user_id(&self) -> Option<Id<UserMarker>> {
        match self {
            TwilightTarget::Message(message) => Some(message.author.id),
            TwilightTarget::Interaction(interaction) => interaction.author_id(),
        }
    }

    pub fn channel_id(&self) -> Option<Id<ChannelMarker>> {
        match self {
            TwilightTarget::Message(message) => Some(message.channel_id),
            TwilightTarget::Interaction(interaction) => {
                interaction.channel.as_ref().map(|channel| channel.id)
            }
        }
    }

    pub fn guild_id(&self) -> Option<Id<GuildMarker>> {
        match self {
            TwilightTarget::Message(message) => message.guild_id,
            TwilightTarget::Interaction(interaction) => interaction.guild_id,
        }
    }
}

impl From<Message> for TwilightTarget {
    fn from(message: Message) -> Self {
        TwilightTarget::Message(Box::new(message))
    }
}

impl From<Interaction> for TwilightTarget {
    fn from(interaction: Interaction) -> Self {
        TwilightTarget::Interaction(Box::new(interaction))
    }
}

/// Webhook credentials of an interaction response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseHandle {
    pub application_id: Id<ApplicationMarker>,
    pub token: String,
}

/// Handle of a message sent by [`crate::TwilightAdapter`].
///
/// Messages sent as an interaction response keep the response handle. Edits
/// and deletes then go through the webhook endpoints so ephemeral replies work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagedMessage {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
    pub response: Option<ResponseHandle>,
}
