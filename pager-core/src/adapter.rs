//! Capability contract between the engine and a chat platform.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::collector::{CollectorFilter, InteractionCollector};
use crate::content::PageContent;
use crate::error::Result;

/// Visual style of a navigation button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
    #[default]
    Secondary,
    Success,
    Danger,
    Link,
}

/// Everything an adapter needs to build one button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonSpec {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
    pub emoji: Option<String>,
    pub disabled: bool,
}

/// One entry of a select menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub default: bool,
}

/// Everything an adapter needs to build one select menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectMenuSpec {
    pub custom_id: String,
    pub options: Vec<SelectOption>,
    pub placeholder: Option<String>,
    pub disabled: bool,
}

/// Platform-specific actions the engine performs.
///
/// One implementation exists per chat client library. The engine holds a
/// single shared reference and never inspects which platform it talks to.
///
/// `Target` is whatever a session is sent in reply to (a message, a slash
/// command interaction, ...). Identity getters return `None` when the source
/// carries no such field.
pub trait PlatformAdapter: Send + Sync + 'static {
    /// What a session is sent in reply to.
    type Target: Send + Sync;
    /// Handle of a sent message.
    type Message: Clone + Send + Sync + 'static;
    /// Raw component interaction delivered by a collector.
    type Interaction: Send + Sync + 'static;
    /// One interactive control.
    type Control: Send;
    /// A row of controls.
    type Row: Send + Sync;
    /// Event source bound to one message.
    type Collector: InteractionCollector<Interaction = Self::Interaction>;

    /// Send the initial message.
    ///
    /// # Errors
    /// Returns [`crate::PaginatorError::InvalidTarget`] when `target` cannot be
    /// replied to, or an adapter error when the platform call fails.
    fn send_message(
        &self,
        target: &Self::Target,
        content: &PageContent,
        rows: Vec<Self::Row>,
        ephemeral: bool,
    ) -> impl Future<Output = Result<Self::Message>> + Send;

    /// Replace the content and controls of a sent message.
    fn update_message(
        &self,
        message: &Self::Message,
        content: &PageContent,
        rows: Vec<Self::Row>,
    ) -> impl Future<Output = Result<Self::Message>> + Send;

    /// Delete a sent message.
    fn delete_message(&self, message: &Self::Message) -> impl Future<Output = Result<()>> + Send;

    fn create_button(&self, spec: ButtonSpec) -> Self::Control;

    fn create_select_menu(&self, spec: SelectMenuSpec) -> Self::Control;

    fn create_action_row(&self, controls: Vec<Self::Control>) -> Self::Row;

    /// Open a collector for component interactions on `message`.
    ///
    /// The collector must end with [`crate::EndReason::Time`] once `timeout`
    /// elapses and must only yield interactions accepted by `filter`.
    fn create_collector(
        &self,
        message: &Self::Message,
        filter: CollectorFilter<Self::Interaction>,
        timeout: Duration,
    ) -> Result<Self::Collector>;

    fn target_user_id(&self, target: &Self::Target) -> Option<String>;

    fn target_channel_id(&self, target: &Self::Target) -> Option<String>;

    fn target_guild_id(&self, target: &Self::Target) -> Option<String>;

    fn custom_id(&self, interaction: &Self::Interaction) -> Option<String>;

    fn interaction_user_id(&self, interaction: &Self::Interaction) -> Option<String>;

    fn interaction_channel_id(&self, interaction: &Self::Interaction) -> Option<String>;

    fn interaction_guild_id(&self, interaction: &Self::Interaction) -> Option<String>;

    /// Chosen values of a select-menu interaction, empty for buttons.
    fn select_menu_values(&self, interaction: &Self::Interaction) -> Vec<String>;

    /// Acknowledge an interaction without visible output.
    fn defer_update(
        &self,
        interaction: &Self::Interaction,
    ) -> impl Future<Output = Result<()>> + Send;
}
