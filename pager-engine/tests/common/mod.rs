//! Recording adapter shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};

use pager_core::{
    ButtonSpec, ChannelCollector, CollectorFilter, PageContent, PaginatorError, PlatformAdapter,
    Result, SelectMenuSpec,
};
use pager_engine::PaginatorEvent;

#[derive(Clone, Debug)]
pub struct MockTarget {
    pub user_id: Option<String>,
    pub channel_id: Option<String>,
    pub guild_id: Option<String>,
    pub replyable: bool,
}

impl MockTarget {
    pub fn from_user(user_id: &str) -> Self {
        Self {
            user_id: Some(user_id.to_owned()),
            channel_id: Some("C1".to_owned()),
            guild_id: Some("G1".to_owned()),
            replyable: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockMessage {
    pub id: u64,
}

#[derive(Clone, Debug)]
pub struct MockInteraction {
    pub user_id: String,
    pub custom_id: String,
    pub values: Vec<String>,
}

impl MockInteraction {
    pub fn button(user_id: &str, custom_id: &str) -> Self {
        Self {
            user_id: user_id.to_owned(),
            custom_id: custom_id.to_owned(),
            values: vec![],
        }
    }

    pub fn select(user_id: &str, value: &str) -> Self {
        Self {
            user_id: user_id.to_owned(),
            custom_id: "paginator_select".to_owned(),
            values: vec![value.to_owned()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockControl {
    Button(ButtonSpec),
    Select(SelectMenuSpec),
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub message: MockMessage,
    pub content: PageContent,
    pub rows: Vec<Vec<MockControl>>,
    pub ephemeral: bool,
}

impl Frame {
    pub fn text(&self) -> &str {
        self.content.text().unwrap_or_default()
    }

    pub fn buttons(&self) -> Vec<&ButtonSpec> {
        self.rows
            .iter()
            .flatten()
            .filter_map(|control| match control {
                MockControl::Button(button) => Some(button),
                MockControl::Select(_) => None,
            })
            .collect()
    }

    pub fn select(&self) -> Option<&SelectMenuSpec> {
        self.rows.iter().flatten().find_map(|control| match control {
            MockControl::Select(menu) => Some(menu),
            MockControl::Button(_) => None,
        })
    }

    pub fn button_disabled(&self, custom_id: &str) -> bool {
        self.buttons()
            .into_iter()
            .find(|button| button.custom_id == custom_id)
            .map(|button| button.disabled)
            .unwrap_or_else(|| panic!("no button `{custom_id}` in frame"))
    }

    pub fn all_disabled(&self) -> bool {
        self.rows.iter().flatten().all(|control| match control {
            MockControl::Button(button) => button.disabled,
            MockControl::Select(menu) => menu.disabled,
        })
    }
}

#[derive(Default)]
pub struct MockAdapter {
    next_id: AtomicU64,
    pub frames: Mutex<Vec<Frame>>,
    pub deleted: Mutex<Vec<MockMessage>>,
    pub deferred: Mutex<Vec<String>>,
    pub collector_timeouts: Mutex<Vec<Duration>>,
    senders: Mutex<Vec<mpsc::UnboundedSender<MockInteraction>>>,
    pub fail_updates: AtomicBool,
}

impl MockAdapter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Deliver an interaction to the most recently opened collector.
    pub fn interact(&self, interaction: MockInteraction) {
        let senders = self.senders.lock();
        let sender = senders.last().expect("a collector is open");
        sender.send(interaction).expect("collector is listening");
    }

    pub fn last_frame(&self) -> Frame {
        self.frames.lock().last().cloned().expect("at least one frame")
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn collectors_opened(&self) -> usize {
        self.collector_timeouts.lock().len()
    }

    fn record(
        &self,
        message: MockMessage,
        content: &PageContent,
        rows: Vec<Vec<MockControl>>,
        ephemeral: bool,
    ) {
        self.frames.lock().push(Frame {
            message,
            content: content.clone(),
            rows,
            ephemeral,
        });
    }
}

impl PlatformAdapter for MockAdapter {
    type Target = MockTarget;
    type Message = MockMessage;
    type Interaction = MockInteraction;
    type Control = MockControl;
    type Row = Vec<MockControl>;
    type Collector = ChannelCollector<MockInteraction>;

    async fn send_message(
        &self,
        target: &MockTarget,
        content: &PageContent,
        rows: Vec<Vec<MockControl>>,
        ephemeral: bool,
    ) -> Result<MockMessage> {
        if !target.replyable {
            return Err(PaginatorError::InvalidTarget("mock target".to_owned()));
        }

        let message = MockMessage {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
        };
        self.record(message.clone(), content, rows, ephemeral);
        Ok(message)
    }

    async fn update_message(
        &self,
        message: &MockMessage,
        content: &PageContent,
        rows: Vec<Vec<MockControl>>,
    ) -> Result<MockMessage> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(PaginatorError::adapter(anyhow::anyhow!("edit rejected")));
        }

        self.record(message.clone(), content, rows, false);
        Ok(message.clone())
    }

    async fn delete_message(&self, message: &MockMessage) -> Result<()> {
        self.deleted.lock().push(message.clone());
        Ok(())
    }

    fn create_button(&self, spec: ButtonSpec) -> MockControl {
        MockControl::Button(spec)
    }

    fn create_select_menu(&self, spec: SelectMenuSpec) -> MockControl {
        MockControl::Select(spec)
    }

    fn create_action_row(&self, controls: Vec<MockControl>) -> Vec<MockControl> {
        controls
    }

    fn create_collector(
        &self,
        _message: &MockMessage,
        filter: CollectorFilter<MockInteraction>,
        timeout: Duration,
    ) -> Result<ChannelCollector<MockInteraction>> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.senders.lock().push(sender);
        self.collector_timeouts.lock().push(timeout);
        Ok(ChannelCollector::new(receiver, filter, timeout))
    }

    fn target_user_id(&self, target: &MockTarget) -> Option<String> {
        target.user_id.clone()
    }

    fn target_channel_id(&self, target: &MockTarget) -> Option<String> {
        target.channel_id.clone()
    }

    fn target_guild_id(&self, target: &MockTarget) -> Option<String> {
        target.guild_id.clone()
    }

    fn custom_id(&self, interaction: &MockInteraction) -> Option<String> {
        Some(interaction.custom_id.clone())
    }

    fn interaction_user_id(&self, interaction: &MockInteraction) -> Option<String> {
        Some(interaction.user_id.clone())
    }

    fn interaction_channel_id(&self, _interaction: &MockInteraction) -> Option<String> {
        Some("C1".to_owned())
    }

    fn interaction_guild_id(&self, _interaction: &MockInteraction) -> Option<String> {
        Some("G1".to_owned())
    }

    fn select_menu_values(&self, interaction: &MockInteraction) -> Vec<String> {
        interaction.values.clone()
    }

    async fn defer_update(&self, interaction: &MockInteraction) -> Result<()> {
        self.deferred.lock().push(interaction.user_id.clone());
        Ok(())
    }
}

/// Wait for the next notification, failing the test instead of hanging.
pub async fn next_event(events: &mut broadcast::Receiver<PaginatorEvent>) -> PaginatorEvent {
    tokio::time::timeout(Duration::from_secs(600), events.recv())
        .await
        .expect("notification before deadline")
        .expect("notification channel open")
}

/// Every notification already queued.
pub fn drain(events: &mut broadcast::Receiver<PaginatorEvent>) -> Vec<PaginatorEvent> {
    let mut drained = Vec::new();
    while let Ok(event) = events.try_recv() {
        drained.push(event);
    }
    drained
}

pub fn pages(texts: &[&str]) -> Vec<PageContent> {
    texts.iter().map(|text| PageContent::from(*text)).collect()
}
