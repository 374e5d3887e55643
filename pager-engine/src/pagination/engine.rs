//! Session state machine: send, navigate, update and destroy.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use pager_core::{PaginationContext, PaginatorError, PaginatorOptions, PlatformAdapter, Result};

use super::components::ControlRow;
use super::events::{ErrorStage, PaginatorEvent};
use super::page::{Page, PageSource};
use super::view::render_page;

const EVENT_CAPACITY: usize = 64;

/// Lifecycle position of a session. Never moves backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Constructed,
    Active,
    Destroyed,
}

/// One pagination session bound to one message.
///
/// Cheap to clone; clones drive the same session.
pub struct Paginator<A: PlatformAdapter> {
    inner: Arc<Inner<A>>,
}

impl<A: PlatformAdapter> Clone for Paginator<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub(super) struct Inner<A: PlatformAdapter> {
    pub(super) adapter: Arc<A>,
    pub(super) options: PaginatorOptions,
    source: PageSource,
    state: Mutex<SessionState<A>>,
    /// Serializes every operation that renders and pushes a frame.
    op_lock: tokio::sync::Mutex<()>,
    /// Cancelled once, by destroy. Stops the collector task.
    pub(super) shutdown: CancellationToken,
    events: broadcast::Sender<PaginatorEvent>,
}

struct SessionState<A: PlatformAdapter> {
    phase: SessionPhase,
    context: PaginationContext,
    pages: Arc<Vec<Page>>,
    message: Option<A::Message>,
    collector_open: bool,
}

impl<A: PlatformAdapter> Paginator<A> {
    pub fn new(adapter: Arc<A>, source: PageSource, options: PaginatorOptions) -> Self {
        let context = PaginationContext::new(
            options.settings.start_page,
            options.settings.user_id.clone(),
        );
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            inner: Arc::new(Inner {
                adapter,
                options,
                source,
                state: Mutex::new(SessionState {
                    phase: SessionPhase::Constructed,
                    context,
                    pages: Arc::new(Vec::new()),
                    message: None,
                    collector_open: false,
                }),
                op_lock: tokio::sync::Mutex::new(()),
                shutdown: CancellationToken::new(),
                events,
            }),
        }
    }

    /// Receive lifecycle notifications from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<PaginatorEvent> {
        self.inner.events.subscribe()
    }

    /// Load pages, send the first frame and start collecting interactions.
    ///
    /// # Errors
    /// Fails with [`PaginatorError::NoPages`] or [`PaginatorError::PageOverflow`]
    /// when the source cannot produce a usable sequence, with
    /// [`PaginatorError::AlreadySent`] when called twice, and with adapter
    /// errors from the platform. The session stays inactive on failure.
    pub async fn send(&self, target: &A::Target) -> Result<()> {
        let result = self.inner.send(target).await;
        if let Err(source) = &result {
            error!(?source, "failed to send paginated message");
            self.inner.report(ErrorStage::Send, source);
        }
        result
    }

    /// Reload pages and push a fresh frame without changing the page index.
    pub async fn update(&self) -> Result<()> {
        let result = self.inner.update().await;
        if let Err(source) = &result {
            error!(?source, "failed to update paginated message");
            self.inner.report(ErrorStage::Update, source);
        }
        result
    }

    /// Jump to an absolute, zero-based page index.
    ///
    /// Returns `Ok(false)` without touching state when the session is not
    /// active or `index` is out of range.
    pub async fn go_to_page(&self, index: usize) -> Result<bool> {
        self.inner.navigate(move |_| Some(index)).await
    }

    /// End the session. Safe to call any number of times, from any task.
    pub async fn destroy(&self) {
        self.inner.destroy().await;
    }

    pub fn current_page(&self) -> usize {
        self.inner.state.lock().context.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.inner.state.lock().context.total_pages
    }

    pub fn is_active(&self) -> bool {
        self.inner.state.lock().context.is_active
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.state.lock().phase
    }

    /// Snapshot of the run state.
    pub fn context(&self) -> PaginationContext {
        self.inner.context()
    }

    /// Handle of the sent message, once there is one.
    pub fn message(&self) -> Option<A::Message> {
        self.inner.state.lock().message.clone()
    }

    /// Attach a caller-defined value to the context.
    pub fn set_metadata(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner
            .state
            .lock()
            .context
            .metadata
            .insert(key.into(), value.into());
    }
}

impl<A: PlatformAdapter> Inner<A> {
    pub(super) fn context(&self) -> PaginationContext {
        self.state.lock().context.clone()
    }

    pub(super) fn emit(&self, event: PaginatorEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    pub(super) fn report(&self, stage: ErrorStage, source: &PaginatorError) {
        self.emit(PaginatorEvent::error(stage, source));
    }

    fn build_rows(&self, rows: Vec<ControlRow>) -> Vec<A::Row> {
        let adapter = &self.adapter;

        rows.into_iter()
            .map(|row| match row {
                ControlRow::Buttons(buttons) => adapter.create_action_row(
                    buttons
                        .into_iter()
                        .map(|button| adapter.create_button(button))
                        .collect(),
                ),
                ControlRow::Select(menu) => {
                    adapter.create_action_row(vec![adapter.create_select_menu(menu)])
                }
            })
            .collect()
    }

    fn spawn_collector(self: &Arc<Self>, collector: A::Collector) {
        tokio::spawn(Arc::clone(self).run_collector(collector));
    }

    async fn send(self: &Arc<Self>, target: &A::Target) -> Result<()> {
        let _op = self.op_lock.lock().await;

        let mut context = {
            let state = self.state.lock();
            if state.phase != SessionPhase::Constructed {
                return Err(PaginatorError::AlreadySent);
            }
            state.context.clone()
        };

        if context.user_id.is_none() {
            context.user_id = self.adapter.target_user_id(target);
        }
        context.channel_id = self.adapter.target_channel_id(target);
        context.guild_id = self.adapter.target_guild_id(target);

        let pages = self.source.load(&context).await?;
        if pages.is_empty() {
            return Err(PaginatorError::NoPages);
        }

        context.total_pages = pages.len();
        if context.clamp_current_page() {
            debug!(
                start_page = self.options.settings.start_page,
                total_pages = context.total_pages,
                "start page clamped into range"
            );
        }
        context.is_active = true;

        let settings = &self.options.settings;
        let rendered = render_page(&pages, &context, settings, false).await?;
        let rows = self.build_rows(rendered.rows);
        let message = self
            .adapter
            .send_message(target, &rendered.content, rows, settings.ephemeral)
            .await?;

        let collector = if context.total_pages > 1 {
            let created = self.adapter.create_collector(
                &message,
                self.composed_filter(),
                self.options.timeout(),
            );
            match created {
                Ok(collector) => Some(collector),
                Err(source) => {
                    if let Err(cleanup) = self.adapter.delete_message(&message).await {
                        warn!(?cleanup, "failed to remove message after collector setup failed");
                    }
                    return Err(source);
                }
            }
        } else {
            None
        };

        {
            let mut state = self.state.lock();
            state.phase = SessionPhase::Active;
            state.context = context.clone();
            state.pages = Arc::new(pages);
            state.message = Some(message);
            state.collector_open = collector.is_some();
        }

        debug!(
            current_page = context.current_page,
            total_pages = context.total_pages,
            "pagination session active"
        );

        match collector {
            Some(collector) => self.spawn_collector(collector),
            None => self.emit(PaginatorEvent::Ready(context)),
        }

        Ok(())
    }

    async fn update(self: &Arc<Self>) -> Result<()> {
        let _op = self.op_lock.lock().await;

        let context = {
            let state = self.state.lock();
            if state.phase != SessionPhase::Active {
                return Err(PaginatorError::Inactive);
            }
            state.context.clone()
        };

        let pages = self.source.load(&context).await?;
        if pages.is_empty() {
            return Err(PaginatorError::NoPages);
        }

        let (context, pages, message, needs_collector) = {
            let mut state = self.state.lock();
            if state.phase != SessionPhase::Active {
                return Err(PaginatorError::Inactive);
            }

            state.context.total_pages = pages.len();
            if state.context.clamp_current_page() {
                debug!(
                    total_pages = state.context.total_pages,
                    "page count shrank below current page, clamped"
                );
            }
            state.pages = Arc::new(pages);

            let needs_collector = !state.collector_open && state.context.total_pages > 1;
            (
                state.context.clone(),
                Arc::clone(&state.pages),
                state.message.clone(),
                needs_collector,
            )
        };

        let Some(message) = message else {
            return Err(PaginatorError::Inactive);
        };

        let rendered = render_page(&pages, &context, &self.options.settings, false).await?;
        let rows = self.build_rows(rendered.rows);
        self.adapter
            .update_message(&message, &rendered.content, rows)
            .await?;

        if needs_collector {
            let collector = self.adapter.create_collector(
                &message,
                self.composed_filter(),
                self.options.timeout(),
            )?;
            self.state.lock().collector_open = true;
            self.spawn_collector(collector);
        }

        Ok(())
    }

    /// Move to the index chosen by `resolve` and push the new frame.
    ///
    /// `resolve` runs under the state lock, so relative moves read the
    /// index they actually apply to. The page-change callback runs with no
    /// lock held and may call back into the session.
    pub(super) async fn navigate(
        &self,
        resolve: impl FnOnce(&PaginationContext) -> Option<usize> + Send,
    ) -> Result<bool> {
        let (old_page, context) = {
            let mut state = self.state.lock();
            if state.phase != SessionPhase::Active {
                return Ok(false);
            }

            let Some(index) =
                resolve(&state.context).filter(|index| state.context.contains_page(*index))
            else {
                return Ok(false);
            };

            let old_page = state.context.current_page;
            state.context.current_page = index;
            (old_page, state.context.clone())
        };

        let new_page = context.current_page;
        debug!(old_page, new_page, "page changed");

        self.emit(PaginatorEvent::PageChange {
            old_page,
            new_page,
            context: context.clone(),
        });
        if let Some(callback) = &self.options.on_page_change {
            callback(old_page, new_page, context).await;
        }

        self.push_current_frame().await?;
        Ok(true)
    }

    /// Render whatever page is current now and push it.
    ///
    /// A no-op once the session has left `Active`; destroy owns the final frame.
    async fn push_current_frame(&self) -> Result<()> {
        let _op = self.op_lock.lock().await;

        let (context, pages, message) = {
            let state = self.state.lock();
            if state.phase != SessionPhase::Active {
                return Ok(());
            }
            (
                state.context.clone(),
                Arc::clone(&state.pages),
                state.message.clone(),
            )
        };

        let Some(message) = message else {
            return Ok(());
        };

        let rendered = render_page(&pages, &context, &self.options.settings, false).await?;
        let rows = self.build_rows(rendered.rows);
        self.adapter
            .update_message(&message, &rendered.content, rows)
            .await?;

        Ok(())
    }

    /// Emit the notification built by `event` only while the session is still active.
    ///
    /// Checked and sent under the state lock, so it always precedes a racing destroy.
    pub(super) fn emit_while_active(
        &self,
        event: impl FnOnce(PaginationContext) -> PaginatorEvent,
    ) -> bool {
        let state = self.state.lock();
        if state.phase != SessionPhase::Active {
            return false;
        }
        self.emit(event(state.context.clone()));
        true
    }

    pub(super) async fn destroy(&self) {
        {
            let mut state = self.state.lock();
            if state.phase != SessionPhase::Active {
                return;
            }
            state.phase = SessionPhase::Destroyed;
            state.context.is_active = false;
        }

        self.shutdown.cancel();

        let context = {
            // Let an in-flight frame land before the final one.
            let _op = self.op_lock.lock().await;

            let (context, pages, message) = {
                let state = self.state.lock();
                (
                    state.context.clone(),
                    Arc::clone(&state.pages),
                    state.message.clone(),
                )
            };

            if let Some(message) = message {
                if self.options.settings.delete_on_end {
                    if let Err(source) = self.adapter.delete_message(&message).await {
                        warn!(?source, "failed to delete paginated message");
                        self.report(ErrorStage::Cleanup, &source);
                    }
                } else if let Err(source) = self.freeze(&message, &pages, &context).await {
                    warn!(?source, "failed to disable pagination controls");
                    self.report(ErrorStage::Cleanup, &source);
                }
            }

            context
        };

        if let Some(callback) = &self.options.on_destroy {
            callback(context.clone()).await;
        }
        self.emit(PaginatorEvent::Destroy(context));

        debug!("pagination session destroyed");
    }

    async fn freeze(
        &self,
        message: &A::Message,
        pages: &[Page],
        context: &PaginationContext,
    ) -> Result<()> {
        let rendered = render_page(pages, context, &self.options.settings, true).await?;
        let rows = self.build_rows(rendered.rows);
        self.adapter
            .update_message(message, &rendered.content, rows)
            .await?;
        Ok(())
    }
}
