//! Collector integration: composed filter, event dispatch and timeout teardown.

use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, trace};

use pager_core::{
    CollectorEvent, CollectorFilter, InteractionCollector, PaginationContext, PlatformAdapter,
    Result,
};

use super::engine::Inner;
use super::events::{ErrorStage, PaginatorEvent};
use super::token::{NavAction, parse_page_value};

/// Single-user gate applied before the caller's own filter.
pub fn passes_owner_check(
    single_user_mode: bool,
    user_id: Option<&str>,
    context: &PaginationContext,
) -> bool {
    !single_user_mode || user_id == context.user_id.as_deref()
}

impl<A: PlatformAdapter> Inner<A> {
    /// Owner check first, then the configured filter.
    pub(super) fn composed_filter(self: &Arc<Self>) -> CollectorFilter<A::Interaction> {
        let session = Arc::downgrade(self);

        Arc::new(move |interaction: &A::Interaction| {
            let Some(session) = session.upgrade() else {
                return async { false }.boxed();
            };

            let user_id = session.adapter.interaction_user_id(interaction);
            let context = session.context();
            let single_user_mode = session.options.settings.single_user_mode;
            let filter = session.options.filter.clone();

            async move {
                if !passes_owner_check(single_user_mode, user_id.as_deref(), &context) {
                    trace!(?user_id, "interaction from non-owner rejected");
                    return false;
                }

                match filter {
                    Some(filter) => filter(user_id, context).await,
                    None => true,
                }
            }
            .boxed()
        })
    }

    /// Drain the collector one event at a time until it ends or the session is destroyed.
    pub(super) async fn run_collector(self: Arc<Self>, mut collector: A::Collector) {
        loop {
            let event = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => None,
                event = collector.next_event() => Some(event),
            };

            let Some(event) = event else {
                collector.stop("destroyed");
                break;
            };

            match event {
                CollectorEvent::Collect(interaction) => {
                    if let Err(source) = self.handle_interaction(interaction).await {
                        error!(?source, "failed to handle pagination interaction");
                        self.report(ErrorStage::Interaction, &source);
                    }
                }
                CollectorEvent::End(reason) => {
                    debug!(?reason, "pagination collector ended");
                    if reason.is_timeout() {
                        self.handle_timeout().await;
                    }
                    break;
                }
            }
        }
    }

    async fn handle_interaction(&self, interaction: A::Interaction) -> Result<()> {
        self.adapter.defer_update(&interaction).await?;

        let Some(custom_id) = self.adapter.custom_id(&interaction) else {
            return Ok(());
        };
        let Some(action) = NavAction::from_custom_id(&custom_id) else {
            trace!(%custom_id, "ignoring unknown control");
            return Ok(());
        };

        let navigated = match action {
            NavAction::Select => {
                let values = self.adapter.select_menu_values(&interaction);
                let Some(index) = values.first().and_then(|value| parse_page_value(value)) else {
                    trace!(?values, "select value is not a page");
                    return Ok(());
                };
                self.navigate(move |_| Some(index)).await?
            }
            action => self.navigate(move |context| action.target_page(context)).await?,
        };

        trace!(?action, navigated, "handled pagination interaction");
        Ok(())
    }

    /// Timeout teardown. A destroy that lands while `on_timeout` runs wins and
    /// suppresses the timeout notification.
    async fn handle_timeout(&self) {
        let context = self.context();
        if !context.is_active {
            return;
        }

        debug!("pagination session timed out");
        if let Some(callback) = &self.options.on_timeout {
            callback(context).await;
        }

        if !self.emit_while_active(PaginatorEvent::Timeout) {
            debug!("session destroyed during timeout callback");
            return;
        }

        self.destroy().await;
    }
}
