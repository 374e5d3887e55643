//! Fan-out of gateway component interactions to the collector owning the message.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::trace;
use twilight_model::{
    application::interaction::{Interaction, InteractionType},
    id::{Id, marker::MessageMarker},
};

type RouteMap = HashMap<Id<MessageMarker>, mpsc::UnboundedSender<Interaction>>;

/// Message-id keyed table of open collectors.
///
/// The gateway loop calls [`InteractionRouter::dispatch`] for every
/// interaction; collectors register on creation and unregister when they end.
#[derive(Clone, Default)]
pub struct InteractionRouter {
    routes: Arc<Mutex<RouteMap>>,
}

impl InteractionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start routing interactions on `message_id`. Replaces an older route.
    pub fn register(&self, message_id: Id<MessageMarker>) -> mpsc::UnboundedReceiver<Interaction> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.routes.lock().insert(message_id, sender);
        receiver
    }

    pub fn unregister(&self, message_id: Id<MessageMarker>) {
        self.routes.lock().remove(&message_id);
    }

    pub fn is_routed(&self, message_id: Id<MessageMarker>) -> bool {
        self.routes.lock().contains_key(&message_id)
    }

    /// Hand a component interaction to its collector.
    ///
    /// Gives the interaction back when no open collector owns its message, so
    /// the caller can handle it some other way.
    pub fn dispatch(&self, interaction: Interaction) -> Result<(), Box<Interaction>> {
        if interaction.kind != InteractionType::MessageComponent {
            return Err(Box::new(interaction));
        }
        let Some(message_id) = interaction.message.as_ref().map(|message| message.id) else {
            return Err(Box::new(interaction));
        };

        let mut routes = self.routes.lock();
        let Some(sender) = routes.get(&message_id) else {
            return Err(Box::new(interaction));
        };

        match sender.send(interaction) {
            Ok(()) => {
                trace!(message_id = message_id.get(), "routed component interaction");
                Ok(())
            }
            Err(mpsc::error::SendError(interaction)) => {
                routes.remove(&message_id);
                Err(Box::new(interaction))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_unregister_track_routes() {
        let router = InteractionRouter::new();
        let message_id = Id::new(42);

        let _receiver = router.register(message_id);
        assert!(router.is_routed(message_id));

        router.unregister(message_id);
        assert!(!router.is_routed(message_id));
    }

    #[test]
    fn clones_share_one_table() {
        let router = InteractionRouter::new();
        let clone = router.clone();

        let _receiver = clone.register(Id::new(7));

        assert!(router.is_routed(Id::new(7)));
    }
}
