//! Notifications emitted by a session.

use pager_core::{PaginationContext, PaginatorError};

/// Which part of the lifecycle raised an error notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorStage {
    Send,
    Update,
    Interaction,
    /// Swallowed during destroy.
    Cleanup,
}

/// Observable lifecycle events. Every payload is a snapshot.
#[derive(Clone, Debug)]
pub enum PaginatorEvent {
    /// A single-page session was sent and needs no collector.
    Ready(PaginationContext),
    PageChange {
        old_page: usize,
        new_page: usize,
        context: PaginationContext,
    },
    Timeout(PaginationContext),
    Destroy(PaginationContext),
    Error { stage: ErrorStage, message: String },
}

impl PaginatorEvent {
    pub(crate) fn error(stage: ErrorStage, source: &PaginatorError) -> Self {
        PaginatorEvent::Error {
            stage,
            message: source.to_string(),
        }
    }
}
