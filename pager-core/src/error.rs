//! Error type for pagination sessions.

use thiserror::Error;

/// Upper bound on pages a generator may produce.
pub const MAX_GENERATED_PAGES: usize = 1000;

/// Errors surfaced by the engine and by adapters.
#[derive(Error, Debug)]
pub enum PaginatorError {
    /// The page source realized zero pages.
    #[error("No pages to display")]
    NoPages,

    /// A generator kept producing pages past the limit.
    #[error("page generator produced more than {limit} pages")]
    PageOverflow { limit: usize },

    /// The adapter could not classify the send target.
    #[error("Invalid target for sending message: {0}")]
    InvalidTarget(String),

    /// `send` was called on a session that already left the constructed state.
    #[error("pagination session was already sent")]
    AlreadySent,

    /// The operation requires an active session.
    #[error("Pagination is not active")]
    Inactive,

    /// A generator or lazy page failed to produce content.
    #[error("page source failed: {0}")]
    PageSource(#[source] anyhow::Error),

    /// A platform call failed.
    #[error("adapter call failed: {0}")]
    Adapter(#[source] anyhow::Error),
}

impl PaginatorError {
    /// Wrap any platform failure.
    pub fn adapter(source: impl Into<anyhow::Error>) -> Self {
        Self::Adapter(source.into())
    }

    /// Wrap a page-producing failure.
    pub fn page_source(source: impl Into<anyhow::Error>) -> Self {
        Self::PageSource(source.into())
    }

    /// Whether this error ends a session before it starts.
    pub fn is_construction_error(&self) -> bool {
        matches!(self, Self::NoPages | Self::PageOverflow { .. })
    }
}

pub type Result<T> = std::result::Result<T, PaginatorError>;
