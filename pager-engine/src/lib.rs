//! Interactive pagination of one message through platform adapters.
//!
//! Build a [`Paginator`] from an adapter, a [`PageSource`] and
//! [`PaginatorOptions`], then [`Paginator::send`] it in reply to a target.

/// Page sources, control builders and the session state machine.
pub mod pagination;

pub use pager_core::{
    ButtonOverride, ButtonOverrides, EmbedSection, MessagePayload, NavigationMode, PageContent,
    PageDisplay, PaginationContext, PaginatorError, PaginatorOptions, PaginatorSettings,
    PlatformAdapter,
};
pub use pagination::{Page, PageSource, Paginator, PaginatorEvent};
