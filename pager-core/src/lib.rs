//! Shared types for single-message pagination sessions.
//!
//! The engine only ever talks to a chat platform through [`PlatformAdapter`];
//! everything in this crate is platform neutral.

/// Platform capability contract implemented once per chat client library.
pub mod adapter;
/// Interaction collectors and the channel-backed implementation adapters reuse.
pub mod collector;
/// Session configuration and lifecycle callbacks.
pub mod config;
/// Opaque page payloads.
pub mod content;
/// Mutable run state of one session.
pub mod context;
/// Error type shared by the engine and adapters.
pub mod error;

pub use adapter::{ButtonSpec, ButtonStyle, PlatformAdapter, SelectMenuSpec, SelectOption};
pub use collector::{
    ChannelCollector, CollectorEvent, CollectorFilter, EndReason, InteractionCollector,
};
pub use config::{
    ButtonOverride, ButtonOverrides, ContextCallback, DEFAULT_PAGE_FORMAT, DEFAULT_TIMEOUT_SECS,
    NavigationMode, PageChangeCallback, PageDisplay, PaginatorOptions, PaginatorSettings,
    UserFilter,
};
pub use content::{Attachment, EmbedField, EmbedSection, MessagePayload, PageContent};
pub use context::PaginationContext;
pub use error::{MAX_GENERATED_PAGES, PaginatorError, Result};
