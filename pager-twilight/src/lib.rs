//! Discord adapter for the pagination engine, built on twilight.
//!
//! [`TwilightAdapter`] implements [`pager_core::PlatformAdapter`]. Its
//! collectors are fed by an [`InteractionRouter`] that the gateway loop hands
//! every interaction to.

pub mod adapter;
pub mod components;
pub mod embed;
pub mod router;
pub mod target;

pub use adapter::TwilightAdapter;
pub use router::InteractionRouter;
pub use target::{PagedMessage, ResponseHandle, TwilightTarget};
