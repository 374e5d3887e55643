//! Stable facade for the pagination engine.

mod components;
mod engine;
pub mod events;
mod interaction;
mod page;
pub mod token;
mod view;

pub use components::{ControlRow, MAX_SELECT_OPTIONS, build_nav_components};
pub use engine::{Paginator, SessionPhase};
pub use events::{ErrorStage, PaginatorEvent};
pub use interaction::passes_owner_check;
pub use page::{Page, PageFn, PageGenerator, PageSource};
pub use token::NavAction;
pub use view::{RenderedPage, render_page};
