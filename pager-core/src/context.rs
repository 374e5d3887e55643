//! Session context snapshots shared with callbacks and events.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Run state of one pagination session.
///
/// Owned and mutated only by the engine. Callbacks, notifications and
/// accessors receive clones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationContext {
    /// Zero-based index of the page on display.
    pub current_page: usize,
    /// Number of realized pages. Zero until the first load completes.
    pub total_pages: usize,
    /// User the session belongs to, when known.
    pub user_id: Option<String>,
    /// Channel the session was sent to. Set once at send time.
    pub channel_id: Option<String>,
    /// Guild the session was sent in. Set once at send time.
    pub guild_id: Option<String>,
    /// True from a successful send until destroy.
    pub is_active: bool,
    /// Free-form caller extensions.
    pub metadata: HashMap<String, String>,
}

impl PaginationContext {
    /// Fresh, inactive context starting at `start_page`.
    pub fn new(start_page: usize, user_id: Option<String>) -> Self {
        Self {
            current_page: start_page,
            user_id,
            ..Self::default()
        }
    }

    /// Whether the current page is the first one.
    pub fn is_first_page(&self) -> bool {
        self.current_page == 0
    }

    /// Whether the current page is the last one.
    pub fn is_last_page(&self) -> bool {
        self.current_page + 1 >= self.total_pages
    }

    /// Whether `index` is a valid navigation target.
    pub fn contains_page(&self, index: usize) -> bool {
        index < self.total_pages
    }

    /// Clamp the current index into `[0, total_pages)`.
    ///
    /// Returns `true` when the index moved.
    pub fn clamp_current_page(&mut self) -> bool {
        let max_index = self.total_pages.saturating_sub(1);
        if self.current_page > max_index {
            self.current_page = max_index;
            return true;
        }
        false
    }
}
