//! Control identifiers and select-menu value encoding.

use pager_core::PaginationContext;

pub const FIRST_ID: &str = "paginator_first";
pub const PREVIOUS_ID: &str = "paginator_previous";
pub const INDICATOR_ID: &str = "paginator_indicator";
pub const NEXT_ID: &str = "paginator_next";
pub const LAST_ID: &str = "paginator_last";
pub const SELECT_ID: &str = "paginator_select";

const PAGE_VALUE_PREFIX: &str = "page_";
/// Value of the informational "more pages" option.
pub const MORE_PAGES_VALUE: &str = "page_more";

/// What a collected interaction asks the session to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    First,
    Previous,
    Next,
    Last,
    Select,
}

impl NavAction {
    pub fn custom_id(self) -> &'static str {
        match self {
            NavAction::First => FIRST_ID,
            NavAction::Previous => PREVIOUS_ID,
            NavAction::Next => NEXT_ID,
            NavAction::Last => LAST_ID,
            NavAction::Select => SELECT_ID,
        }
    }

    /// Parse a control identifier. The page indicator is not an action.
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        match custom_id {
            FIRST_ID => Some(NavAction::First),
            PREVIOUS_ID => Some(NavAction::Previous),
            NEXT_ID => Some(NavAction::Next),
            LAST_ID => Some(NavAction::Last),
            SELECT_ID => Some(NavAction::Select),
            _ => None,
        }
    }

    /// Absolute target index for a button action.
    ///
    /// Returns `None` for `Select` and for moves that would fall below zero.
    pub fn target_page(self, context: &PaginationContext) -> Option<usize> {
        match self {
            NavAction::First => Some(0),
            NavAction::Previous => context.current_page.checked_sub(1),
            NavAction::Next => context.current_page.checked_add(1),
            NavAction::Last => context.total_pages.checked_sub(1),
            NavAction::Select => None,
        }
    }
}

/// Encode a zero-based page index as a select value.
pub fn page_value(index: usize) -> String {
    format!("{PAGE_VALUE_PREFIX}{index}")
}

/// Decode a select value into a zero-based page index.
///
/// The "more pages" sentinel and anything unparseable yield `None`.
pub fn parse_page_value(value: &str) -> Option<usize> {
    value.strip_prefix(PAGE_VALUE_PREFIX)?.parse::<usize>().ok()
}
