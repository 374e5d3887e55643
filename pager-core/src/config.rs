//! Session options, navigation modes and the settings they load from.

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::adapter::ButtonStyle;
use crate::context::PaginationContext;

/// Default session timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
/// Default page indicator template.
pub const DEFAULT_PAGE_FORMAT: &str = "Page {current}/{total}";

/// Authorization predicate over the acting user id and a context snapshot.
pub type UserFilter =
    Arc<dyn Fn(Option<String>, PaginationContext) -> BoxFuture<'static, bool> + Send + Sync>;
/// Callback receiving a context snapshot.
pub type ContextCallback =
    Arc<dyn Fn(PaginationContext) -> BoxFuture<'static, ()> + Send + Sync>;
/// Callback receiving old index, new index and a context snapshot.
pub type PageChangeCallback =
    Arc<dyn Fn(usize, usize, PaginationContext) -> BoxFuture<'static, ()> + Send + Sync>;

/// Which controls accompany the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    #[default]
    Buttons,
    SelectMenu,
    Hybrid,
}

impl NavigationMode {
    pub fn shows_buttons(self) -> bool {
        matches!(self, NavigationMode::Buttons | NavigationMode::Hybrid)
    }

    pub fn shows_select_menu(self) -> bool {
        matches!(self, NavigationMode::SelectMenu | NavigationMode::Hybrid)
    }
}

impl FromStr for NavigationMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buttons" => Ok(NavigationMode::Buttons),
            "select" | "select_menu" | "select-menu" => Ok(NavigationMode::SelectMenu),
            "hybrid" => Ok(NavigationMode::Hybrid),
            other => Err(format!("unknown navigation mode `{other}`")),
        }
    }
}

/// Per-button label/emoji/style override. Unset fields keep the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonOverride {
    pub label: Option<String>,
    pub emoji: Option<String>,
    pub style: Option<ButtonStyle>,
}

impl ButtonOverride {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = Some(style);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonOverrides {
    pub first: ButtonOverride,
    pub previous: ButtonOverride,
    pub next: ButtonOverride,
    pub last: ButtonOverride,
}

/// Where and how the "page X of Y" text is shown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageDisplay {
    /// Template with `{current}` and `{total}` placeholders.
    pub format: String,
    /// Add a disabled indicator button between previous and next.
    pub show_as_button: bool,
    /// Write the text into the footer of the page's first embed.
    pub show_in_footer: bool,
}

impl Default for PageDisplay {
    fn default() -> Self {
        Self {
            format: DEFAULT_PAGE_FORMAT.to_owned(),
            show_as_button: false,
            show_in_footer: false,
        }
    }
}

impl PageDisplay {
    /// Substitute the one-based current page and the total into the template.
    pub fn render(&self, current_page: usize, total_pages: usize) -> String {
        self.format
            .replace("{current}", &(current_page + 1).to_string())
            .replace("{total}", &total_pages.to_string())
    }
}

/// Plain-data part of the configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginatorSettings {
    pub mode: NavigationMode,
    pub timeout_secs: u64,
    /// Send as an ephemeral reply where the platform supports it.
    pub ephemeral: bool,
    pub buttons: ButtonOverrides,
    pub page_display: PageDisplay,
    pub start_page: usize,
    pub show_first_last: bool,
    /// Delete the message on end instead of freezing its controls.
    pub delete_on_end: bool,
    /// Only `user_id` may interact.
    pub single_user_mode: bool,
    /// Owning user. Resolved from the send target when unset.
    pub user_id: Option<String>,
}

impl Default for PaginatorSettings {
    fn default() -> Self {
        Self {
            mode: NavigationMode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            ephemeral: false,
            buttons: ButtonOverrides::default(),
            page_display: PageDisplay::default(),
            start_page: 0,
            show_first_last: true,
            delete_on_end: false,
            single_user_mode: false,
            user_id: None,
        }
    }
}

impl PaginatorSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Immutable configuration of one session.
#[derive(Clone, Default)]
pub struct PaginatorOptions {
    pub settings: PaginatorSettings,
    pub filter: Option<UserFilter>,
    pub on_timeout: Option<ContextCallback>,
    pub on_page_change: Option<PageChangeCallback>,
    pub on_destroy: Option<ContextCallback>,
    /// Overrides `settings.timeout_secs` when finer than a second is needed.
    pub timeout: Option<Duration>,
}

impl PaginatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: PaginatorSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Effective collector timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or_else(|| self.settings.timeout())
    }

    pub fn mode(mut self, mode: NavigationMode) -> Self {
        self.settings.mode = mode;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.settings.ephemeral = ephemeral;
        self
    }

    pub fn buttons(mut self, buttons: ButtonOverrides) -> Self {
        self.settings.buttons = buttons;
        self
    }

    pub fn page_display(mut self, page_display: PageDisplay) -> Self {
        self.settings.page_display = page_display;
        self
    }

    pub fn start_page(mut self, start_page: usize) -> Self {
        self.settings.start_page = start_page;
        self
    }

    pub fn show_first_last(mut self, show: bool) -> Self {
        self.settings.show_first_last = show;
        self
    }

    pub fn delete_on_end(mut self, delete: bool) -> Self {
        self.settings.delete_on_end = delete;
        self
    }

    /// Restrict interaction to `user_id`, or to the send target's author when `None`.
    pub fn single_user(mut self, user_id: Option<String>) -> Self {
        self.settings.single_user_mode = true;
        if user_id.is_some() {
            self.settings.user_id = user_id;
        }
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.settings.user_id = Some(user_id.into());
        self
    }

    pub fn filter<F, Fut>(mut self, filter: F) -> Self
    where
        F: Fn(Option<String>, PaginationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.filter = Some(Arc::new(move |user_id, context| {
            filter(user_id, context).boxed()
        }));
        self
    }

    /// Runs when the collector times out, before the session is torn down.
    ///
    /// No session lock is held while callbacks run, so they may call back into
    /// the paginator, `destroy` included.
    pub fn on_timeout<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(PaginationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_timeout = Some(Arc::new(move |context| callback(context).boxed()));
        self
    }

    /// Runs with `(old_page, new_page, context)` after the page index moved.
    pub fn on_page_change<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(usize, usize, PaginationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_page_change = Some(Arc::new(move |old, new, context| {
            callback(old, new, context).boxed()
        }));
        self
    }

    pub fn on_destroy<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(PaginationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_destroy = Some(Arc::new(move |context| callback(context).boxed()));
        self
    }
}

impl fmt::Debug for PaginatorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatorOptions")
            .field("settings", &self.settings)
            .field("timeout", &self.timeout())
            .field("filter", &self.filter.is_some())
            .field("on_timeout", &self.on_timeout.is_some())
            .field("on_page_change", &self.on_page_change.is_some())
            .field("on_destroy", &self.on_destroy.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_substitutes_one_based_page() {
        let display = PageDisplay::default();
        assert_eq!(display.render(0, 3), "Page 1/3");

        let custom = PageDisplay {
            format: "{current} of {total} ({current})".to_owned(),
            ..PageDisplay::default()
        };
        assert_eq!(custom.render(4, 9), "5 of 9 (5)");
    }

    #[test]
    fn defaults_match_documented_values() {
        let options = PaginatorOptions::new();
        assert_eq!(options.settings.mode, NavigationMode::Buttons);
        assert_eq!(options.timeout(), Duration::from_secs(300));
        assert!(options.settings.show_first_last);
        assert!(!options.settings.delete_on_end);
        assert!(!options.settings.single_user_mode);
    }

    #[test]
    fn navigation_mode_parses_env_spellings() {
        assert_eq!("Hybrid".parse::<NavigationMode>(), Ok(NavigationMode::Hybrid));
        assert_eq!(
            "select-menu".parse::<NavigationMode>(),
            Ok(NavigationMode::SelectMenu)
        );
        assert!("carousel".parse::<NavigationMode>().is_err());
        assert!(NavigationMode::Hybrid.shows_buttons());
        assert!(!NavigationMode::Buttons.shows_select_menu());
    }

    #[test]
    fn single_user_keeps_explicit_owner() {
        let options = PaginatorOptions::new().user_id("U1").single_user(None);
        assert!(options.settings.single_user_mode);
        assert_eq!(options.settings.user_id.as_deref(), Some("U1"));
    }
}
