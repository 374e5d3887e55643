//! Navigation control builders (button row and page select menu).

use pager_core::{
    ButtonOverride, ButtonSpec, ButtonStyle, PaginationContext, PaginatorSettings,
    SelectMenuSpec, SelectOption,
};

use super::token::{INDICATOR_ID, MORE_PAGES_VALUE, NavAction, SELECT_ID, page_value};

/// Most options a select menu can hold, sentinel included.
pub const MAX_SELECT_OPTIONS: usize = 25;

const SELECT_PLACEHOLDER: &str = "Jump to page...";

/// One row of controls, still platform neutral.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlRow {
    Buttons(Vec<ButtonSpec>),
    Select(SelectMenuSpec),
}

/// Build the navigation rows for the current state.
///
/// Sessions with a single page get no controls at all.
pub fn build_nav_components(
    context: &PaginationContext,
    settings: &PaginatorSettings,
    disabled: bool,
) -> Vec<ControlRow> {
    if context.total_pages <= 1 {
        return vec![];
    }

    let mut rows = Vec::with_capacity(2);

    if settings.mode.shows_buttons() {
        rows.push(ControlRow::Buttons(build_button_row(context, settings, disabled)));
    }

    if settings.mode.shows_select_menu() {
        rows.push(ControlRow::Select(build_select_menu(context, disabled)));
    }

    rows
}

fn build_button_row(
    context: &PaginationContext,
    settings: &PaginatorSettings,
    disabled: bool,
) -> Vec<ButtonSpec> {
    let at_start = disabled || context.is_first_page();
    let at_end = disabled || context.is_last_page();
    let overrides = &settings.buttons;

    let mut buttons = Vec::with_capacity(5);

    if settings.show_first_last {
        buttons.push(nav_button(NavButton::First, &overrides.first, at_start));
    }

    buttons.push(nav_button(NavButton::Previous, &overrides.previous, at_start));

    if settings.page_display.show_as_button {
        buttons.push(ButtonSpec {
            custom_id: INDICATOR_ID.to_owned(),
            label: settings
                .page_display
                .render(context.current_page, context.total_pages),
            style: ButtonStyle::Secondary,
            emoji: None,
            disabled: true,
        });
    }

    buttons.push(nav_button(NavButton::Next, &overrides.next, at_end));

    if settings.show_first_last {
        buttons.push(nav_button(NavButton::Last, &overrides.last, at_end));
    }

    buttons
}

/// Controls that render as a plain navigation button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NavButton {
    First,
    Previous,
    Next,
    Last,
}

impl NavButton {
    fn action(self) -> NavAction {
        match self {
            NavButton::First => NavAction::First,
            NavButton::Previous => NavAction::Previous,
            NavButton::Next => NavAction::Next,
            NavButton::Last => NavAction::Last,
        }
    }

    fn default_look(self) -> (&'static str, ButtonStyle) {
        match self {
            NavButton::First => ("⏮️", ButtonStyle::Secondary),
            NavButton::Previous => ("◀️", ButtonStyle::Primary),
            NavButton::Next => ("▶️", ButtonStyle::Primary),
            NavButton::Last => ("⏭️", ButtonStyle::Secondary),
        }
    }
}

fn nav_button(button: NavButton, overrides: &ButtonOverride, disabled: bool) -> ButtonSpec {
    let (label, style) = button.default_look();

    ButtonSpec {
        custom_id: button.action().custom_id().to_owned(),
        label: overrides.label.clone().unwrap_or_else(|| label.to_owned()),
        style: overrides.style.unwrap_or(style),
        emoji: overrides.emoji.clone(),
        disabled,
    }
}

fn build_select_menu(context: &PaginationContext, disabled: bool) -> SelectMenuSpec {
    let total = context.total_pages;
    let collapsed = total > MAX_SELECT_OPTIONS;
    let listed = if collapsed {
        MAX_SELECT_OPTIONS - 1
    } else {
        total
    };

    let mut options: Vec<SelectOption> = (0..listed)
        .map(|index| SelectOption {
            label: format!("Page {}", index + 1),
            value: page_value(index),
            description: Some(format!("Go to page {}", index + 1)),
            emoji: None,
            default: index == context.current_page,
        })
        .collect();

    if collapsed {
        options.push(SelectOption {
            label: format!("More pages ({MAX_SELECT_OPTIONS}-{total})..."),
            value: MORE_PAGES_VALUE.to_owned(),
            description: Some(format!("There are {} more pages", total - listed)),
            emoji: None,
            default: false,
        });
    }

    SelectMenuSpec {
        custom_id: SELECT_ID.to_owned(),
        options,
        placeholder: Some(SELECT_PLACEHOLDER.to_owned()),
        disabled,
    }
}

#[cfg(test)]
mod tests {
    use pager_core::{ButtonOverrides, NavigationMode, PageDisplay};

    use super::*;

    fn context_at(current_page: usize, total_pages: usize) -> PaginationContext {
        PaginationContext {
            current_page,
            total_pages,
            is_active: true,
            ..PaginationContext::default()
        }
    }

    fn settings(mode: NavigationMode) -> PaginatorSettings {
        PaginatorSettings {
            mode,
            ..PaginatorSettings::default()
        }
    }

    fn buttons(rows: &[ControlRow]) -> &[ButtonSpec] {
        rows.iter()
            .find_map(|row| match row {
                ControlRow::Buttons(buttons) => Some(buttons.as_slice()),
                ControlRow::Select(_) => None,
            })
            .expect("button row")
    }

    fn select(rows: &[ControlRow]) -> &SelectMenuSpec {
        rows.iter()
            .find_map(|row| match row {
                ControlRow::Select(menu) => Some(menu),
                ControlRow::Buttons(_) => None,
            })
            .expect("select row")
    }

    fn disabled_by_id(buttons: &[ButtonSpec]) -> Vec<(&str, bool)> {
        buttons
            .iter()
            .map(|button| (button.custom_id.as_str(), button.disabled))
            .collect()
    }

    #[test]
    fn single_page_renders_nothing_in_any_mode() {
        for mode in [
            NavigationMode::Buttons,
            NavigationMode::SelectMenu,
            NavigationMode::Hybrid,
        ] {
            assert!(build_nav_components(&context_at(0, 1), &settings(mode), false).is_empty());
        }
    }

    #[test]
    fn first_page_disables_backward_buttons() {
        let rows = build_nav_components(
            &context_at(0, 3),
            &settings(NavigationMode::Buttons),
            false,
        );

        assert_eq!(rows.len(), 1);
        assert_eq!(
            disabled_by_id(buttons(&rows)),
            vec![
                ("paginator_first", true),
                ("paginator_previous", true),
                ("paginator_next", false),
                ("paginator_last", false),
            ]
        );
    }

    #[test]
    fn last_page_disables_forward_buttons() {
        let rows = build_nav_components(
            &context_at(2, 3),
            &settings(NavigationMode::Buttons),
            false,
        );

        assert_eq!(
            disabled_by_id(buttons(&rows)),
            vec![
                ("paginator_first", false),
                ("paginator_previous", false),
                ("paginator_next", true),
                ("paginator_last", true),
            ]
        );
    }

    #[test]
    fn disabled_override_freezes_every_control() {
        let rows = build_nav_components(&context_at(1, 3), &settings(NavigationMode::Hybrid), true);

        assert!(buttons(&rows).iter().all(|button| button.disabled));
        assert!(select(&rows).disabled);
    }

    #[test]
    fn indicator_sits_between_previous_and_next() {
        let mut config = settings(NavigationMode::Buttons);
        config.show_first_last = false;
        config.page_display = PageDisplay {
            format: "{current} / {total}".to_owned(),
            show_as_button: true,
            show_in_footer: false,
        };

        let rows = build_nav_components(&context_at(1, 4), &config, false);
        let row = buttons(&rows);

        assert_eq!(row.len(), 3);
        assert_eq!(row[1].custom_id, INDICATOR_ID);
        assert_eq!(row[1].label, "2 / 4");
        assert!(row[1].disabled);
    }

    #[test]
    fn overrides_replace_labels_and_styles() {
        let mut config = settings(NavigationMode::Buttons);
        config.buttons = ButtonOverrides {
            next: ButtonOverride::label("Next")
                .with_style(ButtonStyle::Success)
                .with_emoji("➡️"),
            ..ButtonOverrides::default()
        };

        let rows = build_nav_components(&context_at(0, 2), &config, false);
        let next = &buttons(&rows)[2];

        assert_eq!(next.label, "Next");
        assert_eq!(next.style, ButtonStyle::Success);
        assert_eq!(next.emoji.as_deref(), Some("➡️"));
        assert_eq!(buttons(&rows)[1].label, "◀️");
        assert_eq!(buttons(&rows)[1].style, ButtonStyle::Primary);
    }

    #[test]
    fn default_buttons_keep_their_own_look() {
        let rows = build_nav_components(
            &context_at(1, 3),
            &settings(NavigationMode::Hybrid),
            false,
        );
        let looks: Vec<(&str, &str, ButtonStyle)> = buttons(&rows)
            .iter()
            .filter(|button| button.custom_id != INDICATOR_ID)
            .map(|button| (button.custom_id.as_str(), button.label.as_str(), button.style))
            .collect();

        assert_eq!(
            looks,
            vec![
                ("paginator_first", "⏮️", ButtonStyle::Secondary),
                ("paginator_previous", "◀️", ButtonStyle::Primary),
                ("paginator_next", "▶️", ButtonStyle::Primary),
                ("paginator_last", "⏭️", ButtonStyle::Secondary),
            ]
        );
        assert_eq!(select(&rows).custom_id, SELECT_ID);
    }

    #[test]
    fn select_menu_lists_every_page_up_to_limit() {
        let rows = build_nav_components(
            &context_at(3, 25),
            &settings(NavigationMode::SelectMenu),
            false,
        );
        let menu = select(&rows);

        assert_eq!(rows.len(), 1);
        assert_eq!(menu.options.len(), 25);
        assert_eq!(menu.options[24].value, "page_24");
        assert_eq!(
            menu.options
                .iter()
                .filter(|option| option.default)
                .map(|option| option.value.as_str())
                .collect::<Vec<_>>(),
            vec!["page_3"]
        );
    }

    #[test]
    fn select_menu_collapses_overflow_into_sentinel() {
        let rows = build_nav_components(
            &context_at(5, 30),
            &settings(NavigationMode::SelectMenu),
            false,
        );
        let menu = select(&rows);
        let sentinel = &menu.options[24];

        assert_eq!(menu.options.len(), 25);
        assert_eq!(sentinel.value, MORE_PAGES_VALUE);
        assert_eq!(sentinel.label, "More pages (25-30)...");
        assert_eq!(sentinel.description.as_deref(), Some("There are 6 more pages"));
        assert!(!sentinel.default);
        assert_eq!(menu.options.iter().filter(|option| option.default).count(), 1);
        assert!(menu.options[5].default);
    }

    #[test]
    fn select_menu_marks_nothing_when_current_page_is_collapsed() {
        let rows = build_nav_components(
            &context_at(27, 30),
            &settings(NavigationMode::SelectMenu),
            false,
        );

        assert!(select(&rows).options.iter().all(|option| !option.default));
    }

    #[test]
    fn hybrid_renders_buttons_then_select() {
        let rows = build_nav_components(
            &context_at(0, 2),
            &settings(NavigationMode::Hybrid),
            false,
        );

        assert!(matches!(rows[0], ControlRow::Buttons(_)));
        assert!(matches!(rows[1], ControlRow::Select(_)));
    }
}
