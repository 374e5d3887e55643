//! Control specs to twilight message components.

use twilight_model::channel::message::{
    EmojiReactionType,
    component::{
        ActionRow, Button, ButtonStyle as TwilightButtonStyle, Component, SelectMenu,
        SelectMenuOption, SelectMenuType,
    },
};

use pager_core::{ButtonSpec, ButtonStyle, SelectMenuSpec, SelectOption};

fn unicode_emoji(name: Option<String>) -> Option<EmojiReactionType> {
    name.map(|name| EmojiReactionType::Unicode { name })
}

fn button_style(style: ButtonStyle) -> TwilightButtonStyle {
    match style {
        ButtonStyle::Primary => TwilightButtonStyle::Primary,
        ButtonStyle::Secondary => TwilightButtonStyle::Secondary,
        ButtonStyle::Success => TwilightButtonStyle::Success,
        ButtonStyle::Danger => TwilightButtonStyle::Danger,
        ButtonStyle::Link => TwilightButtonStyle::Link,
    }
}

pub fn button(spec: ButtonSpec) -> Component {
    Component::Button(Button {
        custom_id: Some(spec.custom_id),
        disabled: spec.disabled,
        emoji: unicode_emoji(spec.emoji),
        label: Some(spec.label),
        style: button_style(spec.style),
        url: None,
        sku_id: None,
    })
}

fn select_option(option: SelectOption) -> SelectMenuOption {
    SelectMenuOption {
        default: option.default,
        description: option.description,
        emoji: unicode_emoji(option.emoji),
        label: option.label,
        value: option.value,
    }
}

pub fn select_menu(spec: SelectMenuSpec) -> Component {
    Component::SelectMenu(SelectMenu {
        channel_types: None,
        custom_id: spec.custom_id,
        default_values: None,
        disabled: spec.disabled,
        kind: SelectMenuType::Text,
        max_values: Some(1),
        min_values: Some(1),
        options: Some(spec.options.into_iter().map(select_option).collect()),
        placeholder: spec.placeholder,
    })
}

pub fn action_row(components: Vec<Component>) -> Component {
    Component::ActionRow(ActionRow {
        components,
    })
}
