//! Page content: plain text, embed sections, or both.

use serde::{Deserialize, Serialize};

/// Displayable material for one page.
///
/// The engine never looks inside beyond footer injection; adapters decide how
/// each variant is rendered on their platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageContent {
    /// Plain message text.
    Text(String),
    /// Text plus embeds and attachments.
    Payload(MessagePayload),
}

impl PageContent {
    /// Overwrite the footer of the first embed section.
    ///
    /// Returns `false` when the content has no embed section to write to.
    pub fn set_footer(&mut self, text: impl Into<String>) -> bool {
        match self {
            PageContent::Payload(payload) => match payload.embeds.first_mut() {
                Some(embed) => {
                    embed.footer = Some(text.into());
                    true
                }
                None => false,
            },
            PageContent::Text(_) => false,
        }
    }

    /// Message text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            PageContent::Text(text) => Some(text),
            PageContent::Payload(payload) => payload.content.as_deref(),
        }
    }

    /// Embed sections carried by this page.
    pub fn embeds(&self) -> &[EmbedSection] {
        match self {
            PageContent::Text(_) => &[],
            PageContent::Payload(payload) => &payload.embeds,
        }
    }
}

impl From<&str> for PageContent {
    fn from(value: &str) -> Self {
        PageContent::Text(value.to_owned())
    }
}

impl From<String> for PageContent {
    fn from(value: String) -> Self {
        PageContent::Text(value)
    }
}

impl From<MessagePayload> for PageContent {
    fn from(value: MessagePayload) -> Self {
        PageContent::Payload(value)
    }
}

impl From<EmbedSection> for PageContent {
    fn from(value: EmbedSection) -> Self {
        PageContent::Payload(MessagePayload {
            embeds: vec![value],
            ..MessagePayload::default()
        })
    }
}

/// Structured page payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub content: Option<String>,
    pub embeds: Vec<EmbedSection>,
    /// Files uploaded with the initial message.
    pub files: Vec<Attachment>,
}

/// Platform-neutral embed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedSection {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub color: Option<u32>,
    pub fields: Vec<EmbedField>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub footer: Option<String>,
}

impl EmbedSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// File attached to a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub description: Option<String>,
}
