//! Page content to twilight embeds and attachments.

use twilight_model::{
    channel::message::embed::Embed,
    http::attachment::Attachment as TwilightAttachment,
};
use twilight_util::builder::embed::{
    EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder, ImageSource,
};

use pager_core::{Attachment, EmbedSection, PageContent};

/// Message text, embeds and files ready for a twilight request.
#[derive(Debug, Default)]
pub struct MessageParts {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub attachments: Vec<TwilightAttachment>,
}

/// Build one validated embed.
pub fn build_embed(section: &EmbedSection) -> anyhow::Result<Embed> {
    let mut builder = EmbedBuilder::new();

    if let Some(title) = &section.title {
        builder = builder.title(title);
    }
    if let Some(description) = &section.description {
        builder = builder.description(description);
    }
    if let Some(url) = &section.url {
        builder = builder.url(url);
    }
    if let Some(color) = section.color {
        builder = builder.color(color);
    }
    for field in &section.fields {
        let mut field_builder = EmbedFieldBuilder::new(&field.name, &field.value);
        if field.inline {
            field_builder = field_builder.inline();
        }
        builder = builder.field(field_builder.build());
    }
    if let Some(image_url) = &section.image_url {
        builder = builder.image(ImageSource::url(image_url)?);
    }
    if let Some(thumbnail_url) = &section.thumbnail_url {
        builder = builder.thumbnail(ImageSource::url(thumbnail_url)?);
    }
    if let Some(footer) = &section.footer {
        builder = builder.footer(EmbedFooterBuilder::new(footer).build());
    }

    Ok(builder.validate()?.build())
}

fn attachment(index: usize, file: &Attachment) -> TwilightAttachment {
    let mut attachment =
        TwilightAttachment::from_bytes(file.filename.clone(), file.bytes.clone(), index as u64);
    if let Some(description) = &file.description {
        attachment.description(description.clone());
    }
    attachment
}

/// Split page content into request parts.
///
/// Files are only included when `with_files` is set; edits keep the files
/// of the original message.
pub fn message_parts(content: &PageContent, with_files: bool) -> anyhow::Result<MessageParts> {
    match content {
        PageContent::Text(text) => Ok(MessageParts {
            content: Some(text.clone()),
            ..MessageParts::default()
        }),
        PageContent::Payload(payload) => {
            let embeds = payload
                .embeds
                .iter()
                .map(build_embed)
                .collect::<anyhow::Result<Vec<_>>>()?;
            let attachments = if with_files {
                payload
                    .files
                    .iter()
                    .enumerate()
                    .map(|(index, file)| attachment(index, file))
                    .collect()
            } else {
                Vec::new()
            };

            Ok(MessageParts {
                content: payload.content.clone(),
                embeds,
                attachments,
            })
        }
    }
}
