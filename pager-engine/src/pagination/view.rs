//! Page + control composition for one render of a session.

use pager_core::{PageContent, PaginationContext, PaginatorError, PaginatorSettings, Result};

use super::components::{ControlRow, build_nav_components};
use super::page::Page;

/// Content and controls for one frame of the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    pub content: PageContent,
    pub rows: Vec<ControlRow>,
}

/// Render the page at the context's current index.
///
/// Lazy pages are resolved here. When footer display is enabled the page text
/// replaces the first embed's footer. Never mutates the context.
pub async fn render_page(
    pages: &[Page],
    context: &PaginationContext,
    settings: &PaginatorSettings,
    force_disabled: bool,
) -> Result<RenderedPage> {
    let page = pages
        .get(context.current_page)
        .ok_or(PaginatorError::NoPages)?;
    let mut content = page.resolve(context.current_page, context).await?;

    if settings.page_display.show_in_footer {
        let text = settings
            .page_display
            .render(context.current_page, context.total_pages);
        content.set_footer(text);
    }

    let disabled = force_disabled && context.total_pages > 1;
    let rows = build_nav_components(context, settings, disabled);

    Ok(RenderedPage { content, rows })
}

#[cfg(test)]
mod tests {
    use pager_core::{EmbedSection, PageDisplay};

    use super::*;

    fn context_at(current_page: usize, total_pages: usize) -> PaginationContext {
        PaginationContext {
            current_page,
            total_pages,
            ..PaginationContext::default()
        }
    }

    #[tokio::test]
    async fn footer_text_is_injected_into_first_embed() {
        let pages = vec![
            Page::from(EmbedSection::new().title("one")),
            Page::from(EmbedSection::new().title("two").footer("stale")),
        ];
        let settings = PaginatorSettings {
            page_display: PageDisplay {
                show_in_footer: true,
                ..PageDisplay::default()
            },
            ..PaginatorSettings::default()
        };

        let rendered = render_page(&pages, &context_at(1, 2), &settings, false)
            .await
            .unwrap();

        assert_eq!(rendered.content.embeds()[0].footer.as_deref(), Some("Page 2/2"));
        assert_eq!(pages.len(), 2);
    }

    #[tokio::test]
    async fn plain_text_is_left_alone_with_footer_display() {
        let pages = vec![Page::from("A"), Page::from("B")];
        let settings = PaginatorSettings {
            page_display: PageDisplay {
                show_in_footer: true,
                ..PageDisplay::default()
            },
            ..PaginatorSettings::default()
        };

        let rendered = render_page(&pages, &context_at(0, 2), &settings, false)
            .await
            .unwrap();

        assert_eq!(rendered.content, PageContent::from("A"));
        assert_eq!(rendered.rows.len(), 1);
    }

    #[tokio::test]
    async fn single_page_has_no_rows_even_when_forced_disabled() {
        let pages = vec![Page::from("only")];

        let rendered = render_page(
            &pages,
            &context_at(0, 1),
            &PaginatorSettings::default(),
            true,
        )
        .await
        .unwrap();

        assert!(rendered.rows.is_empty());
    }
}
