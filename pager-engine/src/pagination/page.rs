//! Page sources: fixed sequences and generator functions.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use pager_core::{
    EmbedSection, MAX_GENERATED_PAGES, MessagePayload, PageContent, PaginationContext,
    PaginatorError, Result,
};

/// Builds one page's content on every render of that index.
pub type PageFn = Arc<
    dyn Fn(usize, PaginationContext) -> BoxFuture<'static, anyhow::Result<PageContent>>
        + Send
        + Sync,
>;

/// Produces the page at an index, or `None` once there are no more pages.
pub type PageGenerator = Arc<
    dyn Fn(usize, PaginationContext) -> BoxFuture<'static, anyhow::Result<Option<Page>>>
        + Send
        + Sync,
>;

/// One realized page.
#[derive(Clone)]
pub enum Page {
    Static(PageContent),
    /// Resolved lazily each time the page is rendered.
    Lazy(PageFn),
}

impl Page {
    pub fn lazy<F, Fut>(builder: F) -> Self
    where
        F: Fn(usize, PaginationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<PageContent>> + Send + 'static,
    {
        Page::Lazy(Arc::new(move |index, context| builder(index, context).boxed()))
    }

    /// Produce the displayable content for `index`.
    pub async fn resolve(&self, index: usize, context: &PaginationContext) -> Result<PageContent> {
        match self {
            Page::Static(content) => Ok(content.clone()),
            Page::Lazy(builder) => builder(index, context.clone())
                .await
                .map_err(PaginatorError::PageSource),
        }
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Static(content) => f.debug_tuple("Static").field(content).finish(),
            Page::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<PageContent> for Page {
    fn from(value: PageContent) -> Self {
        Page::Static(value)
    }
}

impl From<&str> for Page {
    fn from(value: &str) -> Self {
        Page::Static(value.into())
    }
}

impl From<String> for Page {
    fn from(value: String) -> Self {
        Page::Static(value.into())
    }
}

impl From<EmbedSection> for Page {
    fn from(value: EmbedSection) -> Self {
        Page::Static(value.into())
    }
}

impl From<MessagePayload> for Page {
    fn from(value: MessagePayload) -> Self {
        Page::Static(value.into())
    }
}

/// Where a session's pages come from.
#[derive(Clone)]
pub enum PageSource {
    Fixed(Vec<Page>),
    Generator(PageGenerator),
}

impl PageSource {
    pub fn fixed<I, P>(pages: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Page>,
    {
        PageSource::Fixed(pages.into_iter().map(Into::into).collect())
    }

    pub fn generator<F, Fut>(generator: F) -> Self
    where
        F: Fn(usize, PaginationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Option<Page>>> + Send + 'static,
    {
        PageSource::Generator(Arc::new(move |index, context| {
            generator(index, context).boxed()
        }))
    }

    /// Realize the ordered page sequence.
    ///
    /// Generators are called with increasing indices from 0 until they return
    /// `None`. More than [`MAX_GENERATED_PAGES`] pages is an error.
    pub async fn load(&self, context: &PaginationContext) -> Result<Vec<Page>> {
        let generator = match self {
            PageSource::Fixed(pages) => return Ok(pages.clone()),
            PageSource::Generator(generator) => generator,
        };

        let mut pages = Vec::new();
        for index in 0..=MAX_GENERATED_PAGES {
            let generated = generator(index, context.clone())
                .await
                .map_err(PaginatorError::PageSource)?;

            match generated {
                Some(page) => pages.push(page),
                None => return Ok(pages),
            }
        }

        Err(PaginatorError::PageOverflow {
            limit: MAX_GENERATED_PAGES,
        })
    }
}

impl fmt::Debug for PageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSource::Fixed(pages) => f.debug_tuple("Fixed").field(&pages.len()).finish(),
            PageSource::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn generator_stops_at_first_none() {
        let source = PageSource::generator(|index, _context| async move {
            Ok((index < 4).then(|| Page::from(format!("row {index}"))))
        });

        let pages = source.load(&PaginationContext::default()).await.unwrap();
        assert_eq!(pages.len(), 4);
    }

    #[tokio::test]
    async fn endless_generator_overflows_after_limit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = PageSource::generator(move |index, _context| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok(Some(Page::from(format!("row {index}")))) }
        });

        let err = source.load(&PaginationContext::default()).await.unwrap_err();
        assert!(matches!(err, PaginatorError::PageOverflow { limit: 1000 }));
        assert_eq!(calls.load(Ordering::SeqCst), MAX_GENERATED_PAGES + 1);
    }

    #[tokio::test]
    async fn generator_may_fill_the_limit_exactly() {
        let source = PageSource::generator(|index, _context| async move {
            Ok((index < MAX_GENERATED_PAGES).then(|| Page::from("row")))
        });

        let pages = source.load(&PaginationContext::default()).await.unwrap();
        assert_eq!(pages.len(), MAX_GENERATED_PAGES);
    }

    #[tokio::test]
    async fn generator_sees_owner_in_context() {
        let source = PageSource::generator(|index, context: PaginationContext| async move {
            Ok((index == 0).then(|| Page::from(context.user_id.unwrap_or_default())))
        });
        let context = PaginationContext::new(0, Some("U1".to_owned()));

        let pages = source.load(&context).await.unwrap();
        let content = pages[0].resolve(0, &context).await.unwrap();
        assert_eq!(content.text(), Some("U1"));
    }

    #[tokio::test]
    async fn lazy_page_receives_its_index() {
        let page = Page::lazy(|index, context: PaginationContext| async move {
            Ok(PageContent::Text(format!("{index}/{}", context.total_pages)))
        });
        let mut context = PaginationContext::default();
        context.total_pages = 9;

        let content = page.resolve(3, &context).await.unwrap();
        assert_eq!(content.text(), Some("3/9"));
    }

    #[tokio::test]
    async fn failing_generator_is_a_page_source_error() {
        let source = PageSource::generator(|_index, _context| async move {
            Err::<Option<Page>, _>(anyhow::anyhow!("database offline"))
        });

        let err = source.load(&PaginationContext::default()).await.unwrap_err();
        assert!(matches!(err, PaginatorError::PageSource(_)));
    }
}
