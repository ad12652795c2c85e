//! Lazy pagination over listings of GitHub REST API.

use futures::{Stream, stream};

/// The number of items requested per page, the maximum GitHub REST API allows.
pub const PER_PAGE: usize = 100;

/// Turns a page fetcher into a stream of pages, starting at page 1.
///
/// A page is only requested once the previous one has been consumed, so a consumer that stops early
/// saves the remaining requests. The stream ends after the first page holding less than
/// [`PER_PAGE`] items, or after the first error.
pub fn paginate<T, F, Fut>(mut fetch: F) -> impl Stream<Item = anyhow::Result<Vec<T>>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = anyhow::Result<Vec<T>>>,
{
    stream::try_unfold(Some(1), move |page: Option<u32>| {
        let request = page.map(|page| (page, fetch(page)));
        async move {
            let Some((page, request)) = request else {
                return Ok(None);
            };
            let items = request.await?;
            let next = (items.len() >= PER_PAGE).then_some(page + 1);
            Ok(Some((items, next)))
        }
    })
}
