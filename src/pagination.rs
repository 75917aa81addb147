//! Forward-only iteration over list endpoints
//!
//! A [`Paginator`] calls a list operation, yields the page, follows the
//! page's `_next` link and repeats until a page comes back without one.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::stream::{self, Stream, StreamExt};
use url::Url;

use crate::error::{ClumioError, Result};
use crate::types::ListResponse;

/// A page that may point at the page after it
pub trait ListPage {
    /// `href` of the `_next` link, if any
    fn next_link(&self) -> Option<&str>;
}

impl<T> ListPage for ListResponse<T> {
    fn next_link(&self) -> Option<&str> {
        self.links.next.as_ref().map(|link| link.href.as_str())
    }
}

/// Extract the `start` query parameter from a `_next` link.
///
/// Links are usually relative (`/tasks?limit=10&start=2`); absolute links
/// are accepted too.
pub fn start_from_link(href: &str) -> Result<String> {
    let base = Url::parse("http://localhost/")?;
    let url = Url::options().base_url(Some(&base)).parse(href)?;

    url.query_pairs()
        .find(|(key, _)| key == "start")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| ClumioError::MalformedLink(href.to_string()))
}

type PageFuture<T> = Pin<Box<dyn Future<Output = Result<T>> + Send>>;
type FetchPage<T> = Arc<dyn Fn(Option<String>) -> PageFuture<T> + Send + Sync>;
type PageStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

enum State {
    Next(Option<String>),
    Failed(ClumioError),
    Done,
}

/// A restartable stream of list pages
pub struct Paginator<T> {
    seed: Option<String>,
    fetch: FetchPage<T>,
    stream: PageStream<T>,
}

impl<T> Paginator<T>
where
    T: ListPage + Send + 'static,
{
    /// Creates a paginator that starts at `seed` and fetches each page with
    /// `execute(start)`.
    pub fn new<F, Fut>(seed: Option<String>, execute: F) -> Self
    where
        F: Fn(Option<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let fetch: FetchPage<T> =
            Arc::new(move |start| -> PageFuture<T> { Box::pin(execute(start)) });
        let stream = Self::build_stream(seed.clone(), fetch.clone());
        Self {
            seed,
            fetch,
            stream,
        }
    }

    /// A fresh paginator positioned at the original starting point
    pub fn restart(&self) -> Self {
        Self {
            seed: self.seed.clone(),
            fetch: self.fetch.clone(),
            stream: Self::build_stream(self.seed.clone(), self.fetch.clone()),
        }
    }

    fn build_stream(seed: Option<String>, fetch: FetchPage<T>) -> PageStream<T> {
        let stream = stream::unfold(State::Next(seed), move |state| {
            let fetch = fetch.clone();
            async move {
                let start = match state {
                    State::Next(start) => start,
                    State::Failed(e) => return Some((Err(e), State::Done)),
                    State::Done => return None,
                };
                match fetch(start).await {
                    Ok(page) => {
                        let next_state = match page.next_link() {
                            None => State::Done,
                            Some(href) => match start_from_link(href) {
                                Ok(start) => State::Next(Some(start)),
                                Err(e) => State::Failed(e),
                            },
                        };
                        Some((Ok(page), next_state))
                    }
                    Err(e) => Some((Err(e), State::Done)),
                }
            }
        });
        Box::pin(stream)
    }
}

impl<I> Paginator<ListResponse<I>>
where
    I: Send + 'static,
{
    /// Walk every page and gather the items, stopping at the first error
    pub async fn collect_items(mut self) -> Result<Vec<I>> {
        let mut items = Vec::new();
        while let Some(page) = self.next().await {
            items.extend(page?.into_items());
        }
        Ok(items)
    }
}

impl<T> Stream for Paginator<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().stream.as_mut().poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Embedded, HateoasLink, PaginationLinks};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn page(items: Vec<i32>, next: Option<&str>) -> ListResponse<i32> {
        ListResponse {
            embedded: Embedded { items },
            links: PaginationLinks {
                next: next.map(|href| HateoasLink {
                    href: href.to_string(),
                    templated: Some(false),
                    link_type: Some("get".to_string()),
                }),
                ..Default::default()
            },
            current_count: None,
            filter_applied: None,
            limit: None,
            start: None,
            total_count: None,
            total_pages_count: None,
        }
    }

    fn paginator_over(
        pages: HashMap<Option<String>, ListResponse<i32>>,
        calls: Arc<Mutex<Vec<Option<String>>>>,
    ) -> Paginator<ListResponse<i32>> {
        let pages = Arc::new(pages);
        Paginator::new(None, move |start: Option<String>| {
            let pages = pages.clone();
            let calls = calls.clone();
            async move {
                calls.lock().unwrap().push(start.clone());
                pages
                    .get(&start)
                    .cloned()
                    .ok_or_else(|| ClumioError::invalid_parameters("no such page"))
            }
        })
    }

    #[test]
    fn test_start_from_link() {
        assert_eq!(start_from_link("/tasks?limit=10&start=2").unwrap(), "2");
        assert_eq!(
            start_from_link("https://us-west-2.api.clumio.com/tasks?start=abc%3D").unwrap(),
            "abc="
        );
        assert!(matches!(
            start_from_link("/tasks?limit=10"),
            Err(ClumioError::MalformedLink(href)) if href == "/tasks?limit=10"
        ));
    }

    #[tokio::test]
    async fn test_follows_next_links() {
        let mut pages = HashMap::new();
        pages.insert(None, page(vec![1, 2], Some("/items?start=2")));
        pages.insert(Some("2".to_string()), page(vec![3, 4], Some("/items?start=3")));
        pages.insert(Some("3".to_string()), page(vec![5], None));
        let calls = Arc::new(Mutex::new(Vec::new()));

        let paginator = paginator_over(pages, calls.clone());
        let items = paginator.collect_items().await.unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![None, Some("2".to_string()), Some("3".to_string())]
        );
    }

    #[tokio::test]
    async fn test_malformed_next_link() {
        let mut pages = HashMap::new();
        pages.insert(None, page(vec![1], Some("/items?limit=1")));
        let calls = Arc::new(Mutex::new(Vec::new()));

        let mut paginator = paginator_over(pages, calls.clone());

        let first = paginator.next().await.unwrap().unwrap();
        assert_eq!(first.items(), &[1]);
        let second = paginator.next().await.unwrap();
        assert!(matches!(second, Err(ClumioError::MalformedLink(_))));
        assert!(paginator.next().await.is_none());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_error_ends_stream() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut paginator = paginator_over(HashMap::new(), calls);

        assert!(paginator.next().await.unwrap().is_err());
        assert!(paginator.next().await.is_none());
    }

    #[tokio::test]
    async fn test_restart() {
        let mut pages = HashMap::new();
        pages.insert(None, page(vec![1], Some("/items?start=2")));
        pages.insert(Some("2".to_string()), page(vec![2], None));
        let calls = Arc::new(Mutex::new(Vec::new()));

        let mut paginator = paginator_over(pages, calls.clone());
        while paginator.next().await.is_some() {}

        let again = paginator.restart().collect_items().await.unwrap();
        assert_eq!(again, vec![1, 2]);
        assert_eq!(calls.lock().unwrap().len(), 4);
    }
}
