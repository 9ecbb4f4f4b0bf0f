//! Paginated list consumption: one page cursor, three adapters.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_stream::stream;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio_stream::Stream;
use tracing::debug;

use crate::{
    client::{Request, ScryfallClient},
    error::Error,
    identifier::CardIdentifier,
};

/// One page of a list endpoint, as returned on the wire.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub(crate) struct ListEnvelope<T> {
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub total_cards: Option<usize>,
    #[serde(default)]
    pub not_found: Vec<serde_json::Value>,
}

/// Where the next page comes from.
#[derive(Debug, Clone)]
pub(crate) enum PageSource {
    /// A list endpoint; later pages follow the envelope's `next_page` link.
    List { next: Option<Request> },
    /// A chunked batch lookup: one POST body per page, in input order.
    Chunks {
        path: String,
        bodies: VecDeque<serde_json::Value>,
    },
}

/// The page-advance state machine shared by every consumption mode.
///
/// Owns the continuation state for exactly one run; ends when the server
/// reports no more pages, the page cap is reached, or the querier gives up.
struct PageCursor<T> {
    client: ScryfallClient,
    source: PageSource,
    pages_fetched: usize,
    page_cap: Option<usize>,
    total_cards: Option<usize>,
    not_found: Vec<serde_json::Value>,
    _items: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> PageCursor<T> {
    fn new(client: ScryfallClient, source: PageSource, page_cap: Option<usize>) -> Self {
        Self {
            client,
            source,
            pages_fetched: 0,
            page_cap,
            total_cards: None,
            not_found: Vec::new(),
            _items: PhantomData,
        }
    }

    /// Fetch the next page and advance the continuation state.
    ///
    /// `Ok(None)` once exhausted or capped; `Err` when the querier gave up,
    /// with the failure already recorded in the last-error slot.
    async fn next_page(&mut self) -> Result<Option<Vec<T>>, Arc<Error>> {
        if self
            .page_cap
            .is_some_and(|cap| self.pages_fetched >= cap)
        {
            return Ok(None);
        }

        let request = match &mut self.source {
            PageSource::List { next } => match next.take() {
                Some(request) => request,
                None => return Ok(None),
            },
            PageSource::Chunks { path, bodies } => match bodies.pop_front() {
                Some(body) => Request::post(path.clone(), body),
                None => return Ok(None),
            },
        };

        let envelope: ListEnvelope<T> = self.client.request(request).await?;
        let ListEnvelope {
            data,
            has_more,
            next_page,
            total_cards,
            not_found,
        } = envelope;

        self.pages_fetched += 1;
        if total_cards.is_some() {
            self.total_cards = total_cards;
        }
        self.not_found.extend(not_found);

        if let PageSource::List { next } = &mut self.source {
            *next = if has_more {
                next_page.map(Request::get_url)
            } else {
                None
            };
        }

        debug!(page = self.pages_fetched, items = data.len(), "fetched page");
        Ok(Some(data))
    }
}

/// Cancellation control for a [`Pager`].
///
/// Clones share state, so a handle captured by a `data` callback can stop
/// the run it is part of.
#[derive(Debug, Clone, Default)]
pub struct PagerHandle {
    cancelled: Arc<AtomicBool>,
    after_page: Arc<AtomicBool>,
}

impl PagerHandle {
    /// Stop before the next item delivery or page fetch.
    ///
    /// A page already being downloaded finishes; its undelivered items are
    /// discarded.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Let the current page drain fully, then stop instead of fetching the
    /// next one.
    pub fn cancel_after_page(&self) {
        self.after_page.store(true, Ordering::SeqCst);
    }

    /// Whether a hard cancel has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn stop_at_page_boundary(&self) -> bool {
        self.is_cancelled() || self.after_page.load(Ordering::SeqCst)
    }
}

/// Everything a pager run collected.
#[derive(Debug)]
pub struct ListResults<T> {
    /// Collected items, in server order.
    pub data: Vec<T>,
    /// Identifiers the server could not resolve (batch lookups).
    pub not_found: Vec<CardIdentifier>,
    /// Server-reported size of the full result set, if sent.
    pub total_cards: Option<usize>,
}

impl<T> std::ops::Deref for ListResults<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T> IntoIterator for ListResults<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

type DataFn<T> = Box<dyn FnMut(T) + Send>;
type DoneFn = Box<dyn FnOnce() + Send>;
type ErrorFn = Box<dyn FnOnce(Arc<Error>) + Send>;

/// A paginated query with three interchangeable consumption modes.
///
/// - **push**: register callbacks, then [`emit`](Pager::emit) drives them;
/// - **pull**: [`all`](Pager::all) is a lazy stream, restarted per call;
/// - **bulk**: [`wait_for_all`](Pager::wait_for_all) collects everything.
///
/// One mode per pager instance: `emit` and `wait_for_all` consume the
/// pager, and `all` pages independently from the start, sharing no cursor
/// with the other modes.
#[must_use = "a pager fetches nothing until it is consumed"]
pub struct Pager<T> {
    client: ScryfallClient,
    source: PageSource,
    page_cap: Option<usize>,
    handle: PagerHandle,
    on_data: Option<DataFn<T>>,
    on_end: Option<DoneFn>,
    on_cancel: Option<DoneFn>,
    on_error: Option<ErrorFn>,
}

impl<T> std::fmt::Debug for Pager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("source", &self.source)
            .field("page_cap", &self.page_cap)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned + Send + 'static> Pager<T> {
    fn new(client: ScryfallClient, source: PageSource) -> Self {
        Self {
            client,
            source,
            page_cap: None,
            handle: PagerHandle::default(),
            on_data: None,
            on_end: None,
            on_cancel: None,
            on_error: None,
        }
    }

    /// Stop fetching after this many pages, regardless of `has_more`.
    ///
    /// Reaching the cap is a normal end, not a cancellation.
    pub fn with_page_cap(mut self, pages: usize) -> Self {
        self.page_cap = Some(pages);
        self
    }

    /// Control handle for cancelling from callbacks or other tasks.
    #[must_use]
    pub fn handle(&self) -> PagerHandle {
        self.handle.clone()
    }

    /// Request a hard cancel; see [`PagerHandle::cancel`].
    pub fn cancel(&self) {
        self.handle.cancel();
    }

    /// Drain the current page, then stop. Chainable before consumption to
    /// bound a run to a single page.
    pub fn cancel_after_page(self) -> Self {
        self.handle.cancel_after_page();
        self
    }

    /// Register a callback invoked once per item, in server order.
    pub fn on_data(mut self, f: impl FnMut(T) + Send + 'static) -> Self {
        self.on_data = Some(Box::new(f));
        self
    }

    /// Register a callback for normal completion.
    pub fn on_end(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    /// Register a callback for cancellation.
    pub fn on_cancel(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }

    /// Register a callback for a terminal query failure.
    pub fn on_error(mut self, f: impl FnOnce(Arc<Error>) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Drive the push surface to its terminal event.
    ///
    /// Exactly one of `end`, `cancel` or `error` fires, after the last
    /// `data` delivery. Cancellation is observed between item deliveries
    /// and before each page fetch, so no `data` callback runs after a
    /// cancel has been seen; when a cancel and the natural end coincide,
    /// cancel wins.
    pub async fn emit(mut self) {
        let mut cursor = PageCursor::new(
            self.client.clone(),
            self.source.clone(),
            self.page_cap,
        );

        loop {
            if self.handle.is_cancelled() {
                if let Some(f) = self.on_cancel.take() {
                    f();
                }
                return;
            }

            match cursor.next_page().await {
                Err(e) => {
                    if let Some(f) = self.on_error.take() {
                        f(e);
                    }
                    return;
                }
                Ok(None) => break,
                Ok(Some(items)) => {
                    for item in items {
                        if self.handle.is_cancelled() {
                            if let Some(f) = self.on_cancel.take() {
                                f();
                            }
                            return;
                        }
                        if let Some(f) = self.on_data.as_mut() {
                            f(item);
                        }
                    }
                    if self.handle.stop_at_page_boundary() {
                        if let Some(f) = self.on_cancel.take() {
                            f();
                        }
                        return;
                    }
                }
            }
        }

        if let Some(f) = self.on_end.take() {
            f();
        }
    }

    /// Lazy stream over every item; each call restarts from page one.
    ///
    /// Dropping the stream abandons pagination with no further fetches. A
    /// terminal query failure ends the stream early with the last-error
    /// slot set.
    pub fn all(&self) -> impl Stream<Item = T> + Send {
        let mut cursor = PageCursor::new(
            self.client.clone(),
            self.source.clone(),
            self.page_cap,
        );

        stream! {
            loop {
                match cursor.next_page().await {
                    Ok(Some(items)) => {
                        for item in items {
                            yield item;
                        }
                    }
                    Ok(None) | Err(_) => break,
                }
            }
        }
    }

    /// Drive pagination to completion and collect everything delivered.
    ///
    /// On a terminal failure mid-pagination this resolves to whatever was
    /// collected before it (possibly nothing) with the last-error slot
    /// set; check it to tell "no matches" from "query failed".
    pub async fn wait_for_all(self) -> ListResults<T> {
        let mut cursor = PageCursor::new(
            self.client.clone(),
            self.source.clone(),
            self.page_cap,
        );
        let mut data = Vec::new();

        loop {
            if self.handle.is_cancelled() {
                break;
            }
            match cursor.next_page().await {
                Ok(Some(items)) => {
                    data.extend(items);
                    if self.handle.stop_at_page_boundary() {
                        break;
                    }
                }
                Ok(None) | Err(_) => break,
            }
        }

        ListResults {
            data,
            not_found: cursor
                .not_found
                .into_iter()
                .filter_map(|value| serde_json::from_value(value).ok())
                .collect(),
            total_cards: cursor.total_cards,
        }
    }
}

impl ScryfallClient {
    /// Page through a list endpoint, starting from `first`.
    pub fn paged<T: DeserializeOwned + Send + 'static>(&self, first: Request) -> Pager<T> {
        Pager::new(self.clone(), PageSource::List { next: Some(first) })
    }

    /// Page through a chunked batch lookup: one POST per body, in order.
    pub fn chunked<T: DeserializeOwned + Send + 'static>(
        &self,
        path: impl Into<String>,
        bodies: Vec<serde_json::Value>,
    ) -> Pager<T> {
        Pager::new(
            self.clone(),
            PageSource::Chunks {
                path: path.into(),
                bodies: bodies.into(),
            },
        )
    }
}
