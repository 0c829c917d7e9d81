//! Cancel-and-replace listing fetches.
//!
//! A [`ListingCoordinator`] turns filter changes into fetches, keeps the
//! loading flag and the error message up to date, and republishes the latest
//! successful result. When bound to a change stream, each new filter set
//! supersedes the fetch started by the previous one: the older future is
//! dropped before it can publish anything.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, OptionFuture};
use futures::stream::{BoxStream, Stream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::listing::api::{FetchError, ListingApi};
use crate::listing::transform::Transforms;
use crate::tracking::{ErrorChannel, LoadingGate, TrackOptions};

/// Fetch pipeline for one listing.
///
/// Type parameters: `F` filters, `P` request parameters, `R` raw response,
/// `O` published result.
pub struct ListingCoordinator<F, P, R, O> {
    shared: Arc<Shared<F, P, R, O>>,
    binding: Mutex<Option<ChangeBinding>>,
}

struct Shared<F, P, R, O> {
    api: Arc<dyn ListingApi<P, R>>,
    transforms: Transforms<F, P, R, O>,
    loading: LoadingGate,
    errors: ErrorChannel,
    listing: watch::Sender<Option<O>>,
    generation: AtomicU64,
}

struct ChangeBinding {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ChangeBinding {
    fn release(self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

impl<F, R> ListingCoordinator<F, F, R, R>
where
    F: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Coordinator that sends filters as-is and publishes raw responses.
    pub fn new(api: Arc<dyn ListingApi<F, R>>) -> Self {
        Self::with_transforms(api, Transforms::identity())
    }
}

impl<F, P, R, O> ListingCoordinator<F, P, R, O>
where
    F: Send + 'static,
    P: Send + 'static,
    R: Send + 'static,
    O: Clone + Send + Sync + 'static,
{
    pub fn with_transforms(
        api: Arc<dyn ListingApi<P, R>>,
        transforms: Transforms<F, P, R, O>,
    ) -> Self {
        Self::with_tracking(api, transforms, LoadingGate::new(), ErrorChannel::new())
    }

    /// Use externally owned trackers, e.g. to share one spinner between
    /// several listings.
    pub fn with_tracking(
        api: Arc<dyn ListingApi<P, R>>,
        transforms: Transforms<F, P, R, O>,
        loading: LoadingGate,
        errors: ErrorChannel,
    ) -> Self {
        let (listing, _rx) = watch::channel(None);
        Self {
            shared: Arc::new(Shared {
                api,
                transforms,
                loading,
                errors,
                listing,
                generation: AtomicU64::new(0),
            }),
            binding: Mutex::new(None),
        }
    }

    /// Fetch once for `payload` and publish the result.
    ///
    /// Loading and error tracking start when this is called. Failures are
    /// recorded on the error channel and returned; the published result is
    /// left untouched. A result is not published if a newer fetch was
    /// issued while this one was in flight.
    pub fn fetch_once(
        &self,
        payload: F,
    ) -> impl Future<Output = Result<O, FetchError>> + Send + 'static {
        let shared = Arc::clone(&self.shared);
        let generation = shared.next_generation();
        let request = shared.request(payload);
        let operation = async move {
            let result = request.await?;
            shared.publish(generation, Some(result.clone()));
            Ok(result)
        };
        let tracked = self.shared.loading.run_tracked(operation);
        self.shared.errors.run_tracked(tracked, TrackOptions::new())
    }

    /// Drive fetches from `changes`, latest wins.
    ///
    /// Any previous binding is released first. A failed fetch publishes
    /// `None` and leaves the subscription running. When `changes` ends the
    /// last fetch is allowed to finish.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind_to_change_stream<S>(&self, changes: S)
    where
        S: Stream<Item = F> + Send + 'static,
    {
        let mut binding = self.binding.lock();
        if let Some(previous) = binding.take() {
            tracing::debug!("releasing previous change stream");
            previous.release();
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(drive_changes(
            Arc::clone(&self.shared),
            changes.boxed(),
            cancel.clone(),
        ));
        *binding = Some(ChangeBinding { cancel, task });
    }

    /// Release the change stream and drop any in-flight fetch.
    pub fn dispose(&self) {
        if let Some(binding) = self.binding.lock().take() {
            tracing::debug!("listing coordinator disposed");
            binding.release();
        }
    }

    /// Receiver for the published result; `None` until the first fetch lands.
    pub fn listing(&self) -> watch::Receiver<Option<O>> {
        self.shared.listing.subscribe()
    }

    pub fn latest(&self) -> Option<O> {
        self.shared.listing.borrow().clone()
    }

    pub fn is_loading(&self) -> watch::Receiver<bool> {
        self.shared.loading.subscribe()
    }

    pub fn error_message(&self) -> watch::Receiver<Option<String>> {
        self.shared.errors.subscribe()
    }

    pub fn loading_gate(&self) -> &LoadingGate {
        &self.shared.loading
    }

    pub fn error_channel(&self) -> &ErrorChannel {
        &self.shared.errors
    }
}

impl<F, P, R, O> Drop for ListingCoordinator<F, P, R, O> {
    fn drop(&mut self) {
        if let Some(binding) = self.binding.get_mut().take() {
            binding.release();
        }
    }
}

impl<F, P, R, O> Shared<F, P, R, O>
where
    F: Send + 'static,
    P: Send + 'static,
    R: Send + 'static,
    O: Clone + Send + Sync + 'static,
{
    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn request(
        self: &Arc<Self>,
        payload: F,
    ) -> impl Future<Output = Result<O, FetchError>> + Send + 'static {
        let shared = Arc::clone(self);
        async move {
            let params = shared.transforms.to_request_params(payload);
            let response = shared.api.get_all(params).await?;
            Ok(shared.transforms.to_resulting_response(response))
        }
    }

    /// Start the fetch for one change-stream item. Failures resolve to a
    /// published `None`.
    fn switch_fetch(self: &Arc<Self>, payload: F) -> BoxFuture<'static, ()> {
        let shared = Arc::clone(self);
        let generation = self.next_generation();
        tracing::debug!(generation, "filter change accepted");

        let request = self.request(payload);
        let tracked = self
            .loading
            .run_tracked(async move { request.await.map(Some) });
        let outcome = self.errors.run_tracked(tracked, TrackOptions::fallback(None));

        Box::pin(async move {
            if let Ok(result) = outcome.await {
                shared.publish(generation, result);
            }
        })
    }

    /// Publish `result` unless a newer request has been issued since
    /// `generation` started.
    fn publish(&self, generation: u64, result: Option<O>) {
        let cleared = result.is_none();
        let published = self.listing.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) > generation {
                return false;
            }
            *current = result;
            true
        });

        match (published, cleared) {
            (false, _) => tracing::debug!(generation, "superseded result skipped"),
            (true, false) => tracing::info!(generation, "listing published"),
            (true, true) => tracing::info!(generation, "listing cleared after failed fetch"),
        }
    }
}

async fn drive_changes<F, P, R, O>(
    shared: Arc<Shared<F, P, R, O>>,
    mut changes: BoxStream<'static, F>,
    cancel: CancellationToken,
) where
    F: Send + 'static,
    P: Send + 'static,
    R: Send + 'static,
    O: Clone + Send + Sync + 'static,
{
    let mut in_flight: Option<BoxFuture<'static, ()>> = None;
    let mut upstream_open = true;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            next = changes.next(), if upstream_open => match next {
                // The replacement registers with the trackers before the
                // superseded fetch is dropped by this assignment.
                Some(filters) => in_flight = Some(shared.switch_fetch(filters)),
                None => {
                    tracing::debug!("change stream ended");
                    upstream_open = false;
                }
            },
            Some(()) = OptionFuture::from(in_flight.as_mut()) => in_flight = None,
        }

        if !upstream_open && in_flight.is_none() {
            break;
        }
    }
}
