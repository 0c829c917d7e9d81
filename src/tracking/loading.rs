use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

/// Observable "something is in flight" flag.
///
/// Every tracked operation holds a [`LoadingGuard`]; the flag is `true` while
/// at least one guard is alive. Guards are released exactly once, on
/// completion, failure or when the operation future is dropped.
#[derive(Clone)]
pub struct LoadingGate {
    inner: Arc<GateInner>,
}

struct GateInner {
    in_flight: Mutex<usize>,
    tx: watch::Sender<bool>,
}

impl LoadingGate {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            inner: Arc::new(GateInner {
                in_flight: Mutex::new(0),
                tx,
            }),
        }
    }

    /// Mark one operation as in flight until the returned guard is dropped.
    pub fn acquire(&self) -> LoadingGuard {
        let mut in_flight = self.inner.in_flight.lock();
        *in_flight += 1;
        if *in_flight == 1 {
            self.inner.tx.send_replace(true);
            tracing::debug!("loading on");
        }
        LoadingGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Track `operation`.
    ///
    /// The gate is raised when this is called, not when the returned future
    /// is first polled, so a replacement operation can be registered before
    /// its predecessor is dropped.
    pub fn run_tracked<F>(&self, operation: F) -> impl Future<Output = F::Output> + Send
    where
        F: Future + Send,
    {
        let guard = self.acquire();
        async move {
            let _guard = guard;
            operation.await
        }
    }

    pub fn is_loading(&self) -> bool {
        *self.inner.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.tx.subscribe()
    }
}

impl Default for LoadingGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped in-flight marker returned by [`LoadingGate::acquire`].
#[must_use = "the gate is released as soon as the guard is dropped"]
pub struct LoadingGuard {
    inner: Arc<GateInner>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let mut in_flight = self.inner.in_flight.lock();
        *in_flight = in_flight.saturating_sub(1);
        if *in_flight == 0 {
            self.inner.tx.send_replace(false);
            tracing::debug!("loading off");
        }
    }
}
