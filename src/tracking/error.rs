use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

/// Message shown when a failure has nothing better to say.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong.";

type MessageFn<E> = Box<dyn Fn(&E) -> Option<String> + Send + Sync>;

/// Per-call options for [`ErrorChannel::run_tracked`].
pub struct TrackOptions<T, E> {
    to_message: Option<MessageFn<E>>,
    fallback: Option<T>,
}

impl<T, E> TrackOptions<T, E> {
    /// Record the error and propagate it.
    pub fn new() -> Self {
        Self {
            to_message: None,
            fallback: None,
        }
    }

    /// Record the error, then complete with `value` instead of failing.
    pub fn fallback(value: T) -> Self {
        Self {
            to_message: None,
            fallback: Some(value),
        }
    }

    /// Custom error-to-message mapping. Returning `None` falls back to the
    /// error's `Display` output.
    pub fn with_message<M>(mut self, to_message: M) -> Self
    where
        M: Fn(&E) -> Option<String> + Send + Sync + 'static,
    {
        self.to_message = Some(Box::new(to_message));
        self
    }
}

impl<T, E> Default for TrackOptions<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Observable "last failure" message.
///
/// Cleared whenever a tracked operation starts, set when one fails.
#[derive(Clone)]
pub struct ErrorChannel {
    tx: Arc<watch::Sender<Option<String>>>,
}

impl ErrorChannel {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Track `operation`, clearing the current message immediately.
    pub fn run_tracked<F, T, E>(
        &self,
        operation: F,
        options: TrackOptions<T, E>,
    ) -> impl Future<Output = Result<T, E>> + Send
    where
        F: Future<Output = Result<T, E>> + Send,
        T: Send,
        E: fmt::Display + Send,
    {
        self.clear();
        let channel = self.clone();
        async move {
            match operation.await {
                Ok(value) => Ok(value),
                Err(err) => {
                    let message = options
                        .to_message
                        .as_ref()
                        .and_then(|to_message| to_message(&err))
                        .unwrap_or_else(|| describe(&err));
                    tracing::warn!(error = %message, "tracked operation failed");
                    channel.set(message);
                    match options.fallback {
                        Some(fallback) => Ok(fallback),
                        None => Err(err),
                    }
                }
            }
        }
    }

    pub fn clear(&self) {
        self.tx.send_if_modified(|current| current.take().is_some());
    }

    pub fn set(&self, message: impl Into<String>) {
        self.tx.send_replace(Some(message.into()));
    }

    pub fn message(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new()
    }
}

fn describe<E: fmt::Display>(err: &E) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        DEFAULT_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
