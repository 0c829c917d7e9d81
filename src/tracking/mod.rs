//! Loading and error bookkeeping around asynchronous operations.
//!
//! Both trackers publish through `tokio::sync::watch`, so any number of
//! views can observe them and always read the latest value.

mod error;
mod loading;

pub use error::{ErrorChannel, TrackOptions, DEFAULT_ERROR_MESSAGE};
pub use loading::{LoadingGate, LoadingGuard};
