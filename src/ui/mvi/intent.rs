//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents are filter edits, paginator clicks, or responses arriving from
/// the listing coordinator.
pub trait Intent: Send + 'static {}
