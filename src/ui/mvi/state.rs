//! Base trait for view state in MVI architecture.

/// Marker trait for view state objects.
///
/// States are cloned to produce new states and compared to detect changes.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
