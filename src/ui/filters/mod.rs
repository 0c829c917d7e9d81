//! Filter form feature module.
//!
//! Merges form edits and paginator page changes into the single stream of
//! [`FilterSet`](crate::listing::FilterSet) snapshots the listing
//! coordinator consumes.

mod debounce;
mod intent;
mod reducer;
mod state;

pub use debounce::debounce;
pub use intent::FiltersIntent;
pub use reducer::FiltersReducer;
pub use state::FiltersState;
