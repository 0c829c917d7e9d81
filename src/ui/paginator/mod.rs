//! Paginator feature module.
//!
//! Holds the inputs of a pagination control (config, current page, item
//! count) and the page sequence derived from them.
//!
//! # Architecture
//!
//! - `state.rs` - Inputs, computed sequence, pending page change
//! - `intent.rs` - Input updates and element selection
//! - `reducer.rs` - Recomputes the sequence (pure, no side effects)

mod intent;
mod reducer;
mod state;

pub use intent::PaginatorIntent;
pub use reducer::PaginatorReducer;
pub use state::PaginatorState;
