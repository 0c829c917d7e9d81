//! Model-View-Intent (MVI) primitives for the listing view state.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot of what the view renders
//! - **Intent**: User actions or results coming back from the coordinator
//! - **Reducer**: Pure function that transforms state based on intents
//!
//! Side effects (feeding the change stream, printing) happen around the
//! dispatch call, never inside a reducer.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
