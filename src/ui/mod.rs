//! View-side state for a listing: filter form and paginator.
//!
//! Rendering is left to the embedding application; these modules only
//! hold what a view needs and turn user actions into listing changes.

pub mod filters;
pub mod mvi;
pub mod paginator;
