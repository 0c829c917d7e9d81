//! Pagination: configuration, page-sequence generation and the outbound
//! page-change event.

mod config;
mod sequence;

pub use config::{PaginationConfig, PaginationOverrides};
pub use sequence::{generate, PageSequence, PageSequenceElement};

/// Emitted when the user (or a page correction) moves to another page.
///
/// The view feeds it back into the change stream, see
/// [`FilterSet::apply_page_change`](crate::listing::FilterSet::apply_page_change).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChanged {
    pub page_number: u32,
    pub page_size: u32,
}
