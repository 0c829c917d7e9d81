//! Intents for the paginator.

use crate::pagination::{PageSequenceElement, PaginationOverrides};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum PaginatorIntent {
    /// Merge overrides over the default pagination config.
    Configure(PaginationOverrides),
    SetPageNumber(u32),
    SetTotalItemsCount(Option<u64>),
    /// Fixed page count; takes precedence over the item count.
    SetNumberOfPages(Option<u32>),
    /// A listing response arrived.
    Sync {
        page_number: u32,
        total_items_count: Option<u64>,
    },
    /// User activated one element of the sequence.
    Select(PageSequenceElement),
    /// The pending page change was forwarded to the change stream.
    PageChangeDelivered,
}

impl Intent for PaginatorIntent {}
