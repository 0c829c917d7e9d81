use crate::listing::{FilterSet, FilterValue};
use crate::pagination::PageChanged;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum FiltersIntent {
    Set { name: String, value: FilterValue },
    Unset { name: String },
    /// Paginator event fed back into the form.
    PageChanged(PageChanged),
    /// Replace every field, e.g. with the configured initial filters.
    Reset(FilterSet),
}

impl Intent for FiltersIntent {}
