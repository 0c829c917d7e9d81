use crate::listing::FilterSet;
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FiltersState {
    pub filters: FilterSet,
    /// Bumped on every effective change; unchanged means nothing to fetch.
    pub revision: u64,
}

impl UiState for FiltersState {}

impl FiltersState {
    pub fn new(filters: FilterSet) -> Self {
        Self {
            filters,
            revision: 0,
        }
    }
}
