//! Reducer for the paginator.

use crate::pagination::PageChanged;
use crate::ui::mvi::Reducer;

use super::intent::PaginatorIntent;
use super::state::PaginatorState;

/// Pure paginator transitions. The caller drains `page_changed` and
/// dispatches [`PaginatorIntent::PageChangeDelivered`].
pub struct PaginatorReducer;

impl Reducer for PaginatorReducer {
    type State = PaginatorState;
    type Intent = PaginatorIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PaginatorIntent::Configure(overrides) => {
                state.config = overrides.resolve();
                state.recompute();
            }
            PaginatorIntent::SetPageNumber(page_number) => {
                state.page_number = page_number.max(1);
                state.recompute();
            }
            PaginatorIntent::SetTotalItemsCount(total) => {
                state.total_items_count = total;
                state.recompute();
            }
            PaginatorIntent::SetNumberOfPages(pages) => {
                state.number_of_pages = pages;
                state.recompute();
            }
            PaginatorIntent::Sync {
                page_number,
                total_items_count,
            } => {
                state.page_number = page_number.max(1);
                state.total_items_count = total_items_count;
                state.recompute();
            }
            PaginatorIntent::Select(element) => {
                let target = element.target_page(state.page_number, state.last_page_number());
                if let Some(page_number) = target.filter(|page| *page != state.page_number) {
                    state.page_changed = Some(PageChanged {
                        page_number,
                        page_size: state.config.page_size,
                    });
                }
            }
            PaginatorIntent::PageChangeDelivered => {
                state.page_changed = None;
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{PageSequenceElement, PaginationOverrides};

    fn ten_pages() -> PaginatorState {
        let state = PaginatorReducer::reduce(
            PaginatorState::default(),
            PaginatorIntent::Configure(PaginationOverrides {
                page_size: Some(10),
                ..Default::default()
            }),
        );
        PaginatorReducer::reduce(state, PaginatorIntent::SetTotalItemsCount(Some(100)))
    }

    #[test]
    fn default_state_is_single_page() {
        let state = PaginatorState::default();
        assert_eq!(state.page_number, 1);
        assert_eq!(state.last_page_number(), 1);
        assert_eq!(state.sequence.elements, vec![PageSequenceElement::Page(1)]);
        assert!(state.page_changed.is_none());
    }

    #[test]
    fn select_current_page_is_noop() {
        let state = PaginatorReducer::reduce(
            ten_pages(),
            PaginatorIntent::Select(PageSequenceElement::Page(1)),
        );
        assert!(state.page_changed.is_none());
    }

    #[test]
    fn select_dots_is_noop() {
        let state = PaginatorReducer::reduce(
            ten_pages(),
            PaginatorIntent::Select(PageSequenceElement::DotsToLast),
        );
        assert!(state.page_changed.is_none());
    }
}
