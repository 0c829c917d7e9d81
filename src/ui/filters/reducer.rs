use crate::ui::mvi::Reducer;

use super::intent::FiltersIntent;
use super::state::FiltersState;

pub struct FiltersReducer;

impl Reducer for FiltersReducer {
    type State = FiltersState;
    type Intent = FiltersIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        let changed = match intent {
            FiltersIntent::Set { name, value } => state.filters.set(name, value),
            FiltersIntent::Unset { name } => state.filters.remove(&name),
            FiltersIntent::PageChanged(change) => state.filters.apply_page_change(change),
            FiltersIntent::Reset(filters) => {
                let changed = state.filters != filters;
                state.filters = filters;
                changed
            }
        };
        if changed {
            state.revision += 1;
        }
        state
    }
}
