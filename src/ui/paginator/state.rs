use crate::pagination::{generate, PageChanged, PageSequence, PaginationConfig};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatorState {
    pub config: PaginationConfig,
    pub page_number: u32,
    pub total_items_count: Option<u64>,
    pub number_of_pages: Option<u32>,
    pub sequence: PageSequence,
    /// Page change waiting to be fed back into the listing's change stream.
    pub page_changed: Option<PageChanged>,
}

impl UiState for PaginatorState {}

impl Default for PaginatorState {
    fn default() -> Self {
        Self::new(PaginationConfig::default())
    }
}

impl PaginatorState {
    pub fn new(config: PaginationConfig) -> Self {
        let mut state = Self {
            config,
            page_number: 1,
            total_items_count: None,
            number_of_pages: None,
            sequence: PageSequence::default(),
            page_changed: None,
        };
        state.recompute();
        state
    }

    pub fn last_page_number(&self) -> u32 {
        self.sequence.last_page_number
    }

    /// Regenerate the sequence from the current inputs. A page past the end
    /// queues a correction.
    pub(super) fn recompute(&mut self) {
        self.sequence = generate(
            self.page_number,
            self.total_items_count,
            self.number_of_pages,
            &self.config,
        );
        if let Some(page_number) = self.sequence.page_correction {
            self.page_changed = Some(PageChanged {
                page_number,
                page_size: self.config.page_size,
            });
        }
    }
}
