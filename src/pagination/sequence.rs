//! Page-sequence generation for the paginator.
//!
//! Turns `(page, total, config)` into the ordered list of cells a pagination
//! control renders: a window of page numbers around the current page, the
//! first/last pages with ellipsis markers, and the navigation arrows.

use std::collections::VecDeque;
use std::fmt;

use super::config::PaginationConfig;

/// One cell of a rendered pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSequenceElement {
    Page(u32),
    /// Ellipsis between the window and the last page.
    DotsToLast,
    /// Ellipsis between page 1 and the window.
    DotsToFirst,
    PrevArrow,
    NextArrow,
    FirstArrow,
    LastArrow,
    PrevArrowDisabled,
    NextArrowDisabled,
}

impl PageSequenceElement {
    /// Returns the page number if this element is a page.
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Page(page) => Some(*page),
            _ => None,
        }
    }

    /// Page reached by activating this element, if it is actionable.
    pub fn target_page(&self, current: u32, last_page_number: u32) -> Option<u32> {
        match self {
            Self::Page(page) => Some(*page),
            Self::PrevArrow if current > 1 => Some(current - 1),
            Self::NextArrow if current < last_page_number => Some(current + 1),
            Self::FirstArrow => Some(1),
            Self::LastArrow => Some(last_page_number),
            _ => None,
        }
    }
}

impl fmt::Display for PageSequenceElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{}", page),
            Self::DotsToLast | Self::DotsToFirst => f.write_str("…"),
            Self::PrevArrow => f.write_str("‹"),
            Self::NextArrow => f.write_str("›"),
            Self::FirstArrow => f.write_str("«"),
            Self::LastArrow => f.write_str("»"),
            Self::PrevArrowDisabled | Self::NextArrowDisabled => f.write_str("·"),
        }
    }
}

/// Output of [`generate`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSequence {
    pub elements: Vec<PageSequenceElement>,
    pub last_page_number: u32,
    /// Set when the requested page was past the last page. The consumer is
    /// expected to re-query with this page.
    pub page_correction: Option<u32>,
}

impl PageSequence {
    /// Page numbers in the sequence, markers skipped.
    pub fn pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.elements.iter().filter_map(PageSequenceElement::page)
    }
}

/// Compute the pagination sequence.
///
/// `number_of_pages`, when given, takes precedence over `total_items_count`.
/// A requested page beyond the last page is clamped and reported through
/// [`PageSequence::page_correction`].
///
/// # Panics
/// Panics if `config.page_size` is zero and the page count has to be derived
/// from `total_items_count`. Validated configuration never has a zero page size.
pub fn generate(
    page_number: u32,
    total_items_count: Option<u64>,
    number_of_pages: Option<u32>,
    config: &PaginationConfig,
) -> PageSequence {
    let last_page_number = last_page_number(total_items_count, number_of_pages, config).max(1);

    let page_correction = (page_number > last_page_number).then_some(last_page_number);
    let page = page_number.clamp(1, last_page_number);

    let mut pages = neighbour_pages(page, last_page_number, config.max_visible_page_numbers);

    if config.has_first_last_pages {
        add_first_last_pages(&mut pages, last_page_number);
    }
    if config.has_prev_next_arrows {
        add_prev_next_arrows(&mut pages, page, last_page_number, config.is_show_disabled_arrows);
    }
    if config.has_first_last_arrows {
        add_first_last_arrows(&mut pages, page, last_page_number);
    }

    PageSequence {
        elements: pages.into(),
        last_page_number,
        page_correction,
    }
}

fn last_page_number(
    total_items_count: Option<u64>,
    number_of_pages: Option<u32>,
    config: &PaginationConfig,
) -> u32 {
    if let Some(pages) = number_of_pages {
        return pages;
    }
    assert!(config.page_size > 0, "pagination page_size must be non-zero");
    let pages = total_items_count
        .unwrap_or(0)
        .div_ceil(u64::from(config.page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

// Window grows upwards first, then downwards, one page each per round.
fn neighbour_pages(page: u32, last: u32, max_visible: u32) -> VecDeque<PageSequenceElement> {
    let target = max_visible.clamp(1, last) as usize;
    let mut pages = VecDeque::with_capacity(target + 6);
    pages.push_back(PageSequenceElement::Page(page));

    // u64 so stepping past `u32::MAX` cannot overflow.
    let mut next = u64::from(page) + 1;
    let mut prev = page - 1;
    while pages.len() < target {
        if next <= u64::from(last) {
            pages.push_back(PageSequenceElement::Page(next as u32));
            next += 1;
            if pages.len() == target {
                break;
            }
        }
        if prev >= 1 {
            pages.push_front(PageSequenceElement::Page(prev));
            prev -= 1;
        }
    }
    pages
}

fn add_first_last_pages(pages: &mut VecDeque<PageSequenceElement>, last: u32) {
    let (Some(first_shown), Some(last_shown)) = (
        pages.front().and_then(PageSequenceElement::page),
        pages.back().and_then(PageSequenceElement::page),
    ) else {
        return;
    };

    match last - last_shown {
        0 => {}
        1 => pages.push_back(PageSequenceElement::Page(last)),
        _ => {
            pages.push_back(PageSequenceElement::DotsToLast);
            pages.push_back(PageSequenceElement::Page(last));
        }
    }

    match first_shown - 1 {
        0 => {}
        1 => pages.push_front(PageSequenceElement::Page(1)),
        _ => {
            pages.push_front(PageSequenceElement::DotsToFirst);
            pages.push_front(PageSequenceElement::Page(1));
        }
    }
}

fn add_prev_next_arrows(
    pages: &mut VecDeque<PageSequenceElement>,
    page: u32,
    last: u32,
    show_disabled: bool,
) {
    if page < last {
        pages.push_back(PageSequenceElement::NextArrow);
    } else if show_disabled {
        pages.push_back(PageSequenceElement::NextArrowDisabled);
    }

    if page > 1 {
        pages.push_front(PageSequenceElement::PrevArrow);
    } else if show_disabled {
        pages.push_front(PageSequenceElement::PrevArrowDisabled);
    }
}

fn add_first_last_arrows(pages: &mut VecDeque<PageSequenceElement>, page: u32, last: u32) {
    if page < last {
        pages.push_back(PageSequenceElement::LastArrow);
    }
    if page > 1 {
        pages.push_front(PageSequenceElement::FirstArrow);
    }
}
