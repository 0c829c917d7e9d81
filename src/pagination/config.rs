use serde::{Deserialize, Serialize};

/// Resolved pagination settings used for one render of the paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Number of items per page. Must be non-zero.
    pub page_size: u32,
    /// Show the `‹` / `›` arrows.
    pub has_prev_next_arrows: bool,
    /// Show the `«` / `»` jump arrows.
    pub has_first_last_arrows: bool,
    /// Render prev/next arrows in a disabled state instead of hiding them.
    pub is_show_disabled_arrows: bool,
    /// Always include page 1 and the last page (with ellipsis when needed).
    pub has_first_last_pages: bool,
    /// Size of the window of page numbers around the current page.
    pub max_visible_page_numbers: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            has_prev_next_arrows: true,
            has_first_last_arrows: false,
            is_show_disabled_arrows: false,
            has_first_last_pages: true,
            max_visible_page_numbers: 3,
        }
    }
}

/// Caller-provided overrides, merged over [`PaginationConfig::default`].
///
/// This is the shape stored in the `[pagination]` table of the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_prev_next_arrows: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_first_last_arrows: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_show_disabled_arrows: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_first_last_pages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_visible_page_numbers: Option<u32>,
}

impl PaginationOverrides {
    /// Fill in every missing option with its default.
    pub fn resolve(&self) -> PaginationConfig {
        self.apply_to(PaginationConfig::default())
    }

    /// Apply the set options on top of `base`.
    pub fn apply_to(&self, base: PaginationConfig) -> PaginationConfig {
        PaginationConfig {
            page_size: self.page_size.unwrap_or(base.page_size),
            has_prev_next_arrows: self.has_prev_next_arrows.unwrap_or(base.has_prev_next_arrows),
            has_first_last_arrows: self
                .has_first_last_arrows
                .unwrap_or(base.has_first_last_arrows),
            is_show_disabled_arrows: self
                .is_show_disabled_arrows
                .unwrap_or(base.is_show_disabled_arrows),
            has_first_last_pages: self.has_first_last_pages.unwrap_or(base.has_first_last_pages),
            max_visible_page_numbers: self
                .max_visible_page_numbers
                .unwrap_or(base.max_visible_page_numbers),
        }
    }

    /// Layer `other` on top of `self`; options set in `other` win.
    pub fn merge(&self, other: &PaginationOverrides) -> PaginationOverrides {
        PaginationOverrides {
            page_size: other.page_size.or(self.page_size),
            has_prev_next_arrows: other.has_prev_next_arrows.or(self.has_prev_next_arrows),
            has_first_last_arrows: other.has_first_last_arrows.or(self.has_first_last_arrows),
            is_show_disabled_arrows: other
                .is_show_disabled_arrows
                .or(self.is_show_disabled_arrows),
            has_first_last_pages: other.has_first_last_pages.or(self.has_first_last_pages),
            max_visible_page_numbers: other
                .max_visible_page_numbers
                .or(self.max_visible_page_numbers),
        }
    }
}
