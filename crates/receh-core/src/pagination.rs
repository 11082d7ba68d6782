//! Page slicing and page-button layout for the transaction list

use serde::Serialize;

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default number of numbered buttons around the current page
pub const DEFAULT_MAX_PAGE_BUTTONS: usize = 5;

/// One page of a list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    /// 1-based, clamped into range
    pub page: usize,
    /// 0 when the list is empty
    pub total_pages: usize,
    pub total_items: usize,
    /// Index of the first item on the page
    pub start: usize,
    /// One past the last item on the page
    pub end: usize,
}

impl<T> PageSlice<'_, T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice out `page` of `items`
///
/// Out-of-range pages are clamped to the nearest valid page. A `per_page` of
/// 0 uses [`DEFAULT_PAGE_SIZE`].
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> PageSlice<'_, T> {
    let per_page = if per_page == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        per_page
    };
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * per_page).min(total_items);
    let end = (start + per_page).min(total_items);

    PageSlice {
        items: &items[start..end],
        page,
        total_pages,
        total_items,
        start,
        end,
    }
}

/// A button in the page bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PageSlot {
    Page(usize),
    /// Elided run of pages
    Gap,
}

/// Layout of numbered page buttons, e.g. `1 … 4 5 [6] 7 8 … 20`
///
/// The window of `max_visible` pages is centred on `current` and shifted when
/// it runs into either end. The first and last pages are always reachable.
pub fn page_window(current: usize, total_pages: usize, max_visible: usize) -> Vec<PageSlot> {
    if total_pages == 0 {
        return Vec::new();
    }
    let max_visible = max_visible.clamp(1, total_pages);
    let current = current.clamp(1, total_pages);

    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = (start + max_visible - 1).min(total_pages);
    if end + 1 - start < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }

    let mut slots = Vec::with_capacity(end + 1 - start + 4);
    if start > 1 {
        slots.push(PageSlot::Page(1));
        if start > 2 {
            slots.push(PageSlot::Gap);
        }
    }
    slots.extend((start..=end).map(PageSlot::Page));
    if end < total_pages {
        if end < total_pages - 1 {
            slots.push(PageSlot::Gap);
        }
        slots.push(PageSlot::Page(total_pages));
    }
    slots
}
