use crate::domain::UserRecord;

use super::filter::FilterState;

/// Result of running the filter, sort and page steps over the full user list.
#[derive(Debug, Clone)]
pub struct DirectoryView<'a> {
    rows: Vec<&'a UserRecord>,
    page: usize,
    page_size: usize,
    page_count: usize,
}

impl<'a> DirectoryView<'a> {
    /// Filtered and sorted rows across every page.
    pub fn rows(&self) -> &[&'a UserRecord] {
        &self.rows
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    /// Effective (clamped) page, 1-based.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn page_rows(&self) -> &[&'a UserRecord] {
        let start = ((self.page - 1) * self.page_size).min(self.rows.len());
        let end = (start + self.page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    pub fn page_ids(&self) -> Vec<String> {
        self.page_rows().iter().map(|u| u.id.clone()).collect()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// `max(1, ceil(total / page_size))`.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Derives the visible page from the full list. Never fails; an empty result
/// is a valid view.
pub fn derive<'a>(users: &'a [UserRecord], state: &FilterState) -> DirectoryView<'a> {
    let mut rows: Vec<&UserRecord> = users.iter().filter(|u| state.matches(u)).collect();
    // `sort_by` is stable
    rows.sort_by(|a, b| state.sort.compare(a, b));

    let page_size = state.page_size.max(1);
    let page_count = page_count(rows.len(), page_size);
    let page = state.page.clamp(1, page_count);

    DirectoryView {
        rows,
        page,
        page_size,
        page_count,
    }
}
