//! In-memory search and page slicing over user records.

use std::ops::Range;

use crate::store::UserRecord;

/// Case-insensitive substring match on the display name. An empty needle matches everything.
pub fn matches(user: &UserRecord, needle_lower: &str) -> bool {
    needle_lower.is_empty() || user.display_name.to_lowercase().contains(needle_lower)
}

/// Keep the records whose display name contains `search`, ignoring case.
/// `None` and `""` both mean no filtering.
pub fn filter_records(records: &[UserRecord], search: Option<&str>) -> Vec<UserRecord> {
    let q = search.unwrap_or("").to_lowercase();
    if q.is_empty() {
        return records.to_vec();
    }
    records.iter().filter(|u| matches(u, &q)).cloned().collect()
}

/// Index range `[(page-1)*per_page, page*per_page)` clipped to `len`.
/// Page 0 and a zero page size give an empty range.
pub fn page_bounds(page_number: u32, items_per_page: u32, len: usize) -> Range<usize> {
    if page_number == 0 || items_per_page == 0 {
        return 0..0;
    }
    let per_page = items_per_page as usize;
    let start = (page_number as usize - 1).saturating_mul(per_page).min(len);
    let end = start.saturating_add(per_page).min(len);
    start..end
}

/// Slice one page out of an already filtered list.
pub fn paginate(records: &[UserRecord], page_number: u32, items_per_page: u32) -> Vec<UserRecord> {
    records[page_bounds(page_number, items_per_page, records.len())].to_vec()
}
