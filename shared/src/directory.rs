//! Local search projections for the admin directory
//!
//! These run over records that were already fetched and never touch the store.

use crate::types::{paginate, PaginatedResponse, Pagination};

/// A record the admin search box can match against
pub trait Searchable {
    /// Text fields that take part in the search, absent fields omitted
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match against any searchable field
///
/// An empty query matches every record.
pub fn matches_query<T: Searchable + ?Sized>(record: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record
        .search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Records matching `query`, in their original order
pub fn filter_records<T: Searchable + Clone>(records: &[T], query: &str) -> Vec<T> {
    records
        .iter()
        .filter(|record| matches_query(*record, query))
        .cloned()
        .collect()
}

/// Filter then cut out one page
pub fn search_page<T: Searchable + Clone>(
    records: &[T],
    query: &str,
    pagination: Pagination,
) -> PaginatedResponse<T> {
    let filtered = filter_records(records, query);
    paginate(&filtered, pagination)
}
