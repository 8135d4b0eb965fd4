//! List query helpers.
//!
//! Stateless search, filter, sort and pagination utilities shared by every
//! list-bearing view (products, customers, transactions, reviews). All of
//! them are pure: filters return references in the original order, sorting
//! works in place and is stable, and pagination is a plain slice.

/// Sentinel filter value meaning "no filtering".
pub const ALL: &str = "all";

/// Reads one searchable text field out of an item.
pub type FieldAccessor<T> = for<'r> fn(&'r T) -> Option<&'r str>;

/// Sort order for [`sort_by_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,

    /// Largest first.
    Descending,
}

/// Case-insensitive substring search across the named fields.
///
/// An empty (or whitespace-only) term matches everything, preserving the
/// input order and contents. Items whose accessors all return `None` never
/// match a non-empty term.
pub fn filter_by_search<'a, T>(
    items: &'a [T],
    term: &str,
    fields: &[FieldAccessor<T>],
) -> Vec<&'a T> {
    let term = term.trim().to_lowercase();

    if term.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            fields.iter().any(|field| {
                field(item).is_some_and(|value| value.to_lowercase().contains(&term))
            })
        })
        .collect()
}

/// Exact-match filter on a single field, with [`ALL`] meaning no filtering.
pub fn filter_by_field<'a, T>(
    items: &'a [T],
    field: FieldAccessor<T>,
    value: &str,
) -> Vec<&'a T> {
    if value == ALL {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| field(item) == Some(value))
        .collect()
}

/// Stable in-place sort by an orderable key.
///
/// The key type covers every column the views sort on: decimals, timestamps,
/// dates, strings and integers.
pub fn sort_by_key<T, K: Ord>(
    items: &mut [T],
    key: impl Fn(&T) -> K,
    direction: SortDirection,
) {
    match direction {
        SortDirection::Ascending => items.sort_by_key(key),
        SortDirection::Descending => {
            items.sort_by(|a, b| key(b).cmp(&key(a)));
        }
    }
}

/// The slice for the requested 1-indexed page.
///
/// Pages past the end (and page 0) come back empty; callers clamp the page
/// number themselves.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }

    let start = (page - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(items.len());

    items.get(start..end).unwrap_or(&[])
}

/// Number of pages needed to show `count` items, `page_size` at a time.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }

    count.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        title: String,
        brand: Option<String>,
        amount: i64,
    }

    fn row(title: &str, brand: Option<&str>, amount: i64) -> Row {
        Row {
            title: title.to_owned(),
            brand: brand.map(str::to_owned),
            amount,
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            row("iPhone 9", Some("Apple"), 549),
            row("Samsung Universe 9", Some("Samsung"), 1249),
            row("Surface Laptop 4", None, 1499),
        ]
    }

    const FIELDS: &[FieldAccessor<Row>] = &[
        |r| Some(r.title.as_str()),
        |r| r.brand.as_deref(),
    ];

    #[test]
    fn empty_term_returns_everything_in_order() {
        let rows = rows();

        let hits = filter_by_search(&rows, "   ", FIELDS);

        assert_eq!(hits.len(), 3);
        assert_eq!(hits.first().map(|r| r.title.as_str()), Some("iPhone 9"));
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let rows = rows();

        let by_title = filter_by_search(&rows, "surface", FIELDS);
        let by_brand = filter_by_search(&rows, "APPLE", FIELDS);

        assert_eq!(by_title.len(), 1);
        assert_eq!(by_brand.len(), 1);
        assert_eq!(by_brand.first().map(|r| r.title.as_str()), Some("iPhone 9"));
    }

    #[test]
    fn missing_fields_never_match() {
        let rows = rows();

        let hits = filter_by_search(&rows, "zzz", FIELDS);

        assert!(hits.is_empty());
    }

    #[test]
    fn field_filter_honors_the_all_sentinel() {
        let rows = rows();
        let brand: FieldAccessor<Row> = |r| r.brand.as_deref();

        assert_eq!(filter_by_field(&rows, brand, ALL).len(), 3);
        assert_eq!(filter_by_field(&rows, brand, "Samsung").len(), 1);
        assert_eq!(filter_by_field(&rows, brand, "Nokia").len(), 0);
    }

    #[test]
    fn sort_is_stable_and_honors_direction() {
        let mut items = vec![
            row("b", None, 2),
            row("a1", None, 1),
            row("a2", None, 1),
        ];

        sort_by_key(&mut items, |r| r.amount, SortDirection::Ascending);

        let titles: Vec<&str> = items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a1", "a2", "b"], "equal keys keep input order");

        sort_by_key(&mut items, |r| r.amount, SortDirection::Descending);

        assert_eq!(items.first().map(|r| r.amount), Some(2));
    }

    #[test]
    fn paginate_returns_the_requested_window() {
        let items: Vec<u32> = (1..=25).collect();

        assert_eq!(paginate(&items, 2, 10), (11..=20).collect::<Vec<u32>>());
        assert_eq!(total_pages(items.len(), 10), 3);
    }

    #[test]
    fn paginate_past_the_end_is_empty() {
        let items: Vec<u32> = (1..=25).collect();

        assert!(paginate(&items, 4, 10).is_empty());
        assert!(paginate(&items, 0, 10).is_empty());
    }

    #[test]
    fn last_page_may_be_short() {
        let items: Vec<u32> = (1..=25).collect();

        assert_eq!(paginate(&items, 3, 10), (21..=25).collect::<Vec<u32>>());
    }

    #[test]
    fn zero_page_size_yields_no_pages() {
        let items: Vec<u32> = (1..=25).collect();

        assert!(paginate(&items, 1, 0).is_empty());
        assert_eq!(total_pages(items.len(), 0), 0);
    }
}
