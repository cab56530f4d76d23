//! Filtered and sorted views over a bookmark snapshot

use crate::config::SortCriteria;
use crate::store::BookmarkRecord;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Keep records whose alias contains `query`, ignoring case
///
/// An empty query borrows the snapshot unchanged.
#[must_use]
pub fn filter_by_alias<'a>(records: &'a [BookmarkRecord], query: &str) -> Cow<'a, [BookmarkRecord]> {
    if query.is_empty() {
        return Cow::Borrowed(records);
    }

    let needle = query.to_lowercase();
    Cow::Owned(
        records
            .iter()
            .filter(|r| r.alias.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

fn compare(a: &BookmarkRecord, b: &BookmarkRecord, criteria: SortCriteria) -> Ordering {
    match criteria {
        SortCriteria::Alias => a.alias.to_lowercase().cmp(&b.alias.to_lowercase()),
        SortCriteria::Id => a.id.cmp(&b.id),
        SortCriteria::Path => a
            .path_str()
            .to_lowercase()
            .cmp(&b.path_str().to_lowercase()),
        SortCriteria::Created => a.created_at.cmp(&b.created_at),
    }
}

/// Stable sort by `criteria`
///
/// Equal keys keep their relative order in both directions, so sorting an
/// already sorted view is a no-op.
#[must_use]
pub fn sort(records: &[BookmarkRecord], criteria: SortCriteria, descending: bool) -> Vec<BookmarkRecord> {
    let mut sorted = records.to_vec();
    if descending {
        sorted.sort_by(|a, b| compare(b, a, criteria));
    } else {
        sorted.sort_by(|a, b| compare(a, b, criteria));
    }
    sorted
}

/// Filter by alias, then sort
#[must_use]
pub fn active_view(
    records: &[BookmarkRecord],
    query: &str,
    criteria: SortCriteria,
    descending: bool,
) -> Vec<BookmarkRecord> {
    sort(&filter_by_alias(records, query), criteria, descending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL_CRITERIA: [SortCriteria; 4] = [
        SortCriteria::Alias,
        SortCriteria::Id,
        SortCriteria::Path,
        SortCriteria::Created,
    ];

    fn web_records() -> Vec<BookmarkRecord> {
        vec![
            BookmarkRecord::new("000000000001", "web", "/srv/web", 10),
            BookmarkRecord::new("000000000002", "web2", "/srv/web2", 20),
            BookmarkRecord::new("000000000003", "Docs", "/home/u/docs", 5),
        ]
    }

    fn aliases(records: &[BookmarkRecord]) -> Vec<&str> {
        records.iter().map(|r| r.alias.as_str()).collect()
    }

    #[test]
    fn test_filter_empty_query_borrows() {
        let records = web_records();
        let filtered = filter_by_alias(&records, "");
        assert!(matches!(filtered, Cow::Borrowed(_)));
        assert_eq!(filtered.as_ref(), records.as_slice());
    }

    #[test]
    fn test_filter_substring_case_insensitive() {
        let records = web_records();
        assert_eq!(aliases(&filter_by_alias(&records, "web")), vec!["web", "web2"]);
        assert_eq!(aliases(&filter_by_alias(&records, "web2")), vec!["web2"]);
        assert_eq!(aliases(&filter_by_alias(&records, "OC")), vec!["Docs"]);
        assert!(filter_by_alias(&records, "zzz").is_empty());
    }

    #[test]
    fn test_filter_ignores_path_and_id() {
        let records = web_records();
        assert!(filter_by_alias(&records, "srv").is_empty());
        assert!(filter_by_alias(&records, "0001").is_empty());
    }

    #[test]
    fn test_sort_by_alias_folds_case() {
        let records = web_records();
        assert_eq!(aliases(&sort(&records, SortCriteria::Alias, false)), vec!["Docs", "web", "web2"]);
        assert_eq!(aliases(&sort(&records, SortCriteria::Alias, true)), vec!["web2", "web", "Docs"]);
    }

    #[test]
    fn test_sort_by_created() {
        let records = web_records();
        assert_eq!(aliases(&sort(&records, SortCriteria::Created, false)), vec!["Docs", "web", "web2"]);
        assert_eq!(aliases(&sort(&records, SortCriteria::Created, true)), vec!["web2", "web", "Docs"]);
    }

    #[test]
    fn test_sort_by_path_and_id() {
        let records = web_records();
        assert_eq!(aliases(&sort(&records, SortCriteria::Path, false)), vec!["Docs", "web", "web2"]);
        assert_eq!(aliases(&sort(&records, SortCriteria::Id, true)), vec!["Docs", "web2", "web"]);
    }

    #[test]
    fn test_sort_ties_keep_order_in_both_directions() {
        let records = vec![
            BookmarkRecord::new("c", "first", "/1", 7),
            BookmarkRecord::new("a", "second", "/2", 7),
            BookmarkRecord::new("b", "third", "/3", 7),
        ];
        assert_eq!(aliases(&sort(&records, SortCriteria::Created, false)), vec!["first", "second", "third"]);
        assert_eq!(aliases(&sort(&records, SortCriteria::Created, true)), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_active_view_filters_then_sorts() {
        let records = web_records();
        let view = active_view(&records, "WEB", SortCriteria::Created, true);
        assert_eq!(aliases(&view), vec!["web2", "web"]);
    }

    fn record_strategy() -> impl Strategy<Value = BookmarkRecord> {
        ("[a-f0-9]{4}", "[A-Za-z_-]{1,6}", "(/[a-zA-Z]{1,4}){1,4}", 0i64..50)
            .prop_map(|(id, alias, path, created)| BookmarkRecord::new(id, alias, path, created))
    }

    proptest! {
        #[test]
        fn prop_sort_is_idempotent(
            records in proptest::collection::vec(record_strategy(), 0..20),
            index in 0usize..4,
            descending: bool,
        ) {
            let criteria = ALL_CRITERIA[index];
            let once = sort(&records, criteria, descending);
            let twice = sort(&once, criteria, descending);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_empty_filter_is_identity(records in proptest::collection::vec(record_strategy(), 0..20)) {
            let filtered = filter_by_alias(&records, "");
            prop_assert_eq!(filtered.as_ref(), records.as_slice());
        }

        #[test]
        fn prop_filter_is_subset(
            records in proptest::collection::vec(record_strategy(), 0..20),
            query in "[a-z]{0,3}",
        ) {
            let filtered = filter_by_alias(&records, &query);
            prop_assert!(filtered.len() <= records.len());
            for record in filtered.iter() {
                prop_assert!(record.alias.to_lowercase().contains(&query));
            }
        }
    }
}
