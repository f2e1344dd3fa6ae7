//! Category filtering and distance ordering over fetched venues.

use crate::model::{Category, VenueResult};

/// Entries whose categories contain `category_id`, in input order.
/// `None` returns the list unchanged.
pub fn filter_by_category(list: &[VenueResult], category_id: Option<&str>) -> Vec<VenueResult> {
    match category_id {
        None => list.to_vec(),
        Some(id) => list.iter().filter(|v| v.has_category(id)).cloned().collect(),
    }
}

/// Distinct categories in first-seen order. Equality is structural.
pub fn distinct_categories(list: &[VenueResult]) -> Vec<Category> {
    let mut seen: Vec<Category> = Vec::new();
    for category in list.iter().flat_map(|v| v.categories.iter()) {
        if !seen.contains(category) {
            seen.push(category.clone());
        }
    }
    seen
}

/// Ascending by distance. `sort_by_key` is stable, so ties keep input order.
pub fn sort_by_distance(mut list: Vec<VenueResult>) -> Vec<VenueResult> {
    list.sort_by_key(|v| v.distance);
    list
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{Coordinate, GeoCode, Icon, Location};
    use proptest::prelude::*;

    pub(crate) fn category(id: &str) -> Category {
        Category::new(id, format!("cate{id}"), Icon::default())
    }

    pub(crate) fn venue(name: &str, distance: u32, category_ids: &[&str]) -> VenueResult {
        VenueResult {
            name: name.to_string(),
            distance,
            geocode: GeoCode { main: Coordinate { latitude: 1.0, longitude: 1.0 } },
            categories: category_ids.iter().map(|id| category(id)).collect(),
            timezone: "Asia/Seoul".to_string(),
            location: Location::default(),
        }
    }

    #[test]
    fn none_returns_everything() {
        let list = vec![venue("a", 1, &["123"]), venue("b", 2, &["124"])];
        assert_eq!(filter_by_category(&list, None), list);
    }

    #[test]
    fn filters_keep_order() {
        let list = vec![
            venue("a", 10, &["123", "124"]),
            venue("b", 20, &["125"]),
            venue("c", 30, &["123"]),
        ];
        let names: Vec<_> = filter_by_category(&list, Some("123"))
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn unknown_category_yields_empty() {
        let list = vec![venue("a", 10, &["123"])];
        assert!(filter_by_category(&list, Some("999")).is_empty());
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let list = vec![
            venue("a", 111, &["123", "124"]),
            venue("b", 111, &["123"]),
            venue("c", 111, &["125"]),
        ];
        let ids: Vec<_> = distinct_categories(&list).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["123", "124", "125"]);
    }

    #[test]
    fn sorts_by_value_not_index() {
        let list = vec![venue("far", 111, &[]), venue("near", 50, &[]), venue("mid", 80, &[])];
        let distances: Vec<_> = sort_by_distance(list).iter().map(|v| v.distance).collect();
        assert_eq!(distances, vec![50, 80, 111]);
    }

    fn arbitrary_venues() -> impl Strategy<Value = Vec<VenueResult>> {
        let ids = prop::sample::subsequence(vec!["a", "b", "c", "d"], 0..=3);
        prop::collection::vec((0u32..200, ids), 0..30).prop_map(|entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (distance, ids))| venue(&format!("v{i}"), distance, &ids))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn sort_is_non_decreasing_and_stable(list in arbitrary_venues()) {
            let sorted = sort_by_distance(list.clone());
            prop_assert_eq!(sorted.len(), list.len());
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].distance <= pair[1].distance);
                if pair[0].distance == pair[1].distance {
                    let first = list.iter().position(|v| v.name == pair[0].name);
                    let second = list.iter().position(|v| v.name == pair[1].name);
                    prop_assert!(first < second);
                }
            }
        }

        #[test]
        fn filter_is_a_matching_subsequence(
            list in arbitrary_venues(),
            id in prop::sample::select(vec!["a", "b", "c", "d", "z"]),
        ) {
            let filtered = filter_by_category(&list, Some(id));
            prop_assert!(filtered.iter().all(|v| v.has_category(id)));

            let mut rest = list.iter();
            for kept in &filtered {
                prop_assert!(rest.any(|v| v == kept));
            }
        }

        #[test]
        fn filter_is_idempotent(
            list in arbitrary_venues(),
            id in prop::sample::select(vec!["a", "b", "c", "d"]),
        ) {
            let once = filter_by_category(&list, Some(id));
            let twice = filter_by_category(&once, Some(id));
            prop_assert_eq!(once, twice);
        }
    }
}
