//! Filter engine: turns the full option set and the committed query into the
//! visible subset.
//!
//! The default strategy is a case-insensitive substring match on the option
//! label. Callers can replace it wholesale with a [`FilterFunc`], which receives
//! the *full* option set and the committed query every time; filtering never
//! runs against a previous filtered result.
//!
//! Option sets are assumed to be free of duplicates. No de-duplication is
//! performed here.

use crate::option::{label_of, Item, LabelFunc};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Caller supplied filter strategy. Receives every option and the committed
/// query and returns the options to show, in display order.
pub type FilterFunc<T> = Box<dyn Fn(&[T], &str) -> Vec<T> + Send>;

/// Case-insensitive substring filter over option labels.
///
/// An empty query returns every option in the original order.
///
/// ```rust
/// use bubbletea_autocomplete::filter::default_filter;
///
/// let options: Vec<String> = ["Apple", "Banana", "Cherry"].iter().map(|s| s.to_string()).collect();
/// assert_eq!(default_filter(&options, "an", None), vec!["Banana".to_string()]);
/// ```
pub fn default_filter<T: Item>(options: &[T], query: &str, label: Option<&LabelFunc<T>>) -> Vec<T> {
    if query.is_empty() {
        return options.to_vec();
    }

    let needle = query.to_lowercase();
    options
        .iter()
        .filter(|option| label_of(*option, label).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Fuzzy filter using the skim scoring algorithm.
///
/// Matches are ordered by descending score; equal scores keep their original
/// order. An empty query returns every option unchanged.
pub fn fuzzy_filter<T: Item>(options: &[T], query: &str, label: Option<&LabelFunc<T>>) -> Vec<T> {
    if query.is_empty() {
        return options.to_vec();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, usize)> = options
        .iter()
        .enumerate()
        .filter_map(|(index, option)| {
            matcher
                .fuzzy_match(&label_of(option, label), query)
                .map(|score| (score, index))
        })
        .collect();

    // stable sort keeps option order for equal scores
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .map(|(_, index)| options[index].clone())
        .collect()
}

/// Builds a [`FilterFunc`] backed by [`fuzzy_filter`] and the items' own labels.
pub fn fuzzy<T: Item>() -> FilterFunc<T> {
    Box::new(|options, query| fuzzy_filter(options, query, None))
}

/// Runs the caller's strategy if present, otherwise the default one.
pub(crate) fn apply<T: Item>(
    options: &[T],
    query: &str,
    custom: Option<&FilterFunc<T>>,
    label: Option<&LabelFunc<T>>,
) -> Vec<T> {
    match custom {
        Some(f) => f(options, query),
        None => default_filter(options, query, label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::Choice;
    use serde_json::json;

    fn fruits() -> Vec<String> {
        ["Apple", "Banana", "Cherry", "Durian", "Mango"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let options = fruits();
        assert_eq!(default_filter(&options, "", None), options);
        assert_eq!(fuzzy_filter(&options, "", None), options);
    }

    #[test]
    fn test_substring_case_insensitive() {
        let options = fruits();
        assert_eq!(default_filter(&options, "an", None), vec!["Banana", "Durian", "Mango"]);
        assert_eq!(default_filter(&options, "AN", None), vec!["Banana", "Durian", "Mango"]);
        assert!(default_filter(&options, "zz", None).is_empty());
    }

    #[test]
    fn test_scenario_single_match() {
        let options: Vec<String> = ["Apple", "Banana", "Cherry"].iter().map(|s| s.to_string()).collect();
        assert_eq!(default_filter(&options, "an", None), vec!["Banana".to_string()]);
    }

    #[test]
    fn test_filter_uses_custom_label() {
        let options = vec![
            Choice::identified(1, json!({ "name": "Alpha", "code": "zz" })),
            Choice::identified(2, json!({ "name": "Beta", "code": "aa" })),
        ];
        let by_code: LabelFunc<Choice> = Box::new(|c| {
            c.field("code").and_then(|v| v.as_str()).unwrap_or_default().to_string()
        });
        let hits = default_filter(&options, "aa", Some(&by_code));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), options[1].id());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let options = vec!["Kiwi".to_string(), "Kiwi".to_string()];
        assert_eq!(default_filter(&options, "ki", None).len(), 2);
    }

    #[test]
    fn test_custom_strategy_replaces_default() {
        let starts_with: FilterFunc<String> = Box::new(|options, q| {
            options.iter().filter(|o| o.starts_with(q)).cloned().collect()
        });
        let options = fruits();
        assert_eq!(apply(&options, "C", Some(&starts_with), None), vec!["Cherry"]);
        // default would match "Cherry" for "c" too, but the custom one is case sensitive
        assert!(apply(&options, "c", Some(&starts_with), None).is_empty());
        assert_eq!(apply(&options, "c", None, None), vec!["Cherry"]);
    }

    #[test]
    fn test_fuzzy_matches_subsequence() {
        let options = fruits();
        let hits = fuzzy_filter(&options, "mgo", None);
        assert_eq!(hits, vec!["Mango"]);
    }
}
