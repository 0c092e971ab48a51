//! Client-side search and filtering over the in-memory content collections.
//!
//! Everything here is synchronous and total: a query either matches an item
//! or it doesn't, and an empty result is an ordinary outcome.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::content::models::{Facet, Faq, FaqCategory, LocalizedText};

/// A record that can be searched and narrowed by category and tags.
pub trait Filterable {
    type Category: Copy + Eq;

    fn category(&self) -> Self::Category;

    fn tags(&self) -> &[String];

    /// Localized fields matched by the free-text search.
    fn searchable_fields(&self) -> Vec<&LocalizedText>;
}

/// Either every value of a facet, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: Copy + Eq> Selection<T> {
    pub fn admits(&self, value: T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => *selected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn selected(&self) -> Option<T> {
        match self {
            Selection::All => None,
            Selection::Only(v) => Some(*v),
        }
    }
}

impl<T: Facet> Selection<T> {
    pub const ALL_KEY: &'static str = "all";

    /// Query-string form: `"all"` or the facet key.
    pub fn key(&self) -> &'static str {
        match self {
            Selection::All => Self::ALL_KEY,
            Selection::Only(v) => v.key(),
        }
    }

    /// Parse `"all"`, an empty string, or a facet key.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(Self::ALL_KEY) {
            Some(Selection::All)
        } else {
            T::from_key(raw).map(Selection::Only)
        }
    }
}

/// The active search criteria of one listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState<C> {
    pub search_text: String,
    pub category: Selection<C>,
    pub selected_tags: BTreeSet<String>,
}

impl<C> Default for QueryState<C> {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category: Selection::All,
            selected_tags: BTreeSet::new(),
        }
    }
}

/// One removable chip in the "active filters" row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFilter<C> {
    Search(String),
    Category(C),
    Tag(String),
}

impl<C: Copy + Eq> QueryState<C> {
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn set_category(&mut self, category: Selection<C>) {
        self.category = category;
    }

    /// Add `tag` if it isn't selected, remove it if it is.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.selected_tags.remove(tag) {
            self.selected_tags.insert(tag.to_string());
        }
    }

    pub fn is_tag_selected(&self, tag: &str) -> bool {
        self.selected_tags.contains(tag)
    }

    /// Reset every criterion at once.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Drop selected tags that no longer occur in `available`.
    pub fn retain_known_tags(&mut self, available: &[String]) {
        self.selected_tags.retain(|t| available.contains(t));
    }

    /// The trimmed, lowercased search needle, or `None` when searching for nothing.
    pub fn needle(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }

    pub fn is_default(&self) -> bool {
        self.needle().is_none() && self.category.is_all() && self.selected_tags.is_empty()
    }

    /// Chips for every non-default criterion, search first.
    pub fn active_filters(&self) -> Vec<ActiveFilter<C>> {
        let mut chips = Vec::new();
        if self.needle().is_some() {
            chips.push(ActiveFilter::Search(self.search_text.trim().to_string()));
        }
        if let Selection::Only(category) = self.category {
            chips.push(ActiveFilter::Category(category));
        }
        chips.extend(self.selected_tags.iter().cloned().map(ActiveFilter::Tag));
        chips
    }

    /// Undo the criterion behind one chip.
    pub fn remove_filter(&mut self, chip: &ActiveFilter<C>) {
        match chip {
            ActiveFilter::Search(_) => self.search_text.clear(),
            ActiveFilter::Category(_) => self.category = Selection::All,
            ActiveFilter::Tag(tag) => {
                self.selected_tags.remove(tag);
            }
        }
    }
}

/// Sorted, de-duplicated union of every item's tags.
pub fn compute_available_tags<'a, T, I>(items: I) -> Vec<String>
where
    T: Filterable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .flat_map(|item| item.tags().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn matches_with_needle<T: Filterable>(
    item: &T,
    query: &QueryState<T::Category>,
    needle: Option<&str>,
) -> bool {
    matches_text(item, needle)
        && query.category.admits(item.category())
        && matches_tags(item, &query.selected_tags)
}

fn matches_text<T: Filterable>(item: &T, needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    item.searchable_fields().iter().any(|f| f.contains(needle))
        || item.tags().iter().any(|t| t.to_lowercase().contains(needle))
}

fn matches_tags<T: Filterable>(item: &T, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || item.tags().iter().any(|t| selected.contains(t))
}

/// Items matching `query`, in source order.
pub fn filter_items<'a, T, I>(items: I, query: &QueryState<T::Category>) -> Vec<&'a T>
where
    T: Filterable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let needle = query.needle();
    items
        .into_iter()
        .filter(|item| matches_with_needle(*item, query, needle.as_deref()))
        .collect()
}

/// Featured FAQs first, then ascending `order`. Stable.
pub fn sort_faqs(items: &mut [&Faq]) {
    items.sort_by_key(|faq| (!faq.featured, faq.order));
}

/// The subset of a collection currently shown to the visitor.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a, T> {
    pub items: Vec<&'a T>,
    /// Size of the unfiltered collection.
    pub total: usize,
}

impl<'a, T> DerivedView<'a, T> {
    pub fn shown(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Counts for the "showing X of Y" line.
    pub fn summary(&self) -> ResultsSummary {
        ResultsSummary {
            shown: self.items.len(),
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub shown: usize,
    pub total: usize,
}

/// Filter and sort the FAQ collection.
pub fn derive_faq_view<'a>(faqs: &'a [Faq], query: &QueryState<FaqCategory>) -> DerivedView<'a, Faq> {
    let mut items = filter_items(faqs, query);
    sort_faqs(&mut items);
    DerivedView {
        items,
        total: faqs.len(),
    }
}

/// Collapsible state of a filter panel. Has no effect on results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

impl PanelState {
    pub fn toggle(self) -> Self {
        match self {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == PanelState::Expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq(id: u32, category: FaqCategory, tags: &[&str], featured: bool, order: u32) -> Faq {
        Faq {
            id,
            question: LocalizedText::new(format!("Question {id}"), format!("សំណួរ {id}")),
            answer: LocalizedText::new(format!("Answer {id}"), format!("ចម្លើយ {id}")),
            category,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            featured,
            order,
        }
    }

    /// The two-record store used throughout the filter scenarios.
    fn sample() -> Vec<Faq> {
        vec![
            faq(1, FaqCategory::Programs, &["duration"], false, 2),
            faq(2, FaqCategory::General, &["schedule"], true, 1),
        ]
    }

    fn ids(items: &[&Faq]) -> Vec<u32> {
        items.iter().map(|f| f.id).collect()
    }

    #[test]
    fn test_default_query_returns_everything_in_order() {
        let faqs = vec![
            faq(3, FaqCategory::Payment, &[], false, 0),
            faq(1, FaqCategory::General, &["a"], true, 5),
            faq(2, FaqCategory::Career, &["b"], false, 1),
        ];
        let result = filter_items(&faqs, &QueryState::default());
        assert_eq!(ids(&result), vec![3, 1, 2]);
    }

    #[test]
    fn test_sorted_default_view_puts_featured_first() {
        let faqs = sample();
        let view = derive_faq_view(&faqs, &QueryState::default());
        assert_eq!(ids(&view.items), vec![2, 1]);
        assert_eq!(view.summary(), ResultsSummary { shown: 2, total: 2 });
    }

    #[test]
    fn test_search_matches_tags() {
        let faqs = sample();
        let mut query = QueryState::default();
        query.set_search("duration");
        assert_eq!(ids(&filter_items(&faqs, &query)), vec![1]);
    }

    #[test]
    fn test_search_matches_either_locale_case_insensitively() {
        let faqs = sample();
        let mut query = QueryState::default();
        query.set_search("  ANSWER 2 ");
        assert_eq!(ids(&filter_items(&faqs, &query)), vec![2]);

        query.set_search("សំណួរ 1");
        assert_eq!(ids(&filter_items(&faqs, &query)), vec![1]);
    }

    #[test]
    fn test_whitespace_search_counts_as_empty() {
        let faqs = sample();
        let mut query = QueryState::default();
        query.set_search("   ");
        assert_eq!(filter_items(&faqs, &query).len(), 2);
        assert!(query.is_default());
    }

    #[test]
    fn test_category_filter() {
        let faqs = sample();
        let mut query = QueryState::default();
        query.set_category(Selection::Only(FaqCategory::General));
        assert_eq!(ids(&filter_items(&faqs, &query)), vec![2]);

        query.set_category(Selection::Only(FaqCategory::Payment));
        assert!(filter_items(&faqs, &query).is_empty());
    }

    #[test]
    fn test_tag_filter_uses_any_semantics() {
        let faqs = vec![
            faq(1, FaqCategory::General, &["a", "b"], false, 0),
            faq(2, FaqCategory::General, &["c"], false, 0),
            faq(3, FaqCategory::General, &["d"], false, 0),
        ];
        let mut query = QueryState::default();
        query.toggle_tag("b");
        query.toggle_tag("c");
        let result = filter_items(&faqs, &query);
        assert_eq!(ids(&result), vec![1, 2]);
        for item in result {
            assert!(item.tags.iter().any(|t| query.selected_tags.contains(t)));
        }
    }

    #[test]
    fn test_untagged_item_never_matches_tag_filter() {
        let faqs = vec![faq(1, FaqCategory::General, &[], false, 0)];
        let mut query = QueryState::default();
        assert_eq!(filter_items(&faqs, &query).len(), 1);
        query.toggle_tag("anything");
        assert!(filter_items(&faqs, &query).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let faqs = vec![
            faq(1, FaqCategory::General, &["a"], false, 0),
            faq(2, FaqCategory::Payment, &["a"], false, 0),
            faq(3, FaqCategory::General, &["b"], false, 0),
        ];
        let mut query = QueryState::default();
        query.set_category(Selection::Only(FaqCategory::General));
        query.toggle_tag("a");

        let once = filter_items(&faqs, &query);
        let twice = filter_items(once.iter().copied(), &query);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_toggle_tag_twice_restores_selection() {
        let mut query: QueryState<FaqCategory> = QueryState::default();
        query.toggle_tag("x");
        let before = query.selected_tags.clone();

        query.toggle_tag("schedule");
        assert!(query.is_tag_selected("schedule"));
        query.toggle_tag("schedule");
        assert_eq!(query.selected_tags, before);
    }

    #[test]
    fn test_clear_resets_everything() {
        let faqs = sample();
        let mut query = QueryState {
            search_text: "x".to_string(),
            category: Selection::Only(FaqCategory::Programs),
            selected_tags: ["duration".to_string()].into_iter().collect(),
        };
        query.clear();
        assert_eq!(query, QueryState::default());
        assert_eq!(filter_items(&faqs, &query).len(), faqs.len());
    }

    #[test]
    fn test_sort_faqs_is_stable() {
        let faqs = vec![
            faq(10, FaqCategory::General, &[], false, 1),
            faq(11, FaqCategory::General, &[], true, 3),
            faq(12, FaqCategory::General, &[], false, 1),
            faq(13, FaqCategory::General, &[], true, 3),
            faq(14, FaqCategory::General, &[], true, 0),
        ];
        let mut items: Vec<&Faq> = faqs.iter().collect();
        sort_faqs(&mut items);
        assert_eq!(ids(&items), vec![14, 11, 13, 10, 12]);
    }

    #[test]
    fn test_available_tags_sorted_and_unique() {
        let faqs = vec![
            faq(1, FaqCategory::General, &["schedule", "duration"], false, 0),
            faq(2, FaqCategory::General, &["duration"], false, 0),
            faq(3, FaqCategory::General, &[], false, 0),
            faq(4, FaqCategory::General, &["cost"], false, 0),
        ];
        assert_eq!(
            compute_available_tags(&faqs),
            vec!["cost".to_string(), "duration".to_string(), "schedule".to_string()]
        );
    }

    #[test]
    fn test_retain_known_tags() {
        let mut query: QueryState<FaqCategory> = QueryState::default();
        query.toggle_tag("duration");
        query.toggle_tag("gone");
        query.retain_known_tags(&["duration".to_string(), "schedule".to_string()]);
        assert_eq!(query.selected_tags.len(), 1);
        assert!(query.is_tag_selected("duration"));
    }

    #[test]
    fn test_active_filters_and_removal() {
        let mut query = QueryState::default();
        query.set_search(" visa ");
        query.set_category(Selection::Only(FaqCategory::Admissions));
        query.toggle_tag("deadline");

        let chips = query.active_filters();
        assert_eq!(
            chips,
            vec![
                ActiveFilter::Search("visa".to_string()),
                ActiveFilter::Category(FaqCategory::Admissions),
                ActiveFilter::Tag("deadline".to_string()),
            ]
        );

        query.remove_filter(&chips[1]);
        assert!(query.category.is_all());
        query.remove_filter(&chips[2]);
        assert!(query.selected_tags.is_empty());
        query.remove_filter(&chips[0]);
        assert!(query.is_default());
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::<FaqCategory>::parse("all"), Some(Selection::All));
        assert_eq!(Selection::<FaqCategory>::parse(""), Some(Selection::All));
        assert_eq!(
            Selection::<FaqCategory>::parse("Payment"),
            Some(Selection::Only(FaqCategory::Payment))
        );
        assert_eq!(Selection::<FaqCategory>::parse("bogus"), None);
        assert_eq!(Selection::Only(FaqCategory::Career).key(), "career");
    }

    #[test]
    fn test_panel_toggle() {
        let panel = PanelState::default();
        assert!(!panel.is_expanded());
        assert!(panel.toggle().is_expanded());
        assert_eq!(panel.toggle().toggle(), panel);
    }

    #[test]
    fn test_empty_result_is_a_normal_view() {
        let faqs = sample();
        let mut query = QueryState::default();
        query.set_search("nothing matches this");
        let view = derive_faq_view(&faqs, &query);
        assert!(view.is_empty());
        assert_eq!(view.summary(), ResultsSummary { shown: 0, total: 2 });
    }
}
