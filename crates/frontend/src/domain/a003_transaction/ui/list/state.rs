use crate::shared::date_utils::current_month_range;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug)]
pub struct TransactionListState {
    // filters
    pub search: String,
    pub date_from: String,
    pub date_to: String,
    pub category_id: String,
    pub subcategory_id: String,
    pub currency: String,

    // client sorting
    pub sort_field: String,
    pub sort_ascending: bool,

    // load flag
    pub is_loaded: bool,

    // pagination
    pub page: usize,
    pub page_size: usize,
}

impl Default for TransactionListState {
    fn default() -> Self {
        let (date_from, date_to) = current_month_range();
        Self {
            search: String::new(),
            date_from,
            date_to,
            category_id: String::new(),
            subcategory_id: String::new(),
            currency: String::new(),
            sort_field: "date".to_string(),
            sort_ascending: false,
            is_loaded: false,
            page: 0,
            page_size: 20,
        }
    }
}

/// Filter fields as they travel in the URL query string. Empty fields are
/// left out so shared links stay short.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TransactionListQuery {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    search: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    date_from: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    date_to: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    category: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    subcategory: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    currency: String,
}

impl TransactionListState {
    /// Restore filters from a location query string (with or without the
    /// leading '?'). Missing dates fall back to the current-month default.
    pub fn from_query_string(query: &str) -> Self {
        let q: TransactionListQuery =
            serde_qs::from_str(query.trim_start_matches('?')).unwrap_or_default();

        let mut state = Self::default();
        state.search = q.search;
        if !q.date_from.is_empty() {
            state.date_from = q.date_from;
        }
        if !q.date_to.is_empty() {
            state.date_to = q.date_to;
        }
        state.category_id = q.category;
        state.subcategory_id = q.subcategory;
        state.currency = q.currency;
        state
    }

    /// Serialize the filters back into a query string (no leading '?')
    pub fn to_query_string(&self) -> String {
        serde_qs::to_string(&TransactionListQuery {
            search: self.search.clone(),
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            category: self.category_id.clone(),
            subcategory: self.subcategory_id.clone(),
            currency: self.currency.clone(),
        })
        .unwrap_or_default()
    }

    /// Number of active filters shown in the panel badge; the date range is
    /// always present and not counted.
    pub fn active_filters_count(&self) -> usize {
        [
            &self.search,
            &self.category_id,
            &self.subcategory_id,
            &self.currency,
        ]
        .iter()
        .filter(|v| !v.is_empty())
        .count()
    }
}

pub fn create_state() -> RwSignal<TransactionListState> {
    RwSignal::new(TransactionListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_current_month() {
        let state = TransactionListState::default();
        assert!(!state.date_from.is_empty());
        assert!(!state.date_to.is_empty());
        assert!(state.date_from <= state.date_to);
        assert!(state.date_from.ends_with("-01"));
        assert_eq!(state.page_size, 20);
    }

    #[test]
    fn query_string_round_trip() {
        let mut state = TransactionListState::default();
        state.search = "продукти".to_string();
        state.date_from = "2025-03-01".to_string();
        state.date_to = "2025-03-31".to_string();
        state.category_id = "c1".to_string();
        state.subcategory_id = "s2".to_string();
        state.currency = "UAH".to_string();

        let restored = TransactionListState::from_query_string(&state.to_query_string());
        assert_eq!(restored.search, "продукти");
        assert_eq!(restored.date_from, "2025-03-01");
        assert_eq!(restored.date_to, "2025-03-31");
        assert_eq!(restored.category_id, "c1");
        assert_eq!(restored.subcategory_id, "s2");
        assert_eq!(restored.currency, "UAH");
    }

    #[test]
    fn empty_filters_are_left_out_of_the_query() {
        let mut state = TransactionListState::default();
        state.date_from = "2025-03-01".to_string();
        state.date_to = "2025-03-31".to_string();

        let query = state.to_query_string();
        assert!(!query.contains("search"));
        assert!(!query.contains("category"));
        assert!(!query.contains("currency"));
    }

    #[test]
    fn leading_question_mark_is_accepted() {
        let state = TransactionListState::from_query_string("?category=c7&currency=EUR");
        assert_eq!(state.category_id, "c7");
        assert_eq!(state.currency, "EUR");
    }

    #[test]
    fn restored_dates_override_defaults() {
        let state = TransactionListState::from_query_string("date_from=2024-01-05&date_to=2024-02-01");
        assert_eq!(state.date_from, "2024-01-05");
        assert_eq!(state.date_to, "2024-02-01");
    }

    #[test]
    fn active_filters_count_ignores_dates() {
        let mut state = TransactionListState::default();
        assert_eq!(state.active_filters_count(), 0);

        state.category_id = "c1".to_string();
        state.currency = "UAH".to_string();
        assert_eq!(state.active_filters_count(), 2);

        state.subcategory_id = "s1".to_string();
        state.search = "abc".to_string();
        assert_eq!(state.active_filters_count(), 4);
    }
}
