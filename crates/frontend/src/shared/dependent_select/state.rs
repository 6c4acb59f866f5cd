/// One entry of the subcategory widget.
///
/// `parent_id` is the owning root category; entries without a parent are
/// malformed reference data and are only ever shown in the unfiltered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryOption {
    pub id: String,
    pub label: String,
    pub parent_id: Option<String>,
}

impl SubcategoryOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, parent_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            // an empty parent id carries no reference
            parent_id: parent_id.filter(|p| !p.is_empty()),
        }
    }
}

/// Current filtering mode of the subcategory widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// Placeholder plus every known entry, regardless of parent
    AllOptions,
    /// Placeholder plus the children of one category
    FilteredByCategory(String),
}

/// Children of `category_id`, in the order the full set lists them.
/// Entries without a parent never match a concrete category.
pub fn filter_by_parent(options: &[SubcategoryOption], category_id: &str) -> Vec<SubcategoryOption> {
    options
        .iter()
        .filter(|o| o.parent_id.as_deref() == Some(category_id))
        .cloned()
        .collect()
}

/// Selection state of the coupled category/subcategory selects.
///
/// The full subcategory set is captured once at construction and never
/// mutated; the visible widget contents are a projection of it. The empty
/// string is the "all / none selected" id for both selects, and the
/// placeholder option is always the first visible option.
///
/// Consistency rule: a non-empty subcategory selection reached through the
/// change handlers always belongs to the selected category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentSelectState {
    /// Full subcategory set, captured once
    options: Vec<SubcategoryOption>,
    view_mode: ViewMode,
    category_id: String,
    subcategory_id: String,
}

impl DependentSelectState {
    /// Placeholder label of the subcategory select
    pub const ALL_SUBCATEGORIES: &'static str = "Всі підкатегорії";

    /// Capture the full subcategory set and restore the selection the page
    /// was loaded with (e.g. from query parameters).
    ///
    /// A restored category narrows the view to its children; the restored
    /// subcategory survives only when it belongs to that category. Without
    /// a restored category the view stays unfiltered and a resolvable
    /// subcategory selection is kept as-is.
    pub fn new(options: Vec<SubcategoryOption>, category_id: &str, subcategory_id: &str) -> Self {
        let mut state = Self {
            options,
            view_mode: ViewMode::AllOptions,
            category_id: String::new(),
            subcategory_id: String::new(),
        };

        if !category_id.is_empty() {
            state.category_id = category_id.to_string();
            state.view_mode = ViewMode::FilteredByCategory(category_id.to_string());
            let belongs = state
                .resolve(subcategory_id)
                .map_or(false, |o| o.parent_id.as_deref() == Some(category_id));
            if belongs {
                state.subcategory_id = subcategory_id.to_string();
            }
        } else if state.resolve(subcategory_id).is_some() {
            state.subcategory_id = subcategory_id.to_string();
        }

        state
    }

    /// The category select changed: the subcategory selection resets and
    /// the subcategory widget is rebuilt for the new category (or restored
    /// to the full set when the category was cleared).
    pub fn on_category_changed(&mut self, category_id: &str) {
        self.subcategory_id.clear();
        if category_id.is_empty() {
            self.category_id.clear();
            self.view_mode = ViewMode::AllOptions;
        } else {
            self.category_id = category_id.to_string();
            self.view_mode = ViewMode::FilteredByCategory(category_id.to_string());
        }
    }

    /// The subcategory select changed: a selection owned by another
    /// category drags the category select along with it and re-filters the
    /// subcategory widget to that category's children.
    ///
    /// Clearing the selection leaves the category untouched. An id that is
    /// not in the full set is ignored and the previous state kept.
    pub fn on_subcategory_changed(&mut self, subcategory_id: &str) {
        if subcategory_id.is_empty() {
            self.subcategory_id.clear();
            return;
        }

        match self.resolve(subcategory_id).map(|o| o.parent_id.clone()) {
            None => {
                // unknown id: leave the prior selection intact
            }
            Some(None) => {
                // a parentless entry has no category to sync to; it is only
                // offered in the unfiltered view, where selecting it keeps
                // the category cleared
                if self.view_mode == ViewMode::AllOptions {
                    self.subcategory_id = subcategory_id.to_string();
                }
            }
            Some(Some(parent)) => {
                self.category_id = parent.clone();
                self.view_mode = ViewMode::FilteredByCategory(parent);
                self.subcategory_id = subcategory_id.to_string();
            }
        }
    }

    /// Widget contents for the current view mode: the placeholder first,
    /// then the matching entries in full-set order.
    pub fn visible_options(&self) -> Vec<(String, String)> {
        let mut out = vec![(String::new(), Self::ALL_SUBCATEGORIES.to_string())];
        match &self.view_mode {
            ViewMode::AllOptions => {
                out.extend(self.options.iter().map(|o| (o.id.clone(), o.label.clone())));
            }
            ViewMode::FilteredByCategory(category_id) => {
                out.extend(
                    filter_by_parent(&self.options, category_id)
                        .into_iter()
                        .map(|o| (o.id, o.label)),
                );
            }
        }
        out
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub fn subcategory_id(&self) -> &str {
        &self.subcategory_id
    }

    pub fn view_mode(&self) -> &ViewMode {
        &self.view_mode
    }

    /// The captured full subcategory set
    pub fn options(&self) -> &[SubcategoryOption] {
        &self.options
    }

    fn resolve(&self, id: &str) -> Option<&SubcategoryOption> {
        if id.is_empty() {
            return None;
        }
        self.options.iter().find(|o| o.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(id: &str, parent: &str) -> SubcategoryOption {
        SubcategoryOption::new(id, format!("label {}", id), Some(parent.to_string()))
    }

    fn full_set() -> Vec<SubcategoryOption> {
        vec![sub("s1", "c1"), sub("s2", "c1"), sub("s3", "c2")]
    }

    fn ids(options: &[(String, String)]) -> Vec<&str> {
        options.iter().map(|(id, _)| id.as_str()).collect()
    }

    fn parent_of(state: &DependentSelectState, id: &str) -> String {
        state
            .options()
            .iter()
            .find(|o| o.id == id)
            .and_then(|o| o.parent_id.clone())
            .unwrap_or_default()
    }

    // a non-empty subcategory selection must always belong to the selected
    // category, whatever sequence of changes led here
    fn assert_consistent(state: &DependentSelectState) {
        if !state.subcategory_id().is_empty() {
            assert_eq!(
                parent_of(state, state.subcategory_id()),
                state.category_id(),
                "subcategory {} does not belong to category {}",
                state.subcategory_id(),
                state.category_id()
            );
        }
    }

    #[test]
    fn category_change_shows_only_children() {
        let mut state = DependentSelectState::new(full_set(), "", "");
        state.on_category_changed("c1");

        assert_eq!(ids(&state.visible_options()), vec!["", "s1", "s2"]);
        assert_eq!(state.view_mode(), &ViewMode::FilteredByCategory("c1".to_string()));
        assert_eq!(state.subcategory_id(), "");
        assert_consistent(&state);
    }

    #[test]
    fn clearing_category_restores_full_set_in_order() {
        let mut state = DependentSelectState::new(full_set(), "", "");
        state.on_category_changed("c2");
        state.on_category_changed("");

        assert_eq!(ids(&state.visible_options()), vec!["", "s1", "s2", "s3"]);
        assert_eq!(state.view_mode(), &ViewMode::AllOptions);
    }

    #[test]
    fn category_change_is_idempotent() {
        let mut state = DependentSelectState::new(full_set(), "", "");
        state.on_category_changed("c1");
        let once = state.visible_options();
        state.on_category_changed("c1");

        assert_eq!(state.visible_options(), once);
    }

    #[test]
    fn subcategory_change_drags_category_along() {
        let mut state = DependentSelectState::new(full_set(), "", "");
        state.on_subcategory_changed("s3");

        assert_eq!(state.category_id(), "c2");
        assert_eq!(ids(&state.visible_options()), vec!["", "s3"]);
        assert_eq!(state.subcategory_id(), "s3");
        assert_consistent(&state);
    }

    #[test]
    fn subcategory_change_within_category_keeps_it() {
        let mut state = DependentSelectState::new(full_set(), "c1", "");
        state.on_subcategory_changed("s2");

        assert_eq!(state.category_id(), "c1");
        assert_eq!(state.subcategory_id(), "s2");
        assert_consistent(&state);
    }

    #[test]
    fn clearing_subcategory_leaves_category_untouched() {
        let mut state = DependentSelectState::new(full_set(), "c1", "s1");
        state.on_subcategory_changed("");

        assert_eq!(state.category_id(), "c1");
        assert_eq!(state.subcategory_id(), "");
    }

    #[test]
    fn unknown_subcategory_id_is_ignored() {
        let mut state = DependentSelectState::new(full_set(), "c1", "s1");
        state.on_subcategory_changed("nope");

        assert_eq!(state.category_id(), "c1");
        assert_eq!(state.subcategory_id(), "s1");
        assert_consistent(&state);
    }

    #[test]
    fn parentless_entry_hidden_from_filtered_views() {
        let mut options = full_set();
        options.push(SubcategoryOption::new("orphan", "no parent", None));
        let mut state = DependentSelectState::new(options, "", "");

        state.on_category_changed("c1");
        assert_eq!(ids(&state.visible_options()), vec!["", "s1", "s2"]);
        state.on_category_changed("c2");
        assert_eq!(ids(&state.visible_options()), vec!["", "s3"]);

        // ...but present in the unfiltered view
        state.on_category_changed("");
        assert_eq!(ids(&state.visible_options()), vec!["", "s1", "s2", "s3", "orphan"]);
    }

    #[test]
    fn selecting_parentless_entry_does_not_resync() {
        let mut options = full_set();
        options.push(SubcategoryOption::new("orphan", "no parent", None));
        let mut state = DependentSelectState::new(options, "", "");

        state.on_subcategory_changed("orphan");
        assert_eq!(state.category_id(), "");
        assert_eq!(state.subcategory_id(), "orphan");
        assert_eq!(state.view_mode(), &ViewMode::AllOptions);
    }

    #[test]
    fn empty_parent_id_is_treated_as_absent() {
        let opt = SubcategoryOption::new("s9", "stray", Some(String::new()));
        assert_eq!(opt.parent_id, None);
    }

    #[test]
    fn initialize_keeps_matching_preselection() {
        let state = DependentSelectState::new(full_set(), "c1", "s2");

        assert_eq!(state.category_id(), "c1");
        assert_eq!(state.subcategory_id(), "s2");
        assert_eq!(ids(&state.visible_options()), vec!["", "s1", "s2"]);
        assert_consistent(&state);
    }

    #[test]
    fn initialize_drops_mismatched_preselection() {
        let state = DependentSelectState::new(full_set(), "c1", "s3");

        assert_eq!(state.category_id(), "c1");
        assert_eq!(state.subcategory_id(), "");
        assert_consistent(&state);
    }

    #[test]
    fn initialize_without_category_shows_everything() {
        let state = DependentSelectState::new(full_set(), "", "s3");

        assert_eq!(state.view_mode(), &ViewMode::AllOptions);
        assert_eq!(state.subcategory_id(), "s3");
        assert_eq!(ids(&state.visible_options()), vec!["", "s1", "s2", "s3"]);
    }

    #[test]
    fn initialize_without_category_drops_unknown_subcategory() {
        let state = DependentSelectState::new(full_set(), "", "ghost");
        assert_eq!(state.subcategory_id(), "");
    }

    #[test]
    fn consistency_holds_across_change_sequences() {
        let transitions: Vec<Box<dyn Fn(&mut DependentSelectState)>> = vec![
            Box::new(|s| s.on_category_changed("c1")),
            Box::new(|s| s.on_category_changed("c2")),
            Box::new(|s| s.on_category_changed("")),
            Box::new(|s| s.on_subcategory_changed("s1")),
            Box::new(|s| s.on_subcategory_changed("s3")),
            Box::new(|s| s.on_subcategory_changed("")),
            Box::new(|s| s.on_subcategory_changed("nope")),
        ];

        // every pair and triple of transitions
        for a in &transitions {
            for b in &transitions {
                let mut state = DependentSelectState::new(full_set(), "", "");
                a(&mut state);
                assert_consistent(&state);
                b(&mut state);
                assert_consistent(&state);
                for c in &transitions {
                    let mut state = DependentSelectState::new(full_set(), "c1", "s1");
                    a(&mut state);
                    b(&mut state);
                    c(&mut state);
                    assert_consistent(&state);
                }
            }
        }
    }

    #[test]
    fn snapshot_survives_filtering() {
        let mut state = DependentSelectState::new(full_set(), "", "");
        state.on_category_changed("c1");
        state.on_category_changed("c2");
        state.on_category_changed("");

        assert_eq!(state.options(), full_set().as_slice());
    }

    #[test]
    fn filter_by_parent_is_order_preserving() {
        let set = vec![sub("s3", "c2"), sub("s1", "c1"), sub("s2", "c1")];
        let filtered = filter_by_parent(&set, "c1");
        let filtered_ids: Vec<&str> = filtered.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(filtered_ids, vec!["s1", "s2"]);
    }

    #[test]
    fn filter_by_parent_never_matches_orphans_on_empty_id() {
        let set = vec![SubcategoryOption::new("orphan", "no parent", None)];
        assert!(filter_by_parent(&set, "").is_empty());
    }
}
