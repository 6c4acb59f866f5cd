use super::state::{DependentSelectState, SubcategoryOption};
use crate::shared::components::ui::Select;
use leptos::prelude::*;

/// Placeholder label of the category select
const ALL_CATEGORIES: &str = "Всі категорії";

/// Coupled category/subcategory selects.
///
/// The subcategory list always shows only the children of the selected
/// category; picking a subcategory of another category moves the category
/// select to its parent.
#[component]
pub fn CategorySubcategorySelect(
    /// Root category options as (id, name), without the "all" entry
    #[prop(into)]
    categories: Signal<Vec<(String, String)>>,
    /// Full subcategory set, captured once at mount
    subcategories: Vec<SubcategoryOption>,
    /// Category id restored from the page state ("" for none)
    #[prop(optional, into)]
    initial_category: String,
    /// Subcategory id restored from the page state ("" for none)
    #[prop(optional, into)]
    initial_subcategory: String,
    /// Fired after every change with the new (category, subcategory) pair.
    /// A category moved along by a subcategory pick is reported through
    /// this same callback, never separately, so listeners always observe a
    /// consistent pair.
    on_change: Callback<(String, String)>,
) -> impl IntoView {
    let state = RwSignal::new(DependentSelectState::new(
        subcategories,
        &initial_category,
        &initial_subcategory,
    ));

    let category_value = Signal::derive(move || state.with(|s| s.category_id().to_string()));
    let subcategory_value = Signal::derive(move || state.with(|s| s.subcategory_id().to_string()));
    let subcategory_options = Signal::derive(move || state.with(|s| s.visible_options()));
    let category_options = Signal::derive(move || {
        let mut opts = vec![(String::new(), ALL_CATEGORIES.to_string())];
        opts.extend(categories.get());
        opts
    });

    let emit = move || {
        state.with_untracked(|s| {
            on_change.run((s.category_id().to_string(), s.subcategory_id().to_string()))
        });
    };

    view! {
        <Select
            label="Категорія"
            id="category"
            value=category_value
            options=category_options
            on_change=Callback::new(move |id: String| {
                state.update(|s| s.on_category_changed(&id));
                emit();
            })
        />
        <Select
            label="Підкатегорія"
            id="subcategory"
            value=subcategory_value
            options=subcategory_options
            on_change=Callback::new(move |id: String| {
                state.update(|s| s.on_subcategory_changed(&id));
                emit();
            })
        />
    }
}
