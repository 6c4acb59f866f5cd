/// Shared helpers for list pages (client-side search, sorting, search box)
use leptos::prelude::*;
use std::cmp::Ordering;
use wasm_bindgen::JsCast;

/// Minimal query length before the text filter kicks in
pub const MIN_FILTER_LEN: usize = 3;

/// Trait for row types that support text search
pub trait Searchable {
    /// Whether the row matches the search query
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Trait for row types that support sorting
pub trait Sortable {
    /// Compare two rows by the named field
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Apply the text filter to a list; short queries leave the list unchanged
pub fn filter_list<T: Searchable + Clone>(items: Vec<T>, filter: &str) -> Vec<T> {
    if filter.trim().len() < MIN_FILTER_LEN {
        return items;
    }

    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

/// Sort a list by the named field
pub fn sort_list<T: Sortable>(items: &mut Vec<T>, field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Sort indicator for a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Search box with debounce and a clear button
#[component]
pub fn SearchInput(
    /// Current filter value (for display)
    #[prop(into)]
    value: Signal<String>,
    /// Callback applying the debounced filter value
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder text
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        format!("Пошук (мін. {} символи)...", MIN_FILTER_LEN)
    } else {
        placeholder
    };

    // Local input state, before debounce; starts from the restored filter
    let (input_value, set_input_value) = signal(value.get_untracked());

    let debounce_timeout = StoredValue::new(None::<i32>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        if let Some(timeout_id) = debounce_timeout.get_value() {
            if let Some(w) = web_sys::window() {
                w.clear_timeout_with_handle(timeout_id);
            }
        }

        let window = web_sys::window().expect("no window");
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            on_change.run(new_value.clone());
        }) as Box<dyn Fn()>);

        let timeout_id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref::<js_sys::Function>(),
                300,
            )
            .expect("setTimeout failed");

        closure.forget();
        debounce_timeout.set_value(Some(timeout_id));
    };

    let is_filter_active = move || value.get().trim().len() >= MIN_FILTER_LEN;

    let clear_filter = move |_| {
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder={placeholder}
                class=move || {
                    if is_filter_active() {
                        "search-input__field search-input__field--active"
                    } else {
                        "search-input__field"
                    }
                }
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    handle_input_change(event_target_value(&ev));
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        class="search-input__clear"
                        on:click=clear_filter
                        title="Очистити"
                    >
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}
