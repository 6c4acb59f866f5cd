use crate::shared::icons::icon;
use leptos::prelude::*;

/// PaginationControls component - reusable pager with page-size select
#[component]
pub fn PaginationControls(
    /// Current page (0-indexed)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Total count of items
    #[prop(into)]
    total_count: Signal<usize>,

    /// Current page size
    #[prop(into)]
    page_size: Signal<usize>,

    /// Callback when page changes
    on_page_change: Callback<usize>,

    /// Callback when page size changes
    on_page_size_change: Callback<usize>,

    /// Available page size options (optional)
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| vec![20, 50, 100]);

    let at_first = move || current_page.get() == 0;
    let at_last = move || current_page.get() + 1 >= total_pages.get().max(1);
    let last_page = move || total_pages.get().max(1) - 1;

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=at_first
                title="Перша сторінка"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 0 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=at_first
                title="Попередня сторінка"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    format!(
                        "Сторінка {} з {} ({})",
                        current_page.get() + 1,
                        total_pages.get().max(1),
                        total_count.get()
                    )
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page + 1 < total_pages.get().max(1) {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=at_last
                title="Наступна сторінка"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(last_page())
                disabled=at_last
                title="Остання сторінка"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="pagination-page-size"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size_change.run(size);
                    }
                }
            >
                {page_size_opts
                    .into_iter()
                    .map(|size| {
                        let is_selected = move || page_size.get() == size;
                        view! {
                            <option value=size.to_string() selected=is_selected>
                                {size.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
