pub mod state;

use crate::shared::api_utils::api_url;
use crate::shared::components::date_range_filter::DateRangeFilter;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::Select;
use crate::shared::date_utils::format_date;
use crate::shared::dependent_select::{CategorySubcategorySelect, SubcategoryOption};
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, get_sort_indicator, sort_list, SearchInput, Searchable, Sortable};
use contracts::domain::a001_table::Table;
use contracts::domain::a002_category::Category;
use contracts::domain::a003_transaction::Transaction;
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::enums::Currency;
use leptos::prelude::*;
use state::{create_state, TransactionListState};
use std::cmp::Ordering;
use std::collections::HashMap;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;

#[derive(Clone, Debug)]
pub struct TransactionRow {
    pub id: String,
    /// yyyy-mm-dd, formatted for display at render time
    pub date: String,
    pub table_name: String,
    pub category_path: String,
    pub description: String,
    pub amount: f64,
    pub currency: Currency,
}

impl TransactionRow {
    fn from_transaction(
        t: Transaction,
        table_map: &HashMap<String, String>,
        category_paths: &HashMap<String, String>,
    ) -> Self {
        let table_name = table_map
            .get(&t.table_id)
            .cloned()
            .unwrap_or_else(|| "?".to_string());
        let category_path = t
            .category_id
            .as_ref()
            .and_then(|id| category_paths.get(id))
            .cloned()
            .unwrap_or_else(|| "Без категорії".to_string());
        Self {
            id: t.base.id.as_string(),
            date: t.date.format("%Y-%m-%d").to_string(),
            table_name,
            category_path,
            description: t.base.description,
            amount: t.amount,
            currency: t.currency,
        }
    }
}

impl Searchable for TransactionRow {
    fn matches_filter(&self, filter: &str) -> bool {
        let f = filter.to_lowercase();
        self.table_name.to_lowercase().contains(&f)
            || self.category_path.to_lowercase().contains(&f)
            || self.description.to_lowercase().contains(&f)
    }
}

impl Sortable for TransactionRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "date" => self.date.cmp(&other.date),
            "table" => self
                .table_name
                .to_lowercase()
                .cmp(&other.table_name.to_lowercase()),
            "category" => self
                .category_path
                .to_lowercase()
                .cmp(&other.category_path.to_lowercase()),
            "description" => self
                .description
                .to_lowercase()
                .cmp(&other.description.to_lowercase()),
            "amount" => self
                .amount
                .partial_cmp(&other.amount)
                .unwrap_or(Ordering::Equal),
            "currency" => self.currency.code().cmp(other.currency.code()),
            _ => Ordering::Equal,
        }
    }
}

/// id -> "Parent → Child" display path for every known category
fn category_paths(categories: &[Category]) -> HashMap<String, String> {
    let names: HashMap<String, String> = categories
        .iter()
        .map(|c| (c.base.id.as_string(), c.base.description.clone()))
        .collect();
    categories
        .iter()
        .map(|c| (c.base.id.as_string(), c.full_path(&names)))
        .collect()
}

/// Root categories as (id, name) select options
fn category_options(categories: &[Category]) -> Vec<(String, String)> {
    categories
        .iter()
        .filter(|c| c.is_root())
        .map(|c| (c.base.id.as_string(), c.base.description.clone()))
        .collect()
}

/// Child categories as the dependent-select full set
fn subcategory_options(categories: &[Category]) -> Vec<SubcategoryOption> {
    categories
        .iter()
        .filter(|c| !c.is_root())
        .map(|c| {
            SubcategoryOption::new(
                c.base.id.as_string(),
                c.base.description.clone(),
                c.parent_id.clone(),
            )
        })
        .collect()
}

/// Server-side filter parameters for the transactions endpoint
fn build_transactions_query(state: &TransactionListState) -> String {
    let pairs = [
        ("search", &state.search),
        ("date_from", &state.date_from),
        ("date_to", &state.date_to),
        ("category", &state.category_id),
        ("subcategory", &state.subcategory_id),
        ("currency", &state.currency),
    ];
    let params: Vec<String> = pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();
    params.join("&")
}

/// Sum of amounts per currency, in stable code order
fn currency_totals(rows: &[TransactionRow]) -> Vec<(Currency, f64)> {
    let mut totals: Vec<(Currency, f64)> = Vec::new();
    for row in rows {
        match totals.iter_mut().find(|(c, _)| *c == row.currency) {
            Some((_, sum)) => *sum += row.amount,
            None => totals.push((row.currency, row.amount)),
        }
    }
    totals.sort_by_key(|(c, _)| c.code());
    totals
}

async fn fetch_categories() -> Result<Vec<Category>, String> {
    let url = api_url("/api/finances/categories");
    gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json::<Vec<Category>>()
        .await
        .map_err(|e| e.to_string())
}

async fn fetch_tables() -> Result<Vec<Table>, String> {
    let url = api_url("/api/finances/tables");
    gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json::<Vec<Table>>()
        .await
        .map_err(|e| e.to_string())
}

async fn fetch_transactions(query: &str) -> Result<Vec<Transaction>, String> {
    let url = if query.is_empty() {
        api_url("/api/finances/transactions")
    } else {
        format!("{}?{}", api_url("/api/finances/transactions"), query)
    };
    gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json::<Vec<Transaction>>()
        .await
        .map_err(|e| e.to_string())
}

#[component]
#[allow(non_snake_case)]
pub fn TransactionList() -> impl IntoView {
    let state = create_state();
    // restore deep-linked filters before the first fetch
    let initial_search = window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    state.set(TransactionListState::from_query_string(&initial_search));

    let (transactions, set_transactions) = signal::<Vec<Transaction>>(Vec::new());
    let (categories, set_categories) = signal::<Vec<Category>>(Vec::new());
    let (tables, set_tables) = signal::<Vec<Table>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    // the filter widgets mount only once the category reference data is in
    let (refs_loaded, set_refs_loaded) = signal(false);

    let rows = Signal::derive(move || {
        let table_map: HashMap<String, String> = tables
            .get()
            .into_iter()
            .map(|t| (t.base.id.as_string(), t.base.description))
            .collect();
        let paths = categories.with(|list| category_paths(list));
        transactions
            .get()
            .into_iter()
            .map(|t| TransactionRow::from_transaction(t, &table_map, &paths))
            .collect::<Vec<TransactionRow>>()
    });

    let fetch = move || {
        spawn_local(async move {
            let query = state.with_untracked(build_transactions_query);
            match fetch_transactions(&query).await {
                Ok(v) => {
                    set_transactions.set(v);
                    set_error.set(None);
                    state.update(|s| s.is_loaded = true);
                }
                Err(e) => {
                    log::error!("failed to load transactions: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    };

    let fetch_refs = move || {
        spawn_local(async move {
            match fetch_categories().await {
                Ok(v) => {
                    set_categories.set(v);
                    set_refs_loaded.set(true);
                }
                // no category data: the dependent filter simply stays off
                Err(e) => log::warn!("categories unavailable: {}", e),
            }
            match fetch_tables().await {
                Ok(v) => set_tables.set(v),
                Err(e) => log::warn!("tables unavailable: {}", e),
            }
        });
    };

    // mirror the canonical filter state into the URL, so the current view
    // can be shared and restored
    Effect::new(move |_| {
        let query_string = state.with(|s| s.to_query_string());
        let new_search = format!("?{}", query_string);

        let current_search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if current_search != new_search {
            if let Some(w) = window() {
                if let Ok(history) = w.history() {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_search),
                    );
                }
            }
        }
    });

    let get_filtered_sorted = move || -> Vec<TransactionRow> {
        let mut result = filter_list(rows.get(), &state.with(|s| s.search.clone()));
        let (field, ascending) = state.with(|s| (s.sort_field.clone(), s.sort_ascending));
        sort_list(&mut result, &field, ascending);
        result
    };

    let total_count = move || get_filtered_sorted().len();
    let total_pages = move || {
        let size = state.with(|s| s.page_size).max(1);
        (total_count() + size - 1) / size
    };
    let page_rows = move || -> Vec<TransactionRow> {
        let (page, size) = state.with(|s| (s.page, s.page_size));
        get_filtered_sorted()
            .into_iter()
            .skip(page * size)
            .take(size)
            .collect()
    };

    let toggle_sort = move |field: &'static str| {
        move |_| {
            state.update(|s| {
                if s.sort_field == field {
                    s.sort_ascending = !s.sort_ascending;
                } else {
                    s.sort_field = field.to_string();
                    s.sort_ascending = true;
                }
            });
        }
    };

    let sort_indicator = move |field: &'static str| {
        move || {
            state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending).to_string())
        }
    };

    let on_search = Callback::new(move |value: String| {
        state.update(|s| {
            s.search = value;
            s.page = 0;
        });
        fetch();
    });

    let on_range_change = Callback::new(move |(from, to): (String, String)| {
        state.update(|s| {
            s.date_from = from;
            s.date_to = to;
            s.page = 0;
        });
        fetch();
    });

    // the selector reports every change as one atomic pair, including the
    // category it moved along when a foreign subcategory was picked
    let on_category_pair_change = Callback::new(move |(category, subcategory): (String, String)| {
        state.update(|s| {
            s.category_id = category;
            s.subcategory_id = subcategory;
            s.page = 0;
        });
        fetch();
    });

    let on_currency_change = Callback::new(move |value: String| {
        state.update(|s| {
            s.currency = value;
            s.page = 0;
        });
        fetch();
    });

    let is_expanded = RwSignal::new(true);
    let active_filters_count = Signal::derive(move || state.with(|s| s.active_filters_count()));

    let search_value = Signal::derive(move || state.with(|s| s.search.clone()));
    let date_from = Signal::derive(move || state.with(|s| s.date_from.clone()));
    let date_to = Signal::derive(move || state.with(|s| s.date_to.clone()));
    let currency_value = Signal::derive(move || state.with(|s| s.currency.clone()));
    let currency_options = Signal::derive(move || {
        let mut opts = vec![(String::new(), "Всі валюти".to_string())];
        opts.extend(
            Currency::all()
                .into_iter()
                .map(|c| (c.code().to_string(), c.label().to_string())),
        );
        opts
    });

    let totals_text = move || {
        let totals = currency_totals(&get_filtered_sorted());
        if totals.is_empty() {
            "—".to_string()
        } else {
            totals
                .into_iter()
                .map(|(c, sum)| format!("{:.2} {}", sum, c.symbol()))
                .collect::<Vec<String>>()
                .join(" · ")
        }
    };

    fetch_refs();
    fetch();

    view! {
        <div class="page">
            <div class="header">
                <h2>{Transaction::list_name()}</h2>
                <div class="header-actions">
                    <SearchInput
                        value=search_value
                        on_change=on_search
                        placeholder="Пошук за назвою...".to_string()
                    />
                    <button class="btn btn-secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        {"Оновити"}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="error-message">"Помилка завантаження: " {e}</div>
            })}

            <FilterPanel
                is_expanded=is_expanded
                active_filters_count=active_filters_count
                pagination_controls=move || view! {
                    <PaginationControls
                        current_page=Signal::derive(move || state.with(|s| s.page))
                        total_pages=Signal::derive(total_pages)
                        total_count=Signal::derive(total_count)
                        page_size=Signal::derive(move || state.with(|s| s.page_size))
                        on_page_change=Callback::new(move |page: usize| {
                            state.update(|s| s.page = page);
                        })
                        on_page_size_change=Callback::new(move |size: usize| {
                            state.update(|s| {
                                s.page_size = size;
                                s.page = 0;
                            });
                        })
                    />
                }
                filter_content=move || view! {
                    <div class="filter-panel-fields">
                        <DateRangeFilter
                            date_from=date_from
                            date_to=date_to
                            on_change=on_range_change
                            label="Період".to_string()
                        />
                        <Show
                            when=move || refs_loaded.get()
                            fallback=|| view! { <></> }
                        >
                            {move || {
                                let (initial_category, initial_subcategory) =
                                    state.with_untracked(|s| (s.category_id.clone(), s.subcategory_id.clone()));
                                let subcategories = categories.with_untracked(|list| subcategory_options(list));
                                view! {
                                    <CategorySubcategorySelect
                                        categories=Signal::derive(move || categories.with(|list| category_options(list)))
                                        subcategories=subcategories
                                        initial_category=initial_category
                                        initial_subcategory=initial_subcategory
                                        on_change=on_category_pair_change
                                    />
                                }
                            }}
                        </Show>
                        <Select
                            label="Валюта"
                            id="currency"
                            value=currency_value
                            options=currency_options
                            on_change=on_currency_change
                        />
                    </div>
                }
                filter_tags=move || view! {
                    <>
                        {move || {
                            let search = state.with(|s| s.search.clone());
                            (!search.is_empty()).then(|| view! {
                                <FilterTag
                                    label=format!("Пошук: {}", search)
                                    on_remove=Callback::new(move |_: ()| {
                                        state.update(|s| {
                                            s.search.clear();
                                            s.page = 0;
                                        });
                                        fetch();
                                    })
                                />
                            })
                        }}
                        {move || {
                            let currency = state.with(|s| s.currency.clone());
                            (!currency.is_empty()).then(|| view! {
                                <FilterTag
                                    label=format!("Валюта: {}", currency)
                                    on_remove=Callback::new(move |_: ()| {
                                        state.update(|s| {
                                            s.currency.clear();
                                            s.page = 0;
                                        });
                                        fetch();
                                    })
                                />
                            })
                        }}
                    </>
                }
            />

            <table class="data-table">
                <thead>
                    <tr>
                        <th on:click=toggle_sort("date")>
                            {"Дата"}{sort_indicator("date")}
                        </th>
                        <th on:click=toggle_sort("table")>
                            {"Таблиця"}{sort_indicator("table")}
                        </th>
                        <th on:click=toggle_sort("category")>
                            {"Категорія"}{sort_indicator("category")}
                        </th>
                        <th on:click=toggle_sort("description")>
                            {"Опис"}{sort_indicator("description")}
                        </th>
                        <th on:click=toggle_sort("amount")>
                            {"Сума"}{sort_indicator("amount")}
                        </th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        if !state.with(|s| s.is_loaded) {
                            return view! {
                                <tr>
                                    <td colspan="5" class="data-table__empty">"Завантаження..."</td>
                                </tr>
                            }.into_any();
                        }
                        let rows = page_rows();
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td colspan="5" class="data-table__empty">
                                        "Немає транзакцій за вибраними фільтрами"
                                    </td>
                                </tr>
                            }.into_any();
                        }
                        rows.into_iter().map(|row| {
                            view! {
                                <tr>
                                    <td>{format_date(&row.date)}</td>
                                    <td>{row.table_name.clone()}</td>
                                    <td>{row.category_path.clone()}</td>
                                    <td>{row.description.clone()}</td>
                                    <td class="data-table__amount">
                                        {format!("{:.2} {}", row.amount, row.currency.symbol())}
                                    </td>
                                </tr>
                            }
                        }).collect_view().into_any()
                    }}
                </tbody>
                <tfoot>
                    <tr>
                        <td colspan="4">"Разом"</td>
                        <td class="data-table__amount">{totals_text}</td>
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_category::CategoryId;
    use contracts::domain::common::BaseAggregate;

    fn category(id: CategoryId, name: &str, parent: Option<&CategoryId>) -> Category {
        Category::new(
            id,
            format!("CAT-{}", name),
            name.to_string(),
            parent.map(|p| p.as_string()),
        )
    }

    fn sample_categories() -> (Vec<Category>, CategoryId, CategoryId) {
        let food_id = CategoryId::new_v4();
        let transport_id = CategoryId::new_v4();
        let cafe_id = CategoryId::new_v4();
        let fuel_id = CategoryId::new_v4();
        let list = vec![
            category(food_id, "Їжа", None),
            category(transport_id, "Транспорт", None),
            category(cafe_id, "Кафе", Some(&food_id)),
            category(fuel_id, "Пальне", Some(&transport_id)),
        ];
        (list, food_id, cafe_id)
    }

    #[test]
    fn categories_split_into_roots_and_children() {
        let (list, food_id, cafe_id) = sample_categories();

        let roots = category_options(&list);
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0], (food_id.as_string(), "Їжа".to_string()));

        let children = subcategory_options(&list);
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].id, cafe_id.as_string());
        assert_eq!(children[0].parent_id, Some(food_id.as_string()));
    }

    #[test]
    fn category_paths_resolve_parents() {
        let (list, _, cafe_id) = sample_categories();
        let paths = category_paths(&list);
        assert_eq!(paths.get(&cafe_id.as_string()).unwrap(), "Їжа → Кафе");
    }

    #[test]
    fn query_includes_only_active_filters() {
        let mut state = TransactionListState::default();
        state.date_from = "2025-03-01".to_string();
        state.date_to = "2025-03-31".to_string();
        state.category_id = "c1".to_string();
        state.search = "кава з молоком".to_string();

        let query = build_transactions_query(&state);
        assert!(query.contains("date_from=2025-03-01"));
        assert!(query.contains("category=c1"));
        assert!(query.contains("search=%D0%BA%D0%B0%D0%B2%D0%B0%20%D0%B7%20%D0%BC%D0%BE%D0%BB%D0%BE%D0%BA%D0%BE%D0%BC"));
        assert!(!query.contains("subcategory"));
        assert!(!query.contains("currency"));
    }

    #[test]
    fn rows_compose_from_wire_transactions() {
        let (categories, _food_id, cafe_id) = sample_categories();
        let table_id = uuid::Uuid::new_v4().to_string();
        let json = serde_json::json!([{
            "id": uuid::Uuid::new_v4().to_string(),
            "code": "TRX-001",
            "description": "Кава",
            "comment": null,
            "metadata": {
                "created_at": "2025-03-15T10:00:00Z",
                "updated_at": "2025-03-15T10:00:00Z",
                "is_deleted": false,
                "version": 0
            },
            "amount": 85.0,
            "currency": "UAH",
            "date": "2025-03-15",
            "tableId": table_id,
            "categoryId": cafe_id.as_string()
        }]);

        let parsed: Vec<Transaction> = serde_json::from_value(json).unwrap();
        let table_map = HashMap::from([(table_id, "Бюджет".to_string())]);
        let paths = category_paths(&categories);
        let row = TransactionRow::from_transaction(parsed[0].clone(), &table_map, &paths);

        assert_eq!(row.table_name, "Бюджет");
        assert_eq!(row.category_path, "Їжа → Кафе");
        assert_eq!(row.currency, Currency::UAH);
        assert_eq!(row.date, "2025-03-15");
    }

    #[test]
    fn totals_accumulate_per_currency() {
        let rows = vec![
            TransactionRow {
                id: "1".to_string(),
                date: "2025-03-01".to_string(),
                table_name: "Бюджет".to_string(),
                category_path: "Їжа".to_string(),
                description: String::new(),
                amount: 100.0,
                currency: Currency::UAH,
            },
            TransactionRow {
                id: "2".to_string(),
                date: "2025-03-02".to_string(),
                table_name: "Бюджет".to_string(),
                category_path: "Їжа".to_string(),
                description: String::new(),
                amount: 50.5,
                currency: Currency::UAH,
            },
            TransactionRow {
                id: "3".to_string(),
                date: "2025-03-03".to_string(),
                table_name: "Бюджет".to_string(),
                category_path: "Транспорт".to_string(),
                description: String::new(),
                amount: 20.0,
                currency: Currency::USD,
            },
        ];

        let totals = currency_totals(&rows);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0], (Currency::UAH, 150.5));
        assert_eq!(totals[1], (Currency::USD, 20.0));
    }

    #[test]
    fn rows_sort_by_amount() {
        let mut rows = vec![
            TransactionRow {
                id: "1".to_string(),
                date: "2025-03-01".to_string(),
                table_name: String::new(),
                category_path: String::new(),
                description: String::new(),
                amount: 250.0,
                currency: Currency::UAH,
            },
            TransactionRow {
                id: "2".to_string(),
                date: "2025-03-02".to_string(),
                table_name: String::new(),
                category_path: String::new(),
                description: String::new(),
                amount: 85.0,
                currency: Currency::UAH,
            },
        ];
        sort_list(&mut rows, "amount", true);
        assert_eq!(rows[0].id, "2");
        sort_list(&mut rows, "amount", false);
        assert_eq!(rows[0].id, "1");
    }
}
