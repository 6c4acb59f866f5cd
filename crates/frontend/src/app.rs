use crate::domain::a003_transaction::ui::list::TransactionList;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="app">
            <header class="app-header">
                {icon("wallet")}
                <h1 class="app-header__title">"Фінанси"</h1>
            </header>
            <main class="content">
                <TransactionList />
            </main>
        </div>
    }
}
