use crate::shared::date_utils::{month_range, month_start_of};
use chrono::{Duration, NaiveDate, Utc};
use leptos::prelude::*;
use thaw::*;

/// DateRangeFilter component - from/to date inputs with quick month buttons
///
/// Values travel in yyyy-mm-dd form; the native inputs render them in the
/// browser locale.
#[component]
pub fn DateRangeFilter(
    /// "From" date in yyyy-mm-dd format
    #[prop(into)]
    date_from: Signal<String>,

    /// "To" date in yyyy-mm-dd format
    #[prop(into)]
    date_to: Signal<String>,

    /// Callback when the range changes (from, to)
    on_change: Callback<(String, String)>,

    /// Optional label above the inputs
    #[prop(optional)]
    label: Option<String>,
) -> impl IntoView {
    let on_from_change = move |new_from: String| {
        let current_to = date_to.get_untracked();
        on_change.run((new_from, current_to));
    };

    let on_to_change = move |new_to: String| {
        let current_from = date_from.get_untracked();
        on_change.run((current_from, new_to));
    };

    let apply_month_of = move |anchor: NaiveDate| {
        let (start, end) = month_range(anchor);
        on_change.run((
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
        ));
    };

    // Full current month
    let on_current_month = move |_: ()| {
        apply_month_of(Utc::now().date_naive());
    };

    // Month before the one currently shown in the "from" input
    let on_previous_month = move |_: ()| {
        let current_from = date_from.get_untracked();
        if let Ok(from) = NaiveDate::parse_from_str(&current_from, "%Y-%m-%d") {
            apply_month_of(month_start_of(from) - Duration::days(1));
        }
    };

    view! {
        <Flex vertical=true gap=FlexGap::Small>
            {label.map(|l| view! {
                <Label>{l}</Label>
            })}

            <Flex class="date-range-filter" align=FlexAlign::Center gap=FlexGap::Small>
                <input
                    type="date"
                    class="date-range-filter__input"
                    prop:value=date_from
                    on:input=move |ev| {
                        on_from_change(event_target_value(&ev));
                    }
                />

                <div>"—"</div>

                <input
                    type="date"
                    class="date-range-filter__input"
                    prop:value=date_to
                    on:input=move |ev| {
                        on_to_change(event_target_value(&ev));
                    }
                />

                <ButtonGroup>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| on_previous_month(())
                    >
                        "-1M"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| on_current_month(())
                    >
                        "0M"
                    </Button>
                </ButtonGroup>
            </Flex>
        </Flex>
    }
}
