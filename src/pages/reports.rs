use chrono::Local;
use gloo_console::error as console_error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::analytics::{
    daily_totals, filter_by_window, highest_spending_day, month_over_month, monthly_totals,
    summarize, top_categories, totals_by_category, weekday_totals, TimeWindow,
};
use crate::api;
use crate::components::icons::{
    icon_bar_chart, icon_calendar, icon_receipt, icon_trending_down, icon_trending_up,
};
use crate::components::{loading_indicator, page_shell, AlertBanner, BannerKind};
use crate::model::{format_currency, Expense};

const CURRENCY_SYMBOL: &str = "₱";

fn bar_width(value: f64, max: f64) -> String {
    let percent = if max > 0.0 { (value / max * 100.0).clamp(0.0, 100.0) } else { 0.0 };
    format!("width: {percent:.0}%")
}

#[function_component(ReportsPage)]
pub fn reports_page() -> Html {
    let expenses = use_state(Vec::<Expense>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let time_window = use_state(|| TimeWindow::Month);

    {
        let expenses = expenses.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api::list_expenses().await {
                        Ok(list) => expenses.set(list),
                        Err(err) => {
                            console_error!(err.to_string());
                            error.set(Some("Failed to fetch expenses".to_string()));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let on_window_change = {
        let time_window = time_window.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            time_window.set(TimeWindow::from_key(&input.value()));
        })
    };

    // The whole pipeline reruns on every render; the lists are small and
    // this keeps every view trivially consistent with the latest fetch.
    let today = Local::now().date_naive();
    let windowed = filter_by_window(&expenses, *time_window, today);
    let summary = summarize(&windowed);
    let category_totals = totals_by_category(&windowed);
    let top = top_categories(&category_totals, 5);
    let months = monthly_totals(&windowed, today);
    let days = daily_totals(&windowed, today);
    let weekdays = weekday_totals(&windowed);
    let change = month_over_month(&months);
    let busiest_day = highest_spending_day(&weekdays).cloned();

    let top_value = top.first().map(|t| t.value).unwrap_or(0.0);
    let month_max = months.iter().map(|m| m.total).fold(0.0f64, f64::max);
    let day_max = days.iter().map(|d| d.total).fold(0.0f64, f64::max);

    if *loading {
        return loading_indicator("Loading analytics...");
    }

    html! {
        { page_shell(
            "Expense Analytics",
            "Visualize and analyze your spending patterns",
            html! {
                <select onchange={on_window_change} class="px-3 py-2 bg-input border border-border rounded-lg text-sm text-foreground">
                    { for TimeWindow::OPTIONS.iter().map(|window| html! {
                        <option value={window.key()} selected={*window == *time_window}>{ window.label() }</option>
                    }) }
                </select>
            },
            html! {
                <>
                    { if let Some(message) = (*error).clone() {
                        let error = error.clone();
                        html! { <AlertBanner kind={BannerKind::Error} message={message} on_dismiss={Callback::from(move |_| error.set(None))} /> }
                    } else {
                        html! {}
                    }}

                    <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                        <div class="bg-card rounded-xl p-5 border border-border">
                            <p class="text-[10px] font-bold text-muted-foreground tracking-widest uppercase mb-1">{"Total Expenses"}</p>
                            <h3 class="text-xl font-bold text-foreground">{ format_currency(summary.total, CURRENCY_SYMBOL) }</h3>
                        </div>
                        <div class="bg-card rounded-xl p-5 border border-border">
                            <p class="text-[10px] font-bold text-muted-foreground tracking-widest uppercase mb-1">{"Average per Transaction"}</p>
                            <h3 class="text-xl font-bold text-foreground">{ format_currency(summary.average, CURRENCY_SYMBOL) }</h3>
                        </div>
                        <div class="bg-card rounded-xl p-5 border border-border">
                            <p class="text-[10px] font-bold text-muted-foreground tracking-widest uppercase mb-1">{"Top Spending Category"}</p>
                            <h3 class="text-xl font-bold text-foreground truncate">{ summary.top_category.name.clone() }</h3>
                        </div>
                        <div class="bg-card rounded-xl p-5 border border-border">
                            <p class="text-[10px] font-bold text-muted-foreground tracking-widest uppercase mb-1">{"Transactions"}</p>
                            <h3 class="text-xl font-bold text-foreground">{ summary.count }</h3>
                        </div>
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                        <div class="bg-card rounded-xl p-6 border border-border">
                            <div class="flex items-center justify-between mb-4">
                                <h3 class="font-bold text-foreground">{"Top Categories"}</h3>
                                <span class="text-muted-foreground">{ icon_receipt() }</span>
                            </div>
                            { if top.is_empty() {
                                html! { <p class="text-sm text-muted-foreground py-8 text-center">{"No expense data available"}</p> }
                            } else {
                                html! {
                                    <div class="space-y-3">
                                        { for top.iter().map(|category| html! {
                                            <div>
                                                <div class="flex items-center justify-between text-sm mb-1">
                                                    <span class="text-foreground font-medium">{ category.name.clone() }</span>
                                                    <span class="font-semibold text-foreground">{ format_currency(category.value, CURRENCY_SYMBOL) }</span>
                                                </div>
                                                <div class="h-2 w-full bg-muted rounded-full overflow-hidden">
                                                    <div class="h-full bg-emerald-700 rounded-full" style={bar_width(category.value, top_value)}></div>
                                                </div>
                                            </div>
                                        }) }
                                        { if category_totals.len() > 5 {
                                            html! {
                                                <p class="text-xs text-muted-foreground pt-1">
                                                    { format!("{} more categories not shown", category_totals.len() - 5) }
                                                </p>
                                            }
                                        } else {
                                            html! {}
                                        }}
                                    </div>
                                }
                            }}
                        </div>

                        <div class="bg-card rounded-xl p-6 border border-border">
                            <div class="flex items-center justify-between mb-4">
                                <h3 class="font-bold text-foreground">{"Monthly Trends"}</h3>
                                <span class="text-muted-foreground">{ icon_bar_chart() }</span>
                            </div>
                            <div class="space-y-3">
                                { for months.iter().map(|month| html! {
                                    <div>
                                        <div class="flex items-center justify-between text-sm mb-1">
                                            <span class="text-muted-foreground">{ month.label.clone() }</span>
                                            <span class="font-semibold text-foreground">{ format_currency(month.total, CURRENCY_SYMBOL) }</span>
                                        </div>
                                        <div class="h-2 w-full bg-muted rounded-full overflow-hidden">
                                            <div class="h-full bg-sky-600 rounded-full" style={bar_width(month.total, month_max)}></div>
                                        </div>
                                    </div>
                                }) }
                            </div>
                        </div>
                    </div>

                    <div class="bg-card rounded-xl p-6 border border-border">
                        <div class="flex items-center justify-between mb-4">
                            <h3 class="font-bold text-foreground">{"Daily Spending — Last 14 Days"}</h3>
                            <span class="text-muted-foreground">{ icon_calendar() }</span>
                        </div>
                        <div class="flex items-end gap-1 h-36">
                            { for days.iter().map(|day| {
                                let height = if day_max > 0.0 { (day.total / day_max * 100.0).clamp(2.0, 100.0) } else { 2.0 };
                                html! {
                                    <div class="flex-1 flex flex-col items-center gap-1" title={format!("{}: {}", day.label, format_currency(day.total, CURRENCY_SYMBOL))}>
                                        <div class="w-full bg-emerald-700/80 rounded-t" style={format!("height: {height:.0}%")}></div>
                                        <span class="text-[9px] text-muted-foreground">{ day.label.clone() }</span>
                                    </div>
                                }
                            }) }
                        </div>
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                        <div class="bg-card rounded-xl p-6 border border-border">
                            <h3 class="font-bold text-foreground mb-4">{"Spending by Day of Week"}</h3>
                            { if weekdays.iter().all(|day| day.total == 0.0) {
                                html! { <p class="text-sm text-muted-foreground py-8 text-center">{"No expense data available for day-of-week analysis"}</p> }
                            } else {
                                html! {
                                    <table class="w-full text-sm">
                                        <thead>
                                            <tr class="text-muted-foreground text-[10px] uppercase tracking-widest">
                                                <th class="text-left pb-2 font-bold">{"Day"}</th>
                                                <th class="text-right pb-2 font-bold">{"Total"}</th>
                                                <th class="text-right pb-2 font-bold">{"Count"}</th>
                                                <th class="text-right pb-2 font-bold">{"Average"}</th>
                                            </tr>
                                        </thead>
                                        <tbody class="divide-y divide-border">
                                            { for weekdays.iter().map(|day| {
                                                let highlight = busiest_day.as_ref().map(|b| b.name == day.name).unwrap_or(false);
                                                html! {
                                                    <tr class={if highlight { "font-semibold text-emerald-700" } else { "text-foreground" }}>
                                                        <td class="py-2">{ day.name }</td>
                                                        <td class="py-2 text-right">{ format_currency(day.total, CURRENCY_SYMBOL) }</td>
                                                        <td class="py-2 text-right">{ day.count }</td>
                                                        <td class="py-2 text-right">{ format_currency(day.average, CURRENCY_SYMBOL) }</td>
                                                    </tr>
                                                }
                                            }) }
                                        </tbody>
                                    </table>
                                }
                            }}
                        </div>

                        <div class="bg-card rounded-xl p-6 border border-border">
                            <h3 class="font-bold text-foreground mb-4">{"Month-over-Month Analysis"}</h3>
                            { match change {
                                Some(change) => {
                                    let (icon, tone) = if change.is_increase {
                                        (icon_trending_up(), "text-red-500")
                                    } else {
                                        (icon_trending_down(), "text-emerald-700")
                                    };
                                    html! {
                                        <div>
                                            <div class={classes!("flex", "items-center", "gap-2", "mb-3", tone)}>
                                                { icon }
                                                <span class="text-2xl font-bold">{ format!("{:.1}%", change.percentage) }</span>
                                            </div>
                                            <p class="text-sm text-muted-foreground mb-4">
                                                { format!(
                                                    "Spending {} by {} compared to last month",
                                                    if change.is_increase { "increased" } else { "decreased" },
                                                    format_currency(change.value, CURRENCY_SYMBOL),
                                                ) }
                                            </p>
                                            <div class="flex items-center justify-between text-sm mb-1">
                                                <span class="text-muted-foreground">{"Current Month:"}</span>
                                                <span class="font-semibold text-foreground">{ format_currency(change.current, CURRENCY_SYMBOL) }</span>
                                            </div>
                                            <div class="flex items-center justify-between text-sm">
                                                <span class="text-muted-foreground">{"Previous Month:"}</span>
                                                <span class="font-semibold text-foreground">{ format_currency(change.previous, CURRENCY_SYMBOL) }</span>
                                            </div>
                                        </div>
                                    }
                                }
                                None => html! {
                                    <p class="text-sm text-muted-foreground py-8 text-center">{"Not enough data for month-over-month comparison"}</p>
                                },
                            }}

                            { if let Some(busiest) = &busiest_day {
                                html! {
                                    <div class="mt-4 pt-4 border-t border-border text-sm">
                                        <div class="flex items-center justify-between">
                                            <span class="text-muted-foreground">{"Highest Spending Day:"}</span>
                                            <span class="font-semibold text-foreground">{ busiest.name }</span>
                                        </div>
                                        <div class="flex items-center justify-between mt-1">
                                            <span class="text-muted-foreground">{"Total Amount:"}</span>
                                            <span class="font-semibold text-foreground">{ format_currency(busiest.total, CURRENCY_SYMBOL) }</span>
                                        </div>
                                    </div>
                                }
                            } else {
                                html! {}
                            }}
                        </div>
                    </div>
                </>
            }
        ) }
    }
}
