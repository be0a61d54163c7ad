use chrono::Local;
use gloo_console::error as console_error;
use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

use crate::analytics::{filter_expenses, page_count, paginate, summarize};
use crate::api::{self, LimitBreach};
use crate::components::icons::{
    icon_chevron_left, icon_chevron_right, icon_edit, icon_plus, icon_search, icon_trash,
};
use crate::components::{loading_indicator, page_shell, AlertBanner, BannerKind};
use crate::model::{format_currency, parse_amount, Expense};

const PAGE_SIZE: usize = 8;
const CURRENCY_SYMBOL: &str = "₱";

fn reload_expenses(
    expenses: UseStateHandle<Vec<Expense>>,
    loading: UseStateHandle<bool>,
    error: UseStateHandle<Option<String>>,
) {
    spawn_local(async move {
        loading.set(true);
        match api::list_expenses().await {
            Ok(list) => expenses.set(list),
            Err(err) => {
                console_error!(err.to_string());
                error.set(Some("Failed to fetch expenses".to_string()));
            }
        }
        loading.set(false);
    });
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn limit_notice_message(details: &[LimitBreach]) -> String {
    if details.is_empty() {
        return "This expense puts you over a budget limit.".to_string();
    }
    let parts: Vec<String> = details
        .iter()
        .map(|breach| {
            format!(
                "{} limit {} (spent {})",
                breach.period,
                format_currency(breach.limit, CURRENCY_SYMBOL),
                format_currency(breach.spent, CURRENCY_SYMBOL)
            )
        })
        .collect();
    format!("Budget limit exceeded: {}", parts.join(", "))
}

#[function_component(ExpensesPage)]
pub fn expenses_page() -> Html {
    let expenses = use_state(Vec::<Expense>::new);
    let categories = use_state(Vec::<String>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let limit_notice = use_state(|| None::<String>);

    let filter_category = use_state(String::new);
    let search = use_state(String::new);
    let page = use_state(|| 1usize);

    let show_dialog = use_state(|| false);
    let editing_id = use_state(|| None::<i64>);
    let form_amount = use_state(String::new);
    let form_description = use_state(String::new);
    let form_category = use_state(String::new);
    let form_date = use_state(String::new);
    let submitting = use_state(|| false);

    {
        let expenses = expenses.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                reload_expenses(expenses, loading, error.clone());
                spawn_local(async move {
                    match api::list_categories().await {
                        Ok(list) => categories.set(list),
                        Err(err) => {
                            console_error!(err.to_string());
                            error.set(Some("Failed to fetch categories".to_string()));
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    let on_filter_category = {
        let filter_category = filter_category.clone();
        let page = page.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            filter_category.set(input.value());
            page.set(1);
        })
    };

    let on_search = {
        let search = search.clone();
        let page = page.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
            page.set(1);
        })
    };

    let open_add_dialog = {
        let show_dialog = show_dialog.clone();
        let editing_id = editing_id.clone();
        let form_amount = form_amount.clone();
        let form_description = form_description.clone();
        let form_category = form_category.clone();
        let form_date = form_date.clone();
        let error = error.clone();
        Callback::from(move |_| {
            editing_id.set(None);
            form_amount.set(String::new());
            form_description.set(String::new());
            form_category.set(String::new());
            form_date.set(Local::now().date_naive().to_string());
            error.set(None);
            show_dialog.set(true);
        })
    };

    let open_edit_dialog = {
        let show_dialog = show_dialog.clone();
        let editing_id = editing_id.clone();
        let form_amount = form_amount.clone();
        let form_description = form_description.clone();
        let form_category = form_category.clone();
        let form_date = form_date.clone();
        let error = error.clone();
        Callback::from(move |expense: Expense| {
            editing_id.set(expense.id);
            form_amount.set(expense.amount.to_string());
            form_description.set(expense.description);
            form_category.set(expense.category);
            form_date.set(expense.date);
            error.set(None);
            show_dialog.set(true);
        })
    };

    let close_dialog = {
        let show_dialog = show_dialog.clone();
        let editing_id = editing_id.clone();
        Callback::from(move |_| {
            show_dialog.set(false);
            editing_id.set(None);
        })
    };

    let on_submit = {
        let expenses = expenses.clone();
        let loading = loading.clone();
        let error = error.clone();
        let limit_notice = limit_notice.clone();
        let show_dialog = show_dialog.clone();
        let editing_id = editing_id.clone();
        let form_amount = form_amount.clone();
        let form_description = form_description.clone();
        let form_category = form_category.clone();
        let form_date = form_date.clone();
        let submitting = submitting.clone();
        Callback::from(move |_| {
            let description = form_description.trim().to_string();
            let category = form_category.trim().to_string();
            let date = form_date.trim().to_string();

            if form_amount.trim().is_empty()
                || description.is_empty()
                || category.is_empty()
                || date.is_empty()
            {
                error.set(Some("Please complete all fields.".to_string()));
                return;
            }

            let record = Expense {
                id: *editing_id,
                amount: parse_amount(&form_amount),
                description,
                category,
                date,
            };

            error.set(None);
            submitting.set(true);

            let expenses = expenses.clone();
            let loading = loading.clone();
            let error = error.clone();
            let limit_notice = limit_notice.clone();
            let show_dialog = show_dialog.clone();
            let editing_id = editing_id.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                let result = match *editing_id {
                    Some(id) => api::update_expense(id, &record).await,
                    None => api::create_expense(&record).await,
                };

                match result {
                    Ok(saved) => {
                        if saved.limit_exceeded {
                            limit_notice.set(Some(limit_notice_message(&saved.details)));
                        }
                        show_dialog.set(false);
                        editing_id.set(None);
                        reload_expenses(expenses, loading, error);
                    }
                    Err(err) => {
                        console_error!(err.to_string());
                        let action = if editing_id.is_some() { "update" } else { "add" };
                        error.set(Some(format!("Failed to {action} expense")));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let on_delete = {
        let expenses = expenses.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |id: i64| {
            if !confirm("Are you sure you want to delete this expense?") {
                return;
            }
            let expenses = expenses.clone();
            let loading = loading.clone();
            let error = error.clone();
            spawn_local(async move {
                match api::delete_expense(id).await {
                    Ok(()) => reload_expenses(expenses, loading, error),
                    Err(err) => {
                        console_error!(err.to_string());
                        error.set(Some("Failed to delete expense".to_string()));
                    }
                }
            });
        })
    };

    // Derived views, recomputed on every render from the in-memory list.
    let filtered = filter_expenses(&expenses, &filter_category, &search);
    let summary = summarize(&filtered);
    let pages = page_count(filtered.len(), PAGE_SIZE).max(1);
    let current_page = (*page).min(pages);
    let visible = paginate(&filtered, current_page, PAGE_SIZE);

    let prev_page = {
        let page = page.clone();
        Callback::from(move |_| {
            if current_page > 1 {
                page.set(current_page - 1);
            }
        })
    };
    let next_page = {
        let page = page.clone();
        Callback::from(move |_| {
            if current_page < pages {
                page.set(current_page + 1);
            }
        })
    };

    let category_options = {
        let mut options: Vec<String> = (*categories).clone();
        let current = form_category.trim().to_string();
        if !current.is_empty() && !options.iter().any(|c| *c == current) {
            options.push(current);
        }
        options
    };

    html! {
        { page_shell(
            "Expenses",
            "Track and manage your daily expenses",
            html! {
                <button onclick={open_add_dialog} class="flex items-center gap-2 bg-emerald-700 text-white px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_plus() }
                    {"Add Expense"}
                </button>
            },
            html! {
                <>
                    { if let Some(message) = (*error).clone() {
                        let error = error.clone();
                        html! { <AlertBanner kind={BannerKind::Error} message={message} on_dismiss={Callback::from(move |_| error.set(None))} /> }
                    } else {
                        html! {}
                    }}
                    { if let Some(message) = (*limit_notice).clone() {
                        let limit_notice = limit_notice.clone();
                        html! { <AlertBanner kind={BannerKind::Warning} message={message} on_dismiss={Callback::from(move |_| limit_notice.set(None))} /> }
                    } else {
                        html! {}
                    }}

                    <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                        <div class="bg-card rounded-xl p-5 border border-border">
                            <p class="text-[10px] font-bold text-muted-foreground tracking-widest uppercase mb-1">{"Total Expenses"}</p>
                            <h3 class="text-xl font-bold text-foreground">{ format_currency(summary.total, CURRENCY_SYMBOL) }</h3>
                        </div>
                        <div class="bg-card rounded-xl p-5 border border-border">
                            <p class="text-[10px] font-bold text-muted-foreground tracking-widest uppercase mb-1">{"Transactions"}</p>
                            <h3 class="text-xl font-bold text-foreground">{ summary.count }</h3>
                        </div>
                        <div class="bg-card rounded-xl p-5 border border-border">
                            <p class="text-[10px] font-bold text-muted-foreground tracking-widest uppercase mb-1">{"Categories Used"}</p>
                            <h3 class="text-xl font-bold text-foreground">{ crate::analytics::totals_by_category(&filtered).len() }</h3>
                        </div>
                        <div class="bg-card rounded-xl p-5 border border-border">
                            <p class="text-[10px] font-bold text-muted-foreground tracking-widest uppercase mb-1">{"Average per Transaction"}</p>
                            <h3 class="text-xl font-bold text-foreground">{ format_currency(summary.average, CURRENCY_SYMBOL) }</h3>
                        </div>
                    </div>

                    <div class="flex flex-col md:flex-row gap-3">
                        <select onchange={on_filter_category} class="md:w-56 px-3 py-2 bg-input border border-border rounded-lg text-sm text-foreground">
                            <option value="" selected={filter_category.is_empty()}>{"All Categories"}</option>
                            { for categories.iter().map(|category| html! {
                                <option value={category.clone()} selected={*filter_category == *category}>{ category.clone() }</option>
                            }) }
                        </select>
                        <div class="flex-1 flex items-center gap-2 px-3 py-2 bg-input border border-border rounded-lg">
                            <span class="text-muted-foreground">{ icon_search() }</span>
                            <input
                                type="text"
                                placeholder="Search by description, category or amount"
                                class="flex-1 bg-transparent text-sm text-foreground outline-none"
                                value={(*search).clone()}
                                oninput={on_search}
                            />
                        </div>
                    </div>

                    <div class="bg-card rounded-xl border border-border overflow-hidden">
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-4 font-bold">{"Date"}</th>
                                        <th class="px-6 py-4 font-bold">{"Description"}</th>
                                        <th class="px-6 py-4 font-bold">{"Category"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Amount"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if *loading {
                                        html! { <tr><td colspan="5">{ loading_indicator("Loading expenses...") }</td></tr> }
                                    } else if visible.is_empty() {
                                        html! {
                                            <tr><td colspan="5" class="px-6 py-10 text-center text-muted-foreground">
                                                { if filtered.is_empty() && filter_category.is_empty() && search.is_empty() {
                                                    "No expenses yet. Start tracking by adding your first transaction."
                                                } else {
                                                    "No expenses match the current filters."
                                                }}
                                            </td></tr>
                                        }
                                    } else {
                                        html! {
                                            <>
                                                { for visible.iter().map(|expense| {
                                                    let edit = {
                                                        let open_edit_dialog = open_edit_dialog.clone();
                                                        let expense = expense.clone();
                                                        Callback::from(move |_| open_edit_dialog.emit(expense.clone()))
                                                    };
                                                    let delete = expense.id.map(|id| {
                                                        let on_delete = on_delete.clone();
                                                        Callback::from(move |_| on_delete.emit(id))
                                                    });

                                                    html! {
                                                        <tr class="text-sm hover:bg-muted/30 transition-colors">
                                                            <td class="px-6 py-4 text-muted-foreground">{ expense.date.clone() }</td>
                                                            <td class="px-6 py-4 text-foreground">{ expense.description.clone() }</td>
                                                            <td class="px-6 py-4">
                                                                <span class="bg-emerald-700/10 text-emerald-700 px-3 py-1 rounded-full text-[10px] font-bold">{ expense.category.clone() }</span>
                                                            </td>
                                                            <td class="px-6 py-4 text-right font-semibold text-foreground">{ format_currency(expense.amount, CURRENCY_SYMBOL) }</td>
                                                            <td class="px-6 py-4 text-right">
                                                                <button onclick={edit} class="p-1.5 text-muted-foreground hover:text-foreground" aria-label="Edit">{ icon_edit() }</button>
                                                                { if let Some(delete) = delete {
                                                                    html! { <button onclick={delete} class="p-1.5 text-muted-foreground hover:text-red-500" aria-label="Delete">{ icon_trash() }</button> }
                                                                } else {
                                                                    html! {}
                                                                }}
                                                            </td>
                                                        </tr>
                                                    }
                                                }) }
                                            </>
                                        }
                                    }}
                                </tbody>
                            </table>
                        </div>
                        <div class="flex items-center justify-between px-6 py-3 border-t border-border text-sm text-muted-foreground">
                            <span>{ format!("Page {current_page} of {pages}") }</span>
                            <div class="flex gap-2">
                                <button onclick={prev_page} disabled={current_page <= 1} class="flex items-center gap-1 px-3 py-1.5 border border-border rounded-lg disabled:opacity-40 hover:bg-muted/40">{ icon_chevron_left() }{"Previous"}</button>
                                <button onclick={next_page} disabled={current_page >= pages} class="flex items-center gap-1 px-3 py-1.5 border border-border rounded-lg disabled:opacity-40 hover:bg-muted/40">{"Next"}{ icon_chevron_right() }</button>
                            </div>
                        </div>
                    </div>

                    {
                        if *show_dialog {
                            html! {
                                <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50 px-4">
                                    <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-xl p-6">
                                        <h3 class="text-lg font-bold text-foreground mb-4">
                                            { if editing_id.is_some() { "Edit Expense" } else { "Add New Expense" } }
                                        </h3>
                                        <div class="space-y-3">
                                            <div class="space-y-1">
                                                <label class="text-xs font-bold text-muted-foreground uppercase tracking-widest">{"Description"}</label>
                                                <input type="text" value={(*form_description).clone()} oninput={{
                                                    let form_description = form_description.clone();
                                                    Callback::from(move |e: InputEvent| {
                                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                                        form_description.set(input.value());
                                                    })
                                                }} class="w-full px-3 py-2 bg-input border border-border rounded-lg text-sm text-foreground" />
                                            </div>
                                            <div class="space-y-1">
                                                <label class="text-xs font-bold text-muted-foreground uppercase tracking-widest">{ format!("Amount ({CURRENCY_SYMBOL})") }</label>
                                                <input type="number" min="0" step="0.01" placeholder="0.00" value={(*form_amount).clone()} oninput={{
                                                    let form_amount = form_amount.clone();
                                                    Callback::from(move |e: InputEvent| {
                                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                                        form_amount.set(input.value());
                                                    })
                                                }} class="w-full px-3 py-2 bg-input border border-border rounded-lg text-sm text-foreground" />
                                            </div>
                                            <div class="space-y-1">
                                                <label class="text-xs font-bold text-muted-foreground uppercase tracking-widest">{"Category"}</label>
                                                <select onchange={{
                                                    let form_category = form_category.clone();
                                                    Callback::from(move |e: Event| {
                                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                                        form_category.set(input.value());
                                                    })
                                                }} class="w-full px-3 py-2 bg-input border border-border rounded-lg text-sm text-foreground">
                                                    <option value="" selected={form_category.is_empty()}>{"Select a category"}</option>
                                                    { for category_options.iter().map(|category| html! {
                                                        <option value={category.clone()} selected={*form_category == *category}>{ category.clone() }</option>
                                                    }) }
                                                </select>
                                            </div>
                                            <div class="space-y-1">
                                                <label class="text-xs font-bold text-muted-foreground uppercase tracking-widest">{"Date"}</label>
                                                <input type="date" value={(*form_date).clone()} oninput={{
                                                    let form_date = form_date.clone();
                                                    Callback::from(move |e: InputEvent| {
                                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                                        form_date.set(input.value());
                                                    })
                                                }} class="w-full px-3 py-2 bg-input border border-border rounded-lg text-sm text-foreground" />
                                            </div>
                                        </div>
                                        <div class="flex justify-end gap-2 mt-6">
                                            <button onclick={close_dialog} class="px-4 py-2 border border-border rounded-lg text-sm text-foreground hover:bg-muted/40">{"Cancel"}</button>
                                            <button onclick={on_submit} disabled={*submitting} class="px-4 py-2 bg-emerald-700 text-white rounded-lg text-sm font-semibold hover:opacity-90 disabled:opacity-60">
                                                { if *submitting { "Saving..." } else if editing_id.is_some() { "Update" } else { "Add" } }
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </>
            }
        ) }
    }
}
