use gloo_console::error as console_error;
use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

use crate::api;
use crate::components::icons::{icon_edit, icon_plus, icon_trash};
use crate::components::{page_shell, AlertBanner, BannerKind};
use crate::model::{currency_symbol, BudgetLimits, UserSettings, CURRENCIES};

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let settings = use_state(UserSettings::default);
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);
    let success = use_state(|| None::<String>);

    let show_category_dialog = use_state(|| false);
    let editing_category = use_state(|| None::<String>);
    let category_name = use_state(String::new);

    // Settings and the category list live on separate endpoints; merge the
    // two responses into one record.
    {
        let settings = settings.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let mut merged = match api::get_settings().await {
                        Ok(loaded) => loaded,
                        Err(err) => {
                            console_error!(err.to_string());
                            error.set(Some("Failed to load settings".to_string()));
                            UserSettings::default()
                        }
                    };
                    match api::list_categories().await {
                        Ok(categories) => merged.categories = categories,
                        Err(err) => {
                            console_error!(err.to_string());
                            error.set(Some("Failed to load categories".to_string()));
                        }
                    }
                    settings.set(merged);
                });
                || ()
            },
            (),
        );
    }

    let symbol = currency_symbol(&settings.currency);

    let on_currency_change = {
        let settings = settings.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            settings.set(UserSettings {
                currency: input.value(),
                ..(*settings).clone()
            });
        })
    };

    let limit_field = |label: String, value: f64, apply: Box<dyn Fn(&UserSettings, f64) -> UserSettings>| {
        let settings = settings.clone();
        html! {
            <div class="space-y-1">
                <label class="text-sm font-medium text-foreground">{ label }</label>
                <input
                    type="number"
                    min="0"
                    step="0.01"
                    value={value.to_string()}
                    oninput={Callback::from(move |e: InputEvent| {
                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                        let parsed: f64 = input.value().parse().unwrap_or(0.0);
                        settings.set(apply(&*settings, parsed.max(0.0)));
                    })}
                    class="w-full px-4 py-2 bg-input border border-border rounded-lg text-sm text-foreground"
                />
            </div>
        }
    };

    let on_save = {
        let settings = settings.clone();
        let saving = saving.clone();
        let error = error.clone();
        let success = success.clone();
        Callback::from(move |_| {
            saving.set(true);
            error.set(None);
            success.set(None);

            let record = (*settings).clone();
            let saving = saving.clone();
            let error = error.clone();
            let success = success.clone();
            spawn_local(async move {
                match api::put_settings(&record).await {
                    Ok(()) => success.set(Some("Settings saved successfully!".to_string())),
                    Err(err) => {
                        let message = err
                            .detail()
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "Failed to save settings".to_string());
                        error.set(Some(message));
                    }
                }
                saving.set(false);
            });
        })
    };

    let open_add_category = {
        let show_category_dialog = show_category_dialog.clone();
        let editing_category = editing_category.clone();
        let category_name = category_name.clone();
        Callback::from(move |_| {
            editing_category.set(None);
            category_name.set(String::new());
            show_category_dialog.set(true);
        })
    };

    let open_edit_category = {
        let show_category_dialog = show_category_dialog.clone();
        let editing_category = editing_category.clone();
        let category_name = category_name.clone();
        Callback::from(move |name: String| {
            category_name.set(name.clone());
            editing_category.set(Some(name));
            show_category_dialog.set(true);
        })
    };

    let close_category_dialog = {
        let show_category_dialog = show_category_dialog.clone();
        let editing_category = editing_category.clone();
        let category_name = category_name.clone();
        Callback::from(move |_| {
            show_category_dialog.set(false);
            editing_category.set(None);
            category_name.set(String::new());
        })
    };

    let on_submit_category = {
        let settings = settings.clone();
        let error = error.clone();
        let success = success.clone();
        let show_category_dialog = show_category_dialog.clone();
        let editing_category = editing_category.clone();
        let category_name = category_name.clone();
        Callback::from(move |_| {
            let name = category_name.trim().to_string();
            if name.is_empty() {
                return;
            }

            let settings = settings.clone();
            let error = error.clone();
            let success = success.clone();
            let show_category_dialog = show_category_dialog.clone();
            let editing_category_handle = editing_category.clone();
            let category_name = category_name.clone();
            let editing = (*editing_category).clone();
            spawn_local(async move {
                match editing {
                    Some(old_name) => match api::rename_category(&old_name, &name).await {
                        Ok(()) => {
                            let mut next = (*settings).clone();
                            for category in next.categories.iter_mut() {
                                if *category == old_name {
                                    *category = name.clone();
                                }
                            }
                            settings.set(next);
                            success.set(Some("Category updated successfully!".to_string()));
                        }
                        Err(err) => {
                            let message = err
                                .detail()
                                .map(|d| d.to_string())
                                .unwrap_or_else(|| "Failed to update category.".to_string());
                            error.set(Some(message));
                        }
                    },
                    None => match api::create_category(&name).await {
                        Ok(updated) => {
                            let mut next = (*settings).clone();
                            next.categories = updated;
                            settings.set(next);
                            success.set(Some("Category added successfully!".to_string()));
                        }
                        Err(err) => {
                            let message = err
                                .detail()
                                .map(|d| d.to_string())
                                .unwrap_or_else(|| "Failed to update categories.".to_string());
                            error.set(Some(message));
                        }
                    },
                }
                editing_category_handle.set(None);
                category_name.set(String::new());
                show_category_dialog.set(false);
            });
        })
    };

    let on_delete_category = {
        let settings = settings.clone();
        let error = error.clone();
        Callback::from(move |name: String| {
            if !confirm(&format!("Are you sure you want to delete \"{name}\"?")) {
                return;
            }
            let settings = settings.clone();
            let error = error.clone();
            spawn_local(async move {
                match api::delete_category(&name).await {
                    Ok(()) => {
                        let mut next = (*settings).clone();
                        next.categories.retain(|category| *category != name);
                        settings.set(next);
                    }
                    Err(err) => {
                        let message = err
                            .detail()
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "Failed to delete category.".to_string());
                        error.set(Some(message));
                    }
                }
            });
        })
    };

    html! {
        { page_shell(
            "Settings",
            "Customize your budget tracker experience",
            html! {},
            html! {
                <>
                    { if let Some(message) = (*error).clone() {
                        let error = error.clone();
                        html! { <AlertBanner kind={BannerKind::Error} message={message} on_dismiss={Callback::from(move |_| error.set(None))} /> }
                    } else {
                        html! {}
                    }}
                    { if let Some(message) = (*success).clone() {
                        let success = success.clone();
                        html! { <AlertBanner kind={BannerKind::Success} message={message} on_dismiss={Callback::from(move |_| success.set(None))} /> }
                    } else {
                        html! {}
                    }}

                    <div class="bg-card rounded-xl p-6 border border-border">
                        <h2 class="text-lg font-bold text-foreground mb-4">{"Budget Limits"}</h2>
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                            { limit_field(
                                format!("Daily Limit ({symbol})"),
                                settings.budget_limits.daily,
                                Box::new(|s, v| UserSettings {
                                    budget_limits: BudgetLimits { daily: v, ..s.budget_limits.clone() },
                                    ..s.clone()
                                }),
                            ) }
                            { limit_field(
                                format!("Weekly Limit ({symbol})"),
                                settings.budget_limits.weekly,
                                Box::new(|s, v| UserSettings {
                                    budget_limits: BudgetLimits { weekly: v, ..s.budget_limits.clone() },
                                    ..s.clone()
                                }),
                            ) }
                            { limit_field(
                                format!("Monthly Limit ({symbol})"),
                                settings.budget_limits.monthly,
                                Box::new(|s, v| UserSettings {
                                    budget_limits: BudgetLimits { monthly: v, ..s.budget_limits.clone() },
                                    ..s.clone()
                                }),
                            ) }
                        </div>
                    </div>

                    <div class="bg-card rounded-xl p-6 border border-border">
                        <h2 class="text-lg font-bold text-foreground mb-4">{"Currency"}</h2>
                        <select onchange={on_currency_change} class="w-full md:w-80 px-4 py-2 bg-input border border-border rounded-lg text-sm text-foreground">
                            { for CURRENCIES.iter().map(|currency| html! {
                                <option value={currency.code} selected={settings.currency == currency.code}>{ currency.name }</option>
                            }) }
                        </select>
                        <p class="text-xs text-muted-foreground mt-2">{"Currency applies to budget limits and future reports."}</p>
                    </div>

                    <div class="bg-card rounded-xl p-6 border border-border">
                        <div class="flex items-center justify-between mb-4">
                            <h2 class="text-lg font-bold text-foreground">{"Categories"}</h2>
                            <button onclick={open_add_category} class="flex items-center gap-1 bg-emerald-700 text-white text-sm font-semibold px-3 py-1.5 rounded-lg hover:opacity-90">
                                { icon_plus() }
                                {"Add"}
                            </button>
                        </div>
                        { if settings.categories.is_empty() {
                            html! { <p class="text-sm text-muted-foreground">{"No categories yet. Add one to start classifying expenses."}</p> }
                        } else {
                            html! {
                                <div class="space-y-2 max-h-80 overflow-y-auto">
                                    { for settings.categories.iter().map(|category| {
                                        let edit = {
                                            let open_edit_category = open_edit_category.clone();
                                            let category = category.clone();
                                            Callback::from(move |_| open_edit_category.emit(category.clone()))
                                        };
                                        let delete = {
                                            let on_delete_category = on_delete_category.clone();
                                            let category = category.clone();
                                            Callback::from(move |_| on_delete_category.emit(category.clone()))
                                        };
                                        html! {
                                            <div class="flex items-center justify-between px-4 py-2.5 border border-border rounded-lg bg-background/40">
                                                <span class="text-sm font-medium text-foreground">{ category.clone() }</span>
                                                <div class="flex gap-1">
                                                    <button onclick={edit} class="p-1.5 text-muted-foreground hover:text-foreground" aria-label="Rename category">{ icon_edit() }</button>
                                                    <button onclick={delete} class="p-1.5 text-muted-foreground hover:text-red-500" aria-label="Delete category">{ icon_trash() }</button>
                                                </div>
                                            </div>
                                        }
                                    }) }
                                </div>
                            }
                        }}
                    </div>

                    <div class="flex justify-center">
                        <button onclick={on_save} disabled={*saving} class="bg-emerald-700 text-white font-bold px-8 py-3 rounded-xl hover:opacity-90 disabled:opacity-60 transition-all">
                            { if *saving { "Saving..." } else { "Save Settings" } }
                        </button>
                    </div>

                    {
                        if *show_category_dialog {
                            html! {
                                <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50 px-4">
                                    <div class="w-full max-w-sm bg-card border border-border rounded-2xl shadow-xl p-6">
                                        <h3 class="text-lg font-bold text-foreground mb-4">
                                            { if editing_category.is_some() { "Edit Category" } else { "Add New Category" } }
                                        </h3>
                                        <input
                                            type="text"
                                            placeholder="Category Name"
                                            value={(*category_name).clone()}
                                            oninput={{
                                                let category_name = category_name.clone();
                                                Callback::from(move |e: InputEvent| {
                                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                                    category_name.set(input.value());
                                                })
                                            }}
                                            class="w-full px-3 py-2 bg-input border border-border rounded-lg text-sm text-foreground"
                                        />
                                        <div class="flex justify-end gap-2 mt-6">
                                            <button onclick={close_category_dialog} class="px-4 py-2 border border-border rounded-lg text-sm text-foreground hover:bg-muted/40">{"Cancel"}</button>
                                            <button onclick={on_submit_category} disabled={category_name.trim().is_empty()} class="px-4 py-2 bg-emerald-700 text-white rounded-lg text-sm font-semibold hover:opacity-90 disabled:opacity-60">
                                                { if editing_category.is_some() { "Update" } else { "Add" } }
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
