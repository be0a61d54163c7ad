use gloo_console::error as console_error;
use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::icons::{
    icon_bell, icon_layout_grid, icon_log_out, icon_moon, icon_receipt, icon_settings, icon_sun,
};
use crate::model::Notification;
use crate::state::{AppStateHandle, ThemeMode};
use crate::{DashboardTab, Route};

const NOTIFICATION_POLL_MS: u32 = 30_000;

struct NavItem {
    label: &'static str,
    tab: DashboardTab,
    icon: fn() -> Html,
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub active: DashboardTab,
    pub on_navigate: Callback<Route>,
    pub children: Children,
}

#[function_component(DashboardLayout)]
pub fn dashboard_layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar active={props.active} on_navigate={props.on_navigate.clone()} />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header on_navigate={props.on_navigate.clone()} />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active: DashboardTab,
    on_navigate: Callback<Route>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_items = vec![
        NavItem {
            label: "Dashboard",
            tab: DashboardTab::Reports,
            icon: icon_layout_grid,
        },
        NavItem {
            label: "Expenses",
            tab: DashboardTab::Expenses,
            icon: icon_receipt,
        },
        NavItem {
            label: "Settings",
            tab: DashboardTab::Settings,
            icon: icon_settings,
        },
    ];

    html! {
        <div class="w-[240px] h-screen bg-sidebar p-4 flex flex-col border-r border-border">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-11 h-11 bg-emerald-700 rounded-xl flex items-center justify-center text-white font-black">
                    {"B"}
                </div>
                <div>
                    <span class="text-foreground text-xl font-black tracking-tight block">{"BudgetTracker"}</span>
                    <span class="text-[10px] text-muted-foreground">{"Smart Financial Management"}</span>
                </div>
            </div>

            <nav class="flex-1 space-y-2">
                { for nav_items.iter().map(|item| {
                    let is_active = item.tab == props.active;
                    let class_name = if is_active {
                        "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-emerald-700/10 text-emerald-700 w-full"
                    } else {
                        "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-muted-foreground hover:bg-muted w-full"
                    };
                    let on_navigate = props.on_navigate.clone();
                    let tab = item.tab;

                    html! {
                        <button type="button" class={class_name} onclick={Callback::from(move |_| on_navigate.emit(Route::Dashboard(tab)))}>
                            <span class="shrink-0">{ (item.icon)() }</span>
                            <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                        </button>
                    }
                }) }
            </nav>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    on_navigate: Callback<Route>,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let state = use_context::<AppStateHandle>();
    let notifications = use_state(Vec::<Notification>::new);
    let show_notifications = use_state(|| false);
    let loading_notifications = use_state(|| false);
    let show_profile = use_state(|| false);

    // Initial feed load plus a fixed 30-second poll, dropped on unmount.
    {
        let notifications = notifications.clone();
        use_effect_with_deps(
            move |_| {
                let refresh = {
                    let notifications = notifications.clone();
                    move || {
                        let notifications = notifications.clone();
                        spawn_local(async move {
                            match api::list_notifications().await {
                                Ok(list) => notifications.set(list),
                                Err(_) => notifications.set(Vec::new()),
                            }
                        });
                    }
                };
                refresh();
                let interval = Interval::new(NOTIFICATION_POLL_MS, refresh);
                move || drop(interval)
            },
            (),
        );
    }

    let unread_count = notifications.iter().filter(|n| !n.is_read).count();

    let on_toggle_notifications = {
        let notifications = notifications.clone();
        let show_notifications = show_notifications.clone();
        let loading_notifications = loading_notifications.clone();
        Callback::from(move |_| {
            if *show_notifications {
                // Closing the menu marks everything read.
                show_notifications.set(false);
                let current = (*notifications).clone();
                let notifications = notifications.clone();
                spawn_local(async move {
                    if api::mark_all_notifications_read().await.is_ok() {
                        notifications.set(
                            current
                                .into_iter()
                                .map(|n| Notification { is_read: true, ..n })
                                .collect(),
                        );
                    }
                });
            } else {
                show_notifications.set(true);
                let notifications = notifications.clone();
                let loading_notifications = loading_notifications.clone();
                loading_notifications.set(true);
                spawn_local(async move {
                    match api::list_notifications().await {
                        Ok(list) => notifications.set(list),
                        Err(err) => console_error!(err.to_string()),
                    }
                    loading_notifications.set(false);
                });
            }
        })
    };

    let on_toggle_theme = {
        let state = state.clone();
        Callback::from(move |_| {
            if let Some(state) = state.as_ref() {
                let next = state.theme.toggled();
                next.store();
                state.set((**state).with_theme(next));
            }
        })
    };

    let on_toggle_profile = {
        let show_profile = show_profile.clone();
        Callback::from(move |_| show_profile.set(!*show_profile))
    };

    let on_logout = {
        let state = state.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| {
            let state = state.clone();
            let on_navigate = on_navigate.clone();
            spawn_local(async move {
                match api::logout().await {
                    Ok(()) => {
                        if let Some(state) = state.as_ref() {
                            state.set((**state).signed_out());
                        }
                        on_navigate.emit(Route::SignIn);
                    }
                    Err(err) => console_error!(err.to_string()),
                }
            });
        })
    };

    let theme = state.as_ref().map(|s| s.theme).unwrap_or(ThemeMode::Dark);
    let user = state.as_ref().and_then(|s| s.user.as_ref());
    let avatar = user.and_then(|u| u.avatar.clone());
    let (initials, display_name, email) = user
        .map(|user| (user.initials(), user.display_name().to_string(), user.email.clone()))
        .unwrap_or_else(|| ("U".to_string(), "User".to_string(), String::new()));

    let mut recent: Vec<Notification> = (*notifications).clone();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(10);

    html! {
        <header class="bg-card border-b border-border h-16 flex items-center justify-between px-6">
            <h2 class="font-semibold text-foreground">{"Dashboard"}</h2>
            <div class="relative flex items-center gap-3">
                <button class="p-2 hover:bg-muted rounded-full transition-colors" aria-label="Toggle theme" onclick={on_toggle_theme}>
                    { if theme == ThemeMode::Dark { icon_sun() } else { icon_moon() } }
                </button>

                <button class="p-2 hover:bg-muted rounded-full transition-colors relative" aria-label="Notifications" onclick={on_toggle_notifications}>
                    { icon_bell() }
                    { if unread_count > 0 {
                        html! {
                            <span class="absolute -top-1 -right-1 min-w-[18px] h-[18px] px-1 bg-red-500 text-white text-[10px] font-bold rounded-full flex items-center justify-center">
                                { unread_count }
                            </span>
                        }
                    } else {
                        html! {}
                    }}
                </button>

                <button class="w-9 h-9 bg-emerald-700 text-white rounded-full text-sm font-semibold overflow-hidden" onclick={on_toggle_profile}>
                    { if let Some(src) = avatar {
                        html! { <img src={src} alt="Avatar" class="w-full h-full object-cover rounded-full" /> }
                    } else {
                        html! { <>{ initials }</> }
                    }}
                </button>

                {
                    if *show_notifications {
                        html! {
                            <div class="absolute right-12 top-12 w-80 bg-card border border-border rounded-xl shadow-lg overflow-hidden z-50">
                                <div class="px-4 py-3 border-b border-border">
                                    <h4 class="text-sm font-bold text-foreground">{"Notifications"}</h4>
                                </div>
                                { if *loading_notifications {
                                    html! { <p class="px-4 py-4 text-sm text-muted-foreground">{"Loading..."}</p> }
                                } else if recent.is_empty() {
                                    html! { <p class="px-4 py-4 text-sm text-muted-foreground">{"No notifications"}</p> }
                                } else {
                                    html! {
                                        <div class="divide-y divide-border max-h-96 overflow-y-auto">
                                            { for recent.iter().map(|notif| html! {
                                                <div key={notif.id} class="px-4 py-3 hover:bg-muted/40 flex items-start justify-between">
                                                    <div>
                                                        <p class="text-sm font-bold text-foreground">{ notif.title.clone() }</p>
                                                        <p class="text-xs text-muted-foreground mt-1">{ notif.detail.clone() }</p>
                                                        <p class="text-[10px] text-muted-foreground/70 mt-1">{ notif.date.clone() }</p>
                                                    </div>
                                                    { if !notif.is_read {
                                                        html! { <span class="mt-1 w-2 h-2 bg-red-500 rounded-full shrink-0"></span> }
                                                    } else {
                                                        html! {}
                                                    }}
                                                </div>
                                            }) }
                                        </div>
                                    }
                                }}
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }

                {
                    if *show_profile {
                        html! {
                            <div class="absolute right-0 top-12 w-56 bg-card border border-border rounded-xl shadow-lg overflow-hidden z-50">
                                <div class="px-4 py-3 border-b border-border">
                                    <p class="text-sm font-bold text-foreground">{ display_name }</p>
                                    <p class="text-xs text-muted-foreground">{ email }</p>
                                </div>
                                <button onclick={on_logout} class="flex items-center gap-2 w-full px-4 py-3 text-sm text-foreground hover:bg-muted/40">
                                    { icon_log_out() }
                                    <span>{"Logout"}</span>
                                </button>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </header>
    }
}
