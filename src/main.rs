mod analytics;
mod api;
mod components;
mod model;
mod pages;
mod state;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use components::layout::DashboardLayout;
use pages::{ExpensesPage, HomePage, ReportsPage, SettingsPage, SignInPage, SignUpPage};
use state::{AppState, AppStateHandle};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Reports,
    Expenses,
    Settings,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
    SignUp,
    Dashboard(DashboardTab),
}

#[function_component(App)]
fn app() -> Html {
    let route = use_state(|| Route::Home);
    let state = use_state(AppState::new);

    let on_navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| route.set(next))
    };

    // Session restore on startup: the cookie may still be valid from a
    // previous visit. Until this settles the dashboard shows a checking
    // indicator instead of bouncing to sign-in.
    {
        let state = state.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api::current_user().await {
                        Ok(user) => state.set((*state).signed_in(user)),
                        Err(_) => state.set((*state).signed_out()),
                    }
                });
                || ()
            },
            (),
        );
    }

    let content = match *route {
        Route::Home => html! { <HomePage on_navigate={on_navigate.clone()} /> },
        Route::SignIn => html! { <SignInPage on_navigate={on_navigate.clone()} /> },
        Route::SignUp => html! { <SignUpPage on_navigate={on_navigate.clone()} /> },
        Route::Dashboard(tab) => {
            if !state.auth_checked {
                html! {
                    <div class="min-h-screen flex items-center justify-center bg-background text-muted-foreground">
                        {"Checking session..."}
                    </div>
                }
            } else if state.user.is_none() {
                html! { <SignInPage on_navigate={on_navigate.clone()} /> }
            } else {
                let page = match tab {
                    DashboardTab::Reports => html! { <ReportsPage /> },
                    DashboardTab::Expenses => html! { <ExpensesPage /> },
                    DashboardTab::Settings => html! { <SettingsPage /> },
                };
                html! {
                    <DashboardLayout active={tab} on_navigate={on_navigate.clone()}>
                        { page }
                    </DashboardLayout>
                }
            }
        }
    };

    html! {
        <ContextProvider<AppStateHandle> context={state.clone()}>
            <div class={classes!("min-h-screen", state.theme.class())}>
                { content }
            </div>
        </ContextProvider<AppStateHandle>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
