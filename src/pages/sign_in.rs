use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

use crate::api;
use crate::state::AppStateHandle;
use crate::{DashboardTab, Route};

#[derive(Properties, PartialEq)]
pub struct SignInProps {
    pub on_navigate: Callback<Route>,
}

#[function_component(SignInPage)]
pub fn sign_in_page(props: &SignInProps) -> Html {
    let state = use_context::<AppStateHandle>();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let state = state.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email_val = email.trim().to_string();
            let password_val = (*password).clone();

            if email_val.is_empty() || password_val.is_empty() {
                error.set(Some("Email and password are required".to_string()));
                return;
            }

            loading.set(true);
            error.set(None);

            let state = state.clone();
            let error = error.clone();
            let loading = loading.clone();
            let on_navigate = on_navigate.clone();
            spawn_local(async move {
                match api::login(&email_val, &password_val).await {
                    Ok(user) => {
                        if let Some(state) = state.as_ref() {
                            state.set((**state).signed_in(user));
                        }
                        on_navigate.emit(Route::Dashboard(DashboardTab::Reports));
                    }
                    Err(err) => {
                        let message = err
                            .detail()
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "Invalid email or password".to_string());
                        error.set(Some(message));
                    }
                }
                loading.set(false);
            });
        })
    };

    let go_sign_up = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Route::SignUp))
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background px-4">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{"Welcome back"}</h1>
                    <p class="text-sm text-muted-foreground mt-2">{"Sign in to continue tracking your budget."}</p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Email"}</label>
                        <input
                            type="email"
                            class="w-full px-4 py-2 bg-input border border-border rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-emerald-700"
                            value={(*email).clone()}
                            oninput={{
                                let email = email.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    email.set(input.value());
                                })
                            }}
                        />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Password"}</label>
                        <input
                            type="password"
                            class="w-full px-4 py-2 bg-input border border-border rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-emerald-700"
                            value={(*password).clone()}
                            oninput={{
                                let password = password.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    password.set(input.value());
                                })
                            }}
                        />
                    </div>

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-emerald-700 text-white py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Signing in..." } else { "Sign In" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    {"No account?"}
                    <button class="ml-2 text-emerald-700 font-semibold" onclick={go_sign_up}>
                        {"Sign up"}
                    </button>
                </div>
            </div>
        </div>
    }
}
