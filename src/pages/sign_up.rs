use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

use crate::api::{self, SignupForm};
use crate::state::AppStateHandle;
use crate::{DashboardTab, Route};

#[derive(Properties, PartialEq)]
pub struct SignUpProps {
    pub on_navigate: Callback<Route>,
}

#[function_component(SignUpPage)]
pub fn sign_up_page(props: &SignUpProps) -> Html {
    let state = use_context::<AppStateHandle>();
    let firstname = use_state(String::new);
    let lastname = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let accepted_terms = use_state(|| false);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let state = state.clone();
        let firstname = firstname.clone();
        let lastname = lastname.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let accepted_terms = accepted_terms.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if !*accepted_terms {
                error.set(Some("Please accept the terms and conditions".to_string()));
                return;
            }
            if *password != *confirm_password {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }
            if password.len() < 8 {
                error.set(Some("Password must be at least 8 characters long".to_string()));
                return;
            }
            if firstname.trim().is_empty() || lastname.trim().is_empty() || email.trim().is_empty() {
                error.set(Some("Please complete all fields".to_string()));
                return;
            }

            loading.set(true);
            error.set(None);

            let form = SignupForm {
                firstname: firstname.trim().to_string(),
                lastname: lastname.trim().to_string(),
                email: email.trim().to_string(),
                password: (*password).clone(),
                confirm_password: (*confirm_password).clone(),
            };

            let state = state.clone();
            let error = error.clone();
            let loading = loading.clone();
            let on_navigate = on_navigate.clone();
            spawn_local(async move {
                match api::signup(&form).await {
                    Ok(()) => {
                        // The signup response sets the session cookie; pull
                        // the profile so the dashboard has a user to show.
                        if let Ok(user) = api::current_user().await {
                            if let Some(state) = state.as_ref() {
                                state.set((**state).signed_in(user));
                            }
                        }
                        on_navigate.emit(Route::Dashboard(DashboardTab::Reports));
                    }
                    Err(err) => {
                        let message = err
                            .detail()
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "Failed to create account. Please try again.".to_string());
                        error.set(Some(message));
                    }
                }
                loading.set(false);
            });
        })
    };

    let go_sign_in = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Route::SignIn))
    };

    let text_field = |label: &'static str,
                      kind: &'static str,
                      handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        let value = (*handle).clone();
        html! {
            <div class="space-y-1">
                <label class="text-sm font-medium text-foreground">{ label }</label>
                <input
                    type={kind}
                    class="w-full px-4 py-2 bg-input border border-border rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-emerald-700"
                    value={value}
                    oninput={Callback::from(move |e: InputEvent| {
                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                        handle.set(input.value());
                    })}
                />
            </div>
        }
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background px-4 py-10">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{"Create account"}</h1>
                    <p class="text-sm text-muted-foreground mt-2">{"Start managing your finances today."}</p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="grid grid-cols-2 gap-3">
                        { text_field("First name", "text", &firstname) }
                        { text_field("Last name", "text", &lastname) }
                    </div>
                    { text_field("Email", "email", &email) }
                    { text_field("Password", "password", &password) }
                    { text_field("Confirm Password", "password", &confirm_password) }

                    <label class="flex items-center gap-2 text-sm text-muted-foreground">
                        <input
                            type="checkbox"
                            checked={*accepted_terms}
                            onclick={{
                                let accepted_terms = accepted_terms.clone();
                                Callback::from(move |_| accepted_terms.set(!*accepted_terms))
                            }}
                        />
                        {"I accept the terms and conditions"}
                    </label>

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-emerald-700 text-white py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Creating account..." } else { "Sign Up" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    {"Already have an account?"}
                    <button class="ml-2 text-emerald-700 font-semibold" onclick={go_sign_in}>
                        {"Sign in"}
                    </button>
                </div>
            </div>
        </div>
    }
}
