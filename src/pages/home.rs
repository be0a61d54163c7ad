use yew::prelude::*;

use crate::components::icons::{icon_bar_chart, icon_receipt, icon_wallet};
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    pub on_navigate: Callback<Route>,
}

#[function_component(HomePage)]
pub fn home_page(props: &HomeProps) -> Html {
    let go_sign_up = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Route::SignUp))
    };
    let go_sign_in = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Route::SignIn))
    };

    let features = [
        (
            icon_receipt as fn() -> Html,
            "Track Every Expense",
            "Record daily spending against your own categories and find any transaction with search and filters.",
        ),
        (
            icon_bar_chart,
            "Understand Your Spending",
            "Category breakdowns, monthly trends and day-of-week patterns, computed from your own data.",
        ),
        (
            icon_wallet,
            "Stay Within Budget",
            "Set daily, weekly and monthly limits and get notified the moment a purchase pushes you over.",
        ),
    ];

    html! {
        <div class="min-h-screen bg-background">
            <header class="max-w-5xl mx-auto flex items-center justify-between px-6 py-5">
                <div class="flex items-center gap-2">
                    <div class="w-9 h-9 bg-emerald-700 rounded-lg flex items-center justify-center text-white font-black">{"B"}</div>
                    <span class="text-lg font-black text-foreground tracking-tight">{"BudgetTracker"}</span>
                </div>
                <div class="flex items-center gap-3">
                    <button onclick={go_sign_in.clone()} class="text-sm font-semibold text-foreground hover:text-emerald-700">{"Sign In"}</button>
                    <button onclick={go_sign_up.clone()} class="bg-emerald-700 text-white text-sm font-semibold px-4 py-2 rounded-lg hover:opacity-90">{"Get Started"}</button>
                </div>
            </header>

            <main class="max-w-5xl mx-auto px-6">
                <section class="text-center py-20">
                    <h1 class="text-4xl md:text-5xl font-black text-foreground tracking-tight mb-4">
                        {"Smart financial management,"}<br/>{"without the spreadsheet"}
                    </h1>
                    <p class="text-muted-foreground max-w-xl mx-auto mb-8">
                        {"Track expenses, analyze where your money goes, and keep your spending under the limits you set."}
                    </p>
                    <button onclick={go_sign_up} class="bg-emerald-700 text-white font-bold px-8 py-3 rounded-xl hover:opacity-90 transition-all">
                        {"Start Tracking Free"}
                    </button>
                </section>

                <section class="grid grid-cols-1 md:grid-cols-3 gap-6 pb-20">
                    { for features.iter().map(|(icon, title, body)| html! {
                        <div class="bg-card border border-border rounded-2xl p-6">
                            <div class="w-10 h-10 bg-emerald-700/10 text-emerald-700 rounded-lg flex items-center justify-center mb-4">
                                { icon() }
                            </div>
                            <h3 class="font-bold text-foreground mb-2">{ *title }</h3>
                            <p class="text-sm text-muted-foreground">{ *body }</p>
                        </div>
                    }) }
                </section>
            </main>
        </div>
    }
}
