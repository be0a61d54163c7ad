pub mod icons;
pub mod layout;

use yew::prelude::*;

#[derive(Clone, Copy, PartialEq)]
pub enum BannerKind {
    Error,
    Success,
    Warning,
}

#[derive(Properties, PartialEq)]
pub struct BannerProps {
    pub kind: BannerKind,
    pub message: String,
    pub on_dismiss: Callback<()>,
}

/// Dismissible alert strip shown above page content. Errors and successes
/// come from failed/completed actions; warnings carry budget-limit notices.
#[function_component(AlertBanner)]
pub fn alert_banner(props: &BannerProps) -> Html {
    let class = match props.kind {
        BannerKind::Error => "flex items-center justify-between px-4 py-3 rounded-xl border text-sm bg-red-50 border-red-200 text-red-700",
        BannerKind::Success => "flex items-center justify-between px-4 py-3 rounded-xl border text-sm bg-green-50 border-green-200 text-green-700",
        BannerKind::Warning => "flex items-center justify-between px-4 py-3 rounded-xl border text-sm bg-amber-50 border-amber-200 text-amber-700",
    };
    let on_dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(()))
    };

    html! {
        <div class={class}>
            <span>{ props.message.clone() }</span>
            <button onclick={on_dismiss} class="ml-4 opacity-60 hover:opacity-100" aria-label="Dismiss">
                { icons::icon_close() }
            </button>
        </div>
    }
}

pub fn page_shell(title: &'static str, subtitle: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-6xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <div>
                    <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                    <p class="text-sm text-muted-foreground mt-1">{ subtitle }</p>
                </div>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

pub fn loading_indicator(label: &'static str) -> Html {
    html! {
        <div class="flex items-center justify-center py-16 text-muted-foreground">
            <span class="animate-pulse">{ label }</span>
        </div>
    }
}
