//! Form helpers

use leptos::*;

/// Error line above a form; hidden when there is nothing to say
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|text| view! {
            <div class="bg-red-900/50 border border-red-700 text-red-200 px-4 py-3 rounded-lg text-sm">
                {text}
            </div>
        })
    }
}

/// Submit button that disables itself while a request is pending
#[component]
pub fn SubmitButton(
    label: &'static str,
    busy_label: &'static str,
    #[prop(into)]
    busy: Signal<bool>,
) -> impl IntoView {
    view! {
        <button
            type="submit"
            class="w-full px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:opacity-50 rounded-lg font-medium transition-colors"
            disabled=move || busy.get()
        >
            {move || if busy.get() { busy_label } else { label }}
        </button>
    }
}
