//! Stat cards and status badges

use agentdesk::screens::dashboard::StatCard;
use agentdesk::screens::investments::StatusTone;
use agentdesk::InvestmentStatus;
use leptos::*;

/// Grid of labelled numbers
#[component]
pub fn StatCards(#[prop(into)] cards: Signal<Vec<StatCard>>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            {move || {
                cards.get().into_iter().map(|card| view! {
                    <div class="bg-gray-800 rounded-xl p-6">
                        <div class="text-sm text-gray-400">{card.label}</div>
                        <div class="text-3xl font-bold mt-2">{card.value}</div>
                    </div>
                }).collect_view()
            }}
        </div>
    }
}

/// Coloured pill for an investment status
#[component]
pub fn StatusBadge(status: InvestmentStatus) -> impl IntoView {
    let class = StatusTone::of(&status).css_class();
    view! { <span class=class>{status.to_string()}</span> }
}
