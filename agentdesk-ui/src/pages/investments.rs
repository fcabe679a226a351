//! Investment Pages

use std::str::FromStr;

use agentdesk::maturity::format_date;
use agentdesk::screens::customers::load_customers;
use agentdesk::screens::investments::{load_investment_list, InvestmentForm};
use agentdesk::{ListState, Route as DeskRoute, SchemeType};
use leptos::*;
use leptos_router::*;

use crate::components::{ErrorBanner, ListPlaceholder, StatusBadge, SubmitButton};
use crate::state::{use_fetch, use_lifetime, use_session};

/// Investment list page
#[component]
pub fn Investments() -> impl IntoView {
    let api = use_session().api().clone();
    let rows = use_fetch(move || async move { load_investment_list(&api).await });

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Investments"</h1>
                <A href="/investments/add" class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg">
                    "Add investment"
                </A>
            </div>

            <table class="w-full bg-gray-800 rounded-xl overflow-hidden">
                <thead class="bg-gray-700 text-left text-sm text-gray-300">
                    <tr>
                        <th class="px-4 py-3">"Customer"</th>
                        <th class="px-4 py-3">"Scheme"</th>
                        <th class="px-4 py-3">"Principal"</th>
                        <th class="px-4 py-3">"Start"</th>
                        <th class="px-4 py-3">"Maturity"</th>
                        <th class="px-4 py-3">"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows.with(|state| match state.list_state() {
                        ListState::Loading => view! { <ListPlaceholder message="Loading..." columns=6 /> }.into_view(),
                        ListState::Empty => view! { <ListPlaceholder message="No investments found." columns=6 /> }.into_view(),
                        ListState::Failed(message) => view! { <ListPlaceholder message=message columns=6 /> }.into_view(),
                        ListState::Rows(rows) => rows.iter().map(|row| {
                            let inv = &row.investment;
                            let href = DeskRoute::CustomerDetail(inv.customer_id.clone()).path();
                            view! {
                                <tr class="border-t border-gray-700">
                                    <td class="px-4 py-3">
                                        <A href=href class="hover:text-primary-300">{row.customer_name.clone()}</A>
                                    </td>
                                    <td class="px-4 py-3">{inv.scheme_type.code()}</td>
                                    <td class="px-4 py-3">{row.principal_display()}</td>
                                    <td class="px-4 py-3">{format_date(inv.start_date)}</td>
                                    <td class="px-4 py-3">{format_date(inv.maturity_date)}</td>
                                    <td class="px-4 py-3"><StatusBadge status=inv.status.clone() /></td>
                                </tr>
                            }
                        }).collect_view(),
                    })}
                </tbody>
            </table>
        </div>
    }
}

/// Add investment page
///
/// The maturity date follows the start date and scheme until edited.
#[component]
pub fn AddInvestment() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let lifetime = use_lifetime();
    let api = session.api().clone();
    let customers = use_fetch(move || async move { load_customers(&api).await });
    let form = create_rw_signal(InvestmentForm::default());
    let error = create_rw_signal(None::<String>);
    let busy = create_rw_signal(false);

    // Preselect the first customer once the list arrives
    create_effect(move |_| {
        customers.with(|state| {
            if let Some(list) = state.ready() {
                let first = InvestmentForm::for_customers(list).customer_id;
                form.update(|f| {
                    if f.customer_id.is_empty() {
                        f.customer_id = first;
                    }
                });
            }
        });
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let session = session.clone();
        let navigate = navigate.clone();
        let current = form.get_untracked();
        busy.set(true);
        error.set(None);

        let request = lifetime.bind(async move {
            match current.submit(session.api()).await {
                Ok(_) => {
                    session.show_notice("Investment created");
                    navigate(&DeskRoute::Investments.path(), Default::default());
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                    busy.set(false);
                }
            }
        });
        spawn_local(async move {
            request.await;
        });
    };

    let input_class = "mt-1 w-full bg-gray-700 border border-gray-600 rounded-lg px-4 py-2 focus:outline-none focus:border-primary-500";

    view! {
        <div class="max-w-lg space-y-6">
            <h1 class="text-3xl font-bold">"Add Investment"</h1>
            <form class="bg-gray-800 rounded-xl p-6 space-y-4" on:submit=on_submit>
                <ErrorBanner message=error />

                <label class="block">
                    <span class="text-sm text-gray-300">"Customer"</span>
                    <select
                        class=input_class
                        prop:value=move || form.with(|f| f.customer_id.clone())
                        on:change=move |ev| form.update(|f| f.customer_id = event_target_value(&ev))
                    >
                        {move || customers.with(|state| {
                            state.ready().map(|list| list.iter().map(|c| view! {
                                <option value=c.customer_id.clone()>
                                    {format!("{} ({})", c.full_name, c.mobile)}
                                </option>
                            }).collect_view())
                        })}
                    </select>
                </label>

                <label class="block">
                    <span class="text-sm text-gray-300">"Scheme"</span>
                    <select
                        class=input_class
                        prop:value=move || form.with(|f| f.scheme.code().to_string())
                        on:change=move |ev| {
                            if let Ok(scheme) = SchemeType::from_str(&event_target_value(&ev)) {
                                form.update(|f| f.set_scheme(scheme));
                            }
                        }
                    >
                        {SchemeType::all().iter().map(|s| view! {
                            <option value=s.code()>{s.code()}</option>
                        }).collect_view()}
                    </select>
                </label>

                <label class="block">
                    <span class="text-sm text-gray-300">"Principal (₹)"</span>
                    <input
                        type="number"
                        min="0"
                        step="any"
                        class=input_class
                        prop:value=move || form.with(|f| f.principal.clone())
                        on:input=move |ev| form.update(|f| f.principal = event_target_value(&ev))
                    />
                </label>

                <label class="block">
                    <span class="text-sm text-gray-300">"Start date"</span>
                    <input
                        type="date"
                        class=input_class
                        prop:value=move || form.with(|f| f.start_date.clone())
                        on:input=move |ev| form.update(|f| f.set_start_date(event_target_value(&ev)))
                    />
                </label>

                <label class="block">
                    <span class="text-sm text-gray-300">"Maturity date"</span>
                    <input
                        type="date"
                        class=input_class
                        prop:value=move || form.with(|f| f.maturity_date.clone())
                        on:input=move |ev| form.update(|f| f.set_maturity_date(event_target_value(&ev)))
                    />
                </label>

                <SubmitButton label="Create investment" busy_label="Saving..." busy=busy />
            </form>
        </div>
    }
}
