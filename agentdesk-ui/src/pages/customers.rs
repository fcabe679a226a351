//! Customer Pages
//!
//! List, detail and the add form.

use agentdesk::maturity::format_date;
use agentdesk::screens::customers::{
    load_customer_detail, load_customers, CustomerForm, EMPTY_PORTFOLIO,
};
use agentdesk::screens::format_rupees;
use agentdesk::{ListState, Loadable, Route as DeskRoute};
use leptos::*;
use leptos_router::*;

use super::auth::Field;
use crate::components::{ErrorBanner, ListPlaceholder, Loading, StatusBadge, SubmitButton};
use crate::state::{use_fetch, use_lifetime, use_session};

/// Customer list page
#[component]
pub fn Customers() -> impl IntoView {
    let api = use_session().api().clone();
    let customers = use_fetch(move || async move { load_customers(&api).await });

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Customers"</h1>
                <A href="/customers/add" class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg">
                    "Add customer"
                </A>
            </div>

            <table class="w-full bg-gray-800 rounded-xl overflow-hidden">
                <thead class="bg-gray-700 text-left text-sm text-gray-300">
                    <tr>
                        <th class="px-4 py-3">"Name"</th>
                        <th class="px-4 py-3">"Mobile"</th>
                        <th class="px-4 py-3">"Consent"</th>
                        <th class="px-4 py-3"></th>
                    </tr>
                </thead>
                <tbody>
                    {move || customers.with(|state| match state.list_state() {
                        ListState::Loading => view! { <ListPlaceholder message="Loading..." columns=4 /> }.into_view(),
                        ListState::Empty => view! { <ListPlaceholder message="No customers found." columns=4 /> }.into_view(),
                        ListState::Failed(message) => view! { <ListPlaceholder message=message columns=4 /> }.into_view(),
                        ListState::Rows(rows) => rows.iter().map(|customer| {
                            let href = DeskRoute::CustomerDetail(customer.customer_id.clone()).path();
                            view! {
                                <tr class="border-t border-gray-700">
                                    <td class="px-4 py-3">{customer.full_name.clone()}</td>
                                    <td class="px-4 py-3">{customer.mobile.clone()}</td>
                                    <td class="px-4 py-3">{customer.consent_label()}</td>
                                    <td class="px-4 py-3 text-right">
                                        <A href=href class="text-primary-400 hover:text-primary-300">"View"</A>
                                    </td>
                                </tr>
                            }
                        }).collect_view(),
                    })}
                </tbody>
            </table>
        </div>
    }
}

/// Customer detail page with the investment portfolio
#[component]
pub fn CustomerDetailPage() -> impl IntoView {
    let api = use_session().api().clone();
    let params = use_params_map();
    let customer_id = params.with_untracked(|p| p.get("id").cloned().unwrap_or_default());
    let detail = use_fetch(move || async move { load_customer_detail(&api, &customer_id).await });

    view! {
        <div class="space-y-6">
            <A href="/customers" class="text-sm text-gray-400 hover:text-white">"← Back to customers"</A>

            {move || detail.with(|state| match state {
                Loadable::Loading => view! { <Loading /> }.into_view(),
                Loadable::Failed(message) => view! {
                    <ErrorBanner message=Signal::derive({
                        let message = message.clone();
                        move || Some(message.clone())
                    }) />
                }.into_view(),
                Loadable::Ready(detail) => {
                    let customer = &detail.customer;
                    view! {
                        <section class="bg-gray-800 rounded-xl p-6 space-y-2">
                            <h1 class="text-2xl font-bold">{customer.full_name.clone()}</h1>
                            <div class="text-gray-400">"Mobile: " {customer.mobile.clone()}</div>
                            <div class="text-gray-400">"Consent: " {customer.consent_label()}</div>
                        </section>

                        <section class="space-y-4">
                            <div class="flex items-center justify-between">
                                <h2 class="text-xl font-semibold">"Investment Portfolio"</h2>
                                <A href="/investments/add" class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg">
                                    "Add investment"
                                </A>
                            </div>
                            {if detail.investments.is_empty() {
                                view! { <p class="text-gray-400">{EMPTY_PORTFOLIO}</p> }.into_view()
                            } else {
                                view! {
                                    <table class="w-full bg-gray-800 rounded-xl overflow-hidden">
                                        <thead class="bg-gray-700 text-left text-sm text-gray-300">
                                            <tr>
                                                <th class="px-4 py-3">"ID"</th>
                                                <th class="px-4 py-3">"Scheme"</th>
                                                <th class="px-4 py-3">"Principal"</th>
                                                <th class="px-4 py-3">"Start"</th>
                                                <th class="px-4 py-3">"Maturity"</th>
                                                <th class="px-4 py-3">"Status"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {detail.investments.iter().map(|inv| view! {
                                                <tr class="border-t border-gray-700">
                                                    <td class="px-4 py-3 font-mono text-sm">{inv.short_id()}</td>
                                                    <td class="px-4 py-3">{inv.scheme_type.code()}</td>
                                                    <td class="px-4 py-3">{format_rupees(inv.principal)}</td>
                                                    <td class="px-4 py-3">{format_date(inv.start_date)}</td>
                                                    <td class="px-4 py-3">{format_date(inv.maturity_date)}</td>
                                                    <td class="px-4 py-3"><StatusBadge status=inv.status.clone() /></td>
                                                </tr>
                                            }).collect_view()}
                                        </tbody>
                                    </table>
                                }.into_view()
                            }}
                        </section>
                    }.into_view()
                }
            })}
        </div>
    }
}

/// Add customer page
#[component]
pub fn AddCustomer() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let lifetime = use_lifetime();
    let full_name = create_rw_signal(String::new());
    let mobile = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let busy = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let session = session.clone();
        let navigate = navigate.clone();
        let form = CustomerForm::new(full_name.get_untracked(), mobile.get_untracked());
        busy.set(true);
        error.set(None);

        let request = lifetime.bind(async move {
            match form.submit(session.api()).await {
                Ok(_) => {
                    session.show_notice("Customer created");
                    navigate(&DeskRoute::Customers.path(), Default::default());
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

    view! {
        <div class="max-w-lg space-y-6">
            <h1 class="text-3xl font-bold">"Add Customer"</h1>
            <form class="bg-gray-800 rounded-xl p-6 space-y-4" on:submit=on_submit>
                <ErrorBanner message=error />
                <Field label="Full name" value=full_name />
                <Field label="Mobile number" kind="tel" value=mobile />
                <SubmitButton label="Create customer" busy_label="Saving..." busy=busy />
            </form>
        </div>
    }
}
