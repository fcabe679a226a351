//! Login, Signup and Verify Pages

use agentdesk::screens::auth::{next_route, resend, verify_prompt, ResendStatus};
use agentdesk::Route as DeskRoute;
use leptos::*;
use leptos_router::*;

use crate::api::{get_api_base, set_api_base};
use crate::components::{ErrorBanner, SubmitButton};
use crate::state::use_session;

/// Centered card shared by the signed-out screens
#[component]
pub(crate) fn AuthCard(
    title: &'static str,
    #[prop(into)]
    subtitle: MaybeSignal<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="max-w-md mx-auto mt-12 bg-gray-800 rounded-xl p-8 space-y-6">
            <div>
                <h1 class="text-2xl font-bold">{title}</h1>
                <p class="text-gray-400 mt-1">{move || subtitle.get()}</p>
            </div>
            {children()}
        </div>
    }
}

/// Labelled text input bound to a signal
#[component]
pub(crate) fn Field(
    label: &'static str,
    #[prop(default = "text")]
    kind: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="text-sm text-gray-300">{label}</span>
            <input
                type=kind
                class="mt-1 w-full bg-gray-700 border border-gray-600 rounded-lg px-4 py-2 focus:outline-none focus:border-primary-500"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

/// Agent login page
#[component]
pub fn Login() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let mobile = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let busy = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let session = session.clone();
        let navigate = navigate.clone();
        busy.set(true);
        error.set(None);

        spawn_local(async move {
            let outcome = session
                .store
                .login(&mobile.get_untracked(), &password.get_untracked())
                .await;
            busy.set(false);
            if outcome.success {
                navigate(&next_route(&DeskRoute::Login, "").path(), Default::default());
            } else {
                error.set(outcome.message);
            }
        });
    };

    view! {
        <AuthCard title="Sign in" subtitle="Agent back office".to_string()>
            <form class="space-y-4" on:submit=on_submit>
                <ErrorBanner message=error />
                <Field label="Mobile number" kind="tel" value=mobile />
                <Field label="Password" kind="password" value=password />
                <SubmitButton label="Sign in" busy_label="Signing in..." busy=busy />
            </form>
            <div class="flex justify-between text-sm text-gray-400">
                <A href="/signup" class="hover:text-white">"Create an account"</A>
                <A href="/admin/login" class="hover:text-white">"Admin"</A>
            </div>
            <ServerSetting />
        </AuthCard>
    }
}

/// API server address, used from the next page load
#[component]
fn ServerSetting() -> impl IntoView {
    let url = create_rw_signal(get_api_base());
    let saved = create_rw_signal(false);

    view! {
        <details class="text-sm text-gray-400">
            <summary class="cursor-pointer">"API server"</summary>
            <div class="mt-2 flex space-x-2">
                <input
                    type="url"
                    class="flex-1 bg-gray-700 border border-gray-600 rounded-lg px-3 py-1"
                    prop:value=move || url.get()
                    on:input=move |ev| {
                        url.set(event_target_value(&ev));
                        saved.set(false);
                    }
                />
                <button
                    type="button"
                    class="px-3 py-1 bg-gray-700 hover:bg-gray-600 rounded-lg"
                    on:click=move |_| {
                        set_api_base(url.get_untracked().trim());
                        saved.set(true);
                    }
                >
                    "Save"
                </button>
            </div>
            <Show when=move || saved.get()>
                <p class="mt-2">"Saved. Reload the page to connect."</p>
            </Show>
        </details>
    }
}

/// Agent signup page
#[component]
pub fn Signup() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let name = create_rw_signal(String::new());
    let mobile = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let busy = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let session = session.clone();
        let navigate = navigate.clone();
        busy.set(true);
        error.set(None);

        spawn_local(async move {
            let mobile = mobile.get_untracked();
            let outcome = session
                .store
                .signup(&name.get_untracked(), &mobile, &password.get_untracked())
                .await;
            busy.set(false);
            if outcome.success {
                if let Some(message) = outcome.message.as_deref() {
                    session.show_notice(message);
                }
                navigate(&next_route(&DeskRoute::Signup, &mobile).path(), Default::default());
            } else {
                error.set(outcome.message);
            }
        });
    };

    view! {
        <AuthCard title="Create account" subtitle="We will text you a verification code".to_string()>
            <form class="space-y-4" on:submit=on_submit>
                <ErrorBanner message=error />
                <Field label="Full name" value=name />
                <Field label="Mobile number" kind="tel" value=mobile />
                <Field label="Password" kind="password" value=password />
                <SubmitButton label="Sign up" busy_label="Creating account..." busy=busy />
            </form>
            <div class="text-sm text-gray-400">
                <A href="/login" class="hover:text-white">"Already registered? Sign in"</A>
            </div>
        </AuthCard>
    }
}

/// OTP verification page, mobile prefilled from `?mobile=`
#[component]
pub fn Verify() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let query = use_query_map();
    let mobile = create_rw_signal(query.with_untracked(|q| q.get("mobile").cloned().unwrap_or_default()));
    let otp = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let busy = create_rw_signal(false);
    let resend_status = create_rw_signal(ResendStatus::Idle);

    let on_submit = {
        let session = session.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let session = session.clone();
            let navigate = navigate.clone();
            busy.set(true);
            error.set(None);

            spawn_local(async move {
                let mobile = mobile.get_untracked();
                let outcome = session.store.verify(&mobile, &otp.get_untracked()).await;
                busy.set(false);
                if outcome.success {
                    let target = next_route(&DeskRoute::Verify { mobile: Some(mobile) }, "");
                    navigate(&target.path(), Default::default());
                } else {
                    error.set(outcome.message);
                }
            });
        }
    };

    let on_resend = move |_| {
        let session = session.clone();
        resend_status.set(ResendStatus::Sending);
        error.set(None);

        spawn_local(async move {
            match resend(&session.store, &mobile.get_untracked()).await {
                Ok(status) => resend_status.set(status),
                Err((status, err)) => {
                    resend_status.set(status);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    let subtitle = Signal::derive(move || verify_prompt(&mobile.get()));

    view! {
        <AuthCard title="Verify mobile" subtitle=subtitle>
            <form class="space-y-4" on:submit=on_submit>
                <ErrorBanner message=error />
                <Field label="Mobile number" kind="tel" value=mobile />
                <Field label="OTP" value=otp />
                <SubmitButton label="Verify" busy_label="Verifying..." busy=busy />
            </form>
            <div class="flex items-center justify-between text-sm">
                <button
                    type="button"
                    class="text-primary-400 hover:text-primary-300 disabled:opacity-50"
                    disabled=move || resend_status.get() == ResendStatus::Sending
                    on:click=on_resend
                >
                    "Resend OTP"
                </button>
                <span class="text-gray-400">{move || resend_status.get().label()}</span>
            </div>
        </AuthCard>
    }
}
