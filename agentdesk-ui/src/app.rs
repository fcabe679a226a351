//! App Root Component
//!
//! Routing and the session provider.

use leptos::*;
use leptos_router::*;

use crate::components::{Loading, Nav, Protected, Toast};
use crate::pages::{
    AddCustomer, AddInvestment, AdminDashboard, AdminLogin, CustomerDetailPage, Customers,
    Dashboard, Investments, Login, Signup, Upload, Verify,
};
use crate::state::{provide_session, use_session};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_session();
    let session = use_session().state;
    let settled = move || session.with(|s| !s.loading);

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8">
                    // No screen renders until the first profile check settles
                    <Show when=settled fallback=|| view! { <Loading /> }>
                        <Routes>
                            // Public
                            <Route path="/login" view=Login />
                            <Route path="/signup" view=Signup />
                            <Route path="/verify" view=Verify />
                            <Route path="/admin/login" view=AdminLogin />

                            // Protected
                            <Route path="/" view=Home />
                            <Route path="/dashboard" view=|| view! { <Protected><Dashboard /></Protected> } />
                            <Route path="/customers" view=|| view! { <Protected><Customers /></Protected> } />
                            <Route path="/customers/add" view=|| view! { <Protected><AddCustomer /></Protected> } />
                            <Route path="/customers/:id" view=|| view! { <Protected><CustomerDetailPage /></Protected> } />
                            <Route path="/investments" view=|| view! { <Protected><Investments /></Protected> } />
                            <Route path="/investments/add" view=|| view! { <Protected><AddInvestment /></Protected> } />
                            <Route path="/upload" view=|| view! { <Protected><Upload /></Protected> } />
                            <Route path="/admin/dashboard" view=|| view! { <Protected><AdminDashboard /></Protected> } />

                            <Route path="/*any" view=NotFound />
                        </Routes>
                    </Show>
                </main>

                <Toast />
            </div>
        </Router>
    }
}

/// `/` forwards to the dashboard once the session settles
#[component]
fn Home() -> impl IntoView {
    view! {
        <Protected>
            <Loading />
        </Protected>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/dashboard"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
