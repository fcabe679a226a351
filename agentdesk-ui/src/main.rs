//! AgentDesk Dashboard
//!
//! Browser front end of the agent back office, built with Leptos (WASM).
//!
//! # Architecture
//!
//! Client-side rendered Leptos application. Screen logic, models and the
//! session store come from the `agentdesk` crate; this crate supplies the
//! gloo-net transport and the views.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
