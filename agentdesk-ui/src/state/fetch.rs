//! Fetch on mount
//!
//! Every data screen loads through [`use_fetch`]: the request starts when
//! the screen mounts, its result lands in a signal, and it is aborted if
//! the screen is unmounted first.

use std::future::Future;

use agentdesk::{Lifetime, Loadable};
use leptos::*;

/// Lifetime that ends when the current reactive owner is cleaned up
pub fn use_lifetime() -> Lifetime {
    let lifetime = Lifetime::new();
    let scoped = lifetime.clone();
    on_cleanup(move || scoped.end());
    lifetime
}

/// Run `load` once and expose its result
pub fn use_fetch<T, F, Fut>(load: F) -> RwSignal<Loadable<T>>
where
    T: 'static,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Loadable<T>> + 'static,
{
    let data = create_rw_signal(Loadable::Loading);
    let lifetime = use_lifetime();

    spawn_local(async move {
        if let Some(result) = lifetime.bind(load()).await {
            data.set(result);
        }
    });

    data
}
