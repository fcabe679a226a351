//! Loading Component
//!
//! Spinner and the table placeholders.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Single table row spanning every column, for loading and empty states
#[component]
pub fn ListPlaceholder(
    #[prop(into)]
    message: String,
    columns: usize,
) -> impl IntoView {
    view! {
        <tr>
            <td colspan=columns.to_string() class="px-4 py-6 text-center text-gray-400">
                {message}
            </td>
        </tr>
    }
}
