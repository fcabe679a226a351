//! Bulk Upload Page
//!
//! Sends a spreadsheet to the server, which creates the customers and
//! investments it lists.

use agentdesk::screens::upload::{submit_upload, success_message, EXPECTED_COLUMNS};
use agentdesk::UploadFile;
use leptos::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::components::{ErrorBanner, SubmitButton};
use crate::state::{use_lifetime, use_session};

/// Read a picked file into memory
async fn read_file(file: web_sys::File) -> Result<UploadFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(UploadFile::new(file.name(), bytes))
}

/// Bulk upload page component
#[component]
pub fn Upload() -> impl IntoView {
    let session = use_session();
    let lifetime = use_lifetime();
    let file_input = create_node_ref::<html::Input>();
    let error = create_rw_signal(None::<String>);
    let result = create_rw_signal(None::<String>);
    let busy = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let session = session.clone();
        let picked = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        busy.set(true);
        error.set(None);
        result.set(None);

        let request = lifetime.bind(async move {
            let file = match picked {
                Some(picked) => match read_file(picked).await {
                    Ok(file) => Some(file),
                    Err(e) => {
                        web_sys::console::error_1(&e);
                        error.set(Some("Failed to read file".to_string()));
                        busy.set(false);
                        return;
                    }
                },
                None => None,
            };

            match submit_upload(session.api(), file).await {
                Ok(summary) => result.set(Some(success_message(&summary))),
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
        spawn_local(async move {
            request.await;
        });
    };

    view! {
        <div class="max-w-2xl space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Bulk Upload"</h1>
                <p class="text-gray-400 mt-1">"Import customers and investments from an Excel or CSV file"</p>
            </div>

            <form class="bg-gray-800 rounded-xl p-6 space-y-4" on:submit=on_submit>
                <ErrorBanner message=error />
                {move || result.get().map(|message| view! {
                    <div class="bg-green-900/50 border border-green-700 text-green-200 px-4 py-3 rounded-lg text-sm">
                        {message}
                    </div>
                })}

                <input
                    type="file"
                    accept=".xlsx,.xls,.csv"
                    class="block w-full text-sm text-gray-300"
                    node_ref=file_input
                />
                <SubmitButton label="Upload" busy_label="Uploading..." busy=busy />
            </form>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-lg font-semibold mb-2">"Expected columns"</h2>
                <div class="flex flex-wrap gap-2">
                    {EXPECTED_COLUMNS.iter().map(|column| view! {
                        <code class="px-2 py-1 bg-gray-700 rounded text-sm">{*column}</code>
                    }).collect_view()}
                </div>
            </section>
        </div>
    }
}
