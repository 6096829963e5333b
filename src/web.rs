use leptos::html;
use leptos::prelude::*;

use crate::controller::{
    drag_leave_state, drag_over_state, drop_decision, DragItem, DropDecision, DropState,
    RenderError,
};

mod files;
mod render;

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    let (drop_state, set_drop_state) = signal(DropState::default());
    let (status, set_status) = signal("Drop a .wasm file anywhere on the page.".to_string());
    let (error, set_error) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    // Last issued object URL; revoked when superseded or on teardown.
    let last_url: StoredValue<Option<String>> = StoredValue::new(None);
    on_cleanup(move || {
        if let Some(url) = last_url.get_value() {
            files::revoke_object_url(&url);
        }
    });

    // One render at a time; triggers arriving while busy are ignored.
    let begin = move |file: web_sys::File| {
        if busy.get_untracked() {
            set_status.set("still rendering the previous file".to_string());
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = process(file, last_url, set_status).await {
                set_drop_state.set(DropState::Neutral);
                set_status.set("render failed".to_string());
                set_error.set(Some(e.to_string()));
            }
            set_busy.set(false);
        });
    };

    let on_drag_over = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_drop_state.set(drag_over_state(&drag_items(&ev)));
    };
    let on_drag_leave = move |_ev: web_sys::DragEvent| {
        set_drop_state.set(drag_leave_state());
    };
    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_drop_state.set(DropState::Neutral);
        // Items may differ from the dragover payload, so re-validate.
        if drop_decision(&drag_items(&ev)) == DropDecision::Ignore {
            return;
        }
        if let Some(file) = first_dropped_file(&ev) {
            begin(file);
        }
    };

    let input_ref: NodeRef<html::Input> = NodeRef::new();
    let on_pick = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };
    let on_chosen = move |_ev: web_sys::Event| {
        let Some(input) = input_ref.get() else { return };
        let file = input.files().and_then(|fs| fs.get(0));
        // Clear the value so choosing the same file again refires `change`.
        input.set_value("");
        if let Some(file) = file {
            begin(file);
        }
    };

    view! {
        <main class="drop-zone" on:dragover=on_drag_over on:dragleave=on_drag_leave on:drop=on_drop>
            <div class=move || drop_state.get().signal_class()>
                <h1>"WASM flame graphs"</h1>
                <p>
                    "Drop a " <code>".wasm"</code>
                    " binary to see which functions its bytes belong to."
                </p>
                <button class="file-select" disabled=move || busy.get() on:click=on_pick>
                    "Select a file"
                </button>
                <input
                    node_ref=input_ref
                    type="file"
                    accept="application/wasm,.wasm"
                    style="display: none;"
                    on:change=on_chosen
                />
                <p class="status">{move || status.get()}</p>
                <Show when=move || error.get().is_some()>
                    <div class="error-banner" role="alert">
                        <span>{move || error.get().unwrap_or_default()}</span>
                        <button class="error-close" title="Dismiss" on:click=move |_| set_error.set(None)>
                            "×"
                        </button>
                    </div>
                </Show>
            </div>
        </main>
    }
}

/// Read the file, hand the bytes to the rendering collaborator, wrap the
/// resulting SVG behind a fresh object URL and navigate to it. Every failure
/// maps into [`RenderError`] so the caller can surface it.
async fn process(
    file: web_sys::File,
    last_url: StoredValue<Option<String>>,
    set_status: WriteSignal<String>,
) -> Result<(), RenderError> {
    let started = web_time::Instant::now();
    let name = file.name();

    set_status.set(format!("reading {name}…"));
    let bytes = files::read_file_bytes(file)
        .await
        .map_err(RenderError::FileRead)?;

    set_status.set(format!("rendering {name} ({} KiB)…", bytes.len() / 1024));
    let svg = render::render_flamegraph(&bytes)
        .await
        .map_err(RenderError::Render)?;

    let url = files::svg_object_url(&svg).map_err(RenderError::Delivery)?;
    if let Some(previous) = last_url.get_value() {
        files::revoke_object_url(&previous);
    }
    last_url.set_value(Some(url.clone()));

    set_status.set(format!("rendered in {} ms", started.elapsed().as_millis()));
    files::navigate_to(&url).map_err(RenderError::Delivery)
}

/// Metadata of the items under the cursor. Before the drop only `kind` and
/// the declared MIME type are visible.
fn drag_items(ev: &web_sys::DragEvent) -> Vec<DragItem> {
    let Some(dt) = ev.data_transfer() else {
        return Vec::new();
    };
    let items = dt.items();
    (0..items.length())
        .filter_map(|i| items.get(i))
        .map(|item| DragItem::new(&item.kind(), &item.type_()))
        .collect()
}

fn first_dropped_file(ev: &web_sys::DragEvent) -> Option<web_sys::File> {
    ev.data_transfer()?.files()?.get(0)
}
