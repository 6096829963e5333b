use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// Host-provided rendering collaborator. Takes the raw module bytes and
    /// resolves with the flame graph as SVG text; rejects on malformed input.
    #[wasm_bindgen(js_name = renderWasmFlameGraph, catch)]
    async fn render_wasm_flame_graph(module_bytes: js_sys::Uint8Array) -> Result<JsValue, JsValue>;
}

pub(super) async fn render_flamegraph(module_bytes: &[u8]) -> Result<String, String> {
    let data = js_sys::Uint8Array::from(module_bytes);
    let svg = render_wasm_flame_graph(data)
        .await
        .map_err(failure_message)?;
    svg.as_string()
        .ok_or_else(|| "renderer: expected SVG text".to_string())
}

fn failure_message(value: JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| "renderer rejected the module".to_string())
}
