use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::controller::{OUTPUT_FILENAME, OUTPUT_MIME};

pub(super) async fn read_file_bytes(file: web_sys::File) -> Result<Vec<u8>, String> {
    let v = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "file: read failed".to_string())?;

    let buf = v
        .dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|_| "file: expected ArrayBuffer".to_string())?;
    let arr = js_sys::Uint8Array::new(&buf);
    let mut out = vec![0u8; arr.length() as usize];
    arr.copy_to(&mut out);
    Ok(out)
}

/// Wrap rendered SVG text as `flamegraph.svg` behind a revocable object URL.
/// The file wrapper keeps a sensible name if the user downloads the result.
pub(super) fn svg_object_url(svg: &str) -> Result<String, String> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(svg));
    let blob_opts = web_sys::BlobPropertyBag::new();
    blob_opts.set_type(OUTPUT_MIME);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &blob_opts)
        .map_err(|_| "blob: failed to create".to_string())?;

    let file_parts = js_sys::Array::new();
    file_parts.push(&blob);
    let file_opts = web_sys::FilePropertyBag::new();
    file_opts.set_type(OUTPUT_MIME);
    let file =
        web_sys::File::new_with_blob_sequence_and_options(&file_parts, OUTPUT_FILENAME, &file_opts)
            .map_err(|_| "file: failed to wrap".to_string())?;

    web_sys::Url::create_object_url_with_blob(&file)
        .map_err(|_| "url: create_object_url failed".to_string())
}

pub(super) fn revoke_object_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

pub(super) fn navigate_to(url: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window".to_string())?;
    window
        .location()
        .set_href(url)
        .map_err(|_| "location: navigation failed".to_string())
}
