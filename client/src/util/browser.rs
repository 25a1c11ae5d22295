//! Browser environment helpers: navigation and file inputs.
//!
//! Client-side (csr): thin wrappers over `web-sys`.
//! Elsewhere: inert, so components compile and unit-test natively.

#[cfg(all(test, not(feature = "csr")))]
#[path = "browser_test.rs"]
mod browser_test;

#[cfg(feature = "csr")]
use profiteer::types::ImageUpload;

/// Full page load, so the app boots fresh against the new session cookie.
#[cfg_attr(not(feature = "csr"), allow(unused_variables))]
pub fn hard_navigate(path: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                tracing::warn!("navigation to {path} failed: {e:?}");
            }
        }
    }
}

/// First file chosen in the `<input type="file">` that fired `ev`.
#[cfg(feature = "csr")]
pub fn selected_file(ev: &leptos::ev::Event) -> Option<web_sys::File> {
    use wasm_bindgen::JsCast;

    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

#[cfg(feature = "csr")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn file_size(file: &web_sys::File) -> u64 {
    file.size() as u64
}

/// Read the whole file into an upload the core can send.
///
/// # Errors
///
/// Returns the JS error text if the browser cannot read the file.
#[cfg(feature = "csr")]
pub async fn read_image(file: &web_sys::File) -> Result<ImageUpload, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    Ok(ImageUpload {
        filename: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

/// `blob:` URL for showing a local file before it is uploaded.
#[cfg(feature = "csr")]
pub fn preview_url(file: &web_sys::File) -> Option<String> {
    match web_sys::Url::create_object_url_with_blob(file) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!("preview url failed: {e:?}");
            None
        }
    }
}

/// Release a URL made by `preview_url`. Server URLs are left alone.
#[cfg_attr(not(feature = "csr"), allow(unused_variables))]
pub fn revoke_preview(url: &str) {
    #[cfg(feature = "csr")]
    {
        if url.starts_with("blob:") {
            if let Err(e) = web_sys::Url::revoke_object_url(url) {
                tracing::warn!("revoke preview failed: {e:?}");
            }
        }
    }
}
