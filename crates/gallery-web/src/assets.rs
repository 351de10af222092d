use gallery_core::{decode_image, AssetError, DecodedImage, Gallery};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Start one fetch per catalog entry. Results land in the gallery as they
/// arrive; a failed panel never blocks the others.
pub fn load_artworks(gallery: &Rc<RefCell<Gallery>>) {
    let refs: Vec<(usize, String)> = gallery
        .borrow()
        .catalog()
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.image_ref.trim().is_empty())
        .map(|(i, e)| (i, e.image_ref.clone()))
        .collect();
    log::info!("[assets] fetching {} artworks", refs.len());
    for (index, reference) in refs {
        let gallery = gallery.clone();
        spawn_local(async move {
            let result = fetch_image(&reference).await;
            gallery.borrow_mut().resolve_texture(index, result);
        });
    }
}

async fn fetch_image(reference: &str) -> Result<DecodedImage, AssetError> {
    let bytes = fetch_bytes(reference).await.map_err(|reason| AssetError::Fetch {
        reference: reference.to_string(),
        reason,
    })?;
    decode_image(reference, &bytes)
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    let window = web::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("{:?}", e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| format!("{:?}", e))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("{:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
