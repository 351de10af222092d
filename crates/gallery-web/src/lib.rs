#![cfg(target_arch = "wasm32")]
use gallery_core::{Catalog, Gallery, GalleryConfig, Viewport};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod dom;
mod events;
mod frame;
mod input;
mod label;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gallery-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let config = GalleryConfig::from_query(&dom::location_query());
    log::info!(
        "[config] mode={:?} transition={}ms easing={:?}",
        config.mode,
        config.transition.as_millis(),
        config.easing
    );
    let gallery = Rc::new(RefCell::new(Gallery::new(
        Catalog::default_collection(),
        config,
        Viewport::new(width, height),
    )));

    let label = Rc::new(label::LabelElements::find(&document));
    label.apply(&gallery.borrow().label_snapshot());

    assets::load_artworks(&gallery);

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        gallery: gallery.clone(),
        label: label.clone(),
    });

    let reflection = gallery
        .borrow()
        .reflector()
        .map(|r| (r.target_width, r.target_height))
        .unwrap_or((width, height));
    let gpu = frame::init_gpu(&canvas, reflection).await;
    if gpu.is_none() {
        log::warn!("[gpu] rendering disabled; navigation and captions still run");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        gallery,
        label,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
