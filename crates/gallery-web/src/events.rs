use crate::dom;
use crate::input;
use crate::label::LabelElements;
use gallery_core::Gallery;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub gallery: Rc<RefCell<Gallery>>,
    pub label: Rc<LabelElements>,
}

pub fn wire_input_handlers(w: InputWiring) {
    // pointerup on the canvas acts as a click
    {
        let canvas_click = w.canvas.clone();
        let gallery = w.gallery.clone();
        let label = w.label.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if !ev.is_primary() {
                return;
            }
            let pos = input::pointer_canvas_px(&ev, &canvas_click);
            let outcome = gallery.borrow_mut().click(pos.x, pos.y);
            match outcome {
                Some((result, events)) => {
                    for e in &events {
                        label.apply(e);
                    }
                    log::debug!("[click] ({:.0},{:.0}) -> {:?}", pos.x, pos.y, result);
                }
                None => log::debug!("[click] ({:.0},{:.0}) hit nothing", pos.x, pos.y),
            }
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // window resize: resync the backing store and let the gallery adapt
    {
        let canvas_resize = w.canvas.clone();
        let gallery = w.gallery.clone();
        let closure = Closure::wrap(Box::new(move || {
            let (width, height) = dom::sync_canvas_backing_size(&canvas_resize);
            gallery.borrow_mut().resize(width, height);
        }) as Box<dyn FnMut()>);
        if let Some(wnd) = web::window() {
            let _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}
