mod colors;
mod panel;
mod regions;
mod surface;
mod viewport;

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Host-page hooks wired at startup, held for the page lifetime.
struct HostBindings {
    _map_load: Closure<dyn Fn()>,
    _close_panel: Closure<dyn Fn()>,
}

thread_local! {
    static HOST_BINDINGS: RefCell<Option<HostBindings>> = const { RefCell::new(None) };
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(map_object) = document
        .get_element_by_id("world-map")
        .and_then(|el| el.dyn_into::<web_sys::HtmlObjectElement>().ok())
    else {
        return;
    };

    // The embedded SVG loads after the host page; interactions are wired only
    // once its own load event fires.
    let map_load = {
        let map_object = map_object.clone();
        Closure::wrap(Box::new(move || surface::activate(&map_object)) as Box<dyn Fn()>)
    };
    map_object
        .add_event_listener_with_callback("load", map_load.as_ref().unchecked_ref())
        .ok();

    let close_panel = Closure::wrap(Box::new(panel::close) as Box<dyn Fn()>);
    if let Some(close_el) = document.get_element_by_id("close-panel") {
        close_el
            .add_event_listener_with_callback("click", close_panel.as_ref().unchecked_ref())
            .ok();
    }

    HOST_BINDINGS.with(move |slot| {
        *slot.borrow_mut() = Some(HostBindings {
            _map_load: map_load,
            _close_panel: close_panel,
        });
    });
}
