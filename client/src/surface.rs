use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Document, HtmlObjectElement, PointerEvent, SvgElement, WheelEvent,
};

use crate::colors;
use crate::panel;
use crate::regions::{RegionIndex, resolve_region_id};
use crate::viewport::Viewport;

/// Listener closures wired into the embedded SVG document. Dropping them
/// would detach the callbacks, so they are held for the page lifetime.
struct SurfaceBindings {
    _region_listeners: Vec<Closure<dyn Fn()>>,
    _wheel: Closure<dyn Fn(WheelEvent)>,
    _pointer_down: Closure<dyn Fn(PointerEvent)>,
    _pointer_move: Closure<dyn Fn(PointerEvent)>,
    _pointer_end: Closure<dyn Fn(PointerEvent)>,
    _reset: Closure<dyn Fn()>,
}

thread_local! {
    static SURFACE_BINDINGS: RefCell<Option<SurfaceBindings>> = const { RefCell::new(None) };
}

/// Wire hover, selection, and zoom/pan gestures into the embedded map
/// document. Called from the `<object>` load handler; until then nothing is
/// interactive.
pub fn activate(map_object: &HtmlObjectElement) {
    let Some(svg_doc) = map_object.content_document() else {
        return;
    };
    let Some(svg_root) = svg_doc
        .document_element()
        .and_then(|el| el.dyn_into::<SvgElement>().ok())
    else {
        return;
    };

    let index = Rc::new(build_index(&svg_doc));
    let region_listeners = wire_regions(&index);

    let viewport = Rc::new(RefCell::new(Viewport::default()));
    apply_transform(&svg_root, &viewport.borrow());

    let wheel = {
        let viewport = viewport.clone();
        let svg_root = svg_root.clone();
        Closure::wrap(Box::new(move |e: WheelEvent| {
            e.prevent_default();
            let rect = svg_root.get_bounding_client_rect();
            let cx = e.client_x() as f64 - rect.left();
            let cy = e.client_y() as f64 - rect.top();
            let mut vp = viewport.borrow_mut();
            vp.zoom_at(e.delta_y(), cx, cy);
            apply_transform(&svg_root, &vp);
        }) as Box<dyn Fn(WheelEvent)>)
    };
    // Non-passive registration: the handler must be able to swallow the
    // page-scroll default of the wheel gesture.
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    svg_root
        .add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            wheel.as_ref().unchecked_ref(),
            &options,
        )
        .ok();

    let pointer_down = {
        let viewport = viewport.clone();
        let svg_root = svg_root.clone();
        Closure::wrap(Box::new(move |e: PointerEvent| {
            viewport
                .borrow_mut()
                .begin_pan(e.client_x() as f64, e.client_y() as f64);
            svg_root.style().set_property("cursor", "grabbing").ok();
        }) as Box<dyn Fn(PointerEvent)>)
    };
    svg_root
        .add_event_listener_with_callback("pointerdown", pointer_down.as_ref().unchecked_ref())
        .ok();

    let pointer_move = {
        let viewport = viewport.clone();
        let svg_root = svg_root.clone();
        Closure::wrap(Box::new(move |e: PointerEvent| {
            let mut vp = viewport.borrow_mut();
            if vp.pan_to(e.client_x() as f64, e.client_y() as f64) {
                apply_transform(&svg_root, &vp);
            }
        }) as Box<dyn Fn(PointerEvent)>)
    };
    svg_root
        .add_event_listener_with_callback("pointermove", pointer_move.as_ref().unchecked_ref())
        .ok();

    // One shared handler for pointer-up and pointer-leave: leaving the
    // surface mid-drag must end the pan as well.
    let pointer_end = {
        let viewport = viewport.clone();
        let svg_root = svg_root.clone();
        Closure::wrap(Box::new(move |_: PointerEvent| {
            viewport.borrow_mut().end_pan();
            svg_root.style().set_property("cursor", "default").ok();
        }) as Box<dyn Fn(PointerEvent)>)
    };
    for event in ["pointerup", "pointerleave"] {
        svg_root
            .add_event_listener_with_callback(event, pointer_end.as_ref().unchecked_ref())
            .ok();
    }

    let reset = {
        let viewport = viewport.clone();
        let svg_root = svg_root.clone();
        Closure::wrap(Box::new(move || {
            let mut vp = viewport.borrow_mut();
            vp.reset();
            apply_transform(&svg_root, &vp);
        }) as Box<dyn Fn()>)
    };
    svg_root
        .add_event_listener_with_callback("dblclick", reset.as_ref().unchecked_ref())
        .ok();

    SURFACE_BINDINGS.with(move |slot| {
        *slot.borrow_mut() = Some(SurfaceBindings {
            _region_listeners: region_listeners,
            _wheel: wheel,
            _pointer_down: pointer_down,
            _pointer_move: pointer_move,
            _pointer_end: pointer_end,
            _reset: reset,
        });
    });
}

/// Collect every path of the map document and group it by resolved region
/// identifier. Paths without an identifier stay out of the index.
fn build_index(svg_doc: &Document) -> RegionIndex<SvgElement> {
    let mut paths = Vec::new();
    if let Ok(nodes) = svg_doc.query_selector_all("path") {
        for i in 0..nodes.length() {
            if let Some(el) = nodes
                .item(i)
                .and_then(|node| node.dyn_into::<SvgElement>().ok())
            {
                paths.push(el);
            }
        }
    }
    RegionIndex::build(paths, |el| {
        resolve_region_id(|name| el.get_attribute(name))
    })
}

/// Attach hover and selection handlers to every shape of every region. Each
/// handler acts on the whole group, so multi-shape regions highlight and
/// select uniformly no matter which shape the pointer touched.
fn wire_regions(index: &Rc<RegionIndex<SvgElement>>) -> Vec<Closure<dyn Fn()>> {
    let mut listeners = Vec::new();

    for (id, elements) in index.iter() {
        let group: Vec<SvgElement> = elements.to_vec();

        for element in elements {
            element.style().set_property("cursor", "pointer").ok();

            let enter = {
                let group = group.clone();
                Closure::wrap(Box::new(move || {
                    for shape in &group {
                        shape
                            .style()
                            .set_property("fill-opacity", colors::HOVER_OPACITY)
                            .ok();
                    }
                }) as Box<dyn Fn()>)
            };
            element
                .add_event_listener_with_callback("pointerenter", enter.as_ref().unchecked_ref())
                .ok();
            listeners.push(enter);

            let leave = {
                let group = group.clone();
                Closure::wrap(Box::new(move || {
                    for shape in &group {
                        shape
                            .style()
                            .set_property("fill-opacity", colors::REST_OPACITY)
                            .ok();
                    }
                }) as Box<dyn Fn()>)
            };
            element
                .add_event_listener_with_callback("pointerleave", leave.as_ref().unchecked_ref())
                .ok();
            listeners.push(leave);

            // Deselect-all then select-one runs synchronously and whole, so a
            // click never leaves mixed selection state visible.
            let click = {
                let id = id.to_string();
                let group = group.clone();
                let index = index.clone();
                Closure::wrap(Box::new(move || {
                    panel::open(id.clone());
                    for shape in index.all_elements() {
                        shape
                            .style()
                            .set_property("fill", colors::NEUTRAL_FILL)
                            .ok();
                    }
                    for shape in &group {
                        shape
                            .style()
                            .set_property("fill", colors::SELECTED_FILL)
                            .ok();
                    }
                }) as Box<dyn Fn()>)
            };
            element
                .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
                .ok();
            listeners.push(click);
        }
    }

    listeners
}

fn apply_transform(svg_root: &SvgElement, vp: &Viewport) {
    let style = svg_root.style();
    style.set_property("transform-origin", "0 0").ok();
    style.set_property("transform", &vp.transform_value()).ok();
}
