// ============================================================================
// TOAST VIEW - Región de notificaciones transitorias
// ============================================================================
// La región se reconstruye en cada cambio de estado: los listeners de cierre
// se devuelven al llamador, que los suelta en el siguiente render.
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, clear_children, ElementBuilder, EventListener};
use crate::models::Toast;

pub fn render_toasts(
    region: &Element,
    toasts: &[Toast],
    on_dismiss: Rc<dyn Fn(u32)>,
) -> Result<Vec<EventListener>, JsValue> {
    clear_children(region);
    let mut listeners = Vec::with_capacity(toasts.len());
    for toast in toasts {
        let class = if toast.destructive { "toast destructive" } else { "toast" };
        let id = toast.id;
        let dismiss = on_dismiss.clone();

        let close = ElementBuilder::new("button")?
            .class("toast-close")
            .attr("type", "button")?
            .attr("aria-label", "close")?
            .text("✕")
            .build();
        listeners.push(EventListener::new(&close, "click", move |_| dismiss(id))?);

        let item = ElementBuilder::new("div")?
            .class(class)
            .attr("role", "alert")?
            .child(ElementBuilder::new("div")?.class("toast-title").text(&toast.title).build())?
            .child(ElementBuilder::new("div")?.class("toast-description").text(&toast.description).build())?
            .child(close)?
            .build();
        append_child(region, &item)?;
    }
    Ok(listeners)
}
