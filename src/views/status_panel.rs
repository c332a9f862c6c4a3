// ============================================================================
// STATUS PANEL - Mensaje persistente bajo el scanner
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, clear_children, ElementBuilder};
use crate::models::StatusMessage;

pub fn render_status(slot: &Element, status: Option<&StatusMessage>) -> Result<(), JsValue> {
    clear_children(slot);
    let Some(status) = status else {
        return Ok(());
    };

    let panel = ElementBuilder::new("div")?
        .class(&format!("alert status-panel {}", status.kind.css_class()))
        .attr("role", "status")?
        .child(ElementBuilder::new("h3")?.class("alert-title").text(status.kind.title()).build())?
        // white-space: pre-line en CSS para los mensajes multilínea (timeout)
        .child(ElementBuilder::new("p")?.class("alert-description").text(&status.text).build())?
        .build();
    append_child(slot, &panel)
}
