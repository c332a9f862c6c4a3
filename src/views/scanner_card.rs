// ============================================================================
// SCANNER CARD VIEW - Tarjetas de permiso, error y scanner activo
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, reload_page, toggle_class, ElementBuilder, EventListener};
use crate::models::StatusMessage;
use crate::utils::messages;
use crate::views::render_status;

fn card_header(title: &str, class: &str) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?.class("card-header").build();
    let title = ElementBuilder::new("h2")?.class(class).text(title).build();
    append_child(&header, &title)?;
    Ok(header)
}

/// Esperando respuesta al prompt de cámara
pub fn render_requesting() -> Result<Element, JsValue> {
    let body = ElementBuilder::new("div")?
        .class("card-body requesting")
        .child(ElementBuilder::new("p")?.class("headline").text(messages::REQUESTING_HEADLINE).build())?
        .child(ElementBuilder::new("p")?.class("hint").text(messages::REQUESTING_HINT).build())?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("scanner-card")
        .child(card_header(messages::WIDGET_TITLE, "card-title")?)?
        .child(body)?
        .build())
}

/// Cámara denegada: banner + botón de recarga
pub fn render_denied(message: &str) -> Result<Element, JsValue> {
    let banner = ElementBuilder::new("div")?
        .class("alert alert-destructive")
        .attr("role", "alert")?
        .child(ElementBuilder::new("h3")?.class("alert-title").text(messages::DENIED_BANNER_TITLE).build())?
        .child(ElementBuilder::new("p")?.class("alert-description").text(message).build())?
        .build();

    let reload = ElementBuilder::new("button")?
        .class("btn btn-outline reload-button")
        .attr("type", "button")?
        .text(messages::RELOAD_BUTTON)
        .on_click(|_| {
            log::info!("🔄 [VIEW] Recarga solicitada por el usuario");
            reload_page();
        })?
        .build();

    let body = ElementBuilder::new("div")?
        .class("card-body denied")
        .child(banner)?
        .child(reload)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("scanner-card")
        .child(card_header(messages::DENIED_TITLE, "card-title destructive")?)?
        .child(body)?
        .build())
}

/// Nodos del scanner activo que se actualizan sin re-crear el iframe
pub struct ActiveCard {
    pub root: Element,
    overlay: Element,
    frame: Element,
    status: Element,
    _listeners: Vec<EventListener>,
}

impl ActiveCard {
    pub fn render(scanner_url: &str, on_frame_error: Rc<dyn Fn()>) -> Result<Self, JsValue> {
        let overlay = ElementBuilder::new("div")?
            .class("loading-overlay")
            .child(ElementBuilder::new("p")?.class("headline").text(messages::LOADING_HEADLINE).build())?
            .child(ElementBuilder::new("p")?.class("hint").text(messages::LOADING_HINT).build())?
            .build();

        let frame = ElementBuilder::new("iframe")?
            .class("scanner-frame")
            .attr("src", scanner_url)?
            .attr("title", "MindAR Scanner")?
            .attr("allow", "camera; microphone")?
            .attr("sandbox", "allow-scripts allow-same-origin allow-forms allow-popups")?
            .build();

        let listeners = vec![
            EventListener::new(&frame, "load", |_| {
                log::info!("🖼️ [VIEW] iframe MindAR cargado, esperando 'mindarReady'...");
            })?,
            EventListener::new(&frame, "error", move |_| {
                log::error!("❌ [VIEW] Error de carga del iframe MindAR");
                on_frame_error();
            })?,
        ];

        let viewport = ElementBuilder::new("div")?
            .class("scanner-viewport")
            .child(overlay.clone())?
            .child(frame.clone())?
            .build();

        let status = ElementBuilder::new("div")?.class("status-slot").build();

        let body = ElementBuilder::new("div")?
            .class("card-body active")
            .child(viewport)?
            .child(status.clone())?
            .build();

        let root = ElementBuilder::new("div")?
            .class("scanner-card")
            .child(card_header(messages::WIDGET_TITLE, "card-title")?)?
            .child(ElementBuilder::new("p")?.class("card-description").text(messages::ACTIVE_DESCRIPTION).build())?
            .child(body)?
            .build();

        Ok(Self {
            root,
            overlay,
            frame,
            status,
            _listeners: listeners,
        })
    }

    /// Actualización incremental: overlay, opacidad del iframe y panel de estado
    pub fn update(&self, loading: bool, status: Option<&StatusMessage>) -> Result<(), JsValue> {
        toggle_class(&self.overlay, "hidden", !loading)?;
        toggle_class(&self.frame, "dimmed", loading)?;
        render_status(&self.status, status)
    }
}
