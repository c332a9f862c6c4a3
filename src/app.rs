// ============================================================================
// APP - Montaje del widget en el DOM
// ============================================================================
// Une el ScannerWidgetModel con el navegador: lanza getUserMedia, resuelve la
// política de origen, y re-renderiza (batch con Timeout 0) en cada cambio de
// estado. El iframe se crea una sola vez; luego solo hay updates incrementales.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::{ScannerConfig, CONFIG};
use crate::dom::{append_child, clear_children, get_element_by_id, replace_children, window, ElementBuilder, EventListener};
use crate::models::KnownCardSet;
use crate::services::{request_camera_access, BrowserScheduler, WindowMessageSource};
use crate::viewmodels::{CardCallback, MessageRelay, OriginPolicy, ScannerWidgetModel};
use crate::views::{render_denied, render_requesting, render_toasts, ActiveCard, LayoutKind, WidgetLayout};

pub struct ScannerApp {
    inner: Rc<AppInner>,
}

struct AppInner {
    container: Element,
    card_slot: Element,
    toast_region: Element,
    model: ScannerWidgetModel,
    scanner_url: String,
    active: RefCell<Option<ActiveCard>>,
    toast_listeners: RefCell<Vec<EventListener>>,
    rendered: Cell<Option<LayoutKind>>,
    render_pending: Cell<bool>,
    unmounted: Cell<bool>,
}

impl ScannerApp {
    pub fn mount(container_id: &str, on_card_scanned: CardCallback) -> Result<Self, JsValue> {
        let container = get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("No #{} element found", container_id)))?;
        let config: &ScannerConfig = &CONFIG;

        let relay = MessageRelay::new(KnownCardSet::default(), origin_policy(config)?);
        let model = ScannerWidgetModel::new(
            config,
            relay,
            Rc::new(BrowserScheduler),
            Rc::new(WindowMessageSource),
            on_card_scanned,
        );

        clear_children(&container);
        let card_slot = ElementBuilder::new("div")?.class("ar-card-scanner").build();
        let toast_region = ElementBuilder::new("div")?
            .class("toast-region")
            .attr("aria-live", "polite")?
            .build();
        append_child(&container, &card_slot)?;
        append_child(&container, &toast_region)?;

        let inner = Rc::new(AppInner {
            container,
            card_slot,
            toast_region,
            model,
            scanner_url: config.scanner_url.clone(),
            active: RefCell::new(None),
            toast_listeners: RefCell::new(Vec::new()),
            rendered: Cell::new(None),
            render_pending: Cell::new(false),
            unmounted: Cell::new(false),
        });

        // Los subscribers guardan Weak: el estado no mantiene viva la app
        {
            let weak = Rc::downgrade(&inner);
            inner
                .model
                .state()
                .subscribe_to_changes(move || schedule_render(&weak));
        }

        inner.render()?;
        log::info!("🧩 [APP] Scanner AR montado en #{}", container_id);

        if inner.model.start() {
            let weak = Rc::downgrade(&inner);
            wasm_bindgen_futures::spawn_local(async move {
                let result = request_camera_access().await;
                match weak.upgrade() {
                    Some(inner) => {
                        inner.model.permission_resolved(result);
                    }
                    None => log::debug!("⏭️ [APP] Permiso resuelto tras desmontar, ignorado"),
                }
            });
        }

        Ok(Self { inner })
    }

    /// Idempotente: detiene watchdog, listener y timers, y limpia el DOM
    pub fn unmount(&self) {
        if self.inner.unmounted.replace(true) {
            return;
        }
        self.inner.model.shutdown();
        self.inner.active.borrow_mut().take();
        self.inner.toast_listeners.borrow_mut().clear();
        self.inner.rendered.set(None);
        clear_children(&self.inner.container);
        log::info!("🔌 [APP] Scanner AR desmontado");
    }
}

impl Drop for ScannerApp {
    fn drop(&mut self) {
        self.unmount();
    }
}

// Agrupa varios cambios de estado en un solo render
fn schedule_render(weak: &Weak<AppInner>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    if inner.unmounted.get() || inner.render_pending.replace(true) {
        return;
    }
    let weak = weak.clone();
    Timeout::new(0, move || {
        if let Some(inner) = weak.upgrade() {
            inner.render_pending.set(false);
            if let Err(e) = inner.render() {
                log::error!("❌ [APP] Error re-renderizando: {:?}", e);
            }
        }
    })
    .forget();
}

impl AppInner {
    fn render(self: &Rc<Self>) -> Result<(), JsValue> {
        if self.unmounted.get() {
            return Ok(());
        }

        let layout = WidgetLayout::from_state(self.model.state());
        let kind = layout.kind();
        let kind_changed = self.rendered.get() != Some(kind);

        match layout {
            WidgetLayout::Requesting => {
                if kind_changed {
                    replace_children(&self.card_slot, &render_requesting()?)?;
                }
            }
            WidgetLayout::Denied { message } => {
                if kind_changed {
                    self.active.borrow_mut().take();
                    replace_children(&self.card_slot, &render_denied(&message)?)?;
                }
            }
            WidgetLayout::Active { loading, status } => {
                if self.active.borrow().is_none() {
                    let weak = Rc::downgrade(self);
                    let card = ActiveCard::render(
                        &self.scanner_url,
                        Rc::new(move || {
                            if let Some(inner) = weak.upgrade() {
                                inner.model.frame_load_failed();
                            }
                        }),
                    )?;
                    replace_children(&self.card_slot, &card.root)?;
                    *self.active.borrow_mut() = Some(card);
                }
                if let Some(card) = self.active.borrow().as_ref() {
                    card.update(loading, status.as_ref())?;
                }
            }
        }
        self.rendered.set(Some(kind));

        let toasts = self.model.state().toasts.get();
        let state = self.model.state().clone();
        self.toast_listeners.borrow_mut().clear();
        let listeners = render_toasts(
            &self.toast_region,
            &toasts,
            Rc::new(move |id| {
                state.dismiss_toast(id);
            }),
        )?;
        *self.toast_listeners.borrow_mut() = listeners;
        Ok(())
    }
}

/// Orígenes aceptados: la página y el iframe (por defecto la misma ruta relativa)
fn origin_policy(config: &ScannerConfig) -> Result<OriginPolicy, JsValue> {
    if !config.strict_origin {
        log::warn!("⚠️ [APP] STRICT_ORIGIN=false: se aceptan mensajes de cualquier origen");
        return Ok(OriginPolicy::Permissive);
    }

    let location = window().ok_or_else(|| JsValue::from_str("No window"))?.location();
    let page_origin = location.origin()?;
    let frame_origin = match &config.scanner_origin {
        Some(origin) => origin.clone(),
        None => web_sys::Url::new_with_base(&config.scanner_url, &location.href()?)?.origin(),
    };
    log::info!("🔒 [APP] Orígenes permitidos: {} | {}", page_origin, frame_origin);
    Ok(OriginPolicy::strict([page_origin, frame_origin]))
}
