// ============================================================================
// MESSAGE LISTENER - Canal postMessage entre la página y el iframe MindAR
// ============================================================================
// A diferencia de los listeners globales con forget(), esta suscripción se
// quita de window al cancelarla o al hacer Drop: cada activación del scanner
// registra exactamente un listener y lo retira en su teardown.
// ============================================================================

use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MessageEvent, Window};

/// Mensaje recibido, todavía sin validar
#[derive(Clone, Debug, PartialEq)]
pub struct RawMessage {
    pub origin: String,
    /// None si el payload no es un objeto JSON
    pub data: Option<Value>,
}

impl RawMessage {
    pub fn new(origin: impl Into<String>, data: Value) -> Self {
        Self {
            origin: origin.into(),
            data: Some(data),
        }
    }

    fn from_event(event: &MessageEvent) -> Self {
        Self {
            origin: event.origin(),
            data: event_payload(event),
        }
    }
}

// Los objetos pasan por JSON.stringify; strings, números, etc. se descartan
fn event_payload(event: &MessageEvent) -> Option<Value> {
    let data = event.data();
    if !data.is_object() {
        return None;
    }
    let json = js_sys::JSON::stringify(&data).ok()?.as_string()?;
    serde_json::from_str(&json).ok()
}

pub type MessageHandler = Box<dyn FnMut(RawMessage)>;

pub trait Subscription {
    fn cancel(self: Box<Self>);
}

pub trait MessageSource {
    fn subscribe(&self, handler: MessageHandler) -> Result<Box<dyn Subscription>, String>;
}

/// Eventos "message" de window
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowMessageSource;

impl MessageSource for WindowMessageSource {
    fn subscribe(&self, mut handler: MessageHandler) -> Result<Box<dyn Subscription>, String> {
        let window = web_sys::window().ok_or("No window")?;

        let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
            handler(RawMessage::from_event(&event));
        }) as Box<dyn FnMut(MessageEvent)>);

        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .map_err(|e| format!("Error registrando listener 'message': {:?}", e))?;
        log::info!("👂 [RELAY] Listener 'message' registrado");

        Ok(Box::new(WindowSubscription {
            window,
            closure: Some(closure),
        }))
    }
}

struct WindowSubscription {
    window: Window,
    closure: Option<Closure<dyn FnMut(MessageEvent)>>,
}

impl WindowSubscription {
    fn detach(&mut self) {
        if let Some(closure) = self.closure.take() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                log::warn!("⚠️ [RELAY] No se pudo quitar el listener 'message': {:?}", e);
            }
            log::info!("🔌 [RELAY] Listener 'message' retirado");
        }
    }
}

impl Subscription for WindowSubscription {
    fn cancel(mut self: Box<Self>) {
        self.detach();
    }
}

impl Drop for WindowSubscription {
    fn drop(&mut self) {
        self.detach();
    }
}
