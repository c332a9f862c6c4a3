// ============================================================================
// EVENT HANDLING - Listeners del DOM
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - `on_click` usa closure.forget(): el closure de Rust NO se libera nunca,
//   aunque el nodo desaparezca. Solo para botones que se crean una vez por
//   montaje (recargar página en la vista de permiso denegado).
// - `EventListener` guarda el closure y lo quita al hacer Drop. Se usa para
//   todo lo que se re-renderiza (toasts) o muere con una activación (iframe).
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, EventTarget, MouseEvent};

pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    closure: Option<Closure<dyn FnMut(Event)>>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type,
            closure: Some(closure),
        })
    }

    /// Idempotente
    pub fn remove(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event_type, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Click handler permanente (el closure queda en memoria hasta recargar)
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    // Necesario para mantener el closure vivo en Rust WASM
    closure.forget();
    Ok(())
}
