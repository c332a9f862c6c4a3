// ============================================================================
// AR CARD SCANNER - Widget de escaneo de cartas (Rust puro + WASM)
// ============================================================================
// Arquitectura MVVM, igual que el resto del frontend:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Permiso de cámara, máquina de estados del scanner, relay
// - Services: Cámara, canal postMessage, timers
// - State: Estado observable con Rc<RefCell>
// - Models: Cartas conocidas, mensajes del iframe, estados
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod viewmodels;
pub mod utils;
mod dom;
mod views;
mod app;

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use crate::app::ScannerApp;
use crate::config::CONFIG;
use crate::viewmodels::CardCallback;

#[wasm_bindgen(start)]
pub fn start() {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🃏 AR Card Scanner - Rust + WASM");
}

/// Handle devuelto a JavaScript; `unmount()` libera listener, watchdog y DOM
#[wasm_bindgen]
pub struct CardScannerHandle {
    app: Option<ScannerApp>,
}

#[wasm_bindgen]
impl CardScannerHandle {
    pub fn unmount(&mut self) {
        if let Some(app) = self.app.take() {
            app.unmount();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.app.is_some()
    }
}

/// Monta el scanner dentro de `#container_id`.
/// `on_card_scanned(cardName)` se llama como máximo una vez por escaneo exitoso.
#[wasm_bindgen(js_name = mountCardScanner)]
pub fn mount_card_scanner(
    container_id: &str,
    on_card_scanned: js_sys::Function,
) -> Result<CardScannerHandle, JsValue> {
    let callback: CardCallback = Rc::new(move |card_name: String| {
        if let Err(e) = on_card_scanned.call1(&JsValue::NULL, &JsValue::from_str(&card_name)) {
            log::error!("❌ [APP] onCardScanned lanzó una excepción: {:?}", e);
        }
    });
    let app = ScannerApp::mount(container_id, callback)?;
    Ok(CardScannerHandle { app: Some(app) })
}
