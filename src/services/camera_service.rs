// ============================================================================
// CAMERA SERVICE - getUserMedia para obtener el permiso de cámara
// ============================================================================
// Solo se usa como sonda de permiso: el stream obtenido se detiene enseguida
// para que el iframe MindAR pueda abrir la cámara por su cuenta.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaStream, MediaStreamConstraints, MediaStreamTrack};
use crate::models::CameraFailure;

/// Solicita acceso a la cámara (video) una vez
pub async fn request_camera_access() -> Result<(), CameraFailure> {
    log::info!("📷 [CAMERA] Solicitando permiso de cámara...");

    let window = web_sys::window().ok_or_else(CameraFailure::unavailable)?;
    let media_devices = window
        .navigator()
        .media_devices()
        .map_err(|_| CameraFailure::unavailable())?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);

    let promise = media_devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| failure_from_js(&e))?;
    let stream = JsFuture::from(promise).await.map_err(|e| failure_from_js(&e))?;

    release_probe_stream(stream);
    log::info!("✅ [CAMERA] Permiso de cámara concedido");
    Ok(())
}

fn failure_from_js(error: &JsValue) -> CameraFailure {
    let name = js_sys::Reflect::get(error, &JsValue::from_str("name"))
        .ok()
        .and_then(|value| value.as_string());
    let failure = CameraFailure::from_error_name(name.as_deref());
    log::error!("❌ [CAMERA] Acceso a cámara denegado o con error: {}", failure);
    failure
}

fn release_probe_stream(stream: JsValue) {
    let Ok(stream) = stream.dyn_into::<MediaStream>() else {
        log::warn!("⚠️ [CAMERA] getUserMedia no retornó un MediaStream");
        return;
    };
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
    log::debug!("📷 [CAMERA] Stream de sonda liberado");
}
