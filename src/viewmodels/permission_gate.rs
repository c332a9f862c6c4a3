// ============================================================================
// PERMISSION GATE - Permiso de cámara solicitado una sola vez al montar
// ============================================================================
// Requesting -> Granted | Denied, una única transición. Sin reintentos: la
// única recuperación es recargar la página desde la vista de error.
// ============================================================================

use std::cell::Cell;
use crate::models::{CameraFailure, PermissionState};
use crate::services::Notifier;
use crate::state::WidgetState;
use crate::utils::messages;

pub struct PermissionGate {
    state: WidgetState,
    notifier: Notifier,
    toast_ms: u32,
    requested: Cell<bool>,
    closed: Cell<bool>,
}

impl PermissionGate {
    pub fn new(state: WidgetState, notifier: Notifier, toast_ms: u32) -> Self {
        Self {
            state,
            notifier,
            toast_ms,
            requested: Cell::new(false),
            closed: Cell::new(false),
        }
    }

    /// true solo en la primera llamada: el caller debe lanzar getUserMedia
    pub fn begin(&self) -> bool {
        if self.closed.get() || self.requested.replace(true) {
            log::warn!("⚠️ [PERMISSION] Solicitud de cámara ya iniciada, ignorando");
            return false;
        }
        self.state.camera_error.set_if_changed(None);
        self.state.permission.set_if_changed(PermissionState::Requesting);
        log::info!("📷 [PERMISSION] Solicitando permiso de cámara");
        true
    }

    /// Aplica el resultado; retorna el nuevo estado solo si hubo transición
    pub fn resolve(&self, result: Result<(), CameraFailure>) -> Option<PermissionState> {
        if self.closed.get() {
            log::debug!("⏭️ [PERMISSION] Resultado tras el teardown, ignorado");
            return None;
        }
        if !self.requested.get() || self.state.permission().is_settled() {
            log::warn!("⚠️ [PERMISSION] Resultado inesperado, el permiso ya está resuelto");
            return None;
        }

        match result {
            Ok(()) => {
                log::info!("✅ [PERMISSION] Cámara autorizada");
                self.state.permission.set(PermissionState::Granted);
                Some(PermissionState::Granted)
            }
            Err(failure) => {
                log::error!("❌ [PERMISSION] Cámara denegada: {}", failure);
                // El mensaje va antes que el estado: la vista lo lee al cambiar a Denied
                self.state.camera_error.set(Some(failure.user_message()));
                self.state.permission.set(PermissionState::Denied);
                self.notifier.error(
                    messages::CAMERA_TOAST_TITLE,
                    messages::CAMERA_TOAST_DESCRIPTION,
                    self.toast_ms,
                );
                Some(PermissionState::Denied)
            }
        }
    }

    /// Teardown: resultados que lleguen después se ignoran
    pub fn close(&self) {
        self.closed.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scheduler::testing::ManualScheduler;

    fn gate() -> (WidgetState, PermissionGate) {
        let state = WidgetState::new();
        let notifier = Notifier::new(state.clone(), ManualScheduler::new());
        let gate = PermissionGate::new(state.clone(), notifier, 5_000);
        (state, gate)
    }

    #[test]
    fn requests_only_once() {
        let (_state, gate) = gate();
        assert!(gate.begin());
        assert!(!gate.begin());
    }

    #[test]
    fn grant_is_silent() {
        let (state, gate) = gate();
        gate.begin();
        assert_eq!(gate.resolve(Ok(())), Some(PermissionState::Granted));
        assert_eq!(state.permission(), PermissionState::Granted);
        assert!(state.toasts.with(|t| t.is_empty()));
        assert_eq!(state.camera_error.get(), None);
    }

    #[test]
    fn denial_records_classified_message_and_toast() {
        let (state, gate) = gate();
        gate.begin();
        let failure = CameraFailure::from_error_name(Some("NotReadableError"));
        assert_eq!(gate.resolve(Err(failure)), Some(PermissionState::Denied));
        assert_eq!(state.permission(), PermissionState::Denied);
        assert_eq!(state.camera_error.get().as_deref(), Some(messages::CAMERA_BUSY));
        assert!(state.toasts.with(|t| t.iter().any(|t| t.title == messages::CAMERA_TOAST_TITLE && t.destructive)));
    }

    #[test]
    fn settles_exactly_once() {
        let (state, gate) = gate();
        gate.begin();
        gate.resolve(Err(CameraFailure::from_error_name(Some("NotAllowedError"))));
        assert_eq!(gate.resolve(Ok(())), None);
        assert_eq!(state.permission(), PermissionState::Denied);
    }

    #[test]
    fn result_without_request_is_ignored() {
        let (state, gate) = gate();
        assert_eq!(gate.resolve(Ok(())), None);
        assert_eq!(state.permission(), PermissionState::Requesting);
    }

    #[test]
    fn late_result_after_close_is_ignored() {
        let (state, gate) = gate();
        gate.begin();
        gate.close();
        assert_eq!(gate.resolve(Ok(())), None);
        assert_eq!(state.permission(), PermissionState::Requesting);
        assert!(!gate.begin());
    }
}
