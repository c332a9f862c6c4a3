// ============================================================================
// WIDGET VIEWMODEL - Orquesta permiso de cámara y ciclo de vida del scanner
// ============================================================================
// Permiso -> (Granted) activa el controlador -> relay -> callback externo.
// Sin DOM: la vista y el servicio de cámara lo alimentan desde app.rs.
// ============================================================================

use std::rc::Rc;
use crate::config::ScannerConfig;
use crate::models::{CameraFailure, PermissionState};
use crate::services::{MessageSource, Notifier, Scheduler};
use crate::state::WidgetState;
use crate::viewmodels::{CardCallback, MessageRelay, PermissionGate, ScannerController};

pub struct ScannerWidgetModel {
    state: WidgetState,
    notifier: Notifier,
    gate: PermissionGate,
    controller: ScannerController,
    source: Rc<dyn MessageSource>,
}

impl ScannerWidgetModel {
    pub fn new(
        config: &ScannerConfig,
        relay: MessageRelay,
        scheduler: Rc<dyn Scheduler>,
        source: Rc<dyn MessageSource>,
        on_card_scanned: CardCallback,
    ) -> Self {
        let state = WidgetState::new();
        let notifier = Notifier::new(state.clone(), scheduler.clone());
        let gate = PermissionGate::new(state.clone(), notifier.clone(), config.toast_duration_ms);
        let controller = ScannerController::new(
            state.clone(),
            notifier.clone(),
            relay,
            scheduler,
            config,
            on_card_scanned,
        );
        Self {
            state,
            notifier,
            gate,
            controller,
            source,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn controller(&self) -> &ScannerController {
        &self.controller
    }

    /// Montaje: true si hay que lanzar la solicitud de cámara
    pub fn start(&self) -> bool {
        self.gate.begin()
    }

    pub fn permission_resolved(&self, result: Result<(), CameraFailure>) -> PermissionState {
        if let Some(PermissionState::Granted) = self.gate.resolve(result) {
            self.controller.activate(&*self.source);
        }
        self.state.permission()
    }

    pub fn frame_load_failed(&self) {
        self.controller.frame_load_failed();
    }

    /// Unmount: idempotente
    pub fn shutdown(&self) {
        self.gate.close();
        self.controller.teardown();
        self.notifier.shutdown();
    }
}

impl Drop for ScannerWidgetModel {
    fn drop(&mut self) {
        self.shutdown();
    }
}
