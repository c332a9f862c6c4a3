// ============================================================================
// WIDGET STATE - Estado observable del scanner AR
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use crate::models::{PermissionState, ScannerState, StatusKind, StatusMessage, Toast};
use crate::state::ReactiveState;

#[derive(Clone)]
pub struct WidgetState {
    pub permission: ReactiveState<PermissionState>,
    /// Mensaje clasificado del rechazo de cámara
    pub camera_error: ReactiveState<Option<String>>,
    pub scanner: ReactiveState<ScannerState>,
    pub status: ReactiveState<Option<StatusMessage>>,
    pub toasts: ReactiveState<Vec<Toast>>,
    next_toast_id: Rc<Cell<u32>>,
}

impl WidgetState {
    pub fn new() -> Self {
        Self {
            permission: ReactiveState::new(PermissionState::Requesting),
            camera_error: ReactiveState::new(None),
            scanner: ReactiveState::new(ScannerState::Loading),
            status: ReactiveState::new(None),
            toasts: ReactiveState::new(Vec::new()),
            next_toast_id: Rc::new(Cell::new(1)),
        }
    }

    pub fn permission(&self) -> PermissionState {
        self.permission.get()
    }

    pub fn scanner(&self) -> ScannerState {
        self.scanner.get()
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.status.get()
    }

    pub fn set_status(&self, kind: StatusKind, text: impl Into<String>) {
        self.status.set(Some(StatusMessage::new(kind, text)));
    }

    pub fn clear_status(&self) {
        self.status.set_if_changed(None);
    }

    /// Agregar toast; retorna su id
    pub fn push_toast(&self, title: &str, description: &str, destructive: bool, duration_ms: u32) -> u32 {
        let id = self.next_toast_id.get();
        self.next_toast_id.set(id.wrapping_add(1));
        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                title: title.to_string(),
                description: description.to_string(),
                destructive,
                duration_ms,
            })
        });
        id
    }

    pub fn dismiss_toast(&self, id: u32) -> bool {
        let present = self.toasts.with(|toasts| toasts.iter().any(|toast| toast.id == id));
        if present {
            self.toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
        }
        present
    }

    pub fn has_toast(&self, id: u32) -> bool {
        self.toasts.with(|toasts| toasts.iter().any(|toast| toast.id == id))
    }

    /// Suscribirse a cualquier cambio del widget
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback: Rc<dyn Fn()> = Rc::new(callback);
        {
            let cb = callback.clone();
            self.permission.subscribe(move || cb());
        }
        {
            let cb = callback.clone();
            self.camera_error.subscribe(move || cb());
        }
        {
            let cb = callback.clone();
            self.scanner.subscribe(move || cb());
        }
        {
            let cb = callback.clone();
            self.status.subscribe(move || cb());
        }
        self.toasts.subscribe(move || callback());
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::new()
    }
}
