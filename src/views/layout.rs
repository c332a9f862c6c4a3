// ============================================================================
// LAYOUT - Qué pantalla mostrar según el estado (sin DOM)
// ============================================================================

use crate::models::{PermissionState, StatusMessage};
use crate::state::WidgetState;
use crate::utils::messages;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    Requesting,
    Denied,
    Active,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetLayout {
    Requesting,
    /// Banner con el error clasificado y botón de recarga
    Denied { message: String },
    /// Iframe montado; overlay mientras MindAR carga
    Active {
        loading: bool,
        status: Option<StatusMessage>,
    },
}

impl WidgetLayout {
    pub fn from_state(state: &WidgetState) -> Self {
        match state.permission() {
            PermissionState::Requesting => WidgetLayout::Requesting,
            PermissionState::Denied => WidgetLayout::Denied {
                message: state
                    .camera_error
                    .get()
                    .unwrap_or_else(|| messages::CAMERA_DENIED_FALLBACK.to_string()),
            },
            PermissionState::Granted => WidgetLayout::Active {
                loading: state.scanner.with(|scanner| scanner.is_loading()),
                status: state.status(),
            },
        }
    }

    pub fn kind(&self) -> LayoutKind {
        match self {
            WidgetLayout::Requesting => LayoutKind::Requesting,
            WidgetLayout::Denied { .. } => LayoutKind::Denied,
            WidgetLayout::Active { .. } => LayoutKind::Active,
        }
    }
}
