// ============================================================================
// SCANNER MODEL - Estados y eventos del ciclo de vida del scanner embebido
// ============================================================================

use crate::models::card::ScanOutcome;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScannerState {
    Loading,
    Ready,
    Success(String),
    Error(String),
}

impl ScannerState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScannerState::Loading)
    }

    /// Success y Error no aceptan más mensajes del iframe
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScannerState::Success(_) | ScannerState::Error(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScannerState::Loading => "loading",
            ScannerState::Ready => "ready",
            ScannerState::Success(_) => "success",
            ScannerState::Error(_) => "error",
        }
    }
}

/// Entradas del controlador: mensajes ya validados, watchdog o transporte
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScannerEvent {
    Ready,
    Scanned(ScanOutcome),
    Failed(Option<String>),
    WatchdogExpired,
    FrameLoadFailed,
}
