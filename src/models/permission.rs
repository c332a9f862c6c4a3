// ============================================================================
// PERMISSION MODEL - Estado del permiso de cámara y clasificación de fallos
// ============================================================================

use std::fmt;
use crate::utils::messages;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionState {
    Requesting,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, PermissionState::Requesting)
    }
}

/// Motivo declarado del rechazo (nombre de la DOMException)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraFailureKind {
    /// NotAllowedError
    PermissionRefused,
    /// NotFoundError
    DeviceNotFound,
    /// NotReadableError
    DeviceBusy,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraFailure {
    pub kind: CameraFailureKind,
    /// Nombre original del error, si el navegador lo expuso
    pub name: Option<String>,
}

impl CameraFailure {
    pub fn from_error_name(name: Option<&str>) -> Self {
        let kind = match name {
            Some("NotAllowedError") => CameraFailureKind::PermissionRefused,
            Some("NotFoundError") => CameraFailureKind::DeviceNotFound,
            Some("NotReadableError") => CameraFailureKind::DeviceBusy,
            _ => CameraFailureKind::Other,
        };
        Self {
            kind,
            name: name.map(str::to_string),
        }
    }

    /// Sin `navigator.mediaDevices` (contexto inseguro o navegador antiguo)
    pub fn unavailable() -> Self {
        Self {
            kind: CameraFailureKind::Other,
            name: Some("MediaDevicesUnavailable".to_string()),
        }
    }

    /// Texto para el banner inline
    pub fn user_message(&self) -> String {
        match self.kind {
            CameraFailureKind::PermissionRefused => messages::CAMERA_REFUSED.to_string(),
            CameraFailureKind::DeviceNotFound => messages::CAMERA_NOT_FOUND.to_string(),
            CameraFailureKind::DeviceBusy => messages::CAMERA_BUSY.to_string(),
            CameraFailureKind::Other => messages::camera_other(self.name.as_deref()),
        }
    }
}

impl fmt::Display for CameraFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self.kind, self.name.as_deref().unwrap_or("sin nombre"))
    }
}
