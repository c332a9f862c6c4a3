// ============================================================================
// NOTICE MODEL - Panel de estado inline y notificaciones (toasts)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    pub fn title(&self) -> &'static str {
        match self {
            StatusKind::Info => "掃描狀態",
            StatusKind::Success => "掃描成功",
            StatusKind::Error => "掃描問題",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusKind::Info => "status-info",
            StatusKind::Success => "status-success",
            StatusKind::Error => "status-error",
        }
    }
}

/// Mensaje persistente bajo el iframe
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

/// Notificación transitoria
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub destructive: bool,
    pub duration_ms: u32,
}
