// ============================================================================
// CONFIG - Configuración del widget en tiempo de compilación
// ============================================================================
// build.rs copia las claves conocidas de `.env` a rustc-env; aquí se leen con
// option_env! y cualquier valor ausente o ilegible cae al default.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Ruta por defecto de la página MindAR embebida
pub const DEFAULT_SCANNER_URL: &str = "/mindar/index.html";

/// Ventana del watchdog de arranque (ms)
pub const DEFAULT_READY_TIMEOUT_MS: u32 = 12_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub scanner_url: String,
    pub ready_timeout_ms: u32,
    /// Origen explícito del iframe; si es None se resuelve desde `scanner_url`
    pub scanner_origin: Option<String>,
    pub strict_origin: bool,
    pub enable_logging: bool,
    pub toast_duration_ms: u32,
    pub timeout_toast_duration_ms: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            scanner_url: DEFAULT_SCANNER_URL.to_string(),
            ready_timeout_ms: DEFAULT_READY_TIMEOUT_MS,
            scanner_origin: None,
            strict_origin: true,
            enable_logging: true,
            toast_duration_ms: 5_000,
            timeout_toast_duration_ms: 30_000,
        }
    }
}

impl ScannerConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            scanner_url: option_env!("SCANNER_URL")
                .map(str::to_string)
                .unwrap_or(defaults.scanner_url),
            ready_timeout_ms: parse_or(option_env!("SCANNER_READY_TIMEOUT_MS"), defaults.ready_timeout_ms),
            scanner_origin: option_env!("SCANNER_ORIGIN")
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(|origin| origin.trim_end_matches('/').to_string()),
            strict_origin: parse_or(option_env!("STRICT_ORIGIN"), defaults.strict_origin),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            toast_duration_ms: parse_or(option_env!("TOAST_DURATION_MS"), defaults.toast_duration_ms),
            timeout_toast_duration_ms: parse_or(
                option_env!("TIMEOUT_TOAST_DURATION_MS"),
                defaults.timeout_toast_duration_ms,
            ),
        }
    }

    /// Segundos enteros del watchdog, para los mensajes al usuario
    pub fn ready_timeout_secs(&self) -> u32 {
        self.ready_timeout_ms / 1000
    }

    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, fallback: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(fallback)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: ScannerConfig = ScannerConfig::from_env();
}
