pub mod card;
pub mod message;
pub mod permission;
pub mod scanner;
pub mod notice;

pub use card::{KnownCardSet, ScanOutcome, KNOWN_CARD_NAMES, UNKNOWN_CARD_SENTINEL};
pub use message::InboundMessage;
pub use permission::{CameraFailure, CameraFailureKind, PermissionState};
pub use scanner::{ScannerEvent, ScannerState};
pub use notice::{StatusKind, StatusMessage, Toast};
