pub mod message_relay;
pub mod scanner_controller;
pub mod permission_gate;
pub mod widget_viewmodel;

pub use message_relay::{MessageRelay, OriginPolicy};
pub use scanner_controller::{CardCallback, ScannerController};
pub use permission_gate::PermissionGate;
pub use widget_viewmodel::ScannerWidgetModel;
