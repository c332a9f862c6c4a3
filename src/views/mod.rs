pub mod layout;
pub mod scanner_card;
pub mod status_panel;
pub mod toast;

pub use layout::{LayoutKind, WidgetLayout};
pub use scanner_card::{render_denied, render_requesting, ActiveCard};
pub use status_panel::render_status;
pub use toast::render_toasts;
