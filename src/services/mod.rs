pub mod scheduler;
pub mod watchdog;
pub mod notifier;
pub mod message_listener;
pub mod camera_service;

pub use scheduler::{BrowserScheduler, ScheduledTask, Scheduler};
pub use watchdog::Watchdog;
pub use notifier::Notifier;
pub use message_listener::{MessageHandler, MessageSource, RawMessage, Subscription, WindowMessageSource};
pub use camera_service::request_camera_access;
