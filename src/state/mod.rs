// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod widget_state;

pub use reactivity::*;
pub use widget_state::*;
