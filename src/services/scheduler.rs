// ============================================================================
// SCHEDULER - Temporizadores cancelables (gloo_timers en el navegador)
// ============================================================================

use gloo_timers::callback::Timeout;

/// Tarea programada; cancelar una tarea ya ejecutada no hace nada
pub trait ScheduledTask {
    fn cancel(self: Box<Self>);
}

pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Box<dyn ScheduledTask>;
}

/// setTimeout del navegador vía gloo_timers
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Box<dyn ScheduledTask> {
        Box::new(Timeout::new(delay_ms, task))
    }
}

impl ScheduledTask for Timeout {
    fn cancel(self: Box<Self>) {
        // El Drop de Timeout llama a clearTimeout
        drop(self);
    }
}
