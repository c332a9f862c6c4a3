// ============================================================================
// WATCHDOG - Temporizador de un solo disparo con arm/disarm explícitos
// ============================================================================
// Como máximo un timer vivo por instancia. Desarmar es idempotente y el Drop
// desarma, así que cualquier salida del scope limpia el timer.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use crate::services::scheduler::{ScheduledTask, Scheduler};

pub struct Watchdog {
    scheduler: Rc<dyn Scheduler>,
    window_ms: u32,
    task: Option<Box<dyn ScheduledTask>>,
    fired: Rc<Cell<bool>>,
}

impl Watchdog {
    pub fn new(scheduler: Rc<dyn Scheduler>, window_ms: u32) -> Self {
        Self {
            scheduler,
            window_ms,
            task: None,
            fired: Rc::new(Cell::new(false)),
        }
    }

    /// Arma el watchdog; un timer anterior se cancela primero
    pub fn arm<F>(&mut self, on_expire: F)
    where
        F: FnOnce() + 'static,
    {
        self.disarm();

        // Flag nuevo por armado: un timer viejo no puede marcar al actual
        let fired = Rc::new(Cell::new(false));
        self.fired = fired.clone();
        let task = self.scheduler.schedule(
            self.window_ms,
            Box::new(move || {
                fired.set(true);
                on_expire();
            }),
        );
        self.task = Some(task);
        log::debug!("⏱️ [WATCHDOG] Armado ({} ms)", self.window_ms);
    }

    /// Retorna true si había un timer pendiente que se canceló
    pub fn disarm(&mut self) -> bool {
        match self.task.take() {
            Some(task) if !self.fired.get() => {
                task.cancel();
                log::debug!("⏱️ [WATCHDOG] Desarmado");
                true
            }
            Some(_) => false,
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some() && !self.fired.get()
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.disarm();
    }
}
