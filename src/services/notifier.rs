// ============================================================================
// NOTIFIER - Toasts transitorios con auto-cierre
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::services::scheduler::{ScheduledTask, Scheduler};
use crate::state::WidgetState;

#[derive(Clone)]
pub struct Notifier {
    state: WidgetState,
    scheduler: Rc<dyn Scheduler>,
    timers: Rc<RefCell<Vec<(u32, Box<dyn ScheduledTask>)>>>,
}

impl Notifier {
    pub fn new(state: WidgetState, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            state,
            scheduler,
            timers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Toast destructivo (todos los errores del widget usan esta variante)
    pub fn error(&self, title: &str, description: &str, duration_ms: u32) -> u32 {
        self.push(title, description, true, duration_ms)
    }

    pub fn info(&self, title: &str, description: &str, duration_ms: u32) -> u32 {
        self.push(title, description, false, duration_ms)
    }

    fn push(&self, title: &str, description: &str, destructive: bool, duration_ms: u32) -> u32 {
        self.prune();
        let id = self.state.push_toast(title, description, destructive, duration_ms);
        log::info!("🔔 [TOAST] #{} {}", id, title);

        let state = self.state.clone();
        let timer = self.scheduler.schedule(
            duration_ms,
            Box::new(move || {
                state.dismiss_toast(id);
            }),
        );
        self.timers.borrow_mut().push((id, timer));
        id
    }

    // Timers cuyo toast ya no existe (expirado o cerrado a mano)
    fn prune(&self) {
        let state = self.state.clone();
        let stale: Vec<Box<dyn ScheduledTask>> = {
            let mut timers = self.timers.borrow_mut();
            let (keep, stale): (Vec<_>, Vec<_>) = timers.drain(..).partition(|(id, _)| state.has_toast(*id));
            *timers = keep;
            stale.into_iter().map(|(_, timer)| timer).collect()
        };
        for timer in stale {
            timer.cancel();
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Cancela todos los auto-cierres pendientes
    pub fn shutdown(&self) {
        let timers: Vec<_> = self.timers.borrow_mut().drain(..).collect();
        for (_, timer) in timers {
            timer.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scheduler::testing::ManualScheduler;

    #[test]
    fn toast_expires_after_its_duration() {
        let scheduler = ManualScheduler::new();
        let state = WidgetState::new();
        let notifier = Notifier::new(state.clone(), scheduler.clone());

        let short = notifier.error("a", "b", 5_000);
        let long = notifier.error("c", "d", 30_000);
        scheduler.advance(5_000);
        assert!(!state.has_toast(short));
        assert!(state.has_toast(long));

        scheduler.advance(25_000);
        assert!(state.toasts.with(|toasts| toasts.is_empty()));
    }

    #[test]
    fn stale_timers_are_pruned_on_next_push() {
        let scheduler = ManualScheduler::new();
        let state = WidgetState::new();
        let notifier = Notifier::new(state.clone(), scheduler.clone());

        let first = notifier.info("a", "b", 1_000);
        state.dismiss_toast(first);
        notifier.info("c", "d", 1_000);
        assert_eq!(notifier.pending_timers(), 1);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn shutdown_cancels_everything() {
        let scheduler = ManualScheduler::new();
        let state = WidgetState::new();
        let notifier = Notifier::new(state.clone(), scheduler.clone());
        notifier.error("a", "b", 1_000);
        notifier.shutdown();
        notifier.shutdown();
        assert_eq!(scheduler.pending(), 0);
    }
}
