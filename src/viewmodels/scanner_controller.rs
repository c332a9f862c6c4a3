// ============================================================================
// SCANNER CONTROLLER - Máquina de estados del scanner MindAR embebido
// ============================================================================
// Loading -> Ready -> (Success | Error), alimentada por el relay de mensajes,
// el watchdog de arranque y los errores de carga del iframe.
//
// Cada activación es un bloque setup/teardown: registra un listener y arma
// el watchdog; el teardown (re-activación, unmount o Drop) los retira. Los
// eventos llevan el número de activación y se descartan si ya no es la
// vigente, así nada transiciona después del teardown.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use crate::config::ScannerConfig;
use crate::models::{ScanOutcome, ScannerEvent, ScannerState, StatusKind};
use crate::services::{MessageSource, Notifier, RawMessage, Scheduler, Subscription, Watchdog};
use crate::state::WidgetState;
use crate::utils::messages;
use crate::viewmodels::MessageRelay;

/// Callback externo `on_card_scanned`
pub type CardCallback = Rc<dyn Fn(String)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Timings {
    ready_timeout_ms: u32,
    ready_timeout_secs: u32,
    toast_ms: u32,
    timeout_toast_ms: u32,
}

struct Activation {
    generation: u64,
    watchdog: Watchdog,
    subscription: Option<Box<dyn Subscription>>,
}

impl Activation {
    fn close(&mut self) {
        self.watchdog.disarm();
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}

impl Drop for Activation {
    fn drop(&mut self) {
        self.close();
    }
}

struct ControllerCore {
    state: WidgetState,
    notifier: Notifier,
    relay: MessageRelay,
    scheduler: Rc<dyn Scheduler>,
    timings: Timings,
    on_card_scanned: CardCallback,
    generation: Cell<u64>,
    activation: RefCell<Option<Activation>>,
}

pub struct ScannerController {
    core: Rc<ControllerCore>,
}

impl ScannerController {
    pub fn new(
        state: WidgetState,
        notifier: Notifier,
        relay: MessageRelay,
        scheduler: Rc<dyn Scheduler>,
        config: &ScannerConfig,
        on_card_scanned: CardCallback,
    ) -> Self {
        Self {
            core: Rc::new(ControllerCore {
                state,
                notifier,
                relay,
                scheduler,
                timings: Timings {
                    ready_timeout_ms: config.ready_timeout_ms,
                    ready_timeout_secs: config.ready_timeout_secs(),
                    toast_ms: config.toast_duration_ms,
                    timeout_toast_ms: config.timeout_toast_duration_ms,
                },
                on_card_scanned,
                generation: Cell::new(0),
                activation: RefCell::new(None),
            }),
        }
    }

    /// Entrar en Loading: registra el listener y arma el watchdog
    pub fn activate(&self, source: &dyn MessageSource) {
        self.teardown();

        let core = &self.core;
        let generation = core.generation.get() + 1;
        core.generation.set(generation);
        log::info!("🚀 [SCANNER] Activación #{}: cargando MindAR", generation);

        core.state.scanner.set(ScannerState::Loading);
        core.state.clear_status();

        let weak: Weak<ControllerCore> = Rc::downgrade(core);
        let subscription = {
            let weak = weak.clone();
            source.subscribe(Box::new(move |message: RawMessage| {
                if let Some(core) = weak.upgrade() {
                    core.on_message(generation, &message);
                }
            }))
        };
        let subscription = match subscription {
            Ok(subscription) => subscription,
            Err(e) => {
                log::error!("❌ [SCANNER] No se pudo escuchar al iframe: {}", e);
                core.fail(
                    messages::listener_error(&e),
                    messages::SCANNER_ERROR_TOAST_TITLE,
                    &messages::listener_error(&e),
                    core.timings.toast_ms,
                );
                return;
            }
        };

        let mut watchdog = Watchdog::new(core.scheduler.clone(), core.timings.ready_timeout_ms);
        watchdog.arm(move || {
            if let Some(core) = weak.upgrade() {
                core.dispatch(generation, ScannerEvent::WatchdogExpired);
            }
        });

        *core.activation.borrow_mut() = Some(Activation {
            generation,
            watchdog,
            subscription: Some(subscription),
        });
    }

    /// Error de transporte del iframe (evento `error` del elemento)
    pub fn frame_load_failed(&self) {
        match self.core.current_generation() {
            Some(generation) => self.core.dispatch(generation, ScannerEvent::FrameLoadFailed),
            None => log::warn!("⚠️ [SCANNER] Error de carga del iframe sin activación vigente"),
        }
    }

    /// Idempotente: cancela watchdog y listener si existen
    pub fn teardown(&self) {
        let activation = self.core.activation.borrow_mut().take();
        if let Some(mut activation) = activation {
            activation.close();
            log::info!("🧹 [SCANNER] Teardown de la activación #{}", activation.generation);
        }
    }

    pub fn is_active(&self) -> bool {
        self.core.activation.borrow().is_some()
    }

    pub fn watchdog_armed(&self) -> bool {
        self.core
            .activation
            .borrow()
            .as_ref()
            .map_or(false, |activation| activation.watchdog.is_armed())
    }

    pub fn activations(&self) -> u64 {
        self.core.generation.get()
    }
}

impl Drop for ScannerController {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl ControllerCore {
    fn current_generation(&self) -> Option<u64> {
        self.activation.borrow().as_ref().map(|activation| activation.generation)
    }

    fn on_message(&self, generation: u64, message: &RawMessage) {
        if let Some(event) = self.relay.interpret(message) {
            self.dispatch(generation, event);
        }
    }

    fn disarm_watchdog(&self) {
        if let Some(activation) = self.activation.borrow_mut().as_mut() {
            activation.watchdog.disarm();
        }
    }

    fn dispatch(&self, generation: u64, event: ScannerEvent) {
        if self.current_generation() != Some(generation) {
            log::debug!("⏭️ [SCANNER] Evento {:?} de la activación #{} descartado", event, generation);
            return;
        }

        // Se relee el estado en cada evento: duplicados y desorden no transicionan dos veces
        let current = self.state.scanner();
        match (current, event) {
            (ScannerState::Loading, ScannerEvent::Ready) => {
                self.disarm_watchdog();
                log::info!("✅ [SCANNER] MindAR listo");
                self.state.scanner.set(ScannerState::Ready);
                self.state.set_status(StatusKind::Info, messages::SCANNER_READY);
            }
            (ScannerState::Loading | ScannerState::Ready, ScannerEvent::Scanned(outcome)) => {
                self.disarm_watchdog();
                self.process_scan(outcome);
            }
            (ScannerState::Loading | ScannerState::Ready, ScannerEvent::Failed(message)) => {
                self.disarm_watchdog();
                log::error!("❌ [SCANNER] MindAR reportó un error: {:?}", message);
                let description = message
                    .clone()
                    .unwrap_or_else(|| messages::SCANNER_ERROR_TOAST_FALLBACK.to_string());
                self.fail(
                    messages::scanner_error(message.as_deref()),
                    messages::SCANNER_ERROR_TOAST_TITLE,
                    &description,
                    self.timings.toast_ms,
                );
            }
            (ScannerState::Loading, ScannerEvent::WatchdogExpired) => {
                self.disarm_watchdog();
                log::error!(
                    "⏰ [SCANNER] MindAR no respondió en {} ms (¿targets.mind dañado o de otra versión?)",
                    self.timings.ready_timeout_ms
                );
                self.fail(
                    messages::timeout(self.timings.ready_timeout_secs),
                    messages::TIMEOUT_TOAST_TITLE,
                    messages::TIMEOUT_TOAST_DESCRIPTION,
                    self.timings.timeout_toast_ms,
                );
            }
            (_, ScannerEvent::FrameLoadFailed) => {
                self.disarm_watchdog();
                log::error!("❌ [SCANNER] El iframe de MindAR no pudo cargarse");
                self.fail(
                    messages::FRAME_LOAD_ERROR.to_string(),
                    messages::FRAME_LOAD_TOAST_TITLE,
                    messages::FRAME_LOAD_TOAST_DESCRIPTION,
                    self.timings.toast_ms,
                );
            }
            (current, event) if current.is_terminal() => {
                log::debug!("⏭️ [SCANNER] Evento {:?} tras estado terminal '{}', ignorado", event, current.label());
            }
            (current, event) => {
                log::debug!("⏭️ [SCANNER] Evento {:?} ignorado en estado '{}'", event, current.label());
            }
        }
    }

    fn process_scan(&self, outcome: ScanOutcome) {
        match outcome {
            ScanOutcome::Recognized(card_name) => {
                log::info!("🃏 [SCANNER] Carta reconocida: {}", card_name);
                self.state.scanner.set(ScannerState::Success(card_name.clone()));
                self.state.set_status(StatusKind::Success, messages::recognized(&card_name));
                // Sin borrows activos: el callback puede desmontar el widget
                (self.on_card_scanned)(card_name);
            }
            ScanOutcome::NoTarget => {
                log::warn!("❓ [SCANNER] MindAR reportó el centinela de carta desconocida");
                self.fail(
                    messages::NO_TARGET.to_string(),
                    messages::RECOGNITION_TOAST_TITLE,
                    messages::NO_TARGET_TOAST,
                    self.timings.toast_ms,
                );
            }
            ScanOutcome::Unrecognized(value) => {
                log::warn!("❓ [SCANNER] Nombre de carta no reconocido: {:?}", value);
                self.fail(
                    messages::unrecognized(&value),
                    messages::RECOGNITION_TOAST_TITLE,
                    &messages::unrecognized_toast(&value),
                    self.timings.toast_ms,
                );
            }
        }
    }

    /// Estado Error + panel inline + toast
    fn fail(&self, text: String, toast_title: &str, toast_description: &str, toast_ms: u32) {
        self.state.scanner.set(ScannerState::Error(text.clone()));
        self.state.set_status(StatusKind::Error, text);
        self.notifier.error(toast_title, toast_description, toast_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KnownCardSet;
    use crate::services::message_listener::testing::{BrokenSource, ChannelSource};
    use crate::services::scheduler::testing::ManualScheduler;
    use crate::viewmodels::OriginPolicy;
    use serde_json::json;

    const ORIGIN: &str = "https://cards.example";

    struct Harness {
        scheduler: Rc<ManualScheduler>,
        source: Rc<ChannelSource>,
        state: WidgetState,
        scanned: Rc<RefCell<Vec<String>>>,
        controller: ScannerController,
    }

    fn harness() -> Harness {
        let scheduler = ManualScheduler::new();
        let source = ChannelSource::new();
        let state = WidgetState::new();
        let notifier = Notifier::new(state.clone(), scheduler.clone());
        let relay = MessageRelay::new(KnownCardSet::default(), OriginPolicy::strict([ORIGIN]));
        let scanned = Rc::new(RefCell::new(Vec::new()));
        let callback: CardCallback = {
            let scanned = scanned.clone();
            Rc::new(move |name: String| scanned.borrow_mut().push(name))
        };
        let controller = ScannerController::new(
            state.clone(),
            notifier,
            relay,
            scheduler.clone(),
            &ScannerConfig::default(),
            callback,
        );
        Harness { scheduler, source, state, scanned, controller }
    }

    impl Harness {
        fn activate(&self) {
            self.controller.activate(&*self.source);
        }

        fn post(&self, data: serde_json::Value) {
            self.source.post(ORIGIN, data);
        }
    }

    #[test]
    fn activation_enters_loading_with_listener_and_watchdog() {
        let h = harness();
        h.activate();
        assert_eq!(h.state.scanner(), ScannerState::Loading);
        assert!(h.controller.is_active());
        assert!(h.controller.watchdog_armed());
        assert_eq!(h.source.listener_count(), 1);
    }

    #[test]
    fn ready_then_success_invokes_callback_once() {
        let h = harness();
        h.activate();
        h.post(json!({ "type": "mindarReady" }));
        assert_eq!(h.state.scanner(), ScannerState::Ready);
        assert!(!h.controller.watchdog_armed());

        h.post(json!({ "type": "mindarScanSuccess", "cardName": "重型作業機" }));
        assert_eq!(h.state.scanner(), ScannerState::Success("重型作業機".into()));
        assert_eq!(*h.scanned.borrow(), vec!["重型作業機".to_string()]);
    }

    #[test]
    fn duplicate_success_does_not_repeat_callback() {
        let h = harness();
        h.activate();
        let success = json!({ "type": "mindarScanSuccess", "cardName": "簡訊回覆機" });
        h.post(success.clone());
        h.post(success);
        assert_eq!(h.scanned.borrow().len(), 1);
    }

    #[test]
    fn duplicate_ready_is_idempotent() {
        let h = harness();
        h.activate();
        h.post(json!({ "type": "mindarReady" }));
        h.post(json!({ "type": "mindarReady" }));
        assert_eq!(h.state.scanner(), ScannerState::Ready);
    }

    #[test]
    fn scanner_error_from_ready_surfaces_text_and_toast() {
        let h = harness();
        h.activate();
        h.post(json!({ "type": "mindarReady" }));
        h.post(json!({ "type": "mindarError", "message": "WebGL context lost" }));
        assert_eq!(
            h.state.scanner(),
            ScannerState::Error("AR 掃描器錯誤：WebGL context lost".into())
        );
        assert_eq!(h.state.status().map(|s| s.kind), Some(StatusKind::Error));
        assert!(h.state.toasts.with(|t| t.iter().any(|t| t.description == "WebGL context lost")));
    }

    #[test]
    fn scanner_error_without_message_uses_fallback() {
        let h = harness();
        h.activate();
        h.post(json!({ "type": "mindarError" }));
        assert_eq!(h.state.scanner(), ScannerState::Error("AR 掃描器錯誤：未知錯誤".into()));
        assert!(!h.controller.watchdog_armed());
    }

    #[test]
    fn unrecognized_name_is_a_validation_error() {
        let h = harness();
        h.activate();
        h.post(json!({ "type": "mindarScanSuccess", "cardName": "火箭發射機" }));
        match h.state.scanner() {
            ScannerState::Error(text) => assert!(text.contains("火箭發射機")),
            other => panic!("estado inesperado: {:?}", other),
        }
        assert!(h.scanned.borrow().is_empty());
    }

    fn has_frame_load_toast(h: &Harness) -> bool {
        h.state
            .toasts
            .with(|t| t.iter().any(|t| t.title == messages::FRAME_LOAD_TOAST_TITLE))
    }

    #[test]
    fn frame_load_failure_errors_from_loading() {
        let h = harness();
        h.activate();
        h.controller.frame_load_failed();
        assert_eq!(h.state.scanner(), ScannerState::Error(messages::FRAME_LOAD_ERROR.into()));
        assert!(has_frame_load_toast(&h));
        assert!(!h.controller.watchdog_armed());
        h.scheduler.advance(20_000);
        assert_eq!(h.state.scanner(), ScannerState::Error(messages::FRAME_LOAD_ERROR.into()));
    }

    #[test]
    fn frame_load_failure_errors_from_ready() {
        let h = harness();
        h.activate();
        h.post(json!({ "type": "mindarReady" }));
        assert_eq!(h.state.scanner(), ScannerState::Ready);

        h.controller.frame_load_failed();
        assert_eq!(h.state.scanner(), ScannerState::Error(messages::FRAME_LOAD_ERROR.into()));
        assert_eq!(h.state.status().map(|s| s.kind), Some(StatusKind::Error));
        assert!(has_frame_load_toast(&h));
        assert!(h.scanned.borrow().is_empty());
    }

    #[test]
    fn frame_load_failure_errors_from_success_without_new_callback() {
        let h = harness();
        h.activate();
        h.post(json!({ "type": "mindarScanSuccess", "cardName": "數據分析機" }));
        assert_eq!(h.state.scanner(), ScannerState::Success("數據分析機".into()));
        assert_eq!(h.scanned.borrow().len(), 1);

        h.controller.frame_load_failed();
        assert_eq!(h.state.scanner(), ScannerState::Error(messages::FRAME_LOAD_ERROR.into()));
        assert!(has_frame_load_toast(&h));
        assert_eq!(h.scanned.borrow().len(), 1);
    }

    #[test]
    fn scanner_error_with_non_text_message_is_not_swallowed() {
        for message in [json!({ "name": "RangeError" }), json!(42)] {
            let h = harness();
            h.activate();
            h.post(json!({ "type": "mindarError", "message": message }));
            assert_eq!(h.state.scanner(), ScannerState::Error("AR 掃描器錯誤：未知錯誤".into()));
            assert!(!h.controller.watchdog_armed());

            // El watchdog no debe reemplazar el diagnóstico con un timeout
            h.scheduler.advance(12_000);
            assert_eq!(h.state.scanner(), ScannerState::Error("AR 掃描器錯誤：未知錯誤".into()));
        }
    }

    #[test]
    fn timeout_text_follows_configured_window() {
        let scheduler = ManualScheduler::new();
        let source = ChannelSource::new();
        let state = WidgetState::new();
        let notifier = Notifier::new(state.clone(), scheduler.clone());
        let config = ScannerConfig {
            ready_timeout_ms: 8_000,
            ..ScannerConfig::default()
        };
        let controller = ScannerController::new(
            state.clone(),
            notifier,
            MessageRelay::new(KnownCardSet::default(), OriginPolicy::strict([ORIGIN])),
            scheduler.clone(),
            &config,
            Rc::new(|_name: String| {}),
        );
        controller.activate(&*source);
        scheduler.advance(8_000);
        assert_eq!(state.scanner(), ScannerState::Error(messages::timeout(8)));
    }

    #[test]
    fn frame_load_failure_without_activation_is_ignored() {
        let h = harness();
        h.controller.frame_load_failed();
        assert_eq!(h.state.scanner(), ScannerState::Loading);
        assert!(h.state.toasts.with(|t| t.is_empty()));
    }

    #[test]
    fn watchdog_does_not_fire_after_any_message() {
        for first in [
            json!({ "type": "mindarReady" }),
            json!({ "type": "mindarScanSuccess", "cardName": "秘密偵察機" }),
            json!({ "type": "mindarError", "message": "x" }),
        ] {
            let h = harness();
            h.activate();
            h.post(first);
            let before = h.state.scanner();
            h.scheduler.advance(12_000);
            assert_eq!(h.state.scanner(), before);
            assert!(!h.state.status().map_or(false, |s| s.text.contains("超時")));
        }
    }

    #[test]
    fn reactivation_replaces_listener_and_watchdog() {
        let h = harness();
        h.activate();
        h.scheduler.advance(6_000);
        h.activate();
        assert_eq!(h.source.listener_count(), 1);
        assert_eq!(h.controller.activations(), 2);

        // El watchdog de la primera activación ya no existe
        h.scheduler.advance(6_000);
        assert_eq!(h.state.scanner(), ScannerState::Loading);
        h.scheduler.advance(6_000);
        assert!(matches!(h.state.scanner(), ScannerState::Error(_)));
    }

    #[test]
    fn no_transition_after_teardown() {
        let h = harness();
        h.activate();
        h.controller.teardown();
        h.controller.teardown();
        assert!(!h.controller.is_active());
        assert_eq!(h.source.listener_count(), 0);
        assert_eq!(h.scheduler.pending(), 0);

        h.post(json!({ "type": "mindarScanSuccess", "cardName": "社交模擬機" }));
        h.scheduler.advance(30_000);
        assert_eq!(h.state.scanner(), ScannerState::Loading);
        assert!(h.scanned.borrow().is_empty());
    }

    #[test]
    fn drop_tears_down() {
        let h = harness();
        h.activate();
        let Harness { scheduler, source, controller, .. } = h;
        drop(controller);
        assert_eq!(source.listener_count(), 0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn broken_listener_surfaces_error_without_watchdog() {
        let h = harness();
        h.controller.activate(&BrokenSource);
        assert!(matches!(h.state.scanner(), ScannerState::Error(_)));
        assert!(!h.controller.is_active());
        // Solo queda el timer de auto-cierre del toast
        assert_eq!(h.scheduler.pending(), 1);
    }

    #[test]
    fn callback_may_tear_down_the_controller() {
        let scheduler = ManualScheduler::new();
        let source = ChannelSource::new();
        let state = WidgetState::new();
        let notifier = Notifier::new(state.clone(), scheduler.clone());
        let relay = MessageRelay::new(KnownCardSet::default(), OriginPolicy::Permissive);
        let slot: Rc<RefCell<Option<ScannerController>>> = Rc::new(RefCell::new(None));
        let callback: CardCallback = {
            let slot = slot.clone();
            Rc::new(move |_name: String| {
                if let Some(controller) = slot.borrow().as_ref() {
                    controller.teardown();
                }
            })
        };
        let controller = ScannerController::new(
            state.clone(),
            notifier,
            relay,
            scheduler.clone(),
            &ScannerConfig::default(),
            callback,
        );
        controller.activate(&*source);
        *slot.borrow_mut() = Some(controller);

        source.post("https://any.example", json!({ "type": "mindarScanSuccess", "cardName": "社交模擬機" }));
        assert_eq!(state.scanner(), ScannerState::Success("社交模擬機".into()));
        assert_eq!(source.listener_count(), 0);
    }
}
