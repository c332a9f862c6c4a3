// ============================================================================
// MESSAGE RELAY - Filtra e interpreta los mensajes del iframe MindAR
// ============================================================================
// Orden: origen -> forma del payload -> validación del nombre de carta.
// Nunca falla: lo que no se reconoce se descarta y se registra en el log.
// ============================================================================

use crate::models::{InboundMessage, KnownCardSet, ScannerEvent};
use crate::services::RawMessage;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OriginPolicy {
    /// Acepta cualquier origen (solo para desarrollo)
    Permissive,
    AllowList(Vec<String>),
}

impl OriginPolicy {
    pub fn strict<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed: Vec<String> = Vec::new();
        for origin in origins {
            let origin = normalize_origin(origin.as_ref());
            // "null" es el origen de documentos opacos: nunca se acepta
            if origin.is_empty() || origin == "null" || allowed.contains(&origin) {
                continue;
            }
            allowed.push(origin);
        }
        OriginPolicy::AllowList(allowed)
    }

    pub fn allows(&self, origin: &str) -> bool {
        match self {
            OriginPolicy::Permissive => true,
            OriginPolicy::AllowList(allowed) => {
                let origin = normalize_origin(origin);
                allowed.iter().any(|candidate| *candidate == origin)
            }
        }
    }
}

fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_ascii_lowercase()
}

pub struct MessageRelay {
    cards: KnownCardSet,
    origins: OriginPolicy,
}

impl MessageRelay {
    pub fn new(cards: KnownCardSet, origins: OriginPolicy) -> Self {
        Self { cards, origins }
    }

    pub fn interpret(&self, message: &RawMessage) -> Option<ScannerEvent> {
        if !self.origins.allows(&message.origin) {
            log::warn!("🚫 [RELAY] Mensaje de origen no permitido descartado: {}", message.origin);
            return None;
        }

        let Some(data) = message.data.as_ref() else {
            log::debug!("⏭️ [RELAY] Payload no es un objeto, ignorado");
            return None;
        };

        let Some(parsed) = InboundMessage::from_value(data) else {
            log::debug!("⏭️ [RELAY] Mensaje sin forma conocida, ignorado: {}", data);
            return None;
        };

        log::info!("📨 [RELAY] Mensaje del iframe: {:?}", parsed);
        let event = match parsed {
            InboundMessage::Ready => ScannerEvent::Ready,
            InboundMessage::ScanSuccess { card_name } => ScannerEvent::Scanned(self.cards.classify(&card_name)),
            InboundMessage::Failure { message } => {
                ScannerEvent::Failed(message.filter(|text| !text.trim().is_empty()))
            }
        };
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScanOutcome;
    use serde_json::json;

    const APP: &str = "https://cards.example";

    fn relay() -> MessageRelay {
        MessageRelay::new(KnownCardSet::default(), OriginPolicy::strict([APP]))
    }

    #[test]
    fn maps_known_shapes_to_events() {
        let relay = relay();
        assert_eq!(
            relay.interpret(&RawMessage::new(APP, json!({ "type": "mindarReady" }))),
            Some(ScannerEvent::Ready)
        );
        assert_eq!(
            relay.interpret(&RawMessage::new(APP, json!({ "type": "mindarScanSuccess", "cardName": "數據分析機" }))),
            Some(ScannerEvent::Scanned(ScanOutcome::Recognized("數據分析機".into())))
        );
        assert_eq!(
            relay.interpret(&RawMessage::new(APP, json!({ "type": "mindarScanSuccess", "cardName": "未知卡片" }))),
            Some(ScannerEvent::Scanned(ScanOutcome::NoTarget))
        );
    }

    #[test]
    fn blank_error_text_becomes_none() {
        let relay = relay();
        assert_eq!(
            relay.interpret(&RawMessage::new(APP, json!({ "type": "mindarError", "message": "  " }))),
            Some(ScannerEvent::Failed(None))
        );
        assert_eq!(
            relay.interpret(&RawMessage::new(APP, json!({ "type": "mindarError", "message": "boom" }))),
            Some(ScannerEvent::Failed(Some("boom".into())))
        );
    }

    #[test]
    fn foreign_origins_are_rejected() {
        let relay = relay();
        let ready = json!({ "type": "mindarReady" });
        assert_eq!(relay.interpret(&RawMessage::new("https://evil.example", ready.clone())), None);
        assert_eq!(relay.interpret(&RawMessage::new("null", ready.clone())), None);
        assert_eq!(relay.interpret(&RawMessage::new("https://CARDS.example/", ready)), Some(ScannerEvent::Ready));
    }

    #[test]
    fn permissive_policy_accepts_any_origin() {
        let relay = MessageRelay::new(KnownCardSet::default(), OriginPolicy::Permissive);
        let message = RawMessage::new("https://other.example", json!({ "type": "mindarReady" }));
        assert_eq!(relay.interpret(&message), Some(ScannerEvent::Ready));
    }

    #[test]
    fn non_object_payloads_are_ignored() {
        let relay = relay();
        let message = RawMessage { origin: APP.into(), data: None };
        assert_eq!(relay.interpret(&message), None);
        assert_eq!(relay.interpret(&RawMessage::new(APP, json!({ "type": "webpackWarnings" }))), None);
    }

    #[test]
    fn strict_policy_drops_empty_and_duplicate_origins() {
        let policy = OriginPolicy::strict(["https://a.example/", "", "null", "https://a.example"]);
        assert_eq!(policy, OriginPolicy::AllowList(vec!["https://a.example".into()]));
    }
}
