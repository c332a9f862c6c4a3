// ============================================================================
// INBOUND MESSAGE - Mensajes postMessage del iframe MindAR
// ============================================================================
// El payload no es confiable: se valida la forma con serde antes de
// interpretarlo. Cualquier cosa que no encaje se descarta sin error.
// ============================================================================

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "mindarReady")]
    Ready,
    #[serde(rename = "mindarScanSuccess")]
    ScanSuccess {
        #[serde(rename = "cardName")]
        card_name: String,
    },
    #[serde(rename = "mindarError")]
    Failure {
        #[serde(default, deserialize_with = "text_or_none")]
        message: Option<String>,
    },
}

// `message` es opcional: un número u objeto (p.ej. un Error posteado) cuenta
// como ausente, pero el mensaje sigue siendo un mindarError válido
fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

impl InboundMessage {
    /// Solo objetos con un `type` conocido y payload del tipo correcto
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_the_three_known_shapes() {
        assert_eq!(
            InboundMessage::from_value(&json!({ "type": "mindarReady" })),
            Some(InboundMessage::Ready)
        );
        assert_eq!(
            InboundMessage::from_value(&json!({ "type": "mindarScanSuccess", "cardName": "秘密偵察機" })),
            Some(InboundMessage::ScanSuccess { card_name: "秘密偵察機".into() })
        );
        assert_eq!(
            InboundMessage::from_value(&json!({ "type": "mindarError", "message": "RangeError" })),
            Some(InboundMessage::Failure { message: Some("RangeError".into()) })
        );
        assert_eq!(
            InboundMessage::from_value(&json!({ "type": "mindarError" })),
            Some(InboundMessage::Failure { message: None })
        );
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let value = json!({ "type": "mindarReady", "version": "1.2.5" });
        assert_eq!(InboundMessage::from_value(&value), Some(InboundMessage::Ready));
    }

    #[test]
    fn malformed_input_is_dropped() {
        for value in [
            json!("mindarReady"),
            json!(42),
            json!(null),
            json!([{ "type": "mindarReady" }]),
            json!({}),
            json!({ "type": "webpackOk" }),
            json!({ "type": 7 }),
            json!({ "type": "mindarScanSuccess" }),
            json!({ "type": "mindarScanSuccess", "cardName": 3 }),
        ] {
            assert_eq!(InboundMessage::from_value(&value), None, "{value}");
        }
    }

    #[test]
    fn non_text_error_message_counts_as_absent() {
        for message in [json!({ "nested": true }), json!({ "name": "RangeError" }), json!(42), json!(null), json!(["x"])] {
            let value = json!({ "type": "mindarError", "message": message });
            assert_eq!(
                InboundMessage::from_value(&value),
                Some(InboundMessage::Failure { message: None }),
                "{value}"
            );
        }
    }
}
