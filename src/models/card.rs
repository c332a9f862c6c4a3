// ============================================================================
// CARD MODEL - Conjunto de cartas conocidas por el scanner AR
// ============================================================================
// Debe mantenerse idéntico a `cardNamesInMindAR` en public/mindar/index.html.
// Ningún lado lo verifica: es un contrato por convención.
// ============================================================================

/// Valor que MindAR envía cuando el target no corresponde a ninguna carta
pub const UNKNOWN_CARD_SENTINEL: &str = "未知卡片";

/// Nombres de cartas compilados en targets.mind (mismo orden que los targets)
pub const KNOWN_CARD_NAMES: [&str; 5] = [
    "社交模擬機",
    "重型作業機",
    "秘密偵察機",
    "數據分析機",
    "簡訊回覆機",
];

/// Resultado de validar un nombre candidato recibido del iframe
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Nombre exacto dentro del conjunto conocido
    Recognized(String),
    /// MindAR reportó el centinela "未知卡片"
    NoTarget,
    /// Cualquier otro valor
    Unrecognized(String),
}

/// Lista inmutable y ordenada de cartas reconocidas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnownCardSet {
    names: &'static [&'static str],
}

impl KnownCardSet {
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    /// Búsqueda por coincidencia exacta (sin trim ni normalización)
    pub fn lookup(&self, candidate: &str) -> Option<&'static str> {
        self.names.iter().copied().find(|name| *name == candidate)
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.lookup(candidate).is_some()
    }

    pub fn classify(&self, candidate: &str) -> ScanOutcome {
        match self.lookup(candidate) {
            Some(name) => ScanOutcome::Recognized(name.to_string()),
            None if candidate == UNKNOWN_CARD_SENTINEL => ScanOutcome::NoTarget,
            None => ScanOutcome::Unrecognized(candidate.to_string()),
        }
    }
}

impl Default for KnownCardSet {
    fn default() -> Self {
        Self::new(&KNOWN_CARD_NAMES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_name_is_recognized_verbatim() {
        let cards = KnownCardSet::default();
        for name in KNOWN_CARD_NAMES {
            assert_eq!(cards.classify(name), ScanOutcome::Recognized(name.to_string()));
        }
    }

    #[test]
    fn sentinel_is_not_a_card() {
        let cards = KnownCardSet::default();
        assert!(!cards.contains(UNKNOWN_CARD_SENTINEL));
        assert_eq!(cards.classify(UNKNOWN_CARD_SENTINEL), ScanOutcome::NoTarget);
    }

    #[test]
    fn lookup_is_exact_match_only() {
        let cards = KnownCardSet::default();
        assert_eq!(cards.classify(" 社交模擬機"), ScanOutcome::Unrecognized(" 社交模擬機".into()));
        assert_eq!(cards.classify("社交模擬"), ScanOutcome::Unrecognized("社交模擬".into()));
        assert_eq!(cards.classify(""), ScanOutcome::Unrecognized(String::new()));
    }
}
