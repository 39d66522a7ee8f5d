//! Free-text procedure label → KPI category.

use valve_model::KpiCategory;

/// One classification rule: any token, found case-insensitively anywhere in
/// the label, assigns the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub tokens: &'static [&'static str],
    pub category: KpiCategory,
}

impl ClassificationRule {
    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        self.tokens.iter().any(|token| lowered.contains(token))
    }
}

/// Rules in priority order; the first match wins.
///
/// Labels are free text and often name several procedures ("TAVI, TTVI
/// geplant"), so order decides the overlap.
pub const CLASSIFICATION_RULES: [ClassificationRule; 5] = [
    ClassificationRule {
        tokens: &["tavi"],
        category: KpiCategory::Tavi,
    },
    ClassificationRule {
        tokens: &["edge-to-edge mk", "tmvi", "mteer"],
        category: KpiCategory::Mteer,
    },
    ClassificationRule {
        tokens: &["edge-to-edge tk", "htp tk", "tteer"],
        category: KpiCategory::Tteer,
    },
    ClassificationRule {
        tokens: &["ttvi"],
        category: KpiCategory::Ttvi,
    },
    ClassificationRule {
        tokens: &["tricvalve", "ttvr"],
        category: KpiCategory::Ttvr,
    },
];

/// Category of a procedure label; absent or unmatched labels are
/// [`KpiCategory::Other`].
pub fn classify(label: Option<&str>) -> KpiCategory {
    let Some(label) = label else {
        return KpiCategory::Other;
    };
    let lowered = label.to_lowercase();
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map_or(KpiCategory::Other, |rule| rule.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_each_rule() {
        assert_eq!(classify(Some("TAVI transfemoral")), KpiCategory::Tavi);
        assert_eq!(classify(Some("Edge-to-Edge MK (PASCAL)")), KpiCategory::Mteer);
        assert_eq!(classify(Some("TMVI")), KpiCategory::Mteer);
        assert_eq!(classify(Some("HTP TK")), KpiCategory::Tteer);
        assert_eq!(classify(Some("tteer")), KpiCategory::Tteer);
        assert_eq!(classify(Some("TTVI Evoque")), KpiCategory::Ttvi);
        assert_eq!(classify(Some("TricValve")), KpiCategory::Ttvr);
    }

    #[test]
    fn unmatched_and_absent_labels_are_other() {
        assert_eq!(classify(None), KpiCategory::Other);
        assert_eq!(classify(Some("")), KpiCategory::Other);
        assert_eq!(classify(Some("Herzkatheter")), KpiCategory::Other);
        // Token must appear verbatim.
        assert_eq!(classify(Some("edge to edge MK")), KpiCategory::Other);
    }

    #[test]
    fn earlier_rule_wins_on_overlap() {
        assert_eq!(classify(Some("TAVI + TTVI")), KpiCategory::Tavi);
        assert_eq!(classify(Some("MTEER und TTEER")), KpiCategory::Mteer);
    }
}
