//! Heuristic mapping from a free-text description to an equipment category.
//!
//! The catalog often describes a nested choice only in prose ("a martial
//! weapon", "one musical instrument of your choice") without naming the
//! category it draws from. The classifier recovers the category id with an
//! ordered list of substring rules.
//!
//! Rule order is the whole algorithm: the first matching rule wins, so a more
//! specific pattern must come before any pattern it contains. "martial ranged
//! weapon" has to be tested before "ranged weapon", or the general rule would
//! shadow it.

/// Category id the normalizer falls back to when nothing matches.
pub const DEFAULT_CATEGORY_ID: &str = "adventuring-gear";

/// A single substring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    /// Lower-case substring looked for in the normalized description.
    pub pattern: &'static str,
    /// Category id produced when the pattern matches.
    pub category_id: &'static str,
}

const fn rule(pattern: &'static str, category_id: &'static str) -> CategoryRule {
    CategoryRule {
        pattern,
        category_id,
    }
}

/// Built-in rules, most specific first.
pub const STANDARD_RULES: &[CategoryRule] = &[
    // Weapons: family x range before family alone before range alone
    rule("martial melee weapon", "martial-melee-weapons"),
    rule("martial ranged weapon", "martial-ranged-weapons"),
    rule("simple melee weapon", "simple-melee-weapons"),
    rule("simple ranged weapon", "simple-ranged-weapons"),
    rule("martial weapon", "martial-weapons"),
    rule("simple weapon", "simple-weapons"),
    rule("melee weapon", "melee-weapons"),
    rule("ranged weapon", "ranged-weapons"),
    // Armor
    rule("light armor", "light-armor"),
    rule("medium armor", "medium-armor"),
    rule("heavy armor", "heavy-armor"),
    rule("shield", "shields"),
    // Tools
    rule("artisan", "artisans-tools"),
    rule("musical instrument", "musical-instruments"),
    rule("instrument", "musical-instruments"),
    rule("gaming set", "gaming-sets"),
    // Spellcasting foci
    rule("holy symbol", "holy-symbols"),
    rule("arcane focus", "arcane-foci"),
    rule("druidic focus", "druidic-foci"),
    // Everything else a character carries
    rule("equipment pack", "equipment-packs"),
    rule("adventuring gear", "adventuring-gear"),
    rule("gear", "adventuring-gear"),
];

/// Ordered substring classifier.
///
/// Owns its rule table, so tests and callers can run a classifier with a
/// different table without touching process-wide state.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new(STANDARD_RULES.to_vec())
    }
}

impl CategoryClassifier {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Category id for `description`, or `None` if no rule matches.
    ///
    /// Matching is case-insensitive and ignores runs of whitespace.
    pub fn classify(&self, description: &str) -> Option<&'static str> {
        let normalized = description
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        self.rules
            .iter()
            .find(|r| normalized.contains(r.pattern))
            .map(|r| r.category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_weapon_families() {
        let classifier = CategoryClassifier::default();
        assert_eq!(classifier.classify("a martial weapon"), Some("martial-weapons"));
        assert_eq!(classifier.classify("any simple weapon"), Some("simple-weapons"));
        assert_eq!(
            classifier.classify("a simple melee weapon"),
            Some("simple-melee-weapons")
        );
        assert_eq!(classifier.classify("a ranged weapon"), Some("ranged-weapons"));
    }

    #[test]
    fn specific_rule_wins_over_general_rule() {
        let classifier = CategoryClassifier::default();
        assert_eq!(
            classifier.classify("one martial ranged weapon"),
            Some("martial-ranged-weapons")
        );
        assert_eq!(
            classifier.classify("two martial melee weapons"),
            Some("martial-melee-weapons")
        );
    }

    #[test]
    fn no_rule_is_shadowed_by_an_earlier_rule() {
        // A later pattern containing an earlier one could never match first.
        for (i, earlier) in STANDARD_RULES.iter().enumerate() {
            for later in &STANDARD_RULES[i + 1..] {
                assert!(
                    !later.pattern.contains(earlier.pattern),
                    "rule '{}' is shadowed by earlier rule '{}'",
                    later.pattern,
                    earlier.pattern
                );
            }
        }
    }

    #[test]
    fn classifies_armor_tools_and_gear() {
        let classifier = CategoryClassifier::default();
        assert_eq!(classifier.classify("Light Armor"), Some("light-armor"));
        assert_eq!(classifier.classify("heavy armor"), Some("heavy-armor"));
        assert_eq!(classifier.classify("a shield"), Some("shields"));
        assert_eq!(
            classifier.classify("one type of artisan's tools"),
            Some("artisans-tools")
        );
        assert_eq!(
            classifier.classify("three musical instruments of your choice"),
            Some("musical-instruments")
        );
        assert_eq!(classifier.classify("a gaming set"), Some("gaming-sets"));
        assert_eq!(classifier.classify("an arcane focus"), Some("arcane-foci"));
        assert_eq!(
            classifier.classify("adventuring gear"),
            Some("adventuring-gear")
        );
    }

    #[test]
    fn matching_ignores_case_and_spacing() {
        let classifier = CategoryClassifier::default();
        assert_eq!(
            classifier.classify("  MARTIAL \t  Ranged\nWeapon "),
            Some("martial-ranged-weapons")
        );
    }

    #[test]
    fn unrecognized_text_returns_none() {
        let classifier = CategoryClassifier::default();
        assert_eq!(classifier.classify("plain unrecognized text"), None);
        assert_eq!(classifier.classify(""), None);
        assert_eq!(classifier.classify("   "), None);
    }

    #[test]
    fn custom_rule_table() {
        let classifier = CategoryClassifier::new(vec![CategoryRule {
            pattern: "trinket",
            category_id: "trinkets",
        }]);
        assert_eq!(classifier.classify("a trinket"), Some("trinkets"));
        assert_eq!(classifier.classify("a martial weapon"), None);
    }
}
