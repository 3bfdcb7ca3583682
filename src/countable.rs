// ABOUTME: Heuristic classifier for foods counted in pieces rather than weighed
// ABOUTME: Keyword containment check against a fixed list of piece-denominated foods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

//! Countability classification.
//!
//! Breads and similar items are conventionally logged as "2 rotis", not
//! "90 g of roti"; their nutrient reference serving is one piece. This is a
//! name heuristic, not a food-science classification, so false positives and
//! negatives are accepted.

/// Food name keywords that are typically counted as pieces rather than weighed
pub const COUNTABLE_KEYWORDS: &[&str] = &[
    "chapati", "roti", "naan", "bread", "slice", "roll", "bun", "muffin", "bagel", "waffle",
    "pancake", "dosa", "idli", "cookie", "biscuit", "cracker", "puri", "paratha", "tortilla",
    "piece", "serving", "egg",
];

/// Whether a food should be counted in pieces rather than weighed
///
/// Lower-cases the display name and tests substring containment of each
/// keyword, so "Wheat Bread, toasted" and "Eggplant" both classify as
/// counted. Total: absence of any keyword yields `false`.
#[must_use]
pub fn is_counted(display_name: &str) -> bool {
    let lower = display_name.to_lowercase();
    COUNTABLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counted_breads() {
        assert!(is_counted("Roti"));
        assert!(is_counted("Chapati, whole wheat"));
        assert!(is_counted("Plain Dosa"));
        assert!(is_counted("Blueberry Muffin"));
    }

    #[test]
    fn test_counted_is_case_insensitive() {
        assert!(is_counted("NAAN"));
        assert!(is_counted("Boiled EGG"));
    }

    #[test]
    fn test_weighed_foods() {
        assert!(!is_counted("Chicken, breast, meat only, cooked, roasted"));
        assert!(!is_counted("Basmati rice"));
        assert!(!is_counted(""));
    }

    #[test]
    fn test_substring_containment_not_whole_word() {
        // Accepted heuristic behavior: "egg" matches inside "Eggplant".
        assert!(is_counted("Eggplant, raw"));
        // "serving" as part of a longer phrase still matches.
        assert!(is_counted("Mixed vegetables, 1 serving tray"));
    }
}
