// ABOUTME: Nutrition computation engine deriving totals from a quantity/unit pair
// ABOUTME: Applies the per-piece vs per-100-units multiplier policy to canonical foods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

//! Nutrition computation.
//!
//! A canonical food's nutrient values are defined per reference serving:
//! 100 base units for weighed foods, one piece for counted foods. The
//! multiplier policy is unit-driven at computation time; the display name
//! only drives the countability verdict and the advisory message. A counted
//! food measured in grams deliberately still receives the `/100` treatment:
//! callers steer the user toward the `piece` unit instead of the engine
//! second-guessing the quantity.

use crate::countable::is_counted;
use crate::models::{nutrient_ids, CanonicalFood, ComputedNutrition, Unit};

/// Read a nutrient value from a canonical food by stable nutrient id
///
/// A missing nutrient id yields 0; canonical records never synthesize zeros
/// themselves, so zero-filling happens here at consumption time.
#[must_use]
pub fn nutrient_value(food: &CanonicalFood, nutrient_id: u32) -> f64 {
    food.nutrients
        .iter()
        .find(|n| n.nutrient_id == nutrient_id)
        .map_or(0.0, |n| n.value)
}

/// Derive the scaling multiplier for a quantity of a food
///
/// Counted food + `piece` unit: the reference serving is already one piece,
/// so the multiplier is the quantity itself. Every other combination scales
/// against the per-100-units reference serving.
#[must_use]
pub fn compute_multiplier(food: &CanonicalFood, quantity: f64, unit: Unit) -> f64 {
    if unit == Unit::Piece && is_counted(&food.display_name) {
        return quantity;
    }
    quantity / 100.0
}

/// Compute macronutrient totals for a quantity of a food
#[must_use]
pub fn compute_nutrition(food: &CanonicalFood, quantity: f64, unit: Unit) -> ComputedNutrition {
    compute(food, quantity, unit, false)
}

/// Compute macronutrient totals plus advisory micronutrients
///
/// Fiber, calcium, and iron are included only when the record carries the
/// measurement; they stay `None` otherwise.
#[must_use]
pub fn compute_nutrition_detailed(
    food: &CanonicalFood,
    quantity: f64,
    unit: Unit,
) -> ComputedNutrition {
    compute(food, quantity, unit, true)
}

fn compute(food: &CanonicalFood, quantity: f64, unit: Unit, with_micros: bool) -> ComputedNutrition {
    let multiplier = compute_multiplier(food, quantity, unit);

    let micro = |id: u32| {
        if !with_micros {
            return None;
        }
        food.nutrients
            .iter()
            .find(|n| n.nutrient_id == id)
            .map(|n| n.value * multiplier)
    };

    ComputedNutrition {
        calories: nutrient_value(food, nutrient_ids::ENERGY) * multiplier,
        protein: nutrient_value(food, nutrient_ids::PROTEIN) * multiplier,
        carbs: nutrient_value(food, nutrient_ids::CARBS) * multiplier,
        fat: nutrient_value(food, nutrient_ids::FAT) * multiplier,
        fiber: micro(nutrient_ids::FIBER),
        calcium: micro(nutrient_ids::CALCIUM),
        iron: micro(nutrient_ids::IRON),
    }
}

/// Advisory message for a counted food about to be logged by weight
///
/// The engine never corrects the unit itself; callers show this tip and let
/// the user switch to `piece`.
#[must_use]
pub fn unit_advisory(food: &CanonicalFood, unit: Unit) -> Option<String> {
    if unit != Unit::Piece && is_counted(&food.display_name) {
        return Some(format!(
            "{} is typically counted by piece rather than weighed. Switch to \"piece\" for more accurate tracking.",
            food.display_name
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NutrientMeasurement, Provenance};

    fn measurement(id: u32, unit: &str, value: f64) -> NutrientMeasurement {
        NutrientMeasurement {
            nutrient_id: id,
            name: String::new(),
            nutrient_number: String::new(),
            unit_name: unit.to_owned(),
            value,
        }
    }

    fn roti() -> CanonicalFood {
        CanonicalFood {
            id: "regional-42".to_owned(),
            display_name: "Roti".to_owned(),
            nutrients: vec![
                measurement(nutrient_ids::ENERGY, "kcal", 120.0),
                measurement(nutrient_ids::PROTEIN, "g", 3.0),
                measurement(nutrient_ids::CARBS, "g", 20.0),
                measurement(nutrient_ids::FAT, "g", 2.0),
            ],
            source_group: Some("Cereals".to_owned()),
            provenance: Provenance::Regional,
        }
    }

    #[test]
    fn test_counted_food_piece_multiplier_is_quantity() {
        let food = roti();
        assert!((compute_multiplier(&food, 2.0, Unit::Piece) - 2.0).abs() < f64::EPSILON);
        assert!((compute_multiplier(&food, 0.0, Unit::Piece)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_counted_food_in_grams_still_divides_by_100() {
        // Deliberate policy: the unit, not the name, selects the multiplier.
        let food = roti();
        assert!((compute_multiplier(&food, 50.0, Unit::G) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_uncounted_food_piece_unit_divides_by_100() {
        let mut food = roti();
        food.display_name = "Basmati rice".to_owned();
        assert!((compute_multiplier(&food, 2.0, Unit::Piece) - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roti_two_pieces() {
        let food = roti();
        let n = compute_nutrition(&food, 2.0, Unit::Piece);
        assert!((n.calories - 240.0).abs() < f64::EPSILON);
        assert!((n.protein - 6.0).abs() < f64::EPSILON);
        assert!((n.carbs - 40.0).abs() < f64::EPSILON);
        assert!((n.fat - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roti_fifty_grams() {
        let food = roti();
        let n = compute_nutrition(&food, 50.0, Unit::G);
        assert!((n.calories - 60.0).abs() < f64::EPSILON);
        assert!((n.protein - 1.5).abs() < f64::EPSILON);
        assert!((n.carbs - 10.0).abs() < f64::EPSILON);
        assert!((n.fat - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_nutrient_yields_zero() {
        let mut food = roti();
        food.nutrients.retain(|n| n.nutrient_id != nutrient_ids::FAT);
        let n = compute_nutrition(&food, 100.0, Unit::G);
        assert!(n.fat.abs() < f64::EPSILON);
        assert!((n.calories - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_micros_absent_unless_detailed_and_present() {
        let mut food = roti();
        let plain = compute_nutrition(&food, 100.0, Unit::G);
        assert!(plain.fiber.is_none());

        // Detailed but no fiber measurement in the record: still None.
        let detailed = compute_nutrition_detailed(&food, 100.0, Unit::G);
        assert!(detailed.fiber.is_none());

        food.nutrients
            .push(measurement(nutrient_ids::FIBER, "g", 4.0));
        let detailed = compute_nutrition_detailed(&food, 50.0, Unit::G);
        assert!((detailed.fiber.unwrap() - 2.0).abs() < f64::EPSILON);
        assert!(detailed.calcium.is_none());
    }

    #[test]
    fn test_unit_advisory_for_counted_food_in_grams() {
        let food = roti();
        assert!(unit_advisory(&food, Unit::G).is_some());
        assert!(unit_advisory(&food, Unit::Piece).is_none());
    }

    #[test]
    fn test_no_advisory_for_weighed_food() {
        let mut food = roti();
        food.display_name = "Basmati rice".to_owned();
        assert!(unit_advisory(&food, Unit::G).is_none());
    }
}
