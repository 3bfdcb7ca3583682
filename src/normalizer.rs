// ABOUTME: Normalizes source-specific food records into the canonical representation
// ABOUTME: One pure transform per source variant, dispatched on provenance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

//! Nutrient record normalization.
//!
//! Each food source speaks its own shape: the regional table and custom
//! foods are flat macro rows, FoodData Central returns a raw nutrient list
//! keyed by numeric code. Everything funnels into [`CanonicalFood`] here so
//! the computation engine only ever sees one representation.
//!
//! All transforms are pure. Malformed flat rows degrade gracefully: a
//! missing or non-finite macro field becomes 0 rather than failing the
//! candidate list. Optional micronutrients are appended only when the source
//! carries them; a canonical record never contains synthesized zeros.

use crate::models::{
    nutrient_ids, CanonicalFood, CustomFoodRecord, FdcFoodRecord, NutrientMeasurement, Provenance,
    RegionalFoodRecord,
};

/// Id prefix for regional table rows
pub const REGIONAL_ID_PREFIX: &str = "regional-";
/// Id prefix for custom food rows
pub const CUSTOM_ID_PREFIX: &str = "custom-";

fn macro_value(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn macro_measurements(
    calories: Option<f64>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
) -> Vec<NutrientMeasurement> {
    vec![
        synthesized(nutrient_ids::ENERGY, "Energy", "208", "kcal", macro_value(calories)),
        synthesized(nutrient_ids::PROTEIN, "Protein", "203", "g", macro_value(protein)),
        synthesized(nutrient_ids::CARBS, "Carbohydrates", "205", "g", macro_value(carbs)),
        synthesized(nutrient_ids::FAT, "Total lipid (fat)", "204", "g", macro_value(fat)),
    ]
}

fn synthesized(id: u32, name: &str, number: &str, unit: &str, value: f64) -> NutrientMeasurement {
    NutrientMeasurement {
        nutrient_id: id,
        name: name.to_owned(),
        nutrient_number: number.to_owned(),
        unit_name: unit.to_owned(),
        value,
    }
}

/// Normalize a regional foods table row
///
/// The canonical id is namespaced (`regional-{id}`) so it can never collide
/// with a FoodData Central id.
#[must_use]
pub fn normalize_regional(record: &RegionalFoodRecord) -> CanonicalFood {
    let mut nutrients =
        macro_measurements(record.calories, record.protein, record.carbs, record.fat);

    if let Some(fiber) = record.fiber {
        nutrients.push(synthesized(nutrient_ids::FIBER, "Fiber", "291", "g", fiber));
    }
    if let Some(calcium) = record.calcium {
        nutrients.push(synthesized(nutrient_ids::CALCIUM, "Calcium", "301", "mg", calcium));
    }
    if let Some(iron) = record.iron {
        nutrients.push(synthesized(nutrient_ids::IRON, "Iron", "303", "mg", iron));
    }

    CanonicalFood {
        id: format!("{REGIONAL_ID_PREFIX}{}", record.id),
        display_name: record.food_name.clone(),
        nutrients,
        source_group: record.food_group.clone(),
        provenance: Provenance::Regional,
    }
}

/// Normalize a user-defined custom food row
#[must_use]
pub fn normalize_custom(record: &CustomFoodRecord) -> CanonicalFood {
    let mut nutrients =
        macro_measurements(record.calories, record.protein, record.carbs, record.fat);

    if let Some(fiber) = record.fiber {
        nutrients.push(synthesized(nutrient_ids::FIBER, "Fiber", "291", "g", fiber));
    }

    CanonicalFood {
        id: format!("{CUSTOM_ID_PREFIX}{}", record.id),
        display_name: record.food_name.clone(),
        nutrients,
        source_group: record.food_group.clone(),
        provenance: Provenance::Custom,
    }
}

/// Normalize a FoodData Central record
///
/// Used for both free-text international search results
/// (`Provenance::International`) and barcode resolutions
/// (`Provenance::Barcode`). The provider's nutrient list passes through
/// as-is, except duplicate nutrient ids are dropped (first occurrence wins)
/// to uphold the uniqueness invariant. Category is preferred over brand for
/// the source group.
#[must_use]
pub fn normalize_fdc(record: &FdcFoodRecord, provenance: Provenance) -> CanonicalFood {
    let mut seen: Vec<u32> = Vec::with_capacity(record.food_nutrients.len());
    let nutrients = record
        .food_nutrients
        .iter()
        .filter(|n| {
            if seen.contains(&n.nutrient_id) {
                return false;
            }
            seen.push(n.nutrient_id);
            true
        })
        .map(|n| NutrientMeasurement {
            nutrient_id: n.nutrient_id,
            name: n.name.clone(),
            nutrient_number: n.number.clone().unwrap_or_default(),
            unit_name: n.unit_name.clone(),
            value: if n.amount.is_finite() { n.amount } else { 0.0 },
        })
        .collect();

    CanonicalFood {
        id: record.fdc_id.clone(),
        display_name: record.description.clone(),
        nutrients,
        source_group: record
            .food_category
            .clone()
            .or_else(|| record.brand_name.clone()),
        provenance,
    }
}
