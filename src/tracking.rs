// ABOUTME: Commit boundary turning a selected food and quantity into a log entry
// ABOUTME: Validates user input before the computation engine is invoked
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

//! Log-entry construction.
//!
//! The persistence layer is an external collaborator; this module only
//! builds the [`FoodLogEntry`] payload it receives. User-input validation
//! lives here, in front of the computation engine: the engine itself never
//! clamps or rejects quantities.

use crate::compute::compute_nutrition;
use crate::errors::{AppError, AppResult};
use crate::models::{CanonicalFood, FoodLogEntry, MealType, QuantitySpec};
use chrono::NaiveDate;

/// Validate a user-entered quantity
///
/// # Errors
///
/// Returns an error for non-finite or negative quantities
pub fn validate_quantity(quantity: f64) -> AppResult<()> {
    if !quantity.is_finite() {
        return Err(AppError::invalid_input("Quantity must be a number"));
    }
    if quantity < 0.0 {
        return Err(AppError::invalid_input("Quantity cannot be negative"));
    }
    Ok(())
}

/// Build a food log entry from the user's selection and quantity
///
/// Nutrition totals are computed and snapshotted into the entry; the
/// persistence layer stores them alongside the quantity/unit pair that
/// produced them.
///
/// # Errors
///
/// Returns `MissingRequiredField` when no food is selected and
/// `InvalidInput` for a non-finite or negative quantity
pub fn build_log_entry(
    food: Option<&CanonicalFood>,
    spec: QuantitySpec,
    meal_type: MealType,
    date: NaiveDate,
    user_id: i64,
) -> AppResult<FoodLogEntry> {
    let food = food.ok_or_else(|| {
        AppError::missing_field("No food selected. Search and select a food item first.")
    })?;
    validate_quantity(spec.quantity)?;

    let nutrition = compute_nutrition(food, spec.quantity, spec.unit);

    Ok(FoodLogEntry {
        user_id,
        food_name: food.display_name.clone(),
        food_id: Some(food.id.clone()),
        quantity: spec.quantity,
        unit: spec.unit,
        calories: nutrition.calories,
        protein: nutrition.protein,
        carbs: nutrition.carbs,
        fat: nutrition.fat,
        meal_type,
        date,
    })
}
