// ABOUTME: Core data models for canonical foods, nutrients, and log entries
// ABOUTME: Defines CanonicalFood, NutrientMeasurement, Unit, MealType, and source row types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

//! Common data models shared by the normalizer, fan-out, and computation engine.
//!
//! Every food source (regional table, FoodData Central, user custom foods,
//! barcode lookups) is reduced to one canonical representation,
//! [`CanonicalFood`], tagged with its [`Provenance`]. Nutrient identities use
//! the stable FoodData Central numeric codes so the computation engine can
//! read any source's output the same way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable cross-source nutrient codes (FoodData Central ids)
pub mod nutrient_ids {
    /// Energy (kcal)
    pub const ENERGY: u32 = 1008;
    /// Protein (g)
    pub const PROTEIN: u32 = 1003;
    /// Carbohydrate, by difference (g)
    pub const CARBS: u32 = 1005;
    /// Total lipid / fat (g)
    pub const FAT: u32 = 1004;
    /// Fiber, total dietary (g)
    pub const FIBER: u32 = 1079;
    /// Calcium (mg)
    pub const CALCIUM: u32 = 1087;
    /// Iron (mg)
    pub const IRON: u32 = 1089;
}

/// A single nutrient amount per the record's reference serving
///
/// The reference serving is 100 of the record's base unit, except for
/// regional/custom entries that are already denominated per piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientMeasurement {
    /// Stable numeric nutrient code (see [`nutrient_ids`])
    pub nutrient_id: u32,
    /// Nutrient display name (e.g., "Protein", "Energy")
    pub name: String,
    /// FDC nutrient number string (e.g., "203"), empty when unknown
    #[serde(default)]
    pub nutrient_number: String,
    /// Measurement unit (e.g., "g", "kcal", "mg")
    pub unit_name: String,
    /// Amount per reference serving
    pub value: f64,
}

/// Which origin produced a canonical food
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Regional foods table
    Regional,
    /// International nutrition database (FoodData Central)
    International,
    /// User's private custom foods
    Custom,
    /// Resolved from a scanned barcode
    Barcode,
}

/// Normalized, source-agnostic food representation
///
/// Constructed fresh on every query response; never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalFood {
    /// Globally unique id: `regional-{id}` / `custom-{id}` prefixes for table
    /// rows, the provider's native opaque id for international foods
    pub id: String,
    /// Display name shown to the user
    pub display_name: String,
    /// Nutrient measurements; `nutrient_id` values are unique within the set
    pub nutrients: Vec<NutrientMeasurement>,
    /// Food group, category, or brand when the source carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_group: Option<String>,
    /// Origin of this record
    pub provenance: Provenance,
}

/// Unit for a user-entered quantity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Grams
    G,
    /// Milliliters
    Ml,
    /// Ounces
    Oz,
    /// One reference serving
    Serving,
    /// One piece (countable foods)
    Piece,
}

impl Unit {
    /// Parse a unit from user input, defaulting to grams
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ml" => Self::Ml,
            "oz" => Self::Oz,
            "serving" => Self::Serving,
            "piece" => Self::Piece,
            _ => Self::G,
        }
    }

    /// Short label used in log entries and display
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::G => "g",
            Self::Ml => "ml",
            Self::Oz => "oz",
            Self::Serving => "serving",
            Self::Piece => "piece",
        }
    }
}

/// Type of meal a log entry belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// Parse meal type from string, defaulting to snack
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            _ => Self::Snack,
        }
    }
}

/// User-entered quantity/unit pair supplied at commit time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct QuantitySpec {
    /// Quantity, must be finite and >= 0 (validated at the commit boundary)
    pub quantity: f64,
    /// Unit the quantity is expressed in
    pub unit: Unit,
}

/// Derived macronutrient totals for a quantity of a food
///
/// Micronutrients are advisory display-only figures; they are present only
/// when the caller asked for them and the record carries the measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputedNutrition {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Fat (g)
    pub fat: f64,
    /// Fiber (g), advisory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    /// Calcium (mg), advisory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,
    /// Iron (mg), advisory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iron: Option<f64>,
}

/// A row from the regional foods table
///
/// Macro fields are optional so malformed rows survive deserialization; the
/// normalizer substitutes 0 for anything missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalFoodRecord {
    /// Native numeric id in the regional table
    pub id: i64,
    /// Source food code, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_code: Option<String>,
    /// Food name
    pub food_name: String,
    /// Food group (e.g., "Cereals", "Pulses")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_group: Option<String>,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Energy (kcal) per reference serving
    pub calories: Option<f64>,
    /// Protein (g) per reference serving
    pub protein: Option<f64>,
    /// Carbohydrates (g) per reference serving
    pub carbs: Option<f64>,
    /// Fat (g) per reference serving
    pub fat: Option<f64>,
    /// Fiber (g), optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    /// Calcium (mg), optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,
    /// Iron (mg), optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iron: Option<f64>,
}

/// A user-defined custom food row (owned by the excluded storage layer)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFoodRecord {
    /// Native numeric id in the custom foods table
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Food name
    pub food_name: String,
    /// Food group label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_group: Option<String>,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Energy (kcal) per reference serving
    pub calories: Option<f64>,
    /// Protein (g) per reference serving
    pub protein: Option<f64>,
    /// Carbohydrates (g) per reference serving
    pub carbs: Option<f64>,
    /// Fat (g) per reference serving
    pub fat: Option<f64>,
    /// Fiber (g), optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    /// Reference serving size (e.g., 100.0 or 1.0 for piece-denominated foods)
    pub serving_size: f64,
    /// Reference serving unit (e.g., "g", "piece")
    pub serving_unit: String,
}

/// A nutrient entry as returned by FoodData Central
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcNutrient {
    /// FDC nutrient id
    pub nutrient_id: u32,
    /// Nutrient name
    pub name: String,
    /// FDC nutrient number string, when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Measurement unit
    pub unit_name: String,
    /// Amount per 100 base units
    pub amount: f64,
}

/// A food record from FoodData Central (search hit or barcode resolution)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcFoodRecord {
    /// FoodData Central id (opaque to this engine)
    pub fdc_id: String,
    /// Food description
    pub description: String,
    /// Data type (e.g., "Branded", "SR Legacy")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Brand name for branded foods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// Food category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_category: Option<String>,
    /// Raw nutrient entries
    pub food_nutrients: Vec<FdcNutrient>,
}

/// A committed food log entry handed to the persistence layer
///
/// Nutrient totals are snapshotted from the computation engine at commit
/// time; they are never recomputed from the food id afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLogEntry {
    /// Owning user
    pub user_id: i64,
    /// Display name of the logged food
    pub food_name: String,
    /// Canonical food id the entry was derived from, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,
    /// Quantity consumed
    pub quantity: f64,
    /// Unit of the quantity
    pub unit: Unit,
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Fat (g)
    pub fat: f64,
    /// Meal the entry belongs to
    pub meal_type: MealType,
    /// Calendar date the entry is logged against
    pub date: NaiveDate,
}
