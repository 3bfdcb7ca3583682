// ABOUTME: Barcode resolution adapter mapping scanned codes to canonical foods
// ABOUTME: Distinguishes a not-found outcome from transport-level resolution errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calorie Tracker contributors

//! Barcode resolution.
//!
//! The camera and symbol decoding are external; this adapter receives the
//! decoded barcode string, resolves it to one product record through a
//! [`BarcodeLookup`], and normalizes it into the same canonical shape as
//! free-text results. An unknown product is an outcome, not an error, so
//! callers can direct the user to manual search instead of showing a
//! generic failure.

use crate::errors::{AppError, AppResult};
use crate::models::{CanonicalFood, Provenance};
use crate::normalizer::normalize_fdc;
use crate::sources::BarcodeLookup;
use tracing::debug;

/// User-facing copy for an unknown product
pub const NOT_FOUND_MESSAGE: &str =
    "We couldn't find this product in our database. Try searching by name instead.";

/// Outcome of resolving a scanned barcode
#[derive(Debug, Clone, PartialEq)]
pub enum BarcodeResolution {
    /// The provider knows this product
    Found(CanonicalFood),
    /// The provider does not carry this product; see [`NOT_FOUND_MESSAGE`]
    NotFound,
}

/// Resolve a decoded barcode string to a canonical food
///
/// # Errors
///
/// Returns an error for an empty code or any transport-level failure
/// (non-2xx other than not-found, network failure, malformed payload).
/// A provider "not found" is `Ok(BarcodeResolution::NotFound)`.
pub async fn resolve_barcode(
    code: &str,
    lookup: &dyn BarcodeLookup,
) -> AppResult<BarcodeResolution> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::invalid_input("Barcode cannot be empty"));
    }

    match lookup.lookup(code).await? {
        Some(record) => {
            debug!(code, fdc_id = %record.fdc_id, "barcode resolved");
            Ok(BarcodeResolution::Found(normalize_fdc(
                &record,
                Provenance::Barcode,
            )))
        }
        None => {
            debug!(code, "barcode unknown to provider");
            Ok(BarcodeResolution::NotFound)
        }
    }
}
