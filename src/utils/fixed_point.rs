//! Fixed-point helpers for money and physical quantities.
//!
//! Money is carried as `i64` minor currency units. Physical quantities are
//! carried as `i64` in 1/10,000 of a unit, so 2 taels of gold is 20,000 and
//! 1.5 shares is 15,000. Unit prices are minor currency units per whole
//! physical unit.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Smallest representable fraction of a physical unit: 1/10,000
pub const QUANTITY_SCALE: i64 = 10_000;

/// Cost of `quantity` (scaled) at `unit_price` (minor units per whole unit),
/// rounded half-up to the nearest minor currency unit.
pub fn cost_of(quantity: i64, unit_price: i64) -> i64 {
    let product = quantity as i128 * unit_price as i128;
    let scale = QUANTITY_SCALE as i128;
    let rounded = if product >= 0 {
        (product + scale / 2) / scale
    } else {
        (product - scale / 2) / scale
    };
    rounded as i64
}

/// Scaled quantity as a `Decimal` in whole physical units
pub fn quantity_to_decimal(quantity: i64) -> Decimal {
    Decimal::from(quantity) / Decimal::from(QUANTITY_SCALE)
}

/// Converts a `Decimal` number of whole physical units to the scaled `i64`
/// representation, rounding half-up at the smallest representable step.
pub fn decimal_to_quantity(value: Decimal) -> Option<i64> {
    let scaled = (value * Decimal::from(QUANTITY_SCALE))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    scaled.to_i64()
}

/// ISO 4217 minor-unit exponent for a currency code: how many decimal
/// digits one major unit carries. Zero- and three-decimal currencies are
/// listed explicitly; everything else uses two.
pub fn currency_exponent(currency: &str) -> u32 {
    match currency {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF"
        | "UGX" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

/// Converts a major-unit monetary amount to that currency's minor units,
/// rounding half-up. 100 USD becomes 10,000 cents; 100 VND stays 100.
pub fn decimal_to_minor_units(value: Decimal, currency: &str) -> Option<i64> {
    let scale = Decimal::from(10i64.pow(currency_exponent(currency)));
    (value * scale)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Minor units back to a major-unit `Decimal` for the same currency
pub fn minor_units_to_decimal(minor: i64, currency: &str) -> Decimal {
    Decimal::from(minor) / Decimal::from(10i64.pow(currency_exponent(currency)))
}
