use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::conversion_errors::{ConversionError, Result};

/// Physical units a commodity quantity can be expressed in. `Count` covers
/// dimensionless instruments (shares, fund units) and plain monetary
/// amounts; the mass units cover commodities like gold quoted per tael or
/// troy ounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhysicalUnit {
    Count,
    Gram,
    Kilogram,
    Tael,
    TroyOunce,
}

impl PhysicalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicalUnit::Count => "COUNT",
            PhysicalUnit::Gram => "GRAM",
            PhysicalUnit::Kilogram => "KILOGRAM",
            PhysicalUnit::Tael => "TAEL",
            PhysicalUnit::TroyOunce => "TROY_OUNCE",
        }
    }

    /// Fixed multiplicative factor to grams; `None` for dimensionless units.
    /// 1 tael = 37.5 g, 1 troy ounce = 31.1034768 g.
    pub fn grams_per_unit(&self) -> Option<Decimal> {
        match self {
            PhysicalUnit::Count => None,
            PhysicalUnit::Gram => Some(Decimal::ONE),
            PhysicalUnit::Kilogram => Some(dec!(1000)),
            PhysicalUnit::Tael => Some(dec!(37.5)),
            PhysicalUnit::TroyOunce => Some(dec!(31.1034768)),
        }
    }
}

impl FromStr for PhysicalUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "COUNT" => Ok(PhysicalUnit::Count),
            "GRAM" => Ok(PhysicalUnit::Gram),
            "KILOGRAM" => Ok(PhysicalUnit::Kilogram),
            "TAEL" => Ok(PhysicalUnit::Tael),
            "TROY_OUNCE" => Ok(PhysicalUnit::TroyOunce),
            other => Err(format!("Unknown physical unit: {}", other)),
        }
    }
}

/// Converts a magnitude between physical units. Purely deterministic, no
/// external calls. Mass units convert through grams; dimensionless
/// magnitudes pass through unchanged; mixing the two is an error.
pub fn convert_quantity(quantity: Decimal, from: PhysicalUnit, to: PhysicalUnit) -> Result<Decimal> {
    if from == to {
        return Ok(quantity);
    }

    match (from.grams_per_unit(), to.grams_per_unit()) {
        (Some(from_grams), Some(to_grams)) => Ok(quantity * from_grams / to_grams),
        _ => Err(ConversionError::IncompatibleUnits {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        }),
    }
}

/// The two representations a conversion produces: the exact display value in
/// major units, and the normalized integer used for storage (1/10,000 of a
/// physical unit, or the target currency's minor units per its ISO 4217
/// exponent for dimensionless results).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedValue {
    pub storage_value: i64,
    pub display_value: Decimal,
    pub unit: PhysicalUnit,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taels_to_grams_and_back() {
        let grams = convert_quantity(dec!(2), PhysicalUnit::Tael, PhysicalUnit::Gram).unwrap();
        assert_eq!(grams, dec!(75));

        let taels = convert_quantity(grams, PhysicalUnit::Gram, PhysicalUnit::Tael).unwrap();
        assert_eq!(taels, dec!(2));
    }

    #[test]
    fn troy_ounce_factor() {
        let grams =
            convert_quantity(dec!(1), PhysicalUnit::TroyOunce, PhysicalUnit::Gram).unwrap();
        assert_eq!(grams, dec!(31.1034768));
    }

    #[test]
    fn count_does_not_mix_with_mass() {
        let err = convert_quantity(dec!(1), PhysicalUnit::Count, PhysicalUnit::Gram).unwrap_err();
        assert!(matches!(err, ConversionError::IncompatibleUnits { .. }));
    }

    #[test]
    fn same_unit_is_identity() {
        assert_eq!(
            convert_quantity(dec!(3.14), PhysicalUnit::Count, PhysicalUnit::Count).unwrap(),
            dec!(3.14)
        );
    }
}
