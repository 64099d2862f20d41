use rust_decimal::Decimal;
use std::sync::Arc;

use crate::fx::FxService;
use crate::utils::fixed_point::{decimal_to_minor_units, decimal_to_quantity};

use super::conversion_errors::{ConversionError, Result};
use super::conversion_model::{convert_quantity, ConvertedValue, PhysicalUnit};

/// Dual-layer conversion resolver: the deterministic unit layer composed
/// with the cached currency layer. Unit conversion is applied first, then
/// currency conversion; the result carries both the normalized storage
/// integer and the exact display value.
pub struct ConversionService {
    fx: Arc<FxService>,
}

impl ConversionService {
    /// Creates a new ConversionService instance
    pub fn new(fx: Arc<FxService>) -> Self {
        Self { fx }
    }

    pub fn convert_unit(
        &self,
        quantity: Decimal,
        from: PhysicalUnit,
        to: PhysicalUnit,
    ) -> Result<Decimal> {
        convert_quantity(quantity, from, to)
    }

    pub async fn convert_currency(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Decimal> {
        Ok(self.fx.convert(amount, from_currency, to_currency).await?)
    }

    /// Converts a magnitude from (source unit, source currency) to (target
    /// unit, target currency). Round trips return the original value within
    /// one smallest storage step.
    pub async fn convert_value(
        &self,
        quantity: Decimal,
        source_unit: PhysicalUnit,
        source_currency: &str,
        target_unit: PhysicalUnit,
        target_currency: &str,
    ) -> Result<ConvertedValue> {
        let unit_converted = convert_quantity(quantity, source_unit, target_unit)?;
        let display_value = self
            .fx
            .convert(unit_converted, source_currency, target_currency)
            .await?;

        // Dimensionless results are stored in the target currency's minor
        // units per its ISO 4217 exponent; physical results in 1/10,000 unit.
        let storage_value = match target_unit {
            PhysicalUnit::Count => decimal_to_minor_units(display_value, target_currency),
            _ => decimal_to_quantity(display_value),
        }
        .ok_or_else(|| {
            ConversionError::OutOfRange(format!(
                "Converted value {} does not fit the storage range",
                display_value
            ))
        })?;

        Ok(ConvertedValue {
            storage_value,
            display_value,
            unit: target_unit,
            currency: target_currency.to_string(),
        })
    }
}
