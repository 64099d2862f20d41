//! Pure position arithmetic: FIFO lot consumption planning and the
//! aggregate updates for buy/sell/dividend and their reversals.
//!
//! Everything here is integer math on already-loaded state; persistence and
//! sequencing live in the repository and the coordinator.

use serde::{Deserialize, Serialize};

use crate::utils::fixed_point::cost_of;

use super::investments_errors::{InvestmentError, Result};
use super::investments_model::{Investment, Lot};

/// One planned draw against a lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedConsumption {
    pub lot_id: String,
    pub quantity: i64,
    pub unit_cost: i64,
}

/// The outcome of planning a FIFO sale: which lots get drained by how much,
/// and the weighted cost basis of the consumed quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct SalePlan {
    pub consumptions: Vec<PlannedConsumption>,
    pub cost_basis: i64,
}

/// Plans a sale of `sell_quantity` against `lots`, which must be ordered
/// oldest acquisition first. Drains each lot fully before moving to the
/// next. Fails with `InsufficientQuantity` when the open lots cannot cover
/// the request; no partial sells.
pub fn plan_fifo_sale(investment_id: &str, lots: &[Lot], sell_quantity: i64) -> Result<SalePlan> {
    if sell_quantity <= 0 {
        return Err(InvestmentError::InvalidData(
            "Sell quantity must be positive".to_string(),
        ));
    }

    let held: i64 = lots.iter().map(|l| l.remaining_quantity).sum();
    if held < sell_quantity {
        return Err(InvestmentError::InsufficientQuantity {
            investment_id: investment_id.to_string(),
            held,
            requested: sell_quantity,
        });
    }

    let mut remaining = sell_quantity;
    let mut consumptions = Vec::new();
    let mut cost_basis: i64 = 0;

    for lot in lots {
        if remaining == 0 {
            break;
        }
        if lot.remaining_quantity == 0 {
            continue;
        }

        let take = remaining.min(lot.remaining_quantity);
        cost_basis += cost_of(take, lot.unit_cost);
        consumptions.push(PlannedConsumption {
            lot_id: lot.id.clone(),
            quantity: take,
            unit_cost: lot.unit_cost,
        });
        remaining -= take;
    }

    debug_assert_eq!(remaining, 0);
    Ok(SalePlan {
        consumptions,
        cost_basis,
    })
}

/// Recomputes the cost basis of a recorded sale from its consumption trace.
/// Uses the same per-consumption rounding as `plan_fifo_sale`, so a reversal
/// subtracts exactly what the sale added.
pub fn basis_of_consumptions(consumptions: &[PlannedConsumption]) -> i64 {
    consumptions
        .iter()
        .map(|c| cost_of(c.quantity, c.unit_cost))
        .sum()
}

/// The integer aggregates of a position. Average cost is derived from these,
/// never carried incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionTotals {
    pub quantity: i64,
    pub total_cost: i64,
    pub realized_pnl: i64,
    pub total_dividends: i64,
}

impl PositionTotals {
    pub fn of(investment: &Investment) -> Self {
        Self {
            quantity: investment.quantity,
            total_cost: investment.total_cost,
            realized_pnl: investment.realized_pnl,
            total_dividends: investment.total_dividends,
        }
    }

    pub fn average_cost(&self) -> f64 {
        Investment::derive_average_cost(self.quantity, self.total_cost)
    }

    /// Buy: quantity and total cost (fees allocated in) grow
    pub fn after_buy(&self, quantity: i64, cost_with_fees: i64) -> Self {
        Self {
            quantity: self.quantity + quantity,
            total_cost: self.total_cost + cost_with_fees,
            ..*self
        }
    }

    /// Structural inverse of a buy, recomputed from the same integers
    pub fn after_buy_reversal(&self, quantity: i64, cost_with_fees: i64) -> Result<Self> {
        let new_quantity = self.quantity - quantity;
        if new_quantity < 0 {
            return Err(InvestmentError::InvalidData(
                "Buy reversal would drive quantity negative".to_string(),
            ));
        }
        Ok(Self {
            quantity: new_quantity,
            total_cost: self.total_cost - cost_with_fees,
            ..*self
        })
    }

    /// Sell: quantity shrinks by the consumed amount, total cost by its
    /// basis, realized P&L grows by proceeds minus fees minus basis
    pub fn after_sell(&self, quantity: i64, cost_basis: i64, realized_delta: i64) -> Result<Self> {
        let new_quantity = self.quantity - quantity;
        if new_quantity < 0 {
            return Err(InvestmentError::InvalidData(
                "Sell would drive quantity negative".to_string(),
            ));
        }
        Ok(Self {
            quantity: new_quantity,
            total_cost: self.total_cost - cost_basis,
            realized_pnl: self.realized_pnl + realized_delta,
            ..*self
        })
    }

    pub fn after_sell_reversal(
        &self,
        quantity: i64,
        cost_basis: i64,
        realized_delta: i64,
    ) -> Self {
        Self {
            quantity: self.quantity + quantity,
            total_cost: self.total_cost + cost_basis,
            realized_pnl: self.realized_pnl - realized_delta,
            ..*self
        }
    }

    /// Dividend: a pure credit to the dividend aggregate
    pub fn after_dividend(&self, amount: i64) -> Self {
        Self {
            total_dividends: self.total_dividends + amount,
            ..*self
        }
    }

    pub fn after_dividend_reversal(&self, amount: i64) -> Self {
        Self {
            total_dividends: self.total_dividends - amount,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixed_point::QUANTITY_SCALE;
    use chrono::NaiveDateTime;

    fn lot(id: &str, remaining: i64, unit_cost: i64) -> Lot {
        Lot {
            id: id.to_string(),
            investment_id: "inv-1".to_string(),
            quantity: remaining,
            remaining_quantity: remaining,
            unit_cost,
            acquired_at: NaiveDateTime::default(),
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn fifo_consumes_oldest_lots_first() {
        // Lots at costs [10, 12, 15] with 5 units each, oldest first.
        // Selling 8 takes all 5 of the first and 3 of the second:
        // basis = 5*10 + 3*12 = 86.
        let lots = vec![
            lot("a", 5 * QUANTITY_SCALE, 10),
            lot("b", 5 * QUANTITY_SCALE, 12),
            lot("c", 5 * QUANTITY_SCALE, 15),
        ];

        let plan = plan_fifo_sale("inv-1", &lots, 8 * QUANTITY_SCALE).unwrap();

        assert_eq!(plan.consumptions.len(), 2);
        assert_eq!(plan.consumptions[0].lot_id, "a");
        assert_eq!(plan.consumptions[0].quantity, 5 * QUANTITY_SCALE);
        assert_eq!(plan.consumptions[1].lot_id, "b");
        assert_eq!(plan.consumptions[1].quantity, 3 * QUANTITY_SCALE);
        assert_eq!(plan.cost_basis, 86);
    }

    #[test]
    fn fifo_skips_drained_lots() {
        let mut first = lot("a", 5 * QUANTITY_SCALE, 10);
        first.remaining_quantity = 0;
        let lots = vec![first, lot("b", 5 * QUANTITY_SCALE, 12)];

        let plan = plan_fifo_sale("inv-1", &lots, 2 * QUANTITY_SCALE).unwrap();

        assert_eq!(plan.consumptions.len(), 1);
        assert_eq!(plan.consumptions[0].lot_id, "b");
        assert_eq!(plan.cost_basis, 24);
    }

    #[test]
    fn fifo_rejects_oversell_without_state_change() {
        let lots = vec![lot("a", 5 * QUANTITY_SCALE, 10)];

        let err = plan_fifo_sale("inv-1", &lots, 6 * QUANTITY_SCALE).unwrap_err();

        match err {
            InvestmentError::InsufficientQuantity {
                held, requested, ..
            } => {
                assert_eq!(held, 5 * QUANTITY_SCALE);
                assert_eq!(requested, 6 * QUANTITY_SCALE);
            }
            other => panic!("expected InsufficientQuantity, got {other:?}"),
        }
    }

    #[test]
    fn reversal_reproduces_totals_exactly() {
        let start = PositionTotals {
            quantity: 7 * QUANTITY_SCALE,
            total_cost: 350_000,
            realized_pnl: 1_234,
            total_dividends: 500,
        };

        let bought = start.after_buy(5 * QUANTITY_SCALE, 250_000);
        assert_eq!(
            bought.after_buy_reversal(5 * QUANTITY_SCALE, 250_000).unwrap(),
            start
        );

        let sold = start.after_sell(2 * QUANTITY_SCALE, 100_000, 20_000).unwrap();
        assert_eq!(
            sold.after_sell_reversal(2 * QUANTITY_SCALE, 100_000, 20_000),
            start
        );

        let credited = start.after_dividend(10_000);
        assert_eq!(credited.after_dividend_reversal(10_000), start);
    }

    #[test]
    fn average_cost_is_derived_from_the_integers() {
        let totals = PositionTotals {
            quantity: 4 * QUANTITY_SCALE,
            total_cost: 200_000,
            realized_pnl: 0,
            total_dividends: 0,
        };
        assert_eq!(totals.average_cost(), 50_000.0);

        let empty = PositionTotals {
            quantity: 0,
            total_cost: 0,
            realized_pnl: 0,
            total_dividends: 0,
        };
        assert_eq!(empty.average_cost(), 0.0);
    }
}
